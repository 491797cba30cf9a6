use serde::{Deserialize, Serialize};
use std::{fs::File, io, path::PathBuf};

use crate::{cmd::GlobalArgs, util};

pub const APP_NAME: &str = "hoist";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default = "GlobalConfig::default_storage_dir")]
    pub storage_dir: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            storage_dir: Self::default_storage_dir(),
        }
    }
}

impl GlobalConfig {
    pub const FILENAME: &str = "hoist-cli.toml";

    pub fn filepath() -> PathBuf {
        let dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.join(APP_NAME).join(Self::FILENAME)
    }

    fn default_storage_dir() -> PathBuf {
        let dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.join(APP_NAME)
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_file_or_default() -> Self {
        let path = Self::filepath();
        let toml_str = match File::open(&path).and_then(io::read_to_string) {
            Ok(toml) => toml,
            _ => return GlobalConfig::default(),
        };
        Self::from_toml(&toml_str).unwrap_or_else(|e| {
            log::error!(
                "Invalid config '{:?}': {:#}",
                util::replace_homedir_to_tilde(path),
                e
            );
            std::process::exit(1)
        })
    }

    pub fn with_args(mut self, args: &GlobalArgs) -> Self {
        let GlobalArgs {
            subcmd: _,
            storage_dir,
        } = args;

        if let Some(d) = storage_dir {
            self.storage_dir = d.clone();
        }
        self
    }

    pub fn from_file_and_args(args: &GlobalArgs) -> Self {
        Self::from_file_or_default().with_args(args)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cmd::Subcommand;

    #[test]
    fn empty_file_uses_default_storage_dir() {
        let cfg = GlobalConfig::from_toml("").unwrap();
        assert_eq!(cfg.storage_dir, GlobalConfig::default().storage_dir);
    }

    #[test]
    fn storage_dir_arg_overrides_file() {
        let cfg = GlobalConfig::from_toml(r#"storage_dir = "/var/lib/hoist""#).unwrap();
        assert_eq!(cfg.storage_dir, PathBuf::from("/var/lib/hoist"));

        let args = GlobalArgs {
            subcmd: Subcommand::Flush(crate::cmd::flush::Args {}),
            storage_dir: Some(PathBuf::from("/tmp/hoist")),
        };
        let cfg = cfg.with_args(&args);
        assert_eq!(cfg.storage_dir, PathBuf::from("/tmp/hoist"));
    }
}

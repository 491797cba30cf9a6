use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::result::Result as StdResult;

use anyhow::Context as _;
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::credential::{ConfigSink, CredValue, FieldKind, ValueSet};

/// Deployment settings read from `hoist.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,

    /// Connections active when none is named on the command line.
    #[serde(default)]
    pub default: Vec<String>,

    #[serde(default)]
    pub scm: ScmConfig,

    #[serde(default)]
    pub connections: BTreeMap<String, ConnectionEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScmConfig {
    pub repository: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,

    /// Forces whether a username and password are asked for.
    pub needs_credentials: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConnectionEntry {
    #[serde(default)]
    pub servers: Vec<ValueSet>,
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "hoist.toml";

    pub fn example_toml() -> String {
        let file = Asset::get(Self::FILENAME).unwrap();
        std::str::from_utf8(file.data.as_ref()).unwrap().to_owned()
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Find config file ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let cur_dir = cur_dir.as_ref();
        cur_dir
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
            .with_context(|| {
                format!(
                    "Not in a hoist project dir: Cannot find '{}'",
                    Self::FILENAME
                )
            })
    }

    pub fn from_file_finding_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_filepath = Config::find_file_in_ancestors(cur_dir)?;
        Self::from_toml_file(config_filepath)
    }

    /// Name identifying this project in local storage.
    ///
    /// Built from the full (canonical when possible) path of the config's
    /// directory, so same-named folders in different places never share one.
    /// Path components are joined with `_`; bytes outside `[A-Za-z0-9.-]`
    /// are written as `+XX`.
    pub fn storage_key(&self) -> String {
        let Some(dir) = self.source_config_file.as_deref().and_then(Path::parent) else {
            return "default".to_owned();
        };
        let dir = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());

        let mut key = String::new();
        for part in dir.components().filter(|c| !matches!(c, Component::RootDir)) {
            if !key.is_empty() {
                key.push('_');
            }
            for b in part.as_os_str().to_string_lossy().bytes() {
                match b {
                    b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'-' => key.push(b as char),
                    _ => key.push_str(&format!("+{:02X}", b)),
                }
            }
        }
        if key.is_empty() {
            key.push_str("root");
        }
        key
    }
}

impl ScmConfig {
    pub fn to_value_set(&self) -> ValueSet {
        let text = |v: &Option<String>| v.clone().map(CredValue::Text);
        [
            (FieldKind::Repository, text(&self.repository)),
            (FieldKind::Username, text(&self.username)),
            (FieldKind::Password, text(&self.password)),
        ]
        .into_iter()
        .collect()
    }
}

/// Key/value settings for the current run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    entries: BTreeMap<String, Option<CredValue>>,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&CredValue> {
        self.entries.get(key).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&CredValue>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

impl ConfigSink for RuntimeConfig {
    fn set(&mut self, key: &str, value: Option<CredValue>) {
        self.entries.insert(key.to_owned(), value);
    }
}

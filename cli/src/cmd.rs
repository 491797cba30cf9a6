pub mod credentials;
pub mod flush;
pub mod init;

use std::path::PathBuf;

use anyhow::Context as _;
use hoist_core::{storage::LocalStorage, Config};

use crate::{config::GlobalConfig, util};

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// Where answered credentials are remembered.
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    Init(init::Args),

    #[command(alias("creds"))]
    Credentials(credentials::Args),

    Flush(flush::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Init(args) => init::exec(args, self),
            Credentials(args) => credentials::exec(args, self),
            Flush(args) => flush::exec(args, self),
        }
    }
}

/// Loads the project config around the current dir and its local storage.
pub(crate) fn open_project(global_args: &GlobalArgs) -> anyhow::Result<(Config, LocalStorage)> {
    let cfg = Config::from_file_finding_in_ancestors(util::current_dir())?;
    let global = GlobalConfig::from_file_and_args(global_args);
    let storage = LocalStorage::open(&global.storage_dir, &cfg.storage_key())
        .context("Failed to open local storage")?;
    log::debug!(
        "Using {:?} with storage {:?}",
        cfg.source_config_file,
        util::replace_homedir_to_tilde(storage.file())
    );
    Ok((cfg, storage))
}

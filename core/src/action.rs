pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
use std::path::Path;

use error::*;

use crate::config::{Config, RuntimeConfig};
use crate::connection::Connections;
use crate::credential::{CredentialResolver, Prompter, Services, TargetHandle, ValueSet};
use crate::flags::CommandFlags;
use crate::paths::HomeKeyPaths;
use crate::repository::ScmRepository;
use crate::storage::LocalStorage;

/// Which targets a run resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    All,
    RepositoryOnly,
    ServersOnly,
}

#[derive(Debug, Clone, Default)]
pub struct Resolved {
    pub repository: Option<ValueSet>,
    pub servers: Vec<(TargetHandle, ValueSet)>,
    pub current_connection: Option<TargetHandle>,
    pub runtime: RuntimeConfig,
}

pub fn init_hoist_project(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    if let Ok(config_filepath) = Config::find_file_in_ancestors(dir) {
        let path = if config_filepath.is_relative() && !config_filepath.starts_with("./") {
            Path::new("./").join(config_filepath)
        } else {
            config_filepath
        };
        bail!(
            "Already a hoist project.\nIf it's intentional, remove {:?} and then try again.",
            path
        );
    }

    let config_filepath = dir.join(Config::FILENAME);
    fsutil::write_with_mkdir(config_filepath, Config::example_toml())
        .context("Failed to init hoist project")?;
    Ok(())
}

/// Resolves and persists the repository and/or server credentials of `cfg`.
pub fn resolve_credentials(
    cfg: &Config,
    flags: &CommandFlags,
    storage: &mut LocalStorage,
    prompter: &mut dyn Prompter,
    scope: Scope,
) -> Result<Resolved> {
    let repository = ScmRepository::from_config(&cfg.scm, storage.credentials());
    let mut connections = Connections::from_config(cfg, storage.connections());
    let mut runtime = RuntimeConfig::new();

    let mut resolver = CredentialResolver::new(Services {
        flags,
        prompter,
        connections: &mut connections,
        repository: &repository,
        storage,
        config: &mut runtime,
        paths: &HomeKeyPaths,
    });

    let mut resolved = Resolved::default();
    if scope != Scope::ServersOnly {
        let values = resolver
            .resolve_repository_credentials()
            .context("Failed to resolve repository credentials")?;
        resolved.repository = Some(values);
    }
    if scope != Scope::RepositoryOnly {
        resolved.servers = resolver
            .resolve_server_credentials()
            .context("Failed to resolve server credentials")?;
    }
    drop(resolver);

    resolved.current_connection = connections.current().cloned();
    resolved.runtime = runtime;
    Ok(resolved)
}

/// Returns whether anything was stored.
pub fn flush(storage: &mut LocalStorage) -> Result<bool> {
    storage.destroy().with_context(|| {
        format!(
            "Failed to remove stored credentials {:?}",
            storage.file()
        )
    })
}

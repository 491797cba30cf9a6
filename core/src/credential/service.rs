//! Narrow interfaces to everything the resolver reads from or writes to.

use std::{collections::HashMap, io};

use super::{CredValue, FieldKind, TargetHandle, ValueSet};
use crate::repository::ScmRepository;

/// Values given on the command line.
pub trait FlagSource {
    fn flag(&self, field: FieldKind) -> Option<CredValue>;

    /// Explicit private key path.
    fn key_path(&self) -> Option<String>;

    /// Connections named with `--on`.
    fn on(&self) -> Option<Vec<String>>;
}

/// Blocking interactive prompts.
pub trait Prompter {
    fn ask_with(&mut self, question: &str, default: Option<&str>) -> io::Result<String>;

    fn ask_secretly(&mut self, question: &str) -> io::Result<String>;

    /// Single choice among `choices`; returns the chosen entry.
    fn ask_choice(&mut self, question: &str, default: &str, choices: &[&str])
        -> io::Result<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub servers: Vec<ValueSet>,
}

pub type ConnectionMap = HashMap<String, ConnectionConfig>;

pub trait ConnectionRegistry {
    /// Every configured connection.
    fn available_connections(&self) -> ConnectionMap;

    /// Active connection names, in declaration order.
    fn connections(&self) -> Vec<String>;

    fn set_connections(&mut self, names: Vec<String>);

    fn set_connection(&mut self, handle: &TargetHandle);
}

pub trait RepositorySource {
    fn current_repository(&self) -> ScmRepository;
}

/// Durable storage of resolved values.
pub trait CredentialStore {
    fn set_credentials(&mut self, values: &ValueSet) -> fsutil::Result<()>;

    fn create_connection_key(&self, name: &str, server: Option<usize>) -> TargetHandle {
        TargetHandle::connection(name, server)
    }

    fn sync_connection_credentials(
        &mut self,
        handle: &TargetHandle,
        values: &ValueSet,
    ) -> fsutil::Result<()>;
}

/// Runtime configuration the resolved repository values are written into.
pub trait ConfigSink {
    fn set(&mut self, key: &str, value: Option<CredValue>);
}

pub trait KeyPaths {
    fn default_key_path(&self) -> String;
}

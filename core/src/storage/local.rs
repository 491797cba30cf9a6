use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::credential::{CredentialStore, TargetHandle, ValueSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credentials: Option<ValueSet>,

    #[serde(default)]
    connections: BTreeMap<String, ValueSet>,
}

/// Per-project JSON file remembering what the operator answered.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    file: PathBuf,
    doc: Document,
}

impl LocalStorage {
    pub fn filename(project: &str) -> String {
        format!("{}.json", project)
    }

    /// Opens the storage of `project` under `dir`, empty if nothing was saved yet.
    pub fn open(dir: impl AsRef<Path>, project: &str) -> fsutil::Result<Self> {
        let file = dir.as_ref().join(Self::filename(project));
        let doc = if file.is_file() {
            fsutil::read_json_with_deserialize(&file)?
        } else {
            Document::default()
        };
        Ok(Self { file, doc })
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Repository values from a previous run.
    pub fn credentials(&self) -> Option<&ValueSet> {
        self.doc.credentials.as_ref()
    }

    /// Server values from previous runs, by handle.
    pub fn connections(&self) -> Vec<(TargetHandle, &ValueSet)> {
        self.doc
            .connections
            .iter()
            .filter_map(|(key, values)| match key.parse::<TargetHandle>() {
                Ok(handle) => Some((handle, values)),
                Err(e) => {
                    log::warn!("Ignoring stored credentials: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Forgets everything. Returns whether a file was removed.
    pub fn destroy(&mut self) -> fsutil::Result<bool> {
        self.doc = Document::default();
        if !self.file.is_file() {
            return Ok(false);
        }
        fsutil::remove_file(&self.file)?;
        Ok(true)
    }

    fn save(&self) -> fsutil::Result<()> {
        log::debug!("Saving credentials to {:?}", self.file);
        fsutil::write_json_with_mkdir(&self.file, &self.doc)
    }
}

impl CredentialStore for LocalStorage {
    fn set_credentials(&mut self, values: &ValueSet) -> fsutil::Result<()> {
        self.doc.credentials = Some(values.clone());
        self.save()
    }

    fn sync_connection_credentials(
        &mut self,
        handle: &TargetHandle,
        values: &ValueSet,
    ) -> fsutil::Result<()> {
        self.doc
            .connections
            .insert(handle.to_string(), values.clone());
        self.save()
    }
}

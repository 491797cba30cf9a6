use std::path::PathBuf;

use crate::credential::KeyPaths;

/// Conventional key location under the user's home dir.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeKeyPaths;

impl HomeKeyPaths {
    pub fn default_key_file() -> PathBuf {
        let ssh = PathBuf::from(".ssh").join("id_rsa");
        match dirs::home_dir() {
            Some(home) => home.join(ssh),
            None => PathBuf::from("~").join(ssh),
        }
    }
}

impl KeyPaths for HomeKeyPaths {
    fn default_key_path(&self) -> String {
        Self::default_key_file().to_string_lossy().into_owned()
    }
}

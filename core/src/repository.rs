use crate::config::ScmConfig;
use crate::credential::{FieldKind, RepositorySource, ValueSet};

/// The source repository being deployed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScmRepository {
    values: ValueSet,
    needs_credentials: Option<bool>,
}

impl ScmRepository {
    pub fn new(values: ValueSet) -> Self {
        Self {
            values,
            needs_credentials: None,
        }
    }

    /// Configured values, overridden by what a previous run stored.
    pub fn from_config(cfg: &ScmConfig, stored: Option<&ValueSet>) -> Self {
        let mut values = cfg.to_value_set();
        if let Some(stored) = stored {
            values.overlay(stored);
        }
        Self {
            values,
            needs_credentials: cfg.needs_credentials,
        }
    }

    /// Overrides the detection done by [`Self::needs_credentials`].
    pub fn requiring_credentials(mut self, required: bool) -> Self {
        self.needs_credentials = Some(required);
        self
    }

    pub fn url(&self) -> Option<&str> {
        self.values.get_text(FieldKind::Repository)
    }

    pub fn to_value_set(&self) -> ValueSet {
        self.values.clone()
    }

    /// Only http(s) remotes authenticate with a username and password,
    /// unless configured otherwise.
    ///
    /// ```
    /// use hoist_core::credential::{CredValue, FieldKind};
    /// use hoist_core::repository::ScmRepository;
    ///
    /// let repo = |url: &str| {
    ///     ScmRepository::new([(FieldKind::Repository, CredValue::text(url))].into_iter().collect())
    /// };
    /// assert!(repo("https://github.com/acme/site.git").needs_credentials());
    /// assert!(!repo("git@github.com:acme/site.git").needs_credentials());
    /// ```
    pub fn needs_credentials(&self) -> bool {
        if let Some(required) = self.needs_credentials {
            return required;
        }
        self.url()
            .map(|url| url.starts_with("https://") || url.starts_with("http://"))
            .unwrap_or(false)
    }
}

impl RepositorySource for ScmRepository {
    fn current_repository(&self) -> ScmRepository {
        self.clone()
    }
}

impl From<ValueSet> for ScmRepository {
    fn from(values: ValueSet) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::credential::CredValue;

    #[test]
    fn stored_values_override_blank_config() {
        let cfg = ScmConfig {
            repository: Some("https://example.com/app.git".to_owned()),
            username: Some("".to_owned()),
            password: None,
            needs_credentials: None,
        };
        let stored: ValueSet = [
            (FieldKind::Username, CredValue::text("bob")),
            (FieldKind::Password, CredValue::text("hunter2")),
        ]
        .into_iter()
        .collect();

        let repo = ScmRepository::from_config(&cfg, Some(&stored));
        assert!(repo.needs_credentials());
        assert_eq!(repo.url(), Some("https://example.com/app.git"));

        let values = repo.to_value_set();
        assert_eq!(values.get_text(FieldKind::Username), Some("bob"));
        assert_eq!(values.get_text(FieldKind::Password), Some("hunter2"));
    }

    #[test]
    fn no_url_needs_no_credentials() {
        assert!(!ScmRepository::default().needs_credentials());
    }

    #[test]
    fn explicit_setting_wins_over_url() {
        let cfg = ScmConfig {
            repository: Some("git@example.com:app.git".to_owned()),
            needs_credentials: Some(true),
            ..Default::default()
        };
        assert!(ScmRepository::from_config(&cfg, None).needs_credentials());

        let repo = ScmRepository::from_config(&cfg, None).requiring_credentials(false);
        assert!(!repo.needs_credentials());
    }
}

use std::{fmt, str::FromStr};

use super::FieldKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Server,
    Repository,
}

const SERVER_RULES: &[(FieldKind, bool)] = &[
    (FieldKind::Host, true),
    (FieldKind::Username, true),
    (FieldKind::Password, false),
    (FieldKind::Keyphrase, false),
    (FieldKind::Key, false),
    (FieldKind::Agent, false),
    (FieldKind::AgentForward, false),
];

const REPOSITORY_RULES: &[(FieldKind, bool)] = &[
    (FieldKind::Repository, true),
    (FieldKind::Username, false),
    (FieldKind::Password, false),
];

/// Required/optional table for one resolution call.
///
/// The templates are constants; every call works on its own copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    kind: TargetKind,
    rules: Vec<(FieldKind, bool)>,
}

impl RuleSet {
    pub fn for_kind(kind: TargetKind) -> Self {
        let rules = match kind {
            TargetKind::Server => SERVER_RULES,
            TargetKind::Repository => REPOSITORY_RULES,
        };
        Self {
            kind,
            rules: rules.to_vec(),
        }
    }

    #[inline]
    pub fn server() -> Self {
        Self::for_kind(TargetKind::Server)
    }

    #[inline]
    pub fn repository() -> Self {
        Self::for_kind(TargetKind::Repository)
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Marks `field` as required. Fields outside the table are ignored.
    pub fn require(&mut self, field: FieldKind) {
        if let Some((_, required)) = self.rules.iter_mut().find(|(f, _)| *f == field) {
            *required = true;
        }
    }

    pub fn is_required(&self, field: FieldKind) -> bool {
        self.rules.iter().any(|&(f, required)| f == field && required)
    }

    pub fn contains(&self, field: FieldKind) -> bool {
        self.rules.iter().any(|&(f, _)| f == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKind, bool)> + '_ {
        self.rules.iter().copied()
    }
}

/// Identifies what credentials are being resolved for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetHandle {
    Repository,
    Connection { name: String, server: Option<usize> },
}

impl TargetHandle {
    pub const REPOSITORY: &str = "repository";

    pub fn connection(name: impl Into<String>, server: Option<usize>) -> Self {
        Self::Connection {
            name: name.into(),
            server,
        }
    }
}

impl fmt::Display for TargetHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Repository => f.write_str(Self::REPOSITORY),
            Self::Connection { name, server: None } => f.write_str(name),
            Self::Connection {
                name,
                server: Some(i),
            } => write!(f, "{}#{}", name, i),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid target handle '{0}'")]
pub struct InvalidHandle(String);

impl FromStr for TargetHandle {
    type Err = InvalidHandle;

    /// ```
    /// use hoist_core::credential::TargetHandle;
    ///
    /// let h: TargetHandle = "production#1".parse().unwrap();
    /// assert_eq!(h, TargetHandle::connection("production", Some(1)));
    /// assert_eq!(h.to_string(), "production#1");
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::REPOSITORY {
            return Ok(Self::Repository);
        }
        let (name, server) = match s.rsplit_once('#') {
            Some((name, idx)) => {
                let idx = idx.parse().map_err(|_| InvalidHandle(s.to_owned()))?;
                (name, Some(idx))
            }
            None => (s, None),
        };
        if name.is_empty() {
            return Err(InvalidHandle(s.to_owned()));
        }
        Ok(Self::connection(name, server))
    }
}

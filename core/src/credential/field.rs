/// A credential field the resolver knows how to fill.
///
/// The string form is kebab-case (`agent-forward`), which is also the
/// key used in config files, local storage and CLI flags.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum FieldKind {
    Host,
    Username,
    Password,
    Keyphrase,
    Key,
    Agent,
    AgentForward,
    Repository,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Fields asked with a masked prompt.
    pub const fn is_secret(&self) -> bool {
        use FieldKind::*;
        matches!(self, Password | Keyphrase)
    }

    /// Fields belonging to one of the mutually exclusive auth mechanisms.
    pub const fn is_auth(&self) -> bool {
        use FieldKind::*;
        matches!(self, Key | Password | Keyphrase | Agent | AgentForward)
    }

    /// Fields holding a yes/no decision rather than text.
    pub const fn is_switch(&self) -> bool {
        use FieldKind::*;
        matches!(self, Agent | AgentForward)
    }
}

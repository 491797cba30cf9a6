use crate::credential::{CredValue, FieldKind, FlagSource};

/// Credential values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandFlags {
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub keyphrase: Option<String>,
    pub key: Option<String>,
    pub agent: Option<bool>,
    pub agent_forward: Option<bool>,
    pub repository: Option<String>,
    pub on: Vec<String>,
}

impl FlagSource for CommandFlags {
    fn flag(&self, field: FieldKind) -> Option<CredValue> {
        use FieldKind::*;
        let text = |v: &Option<String>| v.clone().map(CredValue::Text);
        match field {
            Host => text(&self.host),
            Username => text(&self.username),
            Password => text(&self.password),
            Keyphrase => text(&self.keyphrase),
            Key => text(&self.key),
            Repository => text(&self.repository),
            Agent => self.agent.map(CredValue::Flag),
            AgentForward => self.agent_forward.map(CredValue::Flag),
        }
    }

    fn key_path(&self) -> Option<String> {
        self.key.clone()
    }

    fn on(&self) -> Option<Vec<String>> {
        let names: Vec<String> = self
            .on
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();
        (!names.is_empty()).then_some(names)
    }
}

use super::{
    auth::AuthPlan,
    error::*,
    service::*,
    CredValue, FieldKind, PromptNeed, RuleSet, TargetHandle, ValueSet,
};

/// The collaborators one resolution borrows.
pub struct Services<'a> {
    pub flags: &'a dyn FlagSource,
    pub prompter: &'a mut dyn Prompter,
    pub connections: &'a mut dyn ConnectionRegistry,
    pub repository: &'a dyn RepositorySource,
    pub storage: &'a mut dyn CredentialStore,
    pub config: &'a mut dyn ConfigSink,
    pub paths: &'a dyn KeyPaths,
}

/// Decides which credential values are already known and asks for the rest.
pub struct CredentialResolver<'a> {
    pub(super) s: Services<'a>,
}

impl<'a> CredentialResolver<'a> {
    pub const DEFAULT_CONNECTION: &'static str = "production";

    pub fn new(services: Services<'a>) -> Self {
        Self { s: services }
    }

    pub fn resolve_repository_credentials(&mut self) -> Result<ValueSet> {
        let repo = self.s.repository.current_repository();

        let mut rules = RuleSet::repository();
        if repo.needs_credentials() {
            rules.require(FieldKind::Username);
            rules.require(FieldKind::Password);
        }

        let handle = TargetHandle::Repository;
        let values = self.gather_credentials(rules, &repo.to_value_set(), &handle)?;

        self.s.storage.set_credentials(&values)?;
        for (field, value) in &values {
            self.s.config.set(&format!("scm.{}", field), value.clone());
        }
        log::info!("Resolved credentials for [{}]", handle);
        Ok(values)
    }

    pub fn resolve_server_credentials(&mut self) -> Result<Vec<(TargetHandle, ValueSet)>> {
        if let Some(names) = self.s.flags.on() {
            self.s.connections.set_connections(names);
        }

        let available = self.s.connections.available_connections();
        let active = self.s.connections.connections();

        if available.is_empty() || active.is_empty() {
            let name = self.ask(
                "No connections have been set, please create one:",
                Some(Self::DEFAULT_CONNECTION),
            )?;
            let name = match name.trim() {
                "" => Self::DEFAULT_CONNECTION,
                name => name,
            };
            return Ok(vec![self.resolve_connection_credentials(name, None)?]);
        }

        let mut resolved = Vec::new();
        for name in active {
            let servers = available.get(&name).map_or(0, |c| c.servers.len());
            if servers == 0 {
                log::debug!("Connection '{}' has no servers", name);
            }
            for server in 0..servers {
                resolved.push(self.resolve_connection_credentials(&name, Some(server))?);
            }
        }
        Ok(resolved)
    }

    /// Resolves one connection/server pair.
    /// Without a server index the connection's first server configuration is used, if any.
    pub fn resolve_connection_credentials(
        &mut self,
        name: &str,
        server: Option<usize>,
    ) -> Result<(TargetHandle, ValueSet)> {
        let current = self
            .s
            .connections
            .available_connections()
            .remove(name)
            .and_then(|c| c.servers.into_iter().nth(server.unwrap_or(0)))
            .unwrap_or_default();

        let handle = self.s.storage.create_connection_key(name, server);
        let values = self.gather_credentials(RuleSet::server(), &current, &handle)?;

        self.s.storage.sync_connection_credentials(&handle, &values)?;
        self.s.connections.set_connection(&handle);
        log::info!("Resolved credentials for [{}]", handle);
        Ok((handle, values))
    }

    pub fn gather_credentials(
        &mut self,
        rules: RuleSet,
        current: &ValueSet,
        handle: &TargetHandle,
    ) -> Result<ValueSet> {
        let AuthPlan { rules, unprompted } = self.alter_rules(rules, current, handle)?;

        let mut values = ValueSet::new();
        for (field, required) in rules.iter() {
            let value = self.get_credential(current, field);
            let need = PromptNeed::classify(value.as_ref());

            let missing = matches!(need, PromptNeed::Absent | PromptNeed::Empty);
            let prompt =
                !unprompted.contains(&field) && (need.should_prompt() || (required && missing));
            log::debug!(
                "[{}] {}: {:?} (required={}, prompt={})",
                handle,
                field,
                need,
                required,
                prompt
            );

            let value = if !prompt {
                value
            } else if field.is_auth() {
                Some(self.gather_auth_credential(handle, field)?)
            } else {
                Some(self.gather_credential(handle, field, None)?)
            };
            values.insert(field, value);
        }
        Ok(values)
    }

    /// Looks `field` up in `current`, falling back to its flag.
    /// Placeholders count as unset.
    pub fn get_credential(&self, current: &ValueSet, field: FieldKind) -> Option<CredValue> {
        match current.get(field) {
            Some(v) if v.is_placeholder() => self.s.flags.flag(field),
            Some(v) if v.is_truthy() || *v == CredValue::Flag(false) => Some(v.clone()),
            stored => self.s.flags.flag(field).or_else(|| stored.cloned()),
        }
    }

    pub fn gather_auth_credential(
        &mut self,
        handle: &TargetHandle,
        field: FieldKind,
    ) -> Result<CredValue> {
        use FieldKind::*;
        match field {
            Keyphrase => self.gather_credential(
                handle,
                field,
                Some("If a keyphrase is required, provide it:"),
            ),
            Key => {
                if let Some(path) = self.s.flags.key_path().filter(|p| !p.is_empty()) {
                    return Ok(CredValue::Text(path));
                }
                let default = self.s.paths.default_key_path();
                let question = format!("Please enter the full path to your key for [{}]:", handle);
                self.ask(&question, Some(default.as_str()))
                    .map(CredValue::Text)
            }
            Agent | AgentForward => {
                if let Some(v) = self.s.flags.flag(field) {
                    return Ok(v);
                }
                let question = match field {
                    Agent => format!("Use the SSH agent for [{}]?", handle),
                    _ => format!("Forward the SSH agent for [{}]?", handle),
                };
                let answer = self.ask_choice(&question, "no", &["yes", "no"])?;
                Ok(CredValue::Flag(answer == "yes"))
            }
            _ => self.gather_credential(handle, field, None),
        }
    }

    pub fn gather_credential(
        &mut self,
        handle: &TargetHandle,
        field: FieldKind,
        question: Option<&str>,
    ) -> Result<CredValue> {
        if let Some(v) = self.s.flags.flag(field).filter(CredValue::is_truthy) {
            return Ok(v);
        }

        let question = match question {
            Some(q) => q.to_owned(),
            None => format!("No {} is set for [{}], please provide one:", field, handle),
        };
        let answer = if field.is_secret() {
            self.ask_secretly(&question)?
        } else {
            self.ask(&question, None)?
        };
        Ok(CredValue::Text(answer))
    }

    pub(super) fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        self.s
            .prompter
            .ask_with(question, default)
            .map_err(|source| prompt_error(question, source))
    }

    pub(super) fn ask_secretly(&mut self, question: &str) -> Result<String> {
        self.s
            .prompter
            .ask_secretly(question)
            .map_err(|source| prompt_error(question, source))
    }

    pub(super) fn ask_choice(
        &mut self,
        question: &str,
        default: &str,
        choices: &[&str],
    ) -> Result<String> {
        self.s
            .prompter
            .ask_choice(question, default, choices)
            .map_err(|source| prompt_error(question, source))
    }
}

fn prompt_error(question: &str, source: std::io::Error) -> Error {
    Error::Prompt {
        question: question.to_owned(),
        source,
    }
}

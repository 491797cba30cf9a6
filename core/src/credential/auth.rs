use std::collections::HashSet;

use super::{
    error::Result, CredValue, CredentialResolver, FieldKind, RuleSet, TargetHandle, TargetKind,
    ValueSet,
};

/// Outcome of auth-type detection for a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    Key,
    Password,
}

/// Effective rules for one call, plus fields that must never be prompted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPlan {
    pub rules: RuleSet,
    pub unprompted: HashSet<FieldKind>,
}

impl CredentialResolver<'_> {
    /// Picks one of agent, key+keyphrase or password for a server target.
    pub fn alter_rules(
        &mut self,
        mut rules: RuleSet,
        current: &ValueSet,
        handle: &TargetHandle,
    ) -> Result<AuthPlan> {
        use FieldKind::*;

        let mut unprompted = HashSet::new();
        if rules.kind() == TargetKind::Repository {
            return Ok(AuthPlan { rules, unprompted });
        }

        let agent = self.get_credential(current, Agent);
        if agent.as_ref().map_or(false, CredValue::is_truthy) {
            log::debug!("[{}] authenticating through the SSH agent", handle);
            unprompted.extend([Agent, AgentForward]);
            return Ok(AuthPlan { rules, unprompted });
        }

        match self.uses_ssh(handle, current)? {
            AuthMethod::Key => {
                rules.require(Key);
                rules.require(Keyphrase);
                unprompted.insert(Password);
            }
            AuthMethod::Password => {
                rules.require(Password);
                unprompted.extend([Key, Keyphrase]);
            }
        }
        Ok(AuthPlan { rules, unprompted })
    }

    /// Infers the auth method from known values, asking only when none is known.
    pub fn uses_ssh(&mut self, handle: &TargetHandle, current: &ValueSet) -> Result<AuthMethod> {
        use FieldKind::*;

        let known = |field| {
            self.get_credential(current, field)
                .map_or(false, |v| v.is_truthy())
        };
        let (key, password, agent) = (known(Key), known(Password), known(Agent));

        if key {
            return Ok(AuthMethod::Key);
        }
        if password || agent {
            return Ok(AuthMethod::Password);
        }

        let question = format!(
            "No password or SSH key is set for [{}], which would you use?",
            handle
        );
        let answer = self.ask_choice(&question, "key", &["key", "password", "agent"])?;
        Ok(match answer.as_str() {
            "key" => AuthMethod::Key,
            _ => AuthMethod::Password,
        })
    }
}

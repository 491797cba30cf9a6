#![allow(dead_code)]

use std::{collections::VecDeque, io};

use hoist_core::config::RuntimeConfig;
use hoist_core::connection::Connections;
use hoist_core::credential::*;
use hoist_core::flags::CommandFlags;
use hoist_core::repository::ScmRepository;

pub const KEY_PATH: &str = "/home/deploy/.ssh/id_rsa";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asked {
    Text(String, Option<String>),
    Secret(String),
    Choice(String, String, Vec<String>),
}

/// Answers questions from a fixed script and remembers them.
/// Running out of answers behaves like a closed stdin.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub asked: Vec<Asked>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|&s| s.to_owned()).collect(),
            asked: Vec::new(),
        }
    }

    pub fn questions(&self) -> Vec<&str> {
        self.asked
            .iter()
            .map(|a| match a {
                Asked::Text(q, _) | Asked::Secret(q) | Asked::Choice(q, _, _) => q.as_str(),
            })
            .collect()
    }

    fn next(&mut self) -> io::Result<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more answers"))
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_with(&mut self, question: &str, default: Option<&str>) -> io::Result<String> {
        self.asked
            .push(Asked::Text(question.to_owned(), default.map(str::to_owned)));
        let answer = self.next()?;
        Ok(match (answer.is_empty(), default) {
            (true, Some(default)) => default.to_owned(),
            _ => answer,
        })
    }

    fn ask_secretly(&mut self, question: &str) -> io::Result<String> {
        self.asked.push(Asked::Secret(question.to_owned()));
        self.next()
    }

    fn ask_choice(
        &mut self,
        question: &str,
        default: &str,
        choices: &[&str],
    ) -> io::Result<String> {
        self.asked.push(Asked::Choice(
            question.to_owned(),
            default.to_owned(),
            choices.iter().map(|&c| c.to_owned()).collect(),
        ));
        self.next()
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub credentials: Option<ValueSet>,
    pub synced: Vec<(TargetHandle, ValueSet)>,
}

impl CredentialStore for MemoryStore {
    fn set_credentials(&mut self, values: &ValueSet) -> fsutil::Result<()> {
        self.credentials = Some(values.clone());
        Ok(())
    }

    fn sync_connection_credentials(
        &mut self,
        handle: &TargetHandle,
        values: &ValueSet,
    ) -> fsutil::Result<()> {
        self.synced.push((handle.clone(), values.clone()));
        Ok(())
    }
}

pub struct FixedKeyPath;

impl KeyPaths for FixedKeyPath {
    fn default_key_path(&self) -> String {
        KEY_PATH.to_owned()
    }
}

/// Everything a resolver borrows, owned in one place.
#[derive(Default)]
pub struct World {
    pub flags: CommandFlags,
    pub prompter: ScriptedPrompter,
    pub connections: Connections,
    pub repository: ScmRepository,
    pub storage: MemoryStore,
    pub config: RuntimeConfig,
}

impl World {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            prompter: ScriptedPrompter::new(answers),
            ..Default::default()
        }
    }

    pub fn resolver(&mut self) -> CredentialResolver<'_> {
        CredentialResolver::new(Services {
            flags: &self.flags,
            prompter: &mut self.prompter,
            connections: &mut self.connections,
            repository: &self.repository,
            storage: &mut self.storage,
            config: &mut self.config,
            paths: &FixedKeyPath,
        })
    }
}

pub fn values<const N: usize>(pairs: [(FieldKind, CredValue); N]) -> ValueSet {
    pairs.into_iter().collect()
}

pub fn text(s: &str) -> Option<CredValue> {
    Some(CredValue::text(s))
}

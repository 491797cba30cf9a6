//! Resolution of the values needed to act on a server or a repository.
//!
//! For each target, every field of its rule table is either taken from what is
//! already known (stored state, then flags) or asked for interactively.
//! SSH agent, private key and password are mutually exclusive for a server,
//! so one of them is chosen before any field is asked.

pub mod auth;
pub mod error;
pub mod field;
pub mod resolver;
pub mod rule;
pub mod service;
pub mod value;

pub use auth::{AuthMethod, AuthPlan};
pub use error::{Error, Result};
pub use field::FieldKind;
pub use resolver::{CredentialResolver, Services};
pub use rule::{InvalidHandle, RuleSet, TargetHandle, TargetKind};
pub use service::*;
pub use value::{should_prompt_for, CredValue, PromptNeed, ValueSet};

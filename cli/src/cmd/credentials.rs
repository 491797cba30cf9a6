use hoist_core::{
    action::{self, Scope},
    credential::TargetHandle,
    flags::CommandFlags,
    interactive::DialoguerPrompter,
    print_success, style,
};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    #[arg(long)]
    pub keyphrase: Option<String>,

    /// Path to the private key
    #[arg(long)]
    pub key: Option<String>,

    /// Authenticate through the SSH agent
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub agent: Option<bool>,

    /// Forward the SSH agent
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub agent_forward: Option<bool>,

    #[arg(long)]
    pub repository: Option<String>,

    /// Connections to act on (comma separated)
    #[arg(long)]
    pub on: Vec<String>,

    #[arg(long, conflicts_with = "servers_only")]
    pub repository_only: bool,

    #[arg(long)]
    pub servers_only: bool,
}

impl Args {
    fn scope(&self) -> Scope {
        match (self.repository_only, self.servers_only) {
            (true, _) => Scope::RepositoryOnly,
            (_, true) => Scope::ServersOnly,
            _ => Scope::All,
        }
    }

    fn flags(&self) -> CommandFlags {
        CommandFlags {
            host: self.host.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            keyphrase: self.keyphrase.clone(),
            key: self.key.clone(),
            agent: self.agent,
            agent_forward: self.agent_forward,
            repository: self.repository.clone(),
            on: util::split_names(&self.on),
        }
    }
}

pub fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let (cfg, mut storage) = super::open_project(global_args)?;
    let mut prompter = DialoguerPrompter;

    let resolved = action::resolve_credentials(
        &cfg,
        &args.flags(),
        &mut storage,
        &mut prompter,
        args.scope(),
    )?;

    if let Some(values) = &resolved.repository {
        style::print_values(&TargetHandle::Repository, values);
    }
    for (handle, values) in &resolved.servers {
        style::print_values(handle, values);
    }
    if let Some(handle) = &resolved.current_connection {
        log::info!("Current connection: {}", handle);
    }
    print_success!(
        "Credentials saved to {}",
        util::replace_homedir_to_tilde(storage.file()).to_string_lossy()
    );
    Ok(())
}

use hoist_core::{action, print_success};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {}

pub fn exec(_args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let (_cfg, mut storage) = super::open_project(global_args)?;
    let path = util::replace_homedir_to_tilde(storage.file());

    if action::flush(&mut storage)? {
        print_success!("Forgot stored credentials ({})", path.to_string_lossy());
    } else {
        println!("No stored credentials");
    }
    Ok(())
}

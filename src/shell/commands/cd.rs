use async_trait::async_trait;
use log::debug;

use super::{Command, Output, ShellState};
use crate::shell::error::{Result, ShellError};
use crate::vfs::{PathResolver, VirtualPath};

pub struct CdCommand;

#[async_trait]
impl Command for CdCommand {
    fn name(&self) -> &str {
        "cd"
    }

    fn usage(&self) -> &str {
        "cd [DIR] - Change current directory (no argument: go to /)"
    }

    async fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<Output> {
        let Some(target) = args.first() else {
            // cd with no args goes to root without asking the origin
            state.set_cwd(VirtualPath::root());
            return Ok(Output::None);
        };

        let resolved = PathResolver::resolve_relative(state.cwd(), target);
        let listing = state.list_directory(&resolved).await;

        // An empty directory is still a directory
        if !listing.exists() {
            return Err(ShellError::DirectoryNotFound {
                command: "cd",
                target: target.clone(),
            });
        }

        debug!("cd {} -> {resolved}", state.cwd());
        state.set_cwd(resolved);
        Ok(Output::None)
    }
}

use async_trait::async_trait;

use super::{Command, Output, ShellState};
use crate::shell::error::{Result, ShellError};
use crate::vfs::{ListingResult, PathResolver};

pub struct LsCommand;

#[async_trait]
impl Command for LsCommand {
    fn name(&self) -> &str {
        "ls"
    }

    fn usage(&self) -> &str {
        "ls [DIR] - List directory contents"
    }

    async fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<Output> {
        // Without an argument list cwd; either way cwd is left alone
        let (target, label) = match args.first() {
            Some(dir) => (PathResolver::resolve_relative(state.cwd(), dir), dir.clone()),
            None => (state.cwd().clone(), state.cwd().to_string()),
        };

        match state.list_directory(&target).await {
            ListingResult::Entries(entries) => Ok(Output::Listing(entries)),
            ListingResult::Empty => Err(ShellError::DirectoryEmpty {
                path: target.to_string(),
            }),
            ListingResult::Absent => Err(ShellError::DirectoryNotFound {
                command: "ls",
                target: label,
            }),
        }
    }
}

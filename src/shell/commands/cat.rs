use async_trait::async_trait;

use super::{Command, Output, ShellState};
use crate::shell::error::{Result, ShellError};
use crate::vfs::PathResolver;

pub struct CatCommand;

#[async_trait]
impl Command for CatCommand {
    fn name(&self) -> &str {
        "cat"
    }

    fn usage(&self) -> &str {
        "cat FILE - Display file contents"
    }

    async fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<Output> {
        let Some(file) = args.first() else {
            return Err(ShellError::MissingArgument {
                command: "cat",
                operand: "file",
            });
        };

        let path = PathResolver::resolve_file(state.cwd(), file);
        match state.fetch_file(&path).await {
            Some(content) => Ok(Output::Text(content)),
            None => Err(ShellError::FileNotFound { file: file.clone() }),
        }
    }
}

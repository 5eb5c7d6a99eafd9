use thiserror::Error;

/// Errors a command reports to the user.
///
/// All of them are recoverable: the REPL prints the message and prompts
/// again. Transport failures never show up here; the directory service
/// folds them into "not found".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShellError {
    /// The target did not list as a directory; cwd is unchanged
    #[error("{command}: {target}: No such directory")]
    DirectoryNotFound {
        command: &'static str,
        target: String,
    },

    /// The directory exists but lists no entries
    #[error("ls: cannot access '{path}': permission denied or not found or empty directory")]
    DirectoryEmpty { path: String },

    #[error("cat: {file}: No such file")]
    FileNotFound { file: String },

    /// A required operand was omitted; nothing was requested
    #[error("{command}: missing {operand} operand")]
    MissingArgument {
        command: &'static str,
        operand: &'static str,
    },

    #[error("command not found: {0}")]
    UnknownCommand(String),
}

pub type Result<T> = std::result::Result<T, ShellError>;

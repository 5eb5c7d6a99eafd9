pub mod commands;
pub mod completion;
pub mod error;

use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{DEFAULT_COMPLETION_CACHE_SIZE, ShellConfig};
use crate::remote::RemoteDirectoryService;
use crate::vfs::{ListingResult, VirtualPath};
use commands::{Command, Output};
pub use completion::{CompletionCache, ShellCompleter};
pub use error::{Result, ShellError};

/// Usage lines of the commands handled by the dispatcher itself
const BUILTIN_USAGE: &[&str] = &[
    "pwd - Print working directory",
    "help, ? - Show this help",
    "exit, quit - Exit the shell",
];

/// What the session is currently waiting on.
///
/// Commands hold the session mutably for their whole run, so at most one
/// origin request from a command is in flight at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    AwaitingListing,
    AwaitingFile,
}

/// Shell state - tracks the working directory and dispatches commands
pub struct ShellState {
    /// Session cursor; changed only by an accepted `cd`
    cwd: VirtualPath,
    /// Label shown in the prompt
    hostname: String,
    service: Arc<RemoteDirectoryService>,
    /// Tab completion cache
    completion_cache: CompletionCache,
    /// Registered commands
    commands: HashMap<String, Arc<dyn Command>>,
    dispatch: DispatchState,
    exit_requested: bool,
}

impl ShellState {
    /// Create a new shell session for the configured origin
    pub fn new(config: &ShellConfig) -> anyhow::Result<Self> {
        let service = Arc::new(RemoteDirectoryService::new(&config.origin)?);
        Ok(Self::build(
            service,
            config.hostname.clone(),
            config.completion_cache_size,
        ))
    }

    /// Create a shell session on top of an existing directory service
    pub fn with_service(service: Arc<RemoteDirectoryService>, hostname: impl Into<String>) -> Self {
        Self::build(service, hostname.into(), DEFAULT_COMPLETION_CACHE_SIZE)
    }

    fn build(service: Arc<RemoteDirectoryService>, hostname: String, cache_size: usize) -> Self {
        let completion_cache = CompletionCache::new(Arc::clone(&service), cache_size);

        let mut state = ShellState {
            cwd: VirtualPath::root(),
            hostname,
            service,
            completion_cache,
            commands: HashMap::new(),
            dispatch: DispatchState::Idle,
            exit_requested: false,
        };

        // Register commands
        state.register_command(Arc::new(commands::ls::LsCommand));
        state.register_command(Arc::new(commands::cd::CdCommand));
        state.register_command(Arc::new(commands::cat::CatCommand));

        state
    }

    /// Register a command, replacing any command with the same name
    pub fn register_command(&mut self, command: Arc<dyn Command>) {
        self.commands.insert(command.name().to_string(), command);
    }

    /// Execute a command line.
    ///
    /// Arguments are split on whitespace; there is no quoting. Extra
    /// arguments beyond what a command uses are ignored.
    pub async fn execute(&mut self, line: &str) -> Result<Output> {
        let parts: Vec<String> = line.split_whitespace().map(String::from).collect();
        let Some((cmd_name, args)) = parts.split_first() else {
            return Ok(Output::None);
        };

        // Built-ins that never touch the origin
        match cmd_name.as_str() {
            "exit" | "quit" => {
                self.exit_requested = true;
                return Ok(Output::None);
            }
            "help" | "?" => return Ok(Output::Lines(self.help_lines())),
            "pwd" => return Ok(Output::line(self.cwd.to_string())),
            _ => {}
        }

        let command = self
            .commands
            .get(cmd_name.as_str())
            .map(Arc::clone)
            .ok_or_else(|| ShellError::UnknownCommand(cmd_name.clone()))?;
        command.execute(self, args).await
    }

    /// List a directory through the origin, refreshing completions on success
    pub async fn list_directory(&mut self, path: &VirtualPath) -> ListingResult {
        self.transition(DispatchState::AwaitingListing);
        let listing = self.service.list_directory(path).await;
        self.transition(DispatchState::Idle);

        if listing.exists() {
            self.completion_cache
                .update_entries(path, listing.entries().to_vec());
        }
        listing
    }

    /// Fetch a file's content through the origin
    pub async fn fetch_file(&mut self, path: &VirtualPath) -> Option<String> {
        self.transition(DispatchState::AwaitingFile);
        let content = self.service.fetch_file_content(path).await;
        self.transition(DispatchState::Idle);
        content
    }

    fn transition(&mut self, next: DispatchState) {
        debug!("dispatch {:?} -> {:?}", self.dispatch, next);
        self.dispatch = next;
    }

    /// Get the working directory
    pub fn cwd(&self) -> &VirtualPath {
        &self.cwd
    }

    /// Move the working directory
    pub fn set_cwd(&mut self, path: VirtualPath) {
        self.cwd = path.clone();
        self.completion_cache.set_cwd(path);
    }

    pub fn dispatch_state(&self) -> DispatchState {
        self.dispatch
    }

    /// Whether `exit` or `quit` was entered
    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    /// Get the directory service
    pub fn service(&self) -> &Arc<RemoteDirectoryService> {
        &self.service
    }

    /// Get the completion cache
    pub fn completion_cache(&self) -> &CompletionCache {
        &self.completion_cache
    }

    /// Get the prompt string
    pub fn prompt(&self) -> String {
        format!("{}:{}$ ", self.hostname, self.cwd)
    }

    /// Usage of every registered command, then the builtins
    fn help_lines(&self) -> Vec<String> {
        let mut commands: Vec<&Arc<dyn Command>> = self.commands.values().collect();
        commands.sort_by(|a, b| a.name().cmp(b.name()));

        let mut lines = vec!["Available commands:".to_string()];
        lines.extend(commands.iter().map(|c| format!("  {}", c.usage())));
        lines.extend(BUILTIN_USAGE.iter().map(|usage| format!("  {usage}")));
        lines
    }
}

use rustyline::Context;
use rustyline::completion::{Completer, Pair};
use std::sync::{Arc, RwLock};

use crate::cache::ListingCache;
use crate::remote::RemoteDirectoryService;
use crate::vfs::{DirectoryEntry, PathResolver, VirtualPath};

/// Commands whose argument is a path
const PATH_COMMANDS: &[&str] = &["ls", "cd", "cat"];

/// Listings and session snapshot used by tab completion.
///
/// Shared between the session (which publishes cwd and fresh listings) and
/// the line editor (which only reads). Probes for uncached directories go
/// straight to the directory service.
#[derive(Clone)]
pub struct CompletionCache {
    listings: ListingCache,
    commands: Vec<String>,
    /// Snapshot of the session's working directory
    cwd: Arc<RwLock<VirtualPath>>,
    service: Arc<RemoteDirectoryService>,
}

impl CompletionCache {
    pub fn new(service: Arc<RemoteDirectoryService>, capacity: usize) -> Self {
        CompletionCache {
            listings: ListingCache::new(capacity),
            commands: ["ls", "cd", "cat", "pwd", "help", "exit"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            cwd: Arc::new(RwLock::new(VirtualPath::root())),
            service,
        }
    }

    /// Publish the session's working directory
    pub fn set_cwd(&self, path: VirtualPath) {
        if let Ok(mut cwd) = self.cwd.write() {
            *cwd = path;
        }
    }

    /// Get the last published working directory
    pub fn get_cwd(&self) -> VirtualPath {
        self.cwd.read().map(|p| p.clone()).unwrap_or_default()
    }

    /// Store the entries of a directory
    pub fn update_entries(&self, dir: &VirtualPath, entries: Vec<DirectoryEntry>) {
        self.listings.put(dir.as_dir().to_string(), entries);
    }

    /// Get cached entries for a directory
    pub fn get_entries(&self, dir: &VirtualPath) -> Option<Arc<Vec<DirectoryEntry>>> {
        self.listings.get(&dir.as_dir().to_string())
    }

    /// Number of directories with cached listings
    pub fn cached_directories(&self) -> usize {
        self.listings.directory_count()
    }

    /// Get available commands
    pub fn get_commands(&self) -> &[String] {
        &self.commands
    }

    pub fn service(&self) -> &Arc<RemoteDirectoryService> {
        &self.service
    }
}

/// Tab completion helper for the shell
pub struct ShellCompleter {
    cache: CompletionCache,
}

impl ShellCompleter {
    pub fn new(cache: CompletionCache) -> Self {
        ShellCompleter { cache }
    }

    /// Complete a command at the start of the line
    fn complete_command(&self, word: &str) -> Vec<Pair> {
        self.cache
            .get_commands()
            .iter()
            .filter(|cmd| cmd.starts_with(word))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect()
    }

    /// Complete a path argument such as "docs/gu"
    fn complete_path(&self, arg: &str) -> Vec<Pair> {
        let (dir_part, name_prefix) = match arg.rfind('/') {
            Some(pos) => arg.split_at(pos + 1),
            None => ("", arg),
        };

        let cwd = self.cache.get_cwd();
        let dir = if dir_part.is_empty() {
            cwd.as_dir()
        } else {
            PathResolver::resolve_relative(&cwd, dir_part)
        };

        let entries = match self.cache.get_entries(&dir) {
            Some(cached) => cached,
            None => match self.fetch_entries(&dir) {
                Some(fetched) => fetched,
                None => return Vec::new(),
            },
        };

        entries
            .iter()
            .filter(|entry| entry.name.starts_with(name_prefix))
            .map(|entry| Pair {
                display: entry.name.clone(),
                replacement: format!("{dir_part}{}", entry.name),
            })
            .collect()
    }

    /// Fetch a listing for completion (blocks on the async service call)
    fn fetch_entries(&self, dir: &VirtualPath) -> Option<Arc<Vec<DirectoryEntry>>> {
        let handle = tokio::runtime::Handle::try_current().ok()?;
        let service = Arc::clone(self.cache.service());
        let target = dir.clone();

        // Use a channel to bridge sync completion with the async service
        let (tx, rx) = std::sync::mpsc::channel();
        handle.spawn(async move {
            let listing = service.list_directory(&target).await;
            let _ = tx.send(listing);
        });

        let listing = rx.recv().ok()?;
        if !listing.exists() {
            return None;
        }

        let entries = listing.entries().to_vec();
        self.cache.update_entries(dir, entries);
        self.cache.get_entries(dir)
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        let words: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = words.first() else {
            return Ok((0, Vec::new()));
        };

        let at_word_end = !line.ends_with(char::is_whitespace);

        // Still typing the command itself
        if words.len() == 1 && at_word_end {
            return Ok((pos - command.len(), self.complete_command(command)));
        }

        if !PATH_COMMANDS.contains(&command) {
            return Ok((pos, Vec::new()));
        }

        let arg = match words.last() {
            Some(last) if at_word_end => *last,
            _ => "",
        };
        Ok((pos - arg.len(), self.complete_path(arg)))
    }
}

impl rustyline::Helper for ShellCompleter {}
impl rustyline::highlight::Highlighter for ShellCompleter {}
impl rustyline::hint::Hinter for ShellCompleter {
    type Hint = String;
}
impl rustyline::validate::Validator for ShellCompleter {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{FetchError, HttpResponse, Transport};
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
            Err(FetchError::Transport {
                url: url.to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    fn completer() -> ShellCompleter {
        let service = Arc::new(RemoteDirectoryService::with_transport(
            "http://origin.test/",
            Arc::new(Unreachable),
        ));
        ShellCompleter::new(CompletionCache::new(service, 8))
    }

    fn replacements(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|p| p.replacement).collect()
    }

    #[test]
    fn test_complete_command() {
        let completer = completer();
        assert_eq!(replacements(completer.complete_command("c")), vec!["cd", "cat"]);
        assert!(completer.complete_command("x").is_empty());
    }

    #[test]
    fn test_complete_path_in_cwd() {
        let completer = completer();
        completer.cache.set_cwd(VirtualPath::parse("/docs/"));
        completer.cache.update_entries(
            &VirtualPath::parse("/docs/"),
            vec!["guides/".into(), "readme.md".into(), "roadmap.txt".into()],
        );

        assert_eq!(
            replacements(completer.complete_path("r")),
            vec!["readme.md", "roadmap.txt"]
        );
        assert_eq!(replacements(completer.complete_path("")).len(), 3);
    }

    #[test]
    fn test_complete_path_in_subdirectory() {
        let completer = completer();
        completer.cache.set_cwd(VirtualPath::parse("/docs/"));
        completer
            .cache
            .update_entries(&VirtualPath::parse("/"), vec!["docs/".into(), "dist/".into()]);

        assert_eq!(replacements(completer.complete_path("../do")), vec!["../docs/"]);
    }

    #[test]
    fn test_uncached_directory_without_runtime() {
        let completer = completer();
        assert!(completer.complete_path("any").is_empty());
    }
}

//! Command results and how they are printed.
//!
//! Commands return an [`Output`] instead of printing, so the dispatcher can
//! be driven from tests. The REPL hands it to [`render`], which writes to
//! stdout and treats a closed pipe as the end of output rather than an error.

use colored::*;

use crate::vfs::DirectoryEntry;

/// What a successful command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Nothing to print (e.g. a successful `cd`)
    None,
    /// Plain lines of text
    Lines(Vec<String>),
    /// A directory listing, one entry per line
    Listing(Vec<DirectoryEntry>),
    /// File content, printed verbatim
    Text(String),
}

impl Output {
    pub fn line(text: impl Into<String>) -> Self {
        Output::Lines(vec![text.into()])
    }
}

/// Print with newline, handling BrokenPipe gracefully.
///
/// Returns `Ok(())` early if BrokenPipe is encountered (e.g., when the
/// terminal pager quits). Propagates other IO errors.
#[macro_export]
macro_rules! print_line {
    ($($arg:tt)*) => {{
        use std::io::Write;
        match writeln!(std::io::stdout(), $($arg)*) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    }};
}

/// Print without newline, handling BrokenPipe gracefully.
#[macro_export]
macro_rules! print_str {
    ($($arg:tt)*) => {{
        use std::io::Write;
        match write!(std::io::stdout(), $($arg)*) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    }};
}

pub use print_line;
pub use print_str;

/// Write an output to stdout. Directory-looking entries are highlighted.
pub fn render(output: &Output) -> std::io::Result<()> {
    match output {
        Output::None => {}
        Output::Lines(lines) => {
            for line in lines {
                print_line!("{line}");
            }
        }
        Output::Listing(entries) => {
            for entry in entries {
                if entry.looks_like_dir() {
                    print_line!("{}", entry.name.blue().bold());
                } else {
                    print_line!("{}", entry.name);
                }
            }
        }
        Output::Text(text) => {
            print_str!("{text}");
            if !text.is_empty() && !text.ends_with('\n') {
                print_line!();
            }
        }
    }
    Ok(())
}

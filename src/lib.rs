//! Browse a static file tree served by a directory-listing web server as if
//! it were a local filesystem.
//!
//! [`vfs`] holds the pure path model, [`remote`] talks to the origin, and
//! [`shell`] is the command dispatcher the REPL drives.

pub mod cache;
pub mod config;
pub mod remote;
pub mod shell;
pub mod vfs;

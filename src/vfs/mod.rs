pub mod listing;
pub mod path;
pub mod resolver;

pub use listing::{DirectoryEntry, ListingResult};
pub use path::VirtualPath;
pub use resolver::PathResolver;

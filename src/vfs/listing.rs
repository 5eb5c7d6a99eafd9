/// A file or subdirectory name as reported by the origin.
///
/// Only the name is kept. HTML autoindex pages mark subdirectories with a
/// trailing `/`; structured listings do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>) -> Self {
        DirectoryEntry { name: name.into() }
    }

    /// Whether the origin rendered this entry as a directory
    pub fn looks_like_dir(&self) -> bool {
        self.name.ends_with('/')
    }
}

impl From<&str> for DirectoryEntry {
    fn from(name: &str) -> Self {
        DirectoryEntry::new(name)
    }
}

/// Outcome of a directory lookup.
///
/// "Exists but empty" and "does not resolve" are different results even
/// though `ls` renders both as inaccessible; `cd` only refuses `Absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingResult {
    /// One or more entries, in the order the origin returned them
    Entries(Vec<DirectoryEntry>),
    /// The directory resolved but has no entries
    Empty,
    /// The path does not resolve to a directory, or the fetch failed
    Absent,
}

impl ListingResult {
    /// Build a found listing, collapsing an empty list to [`ListingResult::Empty`]
    pub fn from_entries(entries: Vec<DirectoryEntry>) -> Self {
        if entries.is_empty() {
            ListingResult::Empty
        } else {
            ListingResult::Entries(entries)
        }
    }

    /// Whether the path resolved at all (empty listings count)
    pub fn exists(&self) -> bool {
        !matches!(self, ListingResult::Absent)
    }

    /// The listed entries; empty for both `Empty` and `Absent`
    pub fn entries(&self) -> &[DirectoryEntry] {
        match self {
            ListingResult::Entries(entries) => entries,
            ListingResult::Empty | ListingResult::Absent => &[],
        }
    }

    /// Entry names in listing order
    pub fn names(&self) -> Vec<String> {
        self.entries().iter().map(|e| e.name.clone()).collect()
    }
}

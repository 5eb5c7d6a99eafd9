/// A normalized location in the virtual filesystem.
///
/// Always rooted at `/`. Construction goes through [`VirtualPath::parse`],
/// which collapses `.` and `..` segments and can never climb above the root,
/// so every value of this type is already sandboxed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VirtualPath {
    /// Path segments (e.g., ["docs", "guides", "intro.md"])
    segments: Vec<String>,
    /// Whether the path denotes a directory context (rendered with a trailing /)
    trailing_slash: bool,
}

impl VirtualPath {
    /// The root path `/`
    pub fn root() -> Self {
        VirtualPath {
            segments: Vec::new(),
            trailing_slash: false,
        }
    }

    /// Parse and normalize a path string.
    ///
    /// Empty and `.` segments are dropped, `..` pops the previous segment and
    /// is discarded at the root. A trailing `/` on the input is kept on the
    /// output. Accepts any input, including the empty string.
    pub fn parse(path: &str) -> Self {
        let mut segments: Vec<String> = Vec::new();

        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    // Root is absorbing
                    segments.pop();
                }
                name => segments.push(name.to_string()),
            }
        }

        let trailing_slash = !segments.is_empty() && path.ends_with('/');
        VirtualPath {
            segments,
            trailing_slash,
        }
    }

    /// Get the path segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the path carries a directory context (trailing slash)
    pub fn is_dir(&self) -> bool {
        self.is_root() || self.trailing_slash
    }

    /// The same location with a trailing slash
    pub fn as_dir(&self) -> Self {
        VirtualPath {
            segments: self.segments.clone(),
            trailing_slash: !self.segments.is_empty(),
        }
    }
}

impl Default for VirtualPath {
    fn default() -> Self {
        Self::root()
    }
}

impl std::fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.segments.join("/"))?;
        if self.trailing_slash {
            write!(f, "/")?;
        }
        Ok(())
    }
}

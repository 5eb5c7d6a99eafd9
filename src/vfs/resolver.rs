use super::VirtualPath;

/// Turns user-supplied path arguments into sandboxed virtual paths.
///
/// Pure: no I/O and no state. Attempts to climb above the root are absorbed
/// rather than reported, so none of these functions can fail. Existence is
/// checked later by the remote listing service.
pub struct PathResolver;

impl PathResolver {
    /// Normalize an arbitrary path string
    pub fn normalize(path: &str) -> VirtualPath {
        VirtualPath::parse(path)
    }

    /// Resolve a `cd`-style target against the current directory.
    ///
    /// The result always denotes a directory. An empty target means the root;
    /// a target starting with `/` is taken from the root instead of `cwd`.
    pub fn resolve_relative(cwd: &VirtualPath, segment: &str) -> VirtualPath {
        if segment.is_empty() {
            return VirtualPath::root();
        }

        let mut joined = Self::join_base(cwd, segment);
        if !joined.ends_with('/') {
            joined.push('/');
        }
        Self::normalize(&joined)
    }

    /// Resolve a file argument against the current directory.
    ///
    /// Same joining rules as [`PathResolver::resolve_relative`] but the
    /// trailing slash is left as the user typed it.
    pub fn resolve_file(cwd: &VirtualPath, name: &str) -> VirtualPath {
        Self::normalize(&Self::join_base(cwd, name))
    }

    fn join_base(cwd: &VirtualPath, segment: &str) -> String {
        if segment.starts_with('/') {
            segment.to_string()
        } else {
            format!("{}{}", cwd.as_dir(), segment)
        }
    }
}

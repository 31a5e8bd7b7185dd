//! Normalized, root-confined archive path.

use std::path::PathBuf;

/// Path of the synthetic root node.
pub const ROOT_PATH: &str = ".";

/// A normalized archive path that can never escape the archive root.
///
/// `EntryPath` is the unique identifier of a node in an
/// [`ArchiveTree`](crate::ArchiveTree). It is slash-separated, relative, and
/// free of `.` and `..` segments.
///
/// # Security Properties
///
/// - Can ONLY be constructed through normalization
/// - NO `From<String>` implementation
/// - `..` never climbs above the root: excess parent segments are dropped
/// - Leading `/` is ignored, so absolute names land under the root
///
/// # Examples
///
/// ```
/// use guntar_core::types::EntryPath;
///
/// let path = EntryPath::normalize("./docs/../src//main.rs");
/// assert_eq!(path.as_str(), "src/main.rs");
///
/// let escaped = EntryPath::normalize("test/../../../exploit.txt");
/// assert_eq!(escaped.as_str(), "exploit.txt");
///
/// assert!(EntryPath::normalize("a/..").is_root());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryPath(String);

impl EntryPath {
    /// Returns the root path (`.`).
    #[must_use]
    pub fn root() -> Self {
        Self(ROOT_PATH.to_string())
    }

    /// Normalizes a raw archive name.
    ///
    /// Empty and `.` segments are removed, `..` removes the previous segment
    /// or is dropped when already at the root. An empty result is the root.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let mut segments: Vec<&str> = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                normal => segments.push(normal),
            }
        }

        if segments.is_empty() {
            Self::root()
        } else {
            Self(segments.join("/"))
        }
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_PATH
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the parent path. The root is its own parent.
    #[must_use]
    pub fn parent(&self) -> Self {
        match self.0.rsplit_once('/') {
            Some((parent, _)) => Self(parent.to_string()),
            None => Self::root(),
        }
    }

    /// Returns the final segment (`.` for the root).
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.0.as_str(), |(_, name)| name)
    }

    /// Converts to a relative filesystem path (empty for the root).
    #[must_use]
    pub fn to_relative_path(&self) -> PathBuf {
        if self.is_root() {
            PathBuf::new()
        } else {
            self.0.split('/').collect()
        }
    }
}

impl std::fmt::Display for EntryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntryPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_normalize_plain() {
        assert_eq!(EntryPath::normalize("gopher.txt").as_str(), "gopher.txt");
        assert_eq!(
            EntryPath::normalize("test/readme.txt").as_str(),
            "test/readme.txt"
        );
    }

    #[test]
    fn test_normalize_strips_current_dir_and_slashes() {
        assert_eq!(EntryPath::normalize("./test/").as_str(), "test");
        assert_eq!(EntryPath::normalize(".//a/./b//").as_str(), "a/b");
    }

    #[test]
    fn test_normalize_root_forms() {
        for raw in ["", ".", "./", "/", "test/..", "test/../..", "../../.."] {
            assert!(EntryPath::normalize(raw).is_root(), "{raw} should be root");
        }
    }

    #[test]
    fn test_normalize_traversal_confined() {
        assert_eq!(
            EntryPath::normalize("test/../../../exploit.txt").as_str(),
            "exploit.txt"
        );
        assert_eq!(EntryPath::normalize("../etc/passwd").as_str(), "etc/passwd");
        assert_eq!(EntryPath::normalize("/etc/passwd").as_str(), "etc/passwd");
    }

    #[test]
    fn test_parent_and_name() {
        let path = EntryPath::normalize("a/b/c.txt");
        assert_eq!(path.parent().as_str(), "a/b");
        assert_eq!(path.file_name(), "c.txt");

        let top = EntryPath::normalize("top");
        assert!(top.parent().is_root());

        let root = EntryPath::root();
        assert!(root.parent().is_root());
        assert_eq!(root.file_name(), ".");
    }

    #[test]
    fn test_to_relative_path() {
        assert_eq!(
            EntryPath::normalize("a/b.txt").to_relative_path(),
            Path::new("a").join("b.txt")
        );
        assert_eq!(EntryPath::root().to_relative_path(), PathBuf::new());
    }
}

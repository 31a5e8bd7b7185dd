//! Validated extraction destination.

use crate::error::ExtractionError;
use crate::types::EntryPath;
use std::path::Path;
use std::path::PathBuf;

/// A validated destination directory for extraction.
///
/// The wrapped path exists, is a directory, and is absolute and canonical.
/// Every on-disk path produced by the extractor is built with
/// [`DestDir::join`], so it is rooted here.
///
/// # Examples
///
/// ```no_run
/// use guntar_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("extract")?;
/// println!("Extracting to: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Validates an existing directory.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::DestinationInvalid` if the path does not
    /// exist or is not a directory, and `ExtractionError::Io` if it cannot be
    /// canonicalized.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ExtractionError> {
        let path = path.into();
        if !path.exists() {
            return Err(ExtractionError::DestinationInvalid {
                path,
                reason: "directory does not exist".to_string(),
            });
        }

        if !path.is_dir() {
            return Err(ExtractionError::DestinationInvalid {
                path,
                reason: "not a directory".to_string(),
            });
        }

        let canonical = path
            .canonicalize()
            .map_err(|e| ExtractionError::io(&path, e))?;

        Ok(Self(canonical))
    }

    /// Creates the directory (and its parents) if missing, then validates it.
    ///
    /// # Errors
    ///
    /// Same as [`DestDir::new`], plus `ExtractionError::Io` when creation
    /// fails.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, ExtractionError> {
        let path = path.into();
        if !path.exists() {
            std::fs::create_dir_all(&path).map_err(|e| ExtractionError::io(&path, e))?;
            tracing::debug!(path = %path.display(), "created destination directory");
        }
        Self::new(path)
    }

    /// Returns the canonical destination path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a normalized archive path onto the destination.
    ///
    /// The root path maps to the destination itself.
    #[inline]
    #[must_use]
    pub fn join(&self, entry_path: &EntryPath) -> PathBuf {
        self.0.join(entry_path.to_relative_path())
    }

    /// Returns `true` if `path` lies inside the destination.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dest_dir_valid() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::new(temp.path()).expect("dest should be valid");
        assert!(dest.as_path().is_absolute());
    }

    #[test]
    fn test_dest_dir_nonexistent() {
        let result = DestDir::new("/nonexistent/directory/that/does/not/exist");
        assert!(matches!(
            result,
            Err(ExtractionError::DestinationInvalid { .. })
        ));
    }

    #[test]
    fn test_dest_dir_not_a_directory() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let file_path = temp.path().join("file.txt");
        fs::write(&file_path, "test").expect("failed to write file");

        let result = DestDir::create(file_path);
        assert!(matches!(
            result,
            Err(ExtractionError::DestinationInvalid { .. })
        ));
    }

    #[test]
    fn test_dest_dir_create_nested() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let nested = temp.path().join("a").join("b");

        let dest = DestDir::create(&nested).expect("should create nested dest");
        assert!(nested.is_dir());
        assert_eq!(dest.as_path(), nested.canonicalize().unwrap());
    }

    #[test]
    fn test_dest_dir_join_entry_path() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::new(temp.path()).unwrap();

        let joined = dest.join(&EntryPath::normalize("foo/bar.txt"));
        assert!(dest.contains(&joined));
        assert!(joined.ends_with("foo/bar.txt"));

        assert_eq!(dest.join(&EntryPath::root()), dest.as_path());
    }

    #[test]
    #[cfg(unix)]
    fn test_dest_dir_with_symlink() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().expect("failed to create temp dir");
        let real_dir = temp.path().join("real");
        fs::create_dir(&real_dir).unwrap();
        let link = temp.path().join("link");
        symlink(&real_dir, &link).unwrap();

        let dest = DestDir::new(link).expect("should create from symlink");
        assert_eq!(dest.as_path(), real_dir.canonicalize().unwrap());
    }
}

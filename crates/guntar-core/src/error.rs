//! Error types for archive scanning and extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ScanError` by default.
pub type Result<T, E = ScanError> = std::result::Result<T, E>;

/// Errors that abort an archive scan.
///
/// Duplicate paths are not represented here: they are recovered locally and
/// recorded as a [`SkipReason`] in the scan report.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The archive file could not be opened.
    #[error("failed to open archive {path}: {source}")]
    Open {
        /// Path of the archive.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// I/O operation failed while reading the stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream is corrupted, truncated, or not a tar archive.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// The per-node initialization callback failed.
    #[error("node initialization failed for {path}: {reason}")]
    NodeInit {
        /// Resolved path of the node being initialized.
        path: String,
        /// Message returned by the callback.
        reason: String,
    },
}

impl ScanError {
    /// Returns `true` if the archive bytes themselves are at fault, as opposed
    /// to the environment or the caller's callback.
    ///
    /// # Examples
    ///
    /// ```
    /// use guntar_core::ScanError;
    ///
    /// let err = ScanError::InvalidArchive("checksum mismatch".to_string());
    /// assert!(err.is_malformed_input());
    /// ```
    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        matches!(self, Self::InvalidArchive(_))
    }
}

/// Errors that abort an extraction walk.
///
/// Files written before the error stay on disk.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Directory creation or file write failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being created or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The destination directory cannot be used.
    #[error("invalid destination {path}: {reason}")]
    DestinationInvalid {
        /// The destination that was rejected.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// A write would have landed outside the destination directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending on-disk path.
        path: PathBuf,
    },
}

impl ExtractionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this error represents a security violation.
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::PathTraversal { .. })
    }
}

/// Why a single entry was dropped during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A node with the same resolved path is already in the tree.
    PathExists,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PathExists => write!(f, "path already exists in the tree"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::NodeInit {
            path: "docs/readme.txt".to_string(),
            reason: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "node initialization failed for docs/readme.txt: boom"
        );
        assert!(!err.is_malformed_input());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        let err: ScanError = io_err.into();
        assert!(matches!(err, ScanError::Io(_)));
    }

    #[test]
    fn test_extraction_error_security() {
        let err = ExtractionError::PathTraversal {
            path: PathBuf::from("/tmp/escape"),
        };
        assert!(err.is_security_violation());

        let err = ExtractionError::io(
            "out/file.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_security_violation());
        assert!(err.to_string().contains("out/file.txt"));
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(
            SkipReason::PathExists.to_string(),
            "path already exists in the tree"
        );
    }
}

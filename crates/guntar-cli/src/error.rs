//! Error conversion utilities for CLI.
//!
//! Converts guntar-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use guntar_core::ExtractionError;
use guntar_core::ScanError;
use std::path::Path;

/// Converts `ScanError` to user-friendly anyhow error with context
pub fn convert_scan_error(err: ScanError, archive: &Path) -> anyhow::Error {
    match err {
        ScanError::Open { path, source } => {
            anyhow!(
                "Cannot open archive '{}': {}\n\
                 HINT: Check that the file exists and is readable.",
                path.display(),
                source
            )
        }
        ScanError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: Only uncompressed tar archives are supported. \
                 Decompress .tar.gz/.tgz files first (e.g. gunzip).",
                archive.display(),
                reason
            )
        }
        ScanError::Io(io_err) => {
            anyhow!(
                "I/O error while reading '{}': {}",
                archive.display(),
                io_err
            )
        }
        err @ ScanError::NodeInit { .. } => anyhow::Error::from(err)
            .context(format!("Error scanning archive '{}'", archive.display())),
    }
}

/// Converts `ExtractionError` to user-friendly anyhow error with context
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractionError::PathTraversal { path } => {
            anyhow!(
                "Security violation: Archive '{}' tried to write outside the destination: '{}'\n\
                 HINT: A directory inside the destination may be a symlink. \
                 Extract into an empty directory.",
                archive.display(),
                path.display()
            )
        }
        ExtractionError::DestinationInvalid { path, reason } => {
            anyhow!(
                "Cannot extract '{}' to '{}': {}\n\
                 HINT: Use --output to choose another directory.",
                archive.display(),
                path.display(),
                reason
            )
        }
        ExtractionError::Io { path, source } => {
            anyhow!(
                "I/O error while extracting '{}' to '{}': {}\n\
                 HINT: Files written before the error were left on disk.",
                archive.display(),
                path.display(),
                source
            )
        }
    }
}

/// Adds context to a scan result
pub fn add_scan_context<T>(result: Result<T, ScanError>, archive: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_scan_error(e, archive))
}

/// Adds context to an extraction result
pub fn add_extraction_context<T>(
    result: Result<T, ExtractionError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, archive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_open_error() {
        let err = ScanError::Open {
            path: PathBuf::from("missing.tar"),
            source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
        };
        let msg = format!("{:?}", convert_scan_error(err, Path::new("missing.tar")));
        assert!(msg.contains("Cannot open archive"));
        assert!(msg.contains("missing.tar"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_invalid_archive_error() {
        let err = ScanError::InvalidArchive("checksum mismatch".to_string());
        let msg = format!("{:?}", convert_scan_error(err, Path::new("bad.tar")));
        assert!(msg.contains("Invalid archive 'bad.tar'"));
        assert!(msg.contains("checksum mismatch"));
        assert!(msg.contains("gunzip"));
    }

    #[test]
    fn test_convert_scan_io_error() {
        let err = ScanError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let msg = format!("{:?}", convert_scan_error(err, Path::new("a.tar")));
        assert!(msg.contains("I/O error while reading 'a.tar'"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_convert_node_init_error_keeps_source() {
        let err = ScanError::NodeInit {
            path: "a.txt".to_string(),
            reason: "boom".to_string(),
        };
        let msg = format!("{:?}", convert_scan_error(err, Path::new("a.tar")));
        assert!(msg.contains("Error scanning archive 'a.tar'"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_convert_path_traversal_error() {
        let err = ExtractionError::PathTraversal {
            path: PathBuf::from("/etc/passwd"),
        };
        let msg = format!(
            "{:?}",
            convert_extraction_error(err, Path::new("malicious.tar"))
        );
        assert!(msg.contains("Security violation"));
        assert!(msg.contains("malicious.tar"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_io_error() {
        let err = ExtractionError::Io {
            path: PathBuf::from("out/file.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = format!("{:?}", convert_extraction_error(err, Path::new("a.tar")));
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("out/file.txt"));
    }
}

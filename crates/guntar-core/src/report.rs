//! Scan and extraction reporting.

use std::path::Path;
use std::time::Duration;

use crate::error::SkipReason;

/// An entry dropped during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Name as stored in the archive header.
    pub raw_name: String,
    /// Normalized path the entry resolved to.
    pub path: String,
    /// Why the entry was dropped.
    pub reason: SkipReason,
}

/// Report of an archive scan.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Headers read from the stream.
    pub entries_read: usize,

    /// Nodes added to the tree, root excluded.
    pub nodes_created: usize,

    /// Total content bytes held in memory.
    pub bytes_loaded: u64,

    /// Entries dropped without aborting the scan.
    pub skipped: Vec<SkippedEntry>,
}

impl ScanReport {
    /// Creates a new empty scan report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether any entry was dropped.
    #[must_use]
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Report of an extraction walk.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of files written.
    pub files_extracted: usize,

    /// Number of directory nodes created.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Nodes rejected by the skip predicate or not writable (links, devices).
    pub files_skipped: usize,

    /// Duration of the walk.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of items written.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }
}

/// Callback trait for progress reporting during extraction.
///
/// # Examples
///
/// ```
/// use guntar_core::ProgressCallback;
/// use std::path::Path;
///
/// struct SimpleProgress;
///
/// impl ProgressCallback for SimpleProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("Processing {}/{}: {}", current, total, path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, path: &Path) {
///         println!("Completed: {}", path.display());
///     }
///
///     fn on_complete(&mut self) {}
/// }
/// ```
pub trait ProgressCallback {
    /// Called when starting to process an entry.
    ///
    /// `current` is 1-indexed; `total` counts every node below the start
    /// node, skipped ones included.
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called after a file's bytes are written.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when an entry has been completely processed.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called when the entire walk is complete.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}

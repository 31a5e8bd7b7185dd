//! Archive listing without extraction.

use std::path::Path;
use std::time::SystemTime;

use crate::Result;
use crate::report::ScanReport;
use crate::report::SkippedEntry;
use crate::scanner::scan_path;
use crate::tree::ArchiveTree;
use crate::types::EntryKind;

/// One listed node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Resolved path (`.` for the root).
    pub path: String,
    /// Entry kind.
    pub kind: EntryKind,
    /// Declared size in bytes.
    pub size: u64,
    /// Unix mode bits.
    pub mode: u32,
    /// `ls -l` style mode string.
    pub mode_string: String,
    /// Modification time.
    pub modified: Option<SystemTime>,
    /// Link target, for links.
    pub link_target: Option<String>,
}

/// Contents of a scanned archive, in scan order with the root first.
#[derive(Debug, Clone, Default)]
pub struct ArchiveManifest {
    /// Listed nodes.
    pub entries: Vec<ArchiveEntry>,
    /// Number of listed nodes, root included.
    pub total_entries: usize,
    /// Sum of file sizes.
    pub total_size: u64,
    /// Entries the scan dropped.
    pub skipped: Vec<SkippedEntry>,
}

impl ArchiveManifest {
    /// Builds a manifest from a scanned tree and its report.
    #[must_use]
    pub fn from_tree<T>(tree: &ArchiveTree<T>, report: &ScanReport) -> Self {
        let entries: Vec<ArchiveEntry> = tree
            .iter()
            .map(|(_, node)| {
                let meta = node.meta();
                ArchiveEntry {
                    path: node.path().to_string(),
                    kind: meta.kind,
                    size: meta.size,
                    mode: meta.mode,
                    mode_string: meta.mode_string(),
                    modified: meta.modified,
                    link_target: meta.link_target.clone(),
                }
            })
            .collect();

        let total_size = entries
            .iter()
            .filter(|e| e.kind.is_file())
            .map(|e| e.size)
            .sum();

        Self {
            total_entries: entries.len(),
            total_size,
            entries,
            skipped: report.skipped.clone(),
        }
    }

    /// Resolved paths in scan order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }
}

/// Lists archive contents without extracting.
///
/// # Errors
///
/// Returns error if the archive cannot be opened or is not a valid tar
/// stream.
///
/// # Examples
///
/// ```no_run
/// use guntar_core::list_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let manifest = list_archive("archive.tar")?;
/// for path in manifest.paths() {
///     println!("{path}");
/// }
/// # Ok(())
/// # }
/// ```
pub fn list_archive<P: AsRef<Path>>(archive_path: P) -> Result<ArchiveManifest> {
    let (tree, report) = scan_path(archive_path, |_| Ok::<(), std::convert::Infallible>(()))?;
    Ok(ArchiveManifest::from_tree(&tree, &report))
}

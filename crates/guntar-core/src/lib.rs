//! In-memory tar archive exploration.
//!
//! `guntar-core` reads a tar stream once into an [`ArchiveTree`], a
//! hierarchy of nodes keyed by normalized, root-confined paths. On top of the
//! tree it offers tri-state selection ([`selection`]), a reducer-style list
//! browser ([`browse`]) and an extractor that writes chosen nodes to disk
//! without ever leaving the destination directory.
//!
//! # Examples
//!
//! ```no_run
//! use guntar_core::extract_all;
//! use guntar_core::scan_path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (tree, report) = scan_path("archive.tar", |_| Ok::<_, String>(()))?;
//! println!("{} nodes, {} skipped", tree.node_count(), report.skipped.len());
//!
//! let report = extract_all(&tree, None)?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod browse;
pub mod error;
pub mod extraction;
pub mod list;
pub mod report;
pub mod scanner;
pub mod selection;
pub mod tree;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

pub use error::ExtractionError;
pub use error::Result;
pub use error::ScanError;
pub use error::SkipReason;
pub use extraction::DEFAULT_EXTRACT_DIR;
pub use extraction::ExtractOptions;
pub use extraction::extract;
pub use extraction::extract_all;
pub use list::ArchiveEntry;
pub use list::ArchiveManifest;
pub use list::list_archive;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use report::ScanReport;
pub use report::SkippedEntry;
pub use scanner::SimpleTree;
pub use scanner::scan;
pub use scanner::scan_path;
pub use scanner::scan_plain;
pub use tree::ArchiveTree;
pub use tree::Entry;
pub use tree::EntryMeta;
pub use tree::Node;
pub use tree::NodeId;

pub use types::DestDir;
pub use types::EntryKind;
pub use types::EntryPath;

//! Subcommand implementations.

pub mod explore;
pub mod extract;
pub mod list;

use crate::output::OutputFormatter;
use guntar_core::SkippedEntry;

/// Reports entries the scan dropped.
fn warn_skipped(formatter: &dyn OutputFormatter, skipped: &[SkippedEntry]) {
    for entry in skipped {
        formatter.format_warning(&format!(
            "dropped entry '{}' ({}): {}",
            entry.raw_name, entry.path, entry.reason
        ));
    }
}

//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use guntar_core::ArchiveManifest;
use guntar_core::ExtractionReport;
use guntar_core::ScanReport;
use guntar_core::SkippedEntry;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct SkippedOutput {
    name: String,
    path: String,
    reason: String,
}

impl From<&SkippedEntry> for SkippedOutput {
    fn from(skipped: &SkippedEntry) -> Self {
        Self {
            name: skipped.raw_name.clone(),
            path: skipped.path.clone(),
            reason: skipped.reason.to_string(),
        }
    }
}

#[derive(Serialize)]
struct EntryOutput {
    path: String,
    kind: &'static str,
    size: u64,
    mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link_target: Option<String>,
}

#[derive(Serialize)]
struct ListOutput {
    entries: Vec<EntryOutput>,
    total_entries: usize,
    total_size: u64,
    skipped: Vec<SkippedOutput>,
}

impl From<&ArchiveManifest> for ListOutput {
    fn from(manifest: &ArchiveManifest) -> Self {
        let entries = manifest
            .entries
            .iter()
            .map(|e| EntryOutput {
                path: e.path.clone(),
                kind: e.kind.as_str(),
                size: e.size,
                mode: format!("{:04o}", e.mode & 0o7777),
                modified: e.modified.map(|t| {
                    DateTime::<Utc>::from(t).to_rfc3339_opts(SecondsFormat::Secs, true)
                }),
                link_target: e.link_target.clone(),
            })
            .collect();

        Self {
            entries,
            total_entries: manifest.total_entries,
            total_size: manifest.total_size,
            skipped: manifest.skipped.iter().map(SkippedOutput::from).collect(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()> {
        Self::output(&JsonOutput::success("list", ListOutput::from(manifest)))
    }

    fn format_manifest_long(
        &self,
        manifest: &ArchiveManifest,
        _human_readable: bool,
    ) -> Result<()> {
        Self::output(&JsonOutput::success("list", ListOutput::from(manifest)))
    }

    fn format_extraction_result(
        &self,
        dest: &Path,
        report: &ExtractionReport,
        scan: &ScanReport,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractionOutput {
            destination: String,
            files_extracted: usize,
            directories_created: usize,
            files_skipped: usize,
            bytes_written: u64,
            duration_ms: u128,
            skipped: Vec<SkippedOutput>,
        }

        let data = ExtractionOutput {
            destination: dest.display().to_string(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            files_skipped: report.files_skipped,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            skipped: scan.skipped.iter().map(SkippedOutput::from).collect(),
        };

        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("unknown", format!("{error:#}"));
        let _ = Self::output(&output);
    }

    fn format_success(&self, message: &str) {
        #[derive(Serialize)]
        struct SuccessData {
            message: String,
        }

        let output = JsonOutput::success(
            "unknown",
            SuccessData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }

    fn format_warning(&self, _message: &str) {
        // Warnings are carried in the `skipped` arrays of the result object.
    }
}

//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use chrono::DateTime;
use chrono::Local;
use console::Term;
use console::style;
use guntar_core::ArchiveManifest;
use guntar_core::ExtractionReport;
use guntar_core::ScanReport;
use std::path::Path;
use std::time::SystemTime;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err: Term::stderr(),
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (i, c) in s.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    fn format_time(time: Option<SystemTime>) -> String {
        time.map_or_else(
            || "-".repeat(16),
            |t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string(),
        )
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

/// Formats a byte count with binary units (`1.5 KB`).
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for path in manifest.paths() {
            self.line(path);
        }

        Ok(())
    }

    fn format_manifest_long(&self, manifest: &ArchiveManifest, human_readable: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in &manifest.entries {
            let size_str = if human_readable {
                format_size(entry.size)
            } else {
                entry.size.to_string()
            };

            let mut line = format!(
                "{} {:>10}  {}  {}",
                entry.mode_string,
                size_str,
                Self::format_time(entry.modified),
                entry.path
            );
            if let Some(target) = &entry.link_target {
                line.push_str(" -> ");
                line.push_str(target);
            }
            self.line(&line);
        }

        self.line("");
        self.line(&format!(
            "Total: {} entries, {}",
            Self::format_number(manifest.total_entries),
            format_size(manifest.total_size)
        ));

        Ok(())
    }

    fn format_extraction_result(
        &self,
        dest: &Path,
        report: &ExtractionReport,
        scan: &ScanReport,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            self.line(&format!(
                "{} Extraction complete",
                style("✓").green().bold()
            ));
        } else {
            self.line("Extraction complete");
        }

        self.line(&format!("  Destination: {}", dest.display()));
        self.line(&format!(
            "  Files extracted: {}",
            Self::format_number(report.files_extracted)
        ));
        self.line(&format!(
            "  Directories: {}",
            Self::format_number(report.directories_created)
        ));
        self.line(&format!("  Total size: {}", format_size(report.bytes_written)));

        if report.files_skipped > 0 {
            self.line(&format!(
                "  Skipped: {}",
                Self::format_number(report.files_skipped)
            ));
        }

        if self.verbose {
            self.line(&format!(
                "  Entries read: {}",
                Self::format_number(scan.entries_read)
            ));
            self.line(&format!("  Duration: {:?}", report.duration));
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_success(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            self.line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            self.line(message);
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err.write_line(&format!("WARNING: {message}"));
        }
    }
}

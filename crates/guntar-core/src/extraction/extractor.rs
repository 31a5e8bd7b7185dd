use std::fs::DirBuilder;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use super::DEFAULT_EXTRACT_DIR;
use super::ExtractOptions;
use crate::error::ExtractionError;
use crate::report::ExtractionReport;
use crate::report::NoopProgress;
use crate::report::ProgressCallback;
use crate::tree::ArchiveTree;
use crate::tree::Node;
use crate::tree::NodeId;
use crate::types::DestDir;

/// Writes the nodes below `start` to `dest`.
///
/// Nodes are visited depth-first in insertion order; `start` itself is not
/// written. For every node `skip` returns `true` for, the node is left out,
/// but its descendants are still visited and asked individually. Regular
/// files land at `dest/<node path>`, with missing parent directories
/// created. Links and special entries are never written and count as
/// skipped.
///
/// `dest` defaults to [`DEFAULT_EXTRACT_DIR`] and is created if missing.
///
/// The first failure aborts the walk. Files written before it stay on disk.
///
/// # Errors
///
/// - `ExtractionError::DestinationInvalid` if `dest` cannot be created or is
///   not a directory
/// - `ExtractionError::PathTraversal` if a write would resolve outside `dest`
///   (for example through a symlink already on disk)
/// - `ExtractionError::Io` if a directory or file cannot be written
///
/// # Examples
///
/// ```no_run
/// use guntar_core::{ExtractOptions, NoopProgress, extract, scan_path};
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (tree, _) = scan_path("archive.tar", |_| Ok::<_, String>(()))?;
/// let report = extract(
///     &tree,
///     tree.root(),
///     Some(Path::new("/tmp/out")),
///     |id| tree[id].name().ends_with(".log"),
///     &ExtractOptions::default(),
///     &mut NoopProgress,
/// )?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract<T, S>(
    tree: &ArchiveTree<T>,
    start: NodeId,
    dest: Option<&Path>,
    mut skip: S,
    options: &ExtractOptions,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport, ExtractionError>
where
    S: FnMut(NodeId) -> bool,
{
    let started = Instant::now();
    let dest = DestDir::create(dest.unwrap_or_else(|| Path::new(DEFAULT_EXTRACT_DIR)))?;
    let mut report = ExtractionReport::new();

    let nodes: Vec<NodeId> = tree.descendants(start).collect();
    let total = nodes.len();
    tracing::debug!(dest = %dest.as_path().display(), total, "extraction started");

    for (i, id) in nodes.into_iter().enumerate() {
        let node = &tree[id];
        let relative = node.path().to_relative_path();
        progress.on_entry_start(&relative, total, i + 1);

        if skip(id) {
            tracing::trace!(path = %node.path(), "skipped by predicate");
            report.files_skipped += 1;
        } else if node.is_dir() {
            if options.create_directories {
                create_dir_inside(&dest, &dest.join(node.path()))?;
                report.directories_created += 1;
            }
        } else if node.is_file() {
            let written = write_file(node, &dest, options)?;
            progress.on_bytes_written(written);
            report.files_extracted += 1;
            report.bytes_written += written;
        } else {
            tracing::debug!(path = %node.path(), kind = node.meta().kind.as_str(), "not writable, skipped");
            report.files_skipped += 1;
        }

        progress.on_entry_complete(&relative);
    }

    report.duration = started.elapsed();
    progress.on_complete();
    tracing::info!(
        files = report.files_extracted,
        directories = report.directories_created,
        bytes = report.bytes_written,
        skipped = report.files_skipped,
        "extraction complete"
    );
    Ok(report)
}

/// Writes every node of `tree` to `dest` with default options.
///
/// # Errors
///
/// See [`extract`].
pub fn extract_all<T>(
    tree: &ArchiveTree<T>,
    dest: Option<&Path>,
) -> Result<ExtractionReport, ExtractionError> {
    extract(
        tree,
        tree.root(),
        dest,
        |_| false,
        &ExtractOptions::default(),
        &mut NoopProgress,
    )
}

fn write_file<T>(
    node: &Node<T>,
    dest: &DestDir,
    options: &ExtractOptions,
) -> Result<u64, ExtractionError> {
    let output_path = dest.join(node.path());

    if let Some(parent) = output_path.parent() {
        create_dir_inside(dest, parent)?;
    }
    // File::create would follow a link left at the target itself.
    if output_path
        .symlink_metadata()
        .is_ok_and(|meta| meta.file_type().is_symlink())
    {
        return Err(ExtractionError::PathTraversal { path: output_path });
    }

    let data = node.data();
    let file = File::create(&output_path).map_err(|e| ExtractionError::io(&output_path, e))?;
    let mut writer = BufWriter::with_capacity(64 * 1024, file);
    writer
        .write_all(data)
        .and_then(|()| writer.flush())
        .map_err(|e| ExtractionError::io(&output_path, e))?;

    #[cfg(unix)]
    if options.preserve_permissions {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(node.meta().mode & 0o777);
        std::fs::set_permissions(&output_path, permissions)
            .map_err(|e| ExtractionError::io(&output_path, e))?;
    }
    #[cfg(not(unix))]
    let _ = options;

    tracing::trace!(path = %output_path.display(), bytes = data.len(), "file written");
    Ok(data.len() as u64)
}

/// Creates `path` under `dest` after checking that the deepest part of it
/// already on disk resolves inside `dest`.
///
/// Nothing is created when the check fails, so a symlink inside the
/// destination cannot be used to make directories elsewhere.
fn create_dir_inside(dest: &DestDir, path: &Path) -> Result<(), ExtractionError> {
    let existing = path
        .ancestors()
        .find(|ancestor| ancestor.symlink_metadata().is_ok())
        .unwrap_or_else(|| dest.as_path());
    let canonical =
        std::fs::canonicalize(existing).map_err(|e| ExtractionError::io(existing, e))?;
    if !dest.contains(&canonical) {
        tracing::warn!(path = %path.display(), resolved = %canonical.display(), "refusing to leave destination");
        return Err(ExtractionError::PathTraversal {
            path: path.to_path_buf(),
        });
    }
    create_dir(path)
}

/// Creates `path` and missing parents with permissive bits (`0o777` before
/// umask).
fn create_dir(path: &Path) -> Result<(), ExtractionError> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder
        .create(path)
        .map_err(|e| ExtractionError::io(PathBuf::from(path), e))
}

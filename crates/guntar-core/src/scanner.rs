//! Linear tar stream to [`ArchiveTree`] construction.

use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use std::time::SystemTime;

use crate::error::Result;
use crate::error::ScanError;
use crate::error::SkipReason;
use crate::report::ScanReport;
use crate::report::SkippedEntry;
use crate::tree::ArchiveTree;
use crate::tree::Entry;
use crate::tree::EntryMeta;
use crate::types::EntryKind;
use crate::types::EntryPath;

/// Tree without a per-node payload.
pub type SimpleTree = ArchiveTree<()>;

/// Upper bound on the buffer reserved up front for one file, whatever its
/// header claims. Larger files still load; the buffer just grows.
const MAX_PREALLOC: usize = 16 * 1024 * 1024;

/// Scans a tar stream into an [`ArchiveTree`].
///
/// `init` is called once per node, root first and then in stream order, and
/// returns that node's payload. It is not called for entries that are
/// skipped.
///
/// Each header is read in turn and its name normalized with
/// [`EntryPath::normalize`]. An entry whose path is already in the tree is
/// recorded in the returned [`ScanReport`] and skipped. An entry whose parent
/// directory is missing is attached under the root. Regular file bytes are
/// loaded eagerly.
///
/// # Errors
///
/// - `ScanError::InvalidArchive` if the stream is corrupted or truncated
/// - `ScanError::Io` if the underlying reader fails
/// - `ScanError::NodeInit` if `init` fails; the scan stops there
///
/// # Examples
///
/// ```
/// use guntar_core::scan;
/// use guntar_core::test_utils::TarTestBuilder;
///
/// let data = TarTestBuilder::new()
///     .add_directory("docs/")
///     .add_file("docs/readme.txt", b"hello")
///     .build();
///
/// let (tree, report) = scan(data.as_slice(), |entry| {
///     Ok::<_, std::convert::Infallible>(entry.meta.size)
/// })?;
///
/// assert_eq!(tree.node_count(), 3);
/// assert!(!report.has_skipped());
/// # Ok::<(), guntar_core::ScanError>(())
/// ```
pub fn scan<T, R, F, E>(reader: R, mut init: F) -> Result<(ArchiveTree<T>, ScanReport)>
where
    R: Read,
    F: FnMut(&Entry) -> std::result::Result<T, E>,
    E: Display,
{
    let root_entry = Entry::root();
    let root_payload = init(&root_entry).map_err(|e| ScanError::NodeInit {
        path: root_entry.path.to_string(),
        reason: e.to_string(),
    })?;
    let mut tree = ArchiveTree::from_root(root_entry, root_payload);
    let mut report = ScanReport::new();

    let mut archive = tar::Archive::new(reader);
    let entries = archive
        .entries()
        .map_err(|e| read_error("failed to read tar entries", e))?;

    for entry_result in entries {
        let tar_entry = entry_result.map_err(|e| read_error("failed to read tar entry", e))?;
        report.entries_read += 1;

        let (raw_name, entry) = decode_entry(tar_entry)?;

        if tree.find(&entry.path).is_some() {
            tracing::warn!(name = %raw_name, path = %entry.path, "skipping entry: path already exists");
            report.skipped.push(SkippedEntry {
                raw_name,
                path: entry.path.to_string(),
                reason: SkipReason::PathExists,
            });
            continue;
        }

        let payload = init(&entry).map_err(|e| ScanError::NodeInit {
            path: entry.path.to_string(),
            reason: e.to_string(),
        })?;

        let loaded = entry.content.as_ref().map_or(0, |c| c.len() as u64);
        let path = entry.path.clone();
        match tree.attach(entry, payload) {
            Ok(id) => {
                tracing::trace!(path = %path, id = id.index(), "node created");
                report.nodes_created += 1;
                report.bytes_loaded += loaded;
            }
            Err(reason) => report.skipped.push(SkippedEntry {
                raw_name,
                path: path.to_string(),
                reason,
            }),
        }
    }

    tracing::debug!(
        entries = report.entries_read,
        nodes = report.nodes_created,
        skipped = report.skipped.len(),
        "scan complete"
    );
    Ok((tree, report))
}

/// Scans a tar stream without attaching payloads.
///
/// # Errors
///
/// Same as [`scan`], minus callback failures.
pub fn scan_plain<R: Read>(reader: R) -> Result<(SimpleTree, ScanReport)> {
    scan(reader, |_| Ok::<(), std::convert::Infallible>(()))
}

/// Opens `archive_path` and scans it.
///
/// # Errors
///
/// `ScanError::Open` if the file cannot be opened, otherwise as [`scan`].
pub fn scan_path<T, P, F, E>(archive_path: P, init: F) -> Result<(ArchiveTree<T>, ScanReport)>
where
    P: AsRef<Path>,
    F: FnMut(&Entry) -> std::result::Result<T, E>,
    E: Display,
{
    let archive_path = archive_path.as_ref();
    let file = File::open(archive_path).map_err(|source| ScanError::Open {
        path: archive_path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %archive_path.display(), "scanning archive");
    scan(BufReader::new(file), init)
}

/// Splits read failures into bad archive bytes and failures of the reader.
fn read_error(context: &str, err: std::io::Error) -> ScanError {
    match err.kind() {
        ErrorKind::InvalidData
        | ErrorKind::InvalidInput
        | ErrorKind::UnexpectedEof
        | ErrorKind::Other => ScanError::InvalidArchive(format!("{context}: {err}")),
        _ => ScanError::Io(err),
    }
}

fn decode_entry<R: Read>(mut tar_entry: tar::Entry<'_, R>) -> Result<(String, Entry)> {
    let raw_bytes = tar_entry.path_bytes();
    if raw_bytes.contains(&0) {
        return Err(ScanError::InvalidArchive(
            "entry name contains a null byte".to_string(),
        ));
    }
    let raw_name = String::from_utf8_lossy(&raw_bytes).into_owned();
    let path = EntryPath::normalize(&raw_name);

    let header = tar_entry.header();
    let kind = EntryKind::from_tar(header.entry_type());
    let mode = header.mode().unwrap_or(0);
    let modified = header
        .mtime()
        .ok()
        .and_then(|t| SystemTime::UNIX_EPOCH.checked_add(Duration::from_secs(t)));
    let link_target = tar_entry
        .link_name_bytes()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());
    let size = tar_entry.size();

    let content = if kind.is_file() {
        let capacity = usize::try_from(size).unwrap_or(MAX_PREALLOC).min(MAX_PREALLOC);
        let mut data = Vec::with_capacity(capacity);
        tar_entry
            .read_to_end(&mut data)
            .map_err(|e| read_error(&format!("failed to read data of {raw_name}"), e))?;
        if data.len() as u64 != size {
            return Err(ScanError::InvalidArchive(format!(
                "truncated data for {raw_name}: expected {size} bytes, got {}",
                data.len()
            )));
        }
        Some(data)
    } else {
        None
    };

    let meta = EntryMeta {
        name: path.file_name().to_string(),
        size,
        mode,
        modified,
        kind,
        link_target,
    };

    Ok((
        raw_name,
        Entry {
            path,
            meta,
            content,
        },
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_utils::TarTestBuilder;

    #[test]
    fn test_scan_files_and_directories() {
        let data = TarTestBuilder::new()
            .add_directory("./test")
            .add_file("./test/readme.txt", b"This archive contains some text files.")
            .add_file("./test/hello.txt", b"world")
            .add_file("gopher.txt", b"Gopher names:\nGeorge\nGeoffrey\nGonzo")
            .add_file("todo.txt", b"Get animal handling license.")
            .build();

        let (tree, report) = scan_plain(data.as_slice()).unwrap();
        assert_eq!(tree[tree.root()].child_count(), 3);
        assert_eq!(report.entries_read, 5);
        assert_eq!(report.nodes_created, 5);

        let test = tree.find_str("test").unwrap();
        assert_eq!(tree[test].child_count(), 2);
        assert_eq!(tree[tree.find_str("test/hello.txt").unwrap()].data(), b"world");
    }

    #[test]
    fn test_scan_payload_callback_order() {
        let data = TarTestBuilder::new()
            .add_file("b.txt", b"b")
            .add_file("a.txt", b"a")
            .build();

        let mut seen = Vec::new();
        let (tree, _) = scan(data.as_slice(), |entry| {
            seen.push(entry.path.to_string());
            Ok::<_, String>(seen.len())
        })
        .unwrap();

        assert_eq!(seen, vec![".", "b.txt", "a.txt"]);
        assert_eq!(*tree[tree.root()].payload(), 1);
        assert_eq!(*tree[tree.find_str("a.txt").unwrap()].payload(), 3);
    }

    #[test]
    fn test_scan_callback_failure_aborts() {
        let data = TarTestBuilder::new()
            .add_file("ok.txt", b"fine")
            .add_file("bad.txt", b"nope")
            .build();

        let result = scan(data.as_slice(), |entry| {
            if entry.path.as_str() == "bad.txt" {
                Err("rejected")
            } else {
                Ok(())
            }
        });

        match result {
            Err(ScanError::NodeInit { path, reason }) => {
                assert_eq!(path, "bad.txt");
                assert_eq!(reason, "rejected");
            }
            other => panic!("expected NodeInit error, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_duplicate_skipped() {
        let data = TarTestBuilder::new()
            .add_file("dup.txt", b"first")
            .add_raw("./dup.txt", b"second")
            .add_file("after.txt", b"after")
            .build();

        let mut calls = 0;
        let (tree, report) = scan(data.as_slice(), |_| {
            calls += 1;
            Ok::<_, String>(())
        })
        .unwrap();

        assert_eq!(calls, 3);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].raw_name, "./dup.txt");
        assert_eq!(report.skipped[0].reason, SkipReason::PathExists);
        assert_eq!(tree[tree.find_str("dup.txt").unwrap()].data(), b"first");
        assert!(tree.find_str("after.txt").is_some());
    }

    #[test]
    fn test_scan_missing_parent_attaches_to_root() {
        let data = TarTestBuilder::new()
            .add_file("implied/dir/file.txt", b"x")
            .build();

        let (tree, _) = scan_plain(data.as_slice()).unwrap();
        let id = tree.find_str("implied/dir/file.txt").unwrap();
        assert_eq!(tree[id].parent(), Some(tree.root()));
    }

    #[test]
    fn test_scan_non_regular_entries_have_no_content() {
        let data = TarTestBuilder::new()
            .add_directory("dir/")
            .add_symlink("dir/link", "../target")
            .build();

        let (tree, _) = scan_plain(data.as_slice()).unwrap();
        let link = &tree[tree.find_str("dir/link").unwrap()];
        assert_eq!(link.meta().kind, EntryKind::Symlink);
        assert_eq!(link.meta().link_target.as_deref(), Some("../target"));
        assert!(link.entry().content.is_none());
        assert!(tree[tree.find_str("dir").unwrap()].entry().content.is_none());
    }

    #[test]
    fn test_scan_empty_stream() {
        let (tree, report) = scan_plain(std::io::empty()).unwrap();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(report.entries_read, 0);
    }

    #[test]
    fn test_scan_garbage_is_invalid() {
        let garbage = vec![0x5a_u8; 1024];
        let result = scan_plain(garbage.as_slice());
        assert!(matches!(result, Err(ScanError::InvalidArchive(_))));
    }

    #[test]
    fn test_scan_truncated_is_invalid() {
        let data = TarTestBuilder::new()
            .add_file("big.bin", &[7_u8; 4096])
            .build();
        let truncated = &data[..1024];

        let result = scan_plain(truncated);
        assert!(matches!(result, Err(ScanError::InvalidArchive(_))));
    }

    #[test]
    fn test_scan_reader_failure_is_io() {
        struct Unreadable;

        impl Read for Unreadable {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(ErrorKind::PermissionDenied, "denied"))
            }
        }

        let result = scan_plain(Unreadable);
        assert!(matches!(
            result,
            Err(ScanError::Io(ref err)) if err.kind() == ErrorKind::PermissionDenied
        ));
    }

    #[test]
    fn test_scan_path_missing_file() {
        let result = scan_path("/definitely/not/here.tar", |_| Ok::<_, String>(()));
        assert!(matches!(result, Err(ScanError::Open { .. })));
    }
}

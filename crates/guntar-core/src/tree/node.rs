//! Tree node and entry metadata.

use std::time::SystemTime;

use super::NodeId;
use crate::types::EntryKind;
use crate::types::EntryPath;

/// Metadata decoded from an entry header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMeta {
    /// Final path segment (`.` for the root).
    pub name: String,
    /// Size declared by the header, in bytes.
    pub size: u64,
    /// Unix mode bits from the header.
    pub mode: u32,
    /// Modification time, if the header carried a valid one.
    pub modified: Option<SystemTime>,
    /// Entry kind.
    pub kind: EntryKind,
    /// Link target for symlinks and hardlinks.
    pub link_target: Option<String>,
}

impl EntryMeta {
    /// Metadata of the synthetic root: a zero-sized directory.
    #[must_use]
    pub fn root() -> Self {
        Self {
            name: crate::types::ROOT_PATH.to_string(),
            size: 0,
            mode: 0o755,
            modified: Some(SystemTime::now()),
            kind: EntryKind::Directory,
            link_target: None,
        }
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.kind.is_directory()
    }

    /// Formats type and permission bits like `ls -l` (`drwxr-xr-x`).
    #[must_use]
    pub fn mode_string(&self) -> String {
        const BITS: [(u32, char); 9] = [
            (0o400, 'r'),
            (0o200, 'w'),
            (0o100, 'x'),
            (0o040, 'r'),
            (0o020, 'w'),
            (0o010, 'x'),
            (0o004, 'r'),
            (0o002, 'w'),
            (0o001, 'x'),
        ];

        let mut out = String::with_capacity(10);
        out.push(self.kind.type_char());
        for (bit, ch) in BITS {
            out.push(if self.mode & bit == 0 { '-' } else { ch });
        }
        out
    }
}

/// One decoded entry: its resolved path, metadata, and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Normalized path, unique within the tree.
    pub path: EntryPath,
    /// Header metadata.
    pub meta: EntryMeta,
    /// File bytes; `None` for anything but regular files.
    pub content: Option<Vec<u8>>,
}

impl Entry {
    /// Entry of the synthetic root.
    #[must_use]
    pub fn root() -> Self {
        Self {
            path: EntryPath::root(),
            meta: EntryMeta::root(),
            content: None,
        }
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.meta.is_dir()
    }

    /// Returns `true` for regular files.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        self.meta.kind.is_file()
    }
}

/// A node of an [`ArchiveTree`](super::ArchiveTree).
///
/// The parent owns the ordered list of its children; `parent` is a plain
/// identifier used for upward traversal only.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(super) entry: Entry,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) payload: T,
}

impl<T> Node<T> {
    /// The decoded entry.
    #[must_use]
    pub const fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Unique normalized path.
    #[must_use]
    pub const fn path(&self) -> &EntryPath {
        &self.entry.path
    }

    /// Header metadata.
    #[must_use]
    pub const fn meta(&self) -> &EntryMeta {
        &self.entry.meta
    }

    /// Display name (final path segment).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.entry.meta.name
    }

    /// File content; empty for non-files.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.entry.content.as_deref().unwrap_or_default()
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.entry.is_dir()
    }

    /// Returns `true` for regular files.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        self.entry.is_file()
    }

    /// Returns `true` for the synthetic root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Parent identifier, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in stream insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of direct children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Consumer-defined payload.
    #[must_use]
    pub const fn payload(&self) -> &T {
        &self.payload
    }

    /// Mutable consumer-defined payload.
    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(kind: EntryKind, mode: u32) -> EntryMeta {
        EntryMeta {
            name: "x".to_string(),
            size: 0,
            mode,
            modified: None,
            kind,
            link_target: None,
        }
    }

    #[test]
    fn test_mode_string() {
        assert_eq!(meta(EntryKind::File, 0o600).mode_string(), "-rw-------");
        assert_eq!(
            meta(EntryKind::Directory, 0o755).mode_string(),
            "drwxr-xr-x"
        );
        assert_eq!(meta(EntryKind::Symlink, 0o777).mode_string(), "lrwxrwxrwx");
    }

    #[test]
    fn test_root_meta() {
        let root = EntryMeta::root();
        assert!(root.is_dir());
        assert_eq!(root.size, 0);
        assert_eq!(root.name, ".");
    }
}

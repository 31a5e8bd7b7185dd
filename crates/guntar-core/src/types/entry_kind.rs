//! Archive entry kind.

/// Kind of an archive entry.
///
/// Only [`EntryKind::File`] nodes carry content and are written by the
/// extractor; only [`EntryKind::Directory`] nodes can have children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
    /// Hard link.
    Hardlink,
    /// Device, FIFO, or any other special entry.
    Other,
}

impl EntryKind {
    /// Maps a tar header entry type onto an `EntryKind`.
    #[must_use]
    pub fn from_tar(entry_type: tar::EntryType) -> Self {
        match entry_type {
            tar::EntryType::Regular | tar::EntryType::Continuous => Self::File,
            tar::EntryType::Directory => Self::Directory,
            tar::EntryType::Symlink => Self::Symlink,
            tar::EntryType::Link => Self::Hardlink,
            _ => Self::Other,
        }
    }

    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Returns `true` for symlinks and hardlinks.
    #[must_use]
    pub const fn is_link(self) -> bool {
        matches!(self, Self::Symlink | Self::Hardlink)
    }

    /// Single-character type marker used by `ls`-style mode strings.
    #[must_use]
    pub const fn type_char(self) -> char {
        match self {
            Self::File | Self::Hardlink => '-',
            Self::Directory => 'd',
            Self::Symlink => 'l',
            Self::Other => '?',
        }
    }

    /// Lowercase name used in machine-readable output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Symlink => "symlink",
            Self::Hardlink => "hardlink",
            Self::Other => "other",
        }
    }
}

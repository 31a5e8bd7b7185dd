//! Writing tree nodes to disk.

mod extractor;

pub use extractor::extract;
pub use extractor::extract_all;

/// Destination used when the caller does not name one, relative to the
/// working directory.
pub const DEFAULT_EXTRACT_DIR: &str = "extract";

/// Options for [`extract`].
///
/// # Examples
///
/// ```
/// use guntar_core::ExtractOptions;
///
/// let options = ExtractOptions {
///     preserve_permissions: false,
///     ..ExtractOptions::default()
/// };
/// assert!(!options.preserve_permissions);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Apply the archive's permission bits (`mode & 0o777`) to written files.
    ///
    /// Default: `true`. Ignored on non-Unix platforms.
    pub preserve_permissions: bool,

    /// Create directory nodes that are not skipped, even when empty.
    ///
    /// Default: `true`
    pub create_directories: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            preserve_permissions: true,
            create_directories: true,
        }
    }
}

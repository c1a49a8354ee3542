//! Path normalization helpers.
//!
//! Every path that ends up in a descriptor goes through these functions so
//! that deduplication can rely on plain string equality.

use std::path::{Path, PathBuf};

/// Render `path` as a normalized absolute path string.
///
/// Relative paths are joined onto the current working directory. Trailing
/// separators and `.` components are dropped, so `/a/b/` and `/a/./b` both
/// render as `/a/b`. Symlinks and `..` components are kept as-is, the path
/// is not canonicalized. Returns `None` if the working directory cannot be
/// determined.
#[must_use]
pub fn absolute_path_string(path: &Path) -> Option<String> {
    std::path::absolute(path)
        .ok()
        .map(|p| p.components().collect::<PathBuf>())
        .map(|p| p.to_string_lossy().into_owned())
}

/// Absolute path string of `path`, but only if it exists on disk.
#[must_use]
pub fn existing_path_string(path: &Path) -> Option<String> {
    if path.exists() {
        absolute_path_string(path)
    } else {
        None
    }
}

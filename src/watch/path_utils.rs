// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::cmp::Ordering;
use std::path::Path;

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// Falls back to the full path if `path` is not under `root`.
pub fn relative_str(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

/// Lexical order of sibling entries by file name, the order a classic
/// recursive directory walk visits them in.
pub fn by_file_name(a: &Path, b: &Path) -> Ordering {
    a.file_name().cmp(&b.file_name())
}

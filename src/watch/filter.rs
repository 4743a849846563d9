// src/watch/filter.rs

//! Per-entry decision used by the directory scan.

use std::path::Path;

/// What the scan should do with one directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryDecision {
    /// Hidden directory: do not descend.
    SkipSubtree,
    /// Not interesting (hidden file, other extension, not a regular file).
    Skip,
    /// Regular directory: descend.
    Descend,
    /// Tracked source file: compare its modification time.
    Check,
}

/// Names starting with a dot are hidden.
fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Decide what to do with an entry called `name`.
///
/// `extension` is the tracked extension without the leading dot.
pub fn classify_entry(name: &str, is_dir: bool, is_file: bool, extension: &str) -> EntryDecision {
    if is_hidden(name) {
        return if is_dir {
            EntryDecision::SkipSubtree
        } else {
            EntryDecision::Skip
        };
    }

    if is_dir {
        return EntryDecision::Descend;
    }

    let tracked = Path::new(name)
        .extension()
        .is_some_and(|ext| ext == extension);

    if tracked && is_file {
        EntryDecision::Check
    } else {
        EntryDecision::Skip
    }
}

// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};

pub mod mock;

/// Type of a directory entry, without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks, sockets, devices and the like.
    Other,
}

/// Abstract filesystem interface used by the directory scan.
///
/// Type queries do not follow symlinks: a symlink is neither a file nor a
/// directory for the purposes of change detection.
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// Type of the entry at `path`. Fails if it cannot be inspected.
    fn entry_kind(&self, path: &Path) -> Result<EntryKind>;
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Last modification time of a file.
    fn modified(&self, path: &Path) -> Result<SystemTime>;

    /// Return a list of entries in a directory.
    /// Returns full paths.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// Returns true if the error chain bottoms out in an `io::ErrorKind::NotFound`.
///
/// Entries can disappear between being listed and being inspected (editor
/// swap files, build artifacts); the scan treats that as a vanished entry.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_dir())
    }

    fn entry_kind(&self, path: &Path) -> Result<EntryKind> {
        let file_type = fs::symlink_metadata(path)
            .with_context(|| format!("reading metadata of {:?}", path))?
            .file_type();
        Ok(if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        })
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path).with_context(|| format!("canonicalizing {:?}", path))
    }

    fn modified(&self, path: &Path) -> Result<SystemTime> {
        let meta = fs::symlink_metadata(path)
            .with_context(|| format!("reading metadata of {:?}", path))?;
        meta.modified()
            .with_context(|| format!("reading modification time of {:?}", path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        fs::read_dir(path)
            .with_context(|| format!("reading dir {:?}", path))?
            .map(|entry| {
                entry
                    .map(|e| e.path())
                    .with_context(|| format!("reading entry in {:?}", path))
            })
            .collect()
    }
}

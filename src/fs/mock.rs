// src/fs/mock.rs

use super::{EntryKind, FileSystem};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

#[derive(Debug, Clone)]
pub enum MockEntry {
    File { content: Vec<u8>, modified: SystemTime },
    Dir(Vec<String>), // List of child names
}

/// In-memory filesystem with explicit modification times.
///
/// Cloning shares the underlying tree, so a test can keep a handle and
/// `touch` files while a watcher owns another clone.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    failing_dirs: Arc<Mutex<Vec<PathBuf>>>,
    failing_entries: Arc<Mutex<Vec<PathBuf>>>,
}

fn not_found(path: &Path) -> anyhow::Error {
    anyhow::Error::new(io::Error::new(
        io::ErrorKind::NotFound,
        format!("not found: {:?}", path),
    ))
}

fn permission_denied(path: &Path) -> anyhow::Error {
    anyhow::Error::new(io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("permission denied: {:?}", path),
    ))
}

impl MockFileSystem {
    /// Create a mock tree rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let mut files = HashMap::new();
        files.insert(root.as_ref().to_path_buf(), MockEntry::Dir(Vec::new()));

        Self {
            files: Arc::new(Mutex::new(files)),
            failing_dirs: Arc::new(Mutex::new(Vec::new())),
            failing_entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, MockEntry>> {
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add (or replace) a file with the given modification time.
    pub fn add_file(
        &self,
        path: impl AsRef<Path>,
        content: impl Into<Vec<u8>>,
        modified: SystemTime,
    ) {
        let path = path.as_ref().to_path_buf();
        let mut files = self.lock();
        files.insert(
            path.clone(),
            MockEntry::File {
                content: content.into(),
                modified,
            },
        );

        if let Some(parent) = path.parent() {
            Self::ensure_dir_entry(&mut files, parent);
            Self::link_child(&mut files, parent, &path);
        }
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut files = self.lock();
        Self::ensure_dir_entry(&mut files, path.as_ref());
    }

    /// Update the modification time of an existing file.
    pub fn touch(&self, path: impl AsRef<Path>, when: SystemTime) {
        let mut files = self.lock();
        if let Some(MockEntry::File { modified, .. }) = files.get_mut(path.as_ref()) {
            *modified = when;
        }
    }

    /// Remove an entry from the tree (but keep it listed in its parent), to
    /// simulate a file vanishing between listing and inspection.
    pub fn remove_entry_only(&self, path: impl AsRef<Path>) {
        self.lock().remove(path.as_ref());
    }

    /// Make `read_dir` fail with a permission error for this directory.
    pub fn fail_read_dir(&self, path: impl AsRef<Path>) {
        self.failing_dirs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.as_ref().to_path_buf());
    }

    /// Make inspecting this entry fail with a permission error.
    pub fn fail_entry(&self, path: impl AsRef<Path>) {
        self.failing_entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.as_ref().to_path_buf());
    }

    fn ensure_dir_entry(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        if files.contains_key(path) {
            return;
        }
        files.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
        if let Some(parent) = path.parent() {
            if parent != path && !parent.as_os_str().is_empty() {
                Self::ensure_dir_entry(files, parent);
                Self::link_child(files, parent, path);
            }
        }
    }

    fn link_child(files: &mut HashMap<PathBuf, MockEntry>, parent: &Path, child: &Path) {
        if let Some(MockEntry::Dir(children)) = files.get_mut(parent) {
            if let Some(name) = child.file_name().and_then(|n| n.to_str()) {
                if !children.iter().any(|c| c == name) {
                    children.push(name.to_string());
                }
            }
        }
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let files = self.lock();
        match files.get(path) {
            Some(MockEntry::File { content, .. }) => {
                String::from_utf8(content.clone()).map_err(|e| anyhow!("Invalid UTF-8: {}", e))
            }
            Some(MockEntry::Dir(_)) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(not_found(path)),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.lock().get(path), Some(MockEntry::Dir(_)))
    }

    fn entry_kind(&self, path: &Path) -> Result<EntryKind> {
        let failing = self
            .failing_entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|p| p == path);
        if failing {
            return Err(permission_denied(path));
        }

        match self.lock().get(path) {
            Some(MockEntry::File { .. }) => Ok(EntryKind::File),
            Some(MockEntry::Dir(_)) => Ok(EntryKind::Dir),
            None => Err(not_found(path)),
        }
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        // In mock, we just return the path as is, assuming absolute paths are used in tests
        Ok(path.to_path_buf())
    }

    fn modified(&self, path: &Path) -> Result<SystemTime> {
        match self.lock().get(path) {
            Some(MockEntry::File { modified, .. }) => Ok(*modified),
            Some(MockEntry::Dir(_)) => Ok(SystemTime::UNIX_EPOCH),
            None => Err(not_found(path)),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let failing = self
            .failing_dirs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|p| p == path);
        if failing {
            return Err(permission_denied(path));
        }

        let files = self.lock();
        match files.get(path) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            Some(MockEntry::File { .. }) => Err(anyhow!("Not a directory: {:?}", path)),
            None => Err(not_found(path)),
        }
    }
}

// src/fs/mock.rs

use super::FileSystem;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockEntry {
    File { executable: bool },
    Dir,
}

/// In-memory filesystem that also records every path it was asked about.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    lookups: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an executable file; parent directories are created implicitly.
    pub fn add_executable(&self, path: impl AsRef<Path>) {
        self.insert_file(path.as_ref(), true);
    }

    /// Register a plain, non-executable file.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        self.insert_file(path.as_ref(), false);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Self::ensure_dirs(&mut entries, path.as_ref());
    }

    /// Every path passed to `exists`, in call order.
    pub fn lookups(&self) -> Vec<PathBuf> {
        self.lookups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn insert_file(&self, path: &Path, executable: bool) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(parent) = path.parent() {
            Self::ensure_dirs(&mut entries, parent);
        }
        entries.insert(path.to_path_buf(), MockEntry::File { executable });
    }

    fn ensure_dirs(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            entries
                .entry(ancestor.to_path_buf())
                .or_insert(MockEntry::Dir);
        }
    }

    fn entry(&self, path: &Path) -> Option<MockEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .copied()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.lookups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_path_buf());
        self.entry(path).is_some()
    }

    fn is_executable(&self, path: &Path) -> bool {
        matches!(self.entry(path), Some(MockEntry::File { executable: true }))
    }
}

//! In-memory filesystem

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::traits::{DirEntry, FsError, FsResult, SecretFs};

#[derive(Debug, Clone)]
enum MemFile {
    Content(String),
    /// Listed with a size but fails to read, like a file without read permission
    Unreadable { len: u64 },
}

/// An in-memory file tree for exercising the secrets scan without real files
///
/// Paths are compared component-wise and never resolved: `secrets` and
/// `/run/secrets` are unrelated even when the current directory is `/run`.
/// Adding a file registers its parent directories.
///
/// # Example
///
/// ```
/// use envwrapper_core::fs::{MemoryFs, SecretFs};
/// use std::path::Path;
///
/// let fs = MemoryFs::new();
/// fs.add_file("/run/secrets/ENV_TOKEN", "s3cr3t\n");
///
/// assert!(fs.exists_dir(Path::new("/run/secrets")));
/// assert_eq!(fs.read_to_string(Path::new("/run/secrets/ENV_TOKEN")).unwrap(), "s3cr3t\n");
/// ```
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RwLock<BTreeMap<PathBuf, MemFile>>,
    dirs: RwLock<BTreeSet<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory and all of its ancestors
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut dirs = self.dirs.write();
        for ancestor in path.as_ref().ancestors() {
            dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Add a file with `content`, registering its parent directories
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.insert(path.as_ref(), MemFile::Content(content.into()));
    }

    /// Add a file that reports `len` bytes but fails every read
    pub fn add_unreadable_file(&self, path: impl AsRef<Path>, len: u64) {
        self.insert(path.as_ref(), MemFile::Unreadable { len });
    }

    fn insert(&self, path: &Path, file: MemFile) {
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.write().insert(path.to_path_buf(), file);
    }
}

impl SecretFs for MemoryFs {
    fn exists_dir(&self, path: &Path) -> bool {
        self.dirs.read().contains(path)
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<FsResult<DirEntry>>> {
        if !self.exists_dir(path) {
            if self.files.read().contains_key(path) {
                return Err(FsError::NotADirectory(path.to_path_buf()));
            }
            return Err(FsError::NotFound(path.to_path_buf()));
        }

        let mut entries = Vec::new();

        for (file_path, file) in self.files.read().iter() {
            if file_path.parent() != Some(path) {
                continue;
            }
            let len = match file {
                MemFile::Content(content) => content.len() as u64,
                MemFile::Unreadable { len } => *len,
            };
            if let Some(name) = file_path.file_name() {
                entries.push(Ok(DirEntry {
                    file_name: name.to_os_string(),
                    path: file_path.clone(),
                    is_dir: false,
                    len,
                }));
            }
        }

        for dir_path in self.dirs.read().iter() {
            if dir_path.parent() != Some(path) {
                continue;
            }
            if let Some(name) = dir_path.file_name() {
                entries.push(Ok(DirEntry {
                    file_name: name.to_os_string(),
                    path: dir_path.clone(),
                    is_dir: true,
                    len: 0,
                }));
            }
        }

        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        match self.files.read().get(path) {
            Some(MemFile::Content(content)) => Ok(content.clone()),
            Some(MemFile::Unreadable { .. }) => Err(FsError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ))),
            None if self.exists_dir(path) => Err(FsError::Io(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            ))),
            None => Err(FsError::NotFound(path.to_path_buf())),
        }
    }
}

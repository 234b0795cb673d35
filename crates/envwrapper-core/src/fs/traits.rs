//! Core traits and types for filesystem access

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Bare file name, as stored on disk
    pub file_name: OsString,
    /// Full path of the entry
    pub path: PathBuf,
    /// Whether the entry is a directory (symlinks are followed)
    pub is_dir: bool,
    /// Size in bytes
    pub len: u64,
}

/// Errors that can occur while reading the secrets directory
#[derive(Error, Debug)]
pub enum FsError {
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("File is not valid UTF-8: {}", .0.display())]
    InvalidUtf8(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FsResult<T> = Result<T, FsError>;

/// Filesystem operations needed to snapshot a secrets directory
///
/// `list_dir` fails as a whole only when the directory itself cannot be
/// listed; an entry whose metadata cannot be read is reported in place so
/// the rest of the listing survives.
pub trait SecretFs: Send + Sync {
    /// Whether `path` exists and is a directory
    fn exists_dir(&self, path: &Path) -> bool;

    /// List the direct children of `path`
    fn list_dir(&self, path: &Path) -> FsResult<Vec<FsResult<DirEntry>>>;

    /// Read a whole file as UTF-8
    fn read_to_string(&self, path: &Path) -> FsResult<String>;
}

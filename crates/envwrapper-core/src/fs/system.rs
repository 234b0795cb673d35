//! Real filesystem

use std::fs;
use std::io;
use std::path::Path;

use super::traits::{DirEntry, FsError, FsResult, SecretFs};

/// Delegates to `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFs;

impl SystemFs {
    fn map_io(err: io::Error, path: &Path) -> FsError {
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }
}

impl SecretFs for SystemFs {
    fn exists_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<FsResult<DirEntry>>> {
        if path.exists() && !path.is_dir() {
            return Err(FsError::NotADirectory(path.to_path_buf()));
        }

        let entries = fs::read_dir(path)
            .map_err(|e| Self::map_io(e, path))?
            .map(|entry| -> FsResult<DirEntry> {
                let entry = entry?;
                let entry_path = entry.path();
                // fs::metadata follows symlinks, so mounted secrets that are
                // links to regular files count as files
                let metadata =
                    fs::metadata(&entry_path).map_err(|e| Self::map_io(e, &entry_path))?;
                Ok(DirEntry {
                    file_name: entry.file_name(),
                    path: entry_path,
                    is_dir: metadata.is_dir(),
                    len: metadata.len(),
                })
            })
            .collect();

        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        let bytes = fs::read(path).map_err(|e| Self::map_io(e, path))?;
        String::from_utf8(bytes).map_err(|_| FsError::InvalidUtf8(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_fs_missing_dir() {
        let path = Path::new("/nonexistent_envwrapper_test_dir_12345");
        assert!(!SystemFs.exists_dir(path));
        assert!(matches!(SystemFs.list_dir(path), Err(FsError::NotFound(_))));
    }

    #[test]
    fn test_system_fs_list_and_read() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ENV_TOKEN"), "abc\n").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        assert!(SystemFs.exists_dir(dir.path()));

        let mut entries: Vec<DirEntry> = SystemFs
            .list_dir(dir.path())
            .unwrap()
            .into_iter()
            .map(|e| e.unwrap())
            .collect();
        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file_name, "ENV_TOKEN");
        assert!(!entries[0].is_dir);
        assert_eq!(entries[0].len, 4);
        assert_eq!(entries[1].file_name, "nested");
        assert!(entries[1].is_dir);

        assert_eq!(SystemFs.read_to_string(&entries[0].path).unwrap(), "abc\n");
    }

    #[test]
    fn test_system_fs_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ENV_PLAIN");
        fs::write(&file, "x").unwrap();

        assert!(!SystemFs.exists_dir(&file));
        assert!(matches!(SystemFs.list_dir(&file), Err(FsError::NotADirectory(_))));
    }

    #[test]
    fn test_system_fs_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ENV_BINARY");
        fs::write(&file, [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(SystemFs.read_to_string(&file), Err(FsError::InvalidUtf8(_))));
    }
}

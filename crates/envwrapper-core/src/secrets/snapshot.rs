//! Immutable snapshot of a secrets directory

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::fs::{DirEntry, SecretFs};
use crate::logging::Logger;
use crate::{log_debug, log_warn};

/// Secret values read from a directory at construction time
///
/// Keys are the file names with the prefix stripped, uppercased. Values are
/// the trimmed file contents. Only non-empty values are kept, so any key
/// present here wins over the environment.
///
/// # Example
///
/// ```
/// use envwrapper_core::fs::MemoryFs;
/// use envwrapper_core::logging::NoOpLogger;
/// use envwrapper_core::secrets::SecretSnapshot;
/// use std::path::Path;
///
/// let fs = MemoryFs::new();
/// fs.add_file("/run/secrets/ENV_db_password", "hunter2\n");
/// fs.add_file("/run/secrets/README", "not a secret");
///
/// let snapshot = SecretSnapshot::load(&fs, Path::new("/run/secrets"), "ENV_", &NoOpLogger);
/// assert_eq!(snapshot.get("DB_PASSWORD"), Some("hunter2"));
/// assert_eq!(snapshot.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SecretSnapshot {
    dir: PathBuf,
    values: HashMap<String, String>,
}

impl SecretSnapshot {
    /// A snapshot with no secrets, remembering which directory was meant
    pub fn empty(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            values: HashMap::new(),
        }
    }

    /// Build a snapshot directly from `(key, value)` pairs
    ///
    /// Keys are uppercased and values trimmed; pairs whose value trims to
    /// empty are dropped, as they would be when read from disk.
    pub fn from_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut snapshot = Self::default();
        for (key, value) in values {
            snapshot.insert(key.as_ref().to_uppercase(), value.as_ref());
        }
        snapshot
    }

    /// Scan `dir` for secret files
    ///
    /// Never fails: a missing or unreadable directory gives an empty
    /// snapshot and an unreadable file is skipped. Directories, files not
    /// starting with `prefix`, and zero-length files are ignored.
    ///
    /// Entries are visited in byte order of their file names and the first
    /// non-empty value for a key wins, so `ENV_TOKEN` beats `ENV_token`.
    pub fn load(fs: &dyn SecretFs, dir: &Path, prefix: &str, logger: &dyn Logger) -> Self {
        let mut snapshot = Self::empty(dir);

        if !fs.exists_dir(dir) {
            log_debug!(logger, "secrets directory {} does not exist", dir.display());
            return snapshot;
        }

        let listing = match fs.list_dir(dir) {
            Ok(listing) => listing,
            Err(err) => {
                log_warn!(logger, "cannot list secrets directory {}: {}", dir.display(), err);
                return snapshot;
            }
        };

        let mut entries: Vec<DirEntry> = listing
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log_debug!(logger, "skipping unreadable entry in {}: {}", dir.display(), err);
                    None
                }
            })
            .collect();
        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        for entry in entries {
            if entry.is_dir {
                continue;
            }
            let Some(name) = entry.file_name.to_str() else {
                log_debug!(logger, "skipping non UTF-8 file name {}", entry.path.display());
                continue;
            };
            let Some(key) = name.strip_prefix(prefix) else {
                continue;
            };
            if key.is_empty() || entry.len == 0 {
                continue;
            }
            let key = key.to_uppercase();
            if snapshot.values.contains_key(&key) {
                log_debug!(logger, "ignoring {}, {} already loaded", name, key);
                continue;
            }

            match fs.read_to_string(&entry.path) {
                Ok(content) => snapshot.insert(key, &content),
                Err(err) => log_debug!(logger, "skipping secret file {}: {}", name, err),
            }
        }

        log_debug!(
            logger,
            "loaded {} secret(s) from {}",
            snapshot.len(),
            dir.display()
        );
        snapshot
    }

    fn insert(&mut self, key: String, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            self.values.insert(key, value.to_string());
        }
    }

    /// Value for an already-uppercased key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// All keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// The directory this snapshot was read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

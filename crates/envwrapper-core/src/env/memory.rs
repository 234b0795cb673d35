//! In-memory environment

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::ReadEnv;

/// An environment table that never touches the process environment
///
/// All methods take `&self`; keep an `Arc<MemoryEnv>` around to change
/// values after handing a clone to an [`EnvWrapper`](crate::EnvWrapper).
#[derive(Debug, Default)]
pub struct MemoryEnv {
    vars: RwLock<HashMap<String, String>>,
}

impl MemoryEnv {
    /// Create a new empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, value)` pairs
    pub fn with_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: RwLock::new(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Set a variable, replacing any previous value
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.write().insert(key.into(), value.into());
    }

    /// Remove a variable
    pub fn remove(&self, key: &str) {
        self.vars.write().remove(key);
    }

    /// Remove all variables
    pub fn clear(&self) {
        self.vars.write().clear();
    }

    /// Get the number of variables
    pub fn len(&self) -> usize {
        self.vars.read().len()
    }

    /// Check if no variables are set
    pub fn is_empty(&self) -> bool {
        self.vars.read().is_empty()
    }
}

impl ReadEnv for MemoryEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.read().get(key).cloned()
    }
}

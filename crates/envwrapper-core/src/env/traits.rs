//! Core trait for environment lookup

/// Read access to an environment variable table
///
/// Implementations must not cache: the accessor relies on every call
/// observing the current value.
///
/// # Example
///
/// ```
/// use envwrapper_core::env::{ReadEnv, MemoryEnv};
///
/// let env = MemoryEnv::new();
/// env.set("DATABASE_URL", "postgres://db");
/// assert_eq!(env.var("DATABASE_URL"), Some("postgres://db".to_string()));
/// assert_eq!(env.var("database_url"), None);
/// ```
pub trait ReadEnv: Send + Sync {
    /// Exact, case-sensitive lookup. `None` when unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;
}


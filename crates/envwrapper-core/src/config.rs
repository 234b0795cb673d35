//! Accessor configuration
//!
//! Which directory holds the secret files and which file-name prefix marks
//! them. The struct is serde-enabled so a host can embed it in its own
//! configuration file.

use std::path::{is_separator, Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::env::{ReadEnv, SystemEnv};

/// Conventional mount point for container secrets
pub const DEFAULT_SECRETS_DIR: &str = "/run/secrets";

/// File-name prefix a secret file must carry
pub const DEFAULT_PREFIX: &str = "ENV_";

/// Environment variable overriding [`DEFAULT_SECRETS_DIR`]
pub const SECRETS_DIR_ENV_VAR: &str = "ENVWRAPPER_SECRETS_DIR";

/// Configuration of an [`EnvWrapper`](crate::EnvWrapper)
///
/// # Example
///
/// ```
/// use envwrapper_core::config::WrapperConfig;
/// use std::path::PathBuf;
///
/// let config = WrapperConfig::default();
/// assert_eq!(config.resolved_secrets_dir(), PathBuf::from("/run/secrets"));
///
/// let config = config.with_secrets_dir(" /var/run/app-secrets// ");
/// assert_eq!(config.resolved_secrets_dir(), PathBuf::from("/var/run/app-secrets"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapperConfig {
    /// Explicit secrets directory; `None` or blank selects `default_secrets_dir`
    pub secrets_dir: Option<String>,

    /// Directory used when no explicit one is given
    pub default_secrets_dir: String,

    /// Prefix secret file names must start with; blank selects `ENV_`
    pub prefix: String,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            secrets_dir: None,
            default_secrets_dir: DEFAULT_SECRETS_DIR.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl WrapperConfig {
    /// Defaults, with the default directory taken from `ENVWRAPPER_SECRETS_DIR`
    /// when that variable is set and not blank
    pub fn from_env() -> Self {
        Self::from_read_env(&SystemEnv)
    }

    /// Like [`from_env`](Self::from_env) but reading from any environment
    pub fn from_read_env(env: &dyn ReadEnv) -> Self {
        let mut config = Self::default();
        if let Some(dir) = env.var(SECRETS_DIR_ENV_VAR) {
            if !dir.trim().is_empty() {
                config.default_secrets_dir = dir;
            }
        }
        config
    }

    /// Set an explicit secrets directory
    pub fn with_secrets_dir(mut self, dir: impl Into<String>) -> Self {
        self.secrets_dir = Some(dir.into());
        self
    }

    /// Set the directory used when no explicit one is given
    pub fn with_default_secrets_dir(mut self, dir: impl Into<String>) -> Self {
        self.default_secrets_dir = dir.into();
        self
    }

    /// Set the file-name prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// The prefix in effect
    pub fn prefix(&self) -> &str {
        if self.prefix.trim().is_empty() {
            DEFAULT_PREFIX
        } else {
            &self.prefix
        }
    }

    /// The directory the scan will read
    ///
    /// Whitespace is trimmed and a blank value falls through to
    /// `default_secrets_dir` (and then to `/run/secrets`). Trailing path
    /// separators are stripped, except that a path made only of separators
    /// stays the root and a drive root such as `C:\` keeps its separator.
    pub fn resolved_secrets_dir(&self) -> PathBuf {
        let explicit = self
            .secrets_dir
            .as_deref()
            .map(str::trim)
            .filter(|dir| !dir.is_empty());
        let fallback = Some(self.default_secrets_dir.trim()).filter(|dir| !dir.is_empty());
        let raw = explicit.or(fallback).unwrap_or(DEFAULT_SECRETS_DIR);

        let stripped = raw.trim_end_matches(is_separator);
        if stripped.is_empty() {
            // only separators: keep the first one, i.e. the root
            let root: String = raw.chars().take(1).collect();
            return PathBuf::from(root);
        }
        if let Some(Component::Prefix(_)) = Path::new(stripped).components().next_back() {
            // `C:` is drive-relative, `C:\` is the drive root
            let sep = &raw[stripped.len()..];
            if let Some(first) = sep.chars().next() {
                return PathBuf::from(format!("{}{}", stripped, first));
            }
        }
        PathBuf::from(stripped)
    }
}

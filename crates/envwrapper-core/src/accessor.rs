//! Typed configuration accessor
//!
//! Every read walks the same chain:
//! 1. the secret snapshot, taken once at construction
//! 2. the environment, read live on every call
//! 3. the caller's default
//!
//! Keys are uppercased before either source is queried, and a value that is
//! empty after trimming counts as absent at every step.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::config::WrapperConfig;
use crate::env::{ReadEnv, SystemEnv};
use crate::fs::{SecretFs, SystemFs};
use crate::log_debug;
use crate::logging::{NoOpLogger, SharedLogger};
use crate::parse::{parse_bool, parse_int, split_list};
use crate::secrets::SecretSnapshot;

/// Which step of the chain produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueSource {
    Secret,
    Environment,
    Default,
}

impl ValueSource {
    /// Lowercase name of the source
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueSource::Secret => "secret",
            ValueSource::Environment => "environment",
            ValueSource::Default => "default",
        }
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value together with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    pub value: String,
    pub source: ValueSource,
}

impl ResolvedValue {
    /// Create a resolved value
    pub fn new(value: impl Into<String>, source: ValueSource) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }
}

/// Reads configuration from secret files with environment fallback
///
/// Construction scans the secrets directory once and never fails; reads
/// never fail either, degrading to the supplied default instead.
///
/// # Example
///
/// ```
/// use envwrapper_core::EnvWrapper;
/// use envwrapper_core::env::MemoryEnv;
/// use envwrapper_core::fs::MemoryFs;
/// use std::sync::Arc;
///
/// let fs = MemoryFs::new();
/// fs.add_file("/run/secrets/ENV_DB_PASSWORD", "hunter2\n");
///
/// let env = Arc::new(MemoryEnv::new());
/// env.set("DB_PASSWORD", "from-env");
/// env.set("WORKERS", "4");
/// env.set("DEBUG", "true");
/// env.set("HOSTS", "a.example b.example");
///
/// let wrapper = EnvWrapper::builder()
///     .secrets_dir("/run/secrets")
///     .env(env)
///     .fs(Arc::new(fs))
///     .build();
///
/// assert_eq!(wrapper.get_string("db_password"), "hunter2");
/// assert_eq!(wrapper.get_int("workers"), 4);
/// assert!(wrapper.get_bool("debug"));
/// assert_eq!(wrapper.get_string_array("hosts"), vec!["a.example", "b.example"]);
/// assert_eq!(wrapper.get_string_with_default("missing", "fallback"), "fallback");
/// ```
pub struct EnvWrapper {
    secrets: SecretSnapshot,
    env: Arc<dyn ReadEnv>,
}

static GLOBAL: Lazy<EnvWrapper> = Lazy::new(EnvWrapper::system);

/// Process-wide accessor over the real environment and the default secrets
/// directory, built on first use
pub fn global() -> &'static EnvWrapper {
    &GLOBAL
}

impl EnvWrapper {
    /// Accessor over the process environment and `secrets_dir`
    ///
    /// A blank `secrets_dir` selects the default directory (`/run/secrets`,
    /// or `ENVWRAPPER_SECRETS_DIR` when set).
    pub fn new(secrets_dir: &str) -> Self {
        Self::builder()
            .config(WrapperConfig::from_env())
            .secrets_dir(secrets_dir)
            .build()
    }

    /// Accessor over the process environment and the default directory
    pub fn system() -> Self {
        Self::new("")
    }

    /// Create an accessor from an explicit configuration
    pub fn from_config(config: &WrapperConfig) -> Self {
        Self::builder().config(config.clone()).build()
    }

    /// Start building an accessor with injected sources
    pub fn builder() -> EnvWrapperBuilder {
        EnvWrapperBuilder::default()
    }

    /// Look `name` up in the secrets, then the environment
    pub fn lookup(&self, name: &str) -> Option<ResolvedValue> {
        let key = name.to_uppercase();

        if let Some(secret) = self.secrets.get(&key).map(str::trim).filter(|v| !v.is_empty()) {
            return Some(ResolvedValue::new(secret, ValueSource::Secret));
        }

        let value = self.env.var(&key)?;
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(ResolvedValue::new(value, ValueSource::Environment))
        }
    }

    /// Like [`lookup`](Self::lookup), falling back to `default`
    pub fn resolve(&self, name: &str, default: &str) -> ResolvedValue {
        self.lookup(name)
            .unwrap_or_else(|| ResolvedValue::new(default, ValueSource::Default))
    }

    /// Whether either source has a non-empty value for `name`
    pub fn has(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Get a string value, or an empty string when absent
    pub fn get_string(&self, name: &str) -> String {
        self.get_string_with_default(name, "")
    }

    /// The trimmed value of `name`, or `default` untouched
    pub fn get_string_with_default(&self, name: &str, default: &str) -> String {
        self.resolve(name, default).value
    }

    /// Get a boolean value, or `false` when absent or unparsable
    pub fn get_bool(&self, name: &str) -> bool {
        self.get_bool_with_default(name, false)
    }

    /// `default` when `name` is absent or not one of `1 t true 0 f false`
    pub fn get_bool_with_default(&self, name: &str, default: bool) -> bool {
        parse_bool(&self.get_string(name)).unwrap_or(default)
    }

    /// Get an integer value, or `0` when absent or unparsable
    pub fn get_int(&self, name: &str) -> i64 {
        self.get_int_with_default(name, 0)
    }

    /// `default` when `name` is absent or not a base-10 `i64`
    pub fn get_int_with_default(&self, name: &str, default: i64) -> i64 {
        parse_int(&self.get_string(name)).unwrap_or(default)
    }

    /// Any `FromStr` type, `default` when absent or unparsable
    ///
    /// ```
    /// # use envwrapper_core::EnvWrapper;
    /// # use envwrapper_core::env::MemoryEnv;
    /// # use envwrapper_core::fs::MemoryFs;
    /// # use std::sync::Arc;
    /// let env = Arc::new(MemoryEnv::with_vars([("PORT", "8443"), ("RATIO", "0.25")]));
    /// let wrapper = EnvWrapper::builder().env(env).fs(Arc::new(MemoryFs::new())).build();
    ///
    /// assert_eq!(wrapper.get_parsed_with_default::<u16>("port", 80), 8443);
    /// assert_eq!(wrapper.get_parsed_with_default("ratio", 1.0_f64), 0.25);
    /// assert_eq!(wrapper.get_parsed_with_default::<u8>("port", 1), 1);
    /// ```
    pub fn get_parsed_with_default<T: FromStr>(&self, name: &str, default: T) -> T {
        let value = self.get_string(name);
        if value.is_empty() {
            return default;
        }
        value.parse().unwrap_or(default)
    }

    /// Whitespace-separated list
    pub fn get_string_array(&self, name: &str) -> Vec<String> {
        self.get_string_array_separated_by(name, " ")
    }

    /// Split on the literal `separator`, trimming parts and dropping empty ones
    pub fn get_string_array_separated_by(&self, name: &str, separator: &str) -> Vec<String> {
        split_list(&self.get_string(name), separator)
    }

    /// Keys loaded from the secrets directory, sorted
    pub fn secret_keys(&self) -> Vec<String> {
        self.secrets.keys()
    }

    /// The secrets directory that was scanned
    pub fn secrets_dir(&self) -> &Path {
        self.secrets.dir()
    }
}

impl Default for EnvWrapper {
    fn default() -> Self {
        Self::system()
    }
}

// Values stay out of Debug output
impl fmt::Debug for EnvWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvWrapper")
            .field("secrets_dir", &self.secrets.dir())
            .field("secrets", &format!("[{} secrets]", self.secrets.len()))
            .finish()
    }
}

/// Builder for [`EnvWrapper`] with injectable environment, filesystem and logger
#[derive(Default)]
pub struct EnvWrapperBuilder {
    config: WrapperConfig,
    env: Option<Arc<dyn ReadEnv>>,
    fs: Option<Arc<dyn SecretFs>>,
    logger: Option<SharedLogger>,
    secrets: Option<SecretSnapshot>,
}

impl EnvWrapperBuilder {
    /// Replace the whole configuration
    pub fn config(mut self, config: WrapperConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the secrets directory to scan
    pub fn secrets_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.secrets_dir = Some(dir.into());
        self
    }

    /// Set the file-name prefix of secret files
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    /// Environment to read; defaults to the process environment
    pub fn env(mut self, env: Arc<dyn ReadEnv>) -> Self {
        self.env = Some(env);
        self
    }

    /// Filesystem to scan; defaults to the real one
    pub fn fs(mut self, fs: Arc<dyn SecretFs>) -> Self {
        self.fs = Some(fs);
        self
    }

    /// Logger for the directory scan; silent by default
    pub fn logger(mut self, logger: SharedLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Use a prepared snapshot instead of scanning a directory
    pub fn secrets(mut self, secrets: SecretSnapshot) -> Self {
        self.secrets = Some(secrets);
        self
    }

    /// Scan the secrets directory and return the accessor
    pub fn build(self) -> EnvWrapper {
        let logger: SharedLogger = self.logger.unwrap_or_else(|| Arc::new(NoOpLogger));

        let secrets = match self.secrets {
            Some(secrets) => secrets,
            None => {
                let fs: Arc<dyn SecretFs> = self.fs.unwrap_or_else(|| Arc::new(SystemFs));
                let dir = self.config.resolved_secrets_dir();
                log_debug!(
                    logger,
                    "reading secrets from {} (prefix {})",
                    dir.display(),
                    self.config.prefix()
                );
                SecretSnapshot::load(fs.as_ref(), &dir, self.config.prefix(), logger.as_ref())
            }
        };

        EnvWrapper {
            secrets,
            env: self.env.unwrap_or_else(|| Arc::new(SystemEnv)),
        }
    }
}

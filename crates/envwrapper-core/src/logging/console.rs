//! Console logger implementation

use super::traits::{LogLevel, Logger};
use crate::env::ReadEnv;

/// Environment variable selecting the minimum level of [`ConsoleLogger::from_env`]
pub const LOG_LEVEL_ENV_VAR: &str = "ENVWRAPPER_LOG_LEVEL";

/// A logger that writes `<prefix> <LEVEL>: <message>` lines to stderr
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    min_level: LogLevel,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Console logger with the `[envwrapper]` prefix, logging everything
    pub fn new() -> Self {
        Self {
            prefix: "[envwrapper]".to_string(),
            min_level: LogLevel::Debug,
        }
    }

    /// Console logger with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::new()
        }
    }

    /// Drop messages below `level`
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Console logger whose minimum level comes from `ENVWRAPPER_LOG_LEVEL`
    ///
    /// Unset or unrecognised values select `warn`.
    pub fn from_env(env: &dyn ReadEnv) -> Self {
        let level = env
            .var(LOG_LEVEL_ENV_VAR)
            .and_then(|v| LogLevel::from_name(&v))
            .unwrap_or(LogLevel::Warn);
        Self::new().with_min_level(level)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    fn format_line(&self, level: LogLevel, message: &str) -> String {
        format!("{} {}: {}", self.prefix, level, message)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }
        eprintln!("{}", self.format_line(level, message));
    }
}

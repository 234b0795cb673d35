//! No-op logger implementation

use super::traits::{LogLevel, Logger};

/// A logger that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

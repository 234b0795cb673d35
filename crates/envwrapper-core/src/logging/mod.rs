//! Logging abstractions
//!
//! The accessor never writes to stdout/stderr on its own. Hosts inject a
//! [`Logger`] through [`EnvWrapperBuilder::logger`](crate::EnvWrapperBuilder::logger)
//! to see what the secrets directory scan did. Only keys, paths and reasons
//! are ever logged, never secret values.

mod traits;
mod noop;
mod console;

pub use traits::{Logger, LogLevel, SharedLogger};
pub use noop::NoOpLogger;
pub use console::{ConsoleLogger, LOG_LEVEL_ENV_VAR};

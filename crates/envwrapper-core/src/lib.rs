//! EnvWrapper Core
//!
//! Typed configuration access over environment variables, with values from
//! a directory of secret files taking precedence. A file named `ENV_<NAME>`
//! in the secrets directory (by default `/run/secrets`, the usual container
//! secrets mount) overrides the environment variable `<NAME>`.
//!
//! ```rust,no_run
//! use envwrapper_core::EnvWrapper;
//!
//! let config = EnvWrapper::new("");
//!
//! let db_password = config.get_string("db_password");
//! let workers = config.get_int_with_default("workers", 4);
//! let verbose = config.get_bool("verbose");
//! let origins = config.get_string_array_separated_by("allowed_origins", ",");
//! ```
//!
//! Nothing here returns an error: missing directories, unreadable files,
//! unset variables and unparsable values all resolve to the caller's default.

pub mod env;
pub mod fs;
pub mod secrets;
pub mod logging;
pub mod config;
pub mod parse;
pub mod accessor;

pub use accessor::{global, EnvWrapper, EnvWrapperBuilder, ResolvedValue, ValueSource};

pub use config::{WrapperConfig, DEFAULT_PREFIX, DEFAULT_SECRETS_DIR, SECRETS_DIR_ENV_VAR};

pub use env::{ReadEnv, SystemEnv, MemoryEnv};

pub use fs::{SecretFs, SystemFs, MemoryFs, FsError, FsResult};

pub use secrets::SecretSnapshot;

pub use logging::{Logger, LogLevel, NoOpLogger, ConsoleLogger, SharedLogger};

pub use parse::ParseValueError;

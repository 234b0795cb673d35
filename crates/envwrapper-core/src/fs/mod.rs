//! Filesystem access for the secrets directory scan
//!
//! - `SecretFs` trait: directory existence, listing and file reads
//! - `SystemFs`: delegates to `std::fs`
//! - `MemoryFs`: an in-memory file tree for tests

mod traits;
mod system;
mod memory;

pub use traits::{SecretFs, DirEntry, FsError, FsResult};
pub use system::SystemFs;
pub use memory::MemoryFs;

//! Environment variable access
//!
//! - `ReadEnv` trait: the one capability the accessor needs (`var`)
//! - `SystemEnv`: the live process environment, read on every call
//! - `MemoryEnv`: an in-memory table for tests and embedding

mod traits;
mod system;
mod memory;

pub use traits::ReadEnv;
pub use system::SystemEnv;
pub use memory::MemoryEnv;

//! Secret files
//!
//! A [`SecretSnapshot`] is read once from a directory of `ENV_*` files and
//! never changes afterwards.

mod snapshot;

pub use snapshot::SecretSnapshot;

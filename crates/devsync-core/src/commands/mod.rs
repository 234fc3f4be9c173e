//! High-level commands for devsync operations.
//!
//! Commands own the load/mutate/save cycle around the pure resolvers in
//! [`crate::mapping`] and are what the CLI calls into.

pub mod sync;

pub use sync::{AddOptions, RemoveOptions, SyncCommand, SyncReport};

//! DevSync Core Library
//!
//! Manages the sync paths of a devsync project: which local directory is
//! mirrored into which container path, and which workload (named service
//! or label selector) it targets.

pub mod commands;
pub mod config;
pub mod env;
pub mod error;
pub mod mapping;
pub mod selector;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigStore, DevSyncConfig, ServiceConfig, SyncMapping};

    // Commands
    pub use crate::commands::{AddOptions, RemoveOptions, SyncCommand, SyncReport};

    // Resolution
    pub use crate::error::SyncError;
    pub use crate::selector::{Selector, parse_selector, selectors_equal};

    // Environment
    pub use crate::env::{
        DeploymentReleases, FixedWorkingDirectory, ProcessWorkingDirectory, ReleaseDiscoverer,
        WorkingDirectory,
    };
}

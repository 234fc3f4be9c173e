//! Project configuration (`devsync.toml`)
//!
//! The document holds the service catalog, deployments, and the sync
//! mapping list. Resolvers never touch the file; callers load a
//! [`DevSyncConfig`] through [`ConfigStore`], mutate it, and save it back.

pub mod parser;
pub mod schema;
pub mod store;

pub use parser::{parse_devsync_toml, parse_devsync_toml_str, to_toml};
pub use schema::{DeploymentConfig, DevSyncConfig, HelmConfig, ServiceConfig, SyncMapping};
pub use store::{CONFIG_FILE_NAME, ConfigStore};

//! Config store for loading and saving devsync.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{DevSyncConfig, parser};

/// File name of the project configuration
pub const CONFIG_FILE_NAME: &str = "devsync.toml";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Store for `<project_root>/devsync.toml`
    pub fn from_project_root(project_root: impl AsRef<Path>) -> Self {
        Self::from_path(project_root.as_ref().join(CONFIG_FILE_NAME))
    }

    pub fn from_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> anyhow::Result<DevSyncConfig> {
        if !self.config_path.exists() {
            return Ok(DevSyncConfig::new());
        }
        parser::parse_devsync_toml(&self.config_path)
    }

    pub fn save(&self, config: &DevSyncConfig) -> anyhow::Result<()> {
        let content = parser::to_toml(config).context("Failed to serialize config to TOML")?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&self.config_path, content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;
        Ok(())
    }
}

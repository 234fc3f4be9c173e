//! Sync path command implementation.
//!
//! Adds, removes and lists the `[[sync]]` entries of devsync.toml.

use std::path::PathBuf;

use anyhow::Context;
use tracing::{debug, info};

use crate::config::{ConfigStore, SyncMapping};
use crate::env::{DeploymentReleases, WorkingDirectory};
use crate::error::SyncError;
use crate::mapping::{AddRequest, RemoveRequest, add_mapping, remove_mappings};

/// Options for adding a sync path
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Local path (absolute paths inside the working directory are made relative)
    pub local_path: String,
    /// Absolute container path
    pub container_path: String,
    /// Target namespace (empty = default)
    pub namespace: String,
    /// Label selector expression, e.g. `app=web,tier=fe`
    pub label_selector: String,
    /// Comma-separated exclude patterns
    pub exclude_paths: String,
    /// Referenced service name
    pub service: String,
}

impl AddOptions {
    pub fn new(local_path: impl Into<String>, container_path: impl Into<String>) -> Self {
        Self {
            local_path: local_path.into(),
            container_path: container_path.into(),
            ..Default::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_label_selector(mut self, selector: impl Into<String>) -> Self {
        self.label_selector = selector.into();
        self
    }

    pub fn with_exclude_paths(mut self, exclude_paths: impl Into<String>) -> Self {
        self.exclude_paths = exclude_paths.into();
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    fn as_request(&self) -> AddRequest<'_> {
        AddRequest {
            local_path: &self.local_path,
            container_path: &self.container_path,
            namespace: &self.namespace,
            label_selector: &self.label_selector,
            exclude_paths: &self.exclude_paths,
            service: &self.service,
        }
    }
}

/// Options for removing sync paths
#[derive(Debug, Clone, Default)]
pub struct RemoveOptions {
    /// Remove every sync path
    pub all: bool,
    pub local_path: String,
    pub container_path: String,
    pub label_selector: String,
}

impl RemoveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    pub fn with_local_path(mut self, local_path: impl Into<String>) -> Self {
        self.local_path = local_path.into();
        self
    }

    pub fn with_container_path(mut self, container_path: impl Into<String>) -> Self {
        self.container_path = container_path.into();
        self
    }

    pub fn with_label_selector(mut self, selector: impl Into<String>) -> Self {
        self.label_selector = selector.into();
        self
    }

    fn as_request(&self) -> RemoveRequest<'_> {
        RemoveRequest {
            remove_all: self.all,
            local_path: &self.local_path,
            container_path: &self.container_path,
            label_selector: &self.label_selector,
        }
    }
}

/// Result of a sync path operation
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Whether the config file was rewritten
    pub changed: bool,
    /// Mapping appended by an add
    pub added: Option<SyncMapping>,
    /// Number of mappings dropped by a remove
    pub removed: usize,
    /// Number of mappings after the operation
    pub total: usize,
}

/// Sync path command orchestrator
#[derive(Debug)]
pub struct SyncCommand {
    store: ConfigStore,
}

impl SyncCommand {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    /// Create a sync command for devsync.toml in the current directory
    pub fn with_defaults() -> anyhow::Result<Self> {
        let project_root = std::env::current_dir()?;
        Ok(Self::with_project_root(project_root))
    }

    pub fn with_project_root(project_root: impl Into<PathBuf>) -> Self {
        Self::new(ConfigStore::from_project_root(project_root.into()))
    }

    pub fn config_store(&self) -> &ConfigStore {
        &self.store
    }

    /// List configured sync paths
    pub fn list(&self) -> anyhow::Result<Vec<SyncMapping>> {
        Ok(self.store.load()?.sync)
    }

    /// Add a sync path
    pub fn add(
        &self,
        options: &AddOptions,
        working_dir: &dyn WorkingDirectory,
    ) -> anyhow::Result<SyncReport> {
        let mut config = self.store.load()?;
        let cwd = working_dir.current().map_err(SyncError::Environment)?;

        let releases = DeploymentReleases::new(&config.deployments);
        let mappings = add_mapping(
            &options.as_request(),
            &config.sync,
            &config.services,
            &cwd,
            &releases,
        )
        .context("Failed to add sync path")?;

        let added = mappings.last().cloned();
        if let Some(mapping) = &added {
            debug!(
                local = %mapping.local_path,
                container = %mapping.container_path,
                service = ?mapping.service,
                "Resolved sync path"
            );
        }

        config.sync = mappings;
        self.store.save(&config).context("Couldn't save config file")?;
        info!(
            path = %self.store.config_path().display(),
            total = config.sync.len(),
            "Added sync path"
        );

        Ok(SyncReport {
            changed: true,
            added,
            removed: 0,
            total: config.sync.len(),
        })
    }

    /// Remove sync paths matching any of the given criteria
    pub fn remove(&self, options: &RemoveOptions) -> anyhow::Result<SyncReport> {
        let mut config = self.store.load()?;

        let remaining = remove_mappings(&options.as_request(), &config.sync)
            .context("Failed to remove sync path")?;
        let removed = config.sync.len() - remaining.len();

        if removed > 0 {
            config.sync = remaining;
            self.store.save(&config).context("Couldn't save config file")?;
            info!(removed, total = config.sync.len(), "Removed sync paths");
        } else {
            debug!("No sync path matched");
        }

        Ok(SyncReport {
            changed: removed > 0,
            added: None,
            removed,
            total: config.sync.len(),
        })
    }
}

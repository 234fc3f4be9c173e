//! Configuration schema for devsync.toml
//!
//! ```toml
//! [[services]]
//! name = "backend"
//! label_selector = { app = "api" }
//!
//! [[deployments]]
//! name = "myapp"
//! helm = { chart = "./chart" }
//!
//! [[sync]]
//! local_path = "./src"
//! container_path = "/app/src"
//! exclude_paths = ["node_modules/"]
//! service = "backend"
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::selector::Selector;

/// Root configuration structure for devsync.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DevSyncConfig {
    /// Named services; the first one is the default sync target
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServiceConfig>,

    /// Deployments; used to derive a default release selector
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deployments: Vec<DeploymentConfig>,

    /// Configured sync mappings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sync: Vec<SyncMapping>,
}

/// A named target bundling its own label selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default)]
    pub label_selector: Selector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Present when the deployment is installed as a helm release
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helm: Option<HelmConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelmConfig {
    pub chart: String,
}

/// One local <-> container path pairing.
///
/// A mapping targets either a named service or its own label selector,
/// never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncMapping {
    /// Path on the developer machine, relative to the project when possible
    pub local_path: String,

    /// Absolute path inside the container
    pub container_path: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_paths: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Referenced service; its selector is resolved at sync time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_selector: Option<Selector>,
}

impl SyncMapping {
    pub fn new(local_path: impl Into<String>, container_path: impl Into<String>) -> Self {
        Self {
            local_path: local_path.into(),
            container_path: container_path.into(),
            exclude_paths: Vec::new(),
            namespace: None,
            service: None,
            label_selector: None,
        }
    }

    pub fn with_label_selector(mut self, selector: Selector) -> Self {
        self.label_selector = Some(selector);
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_exclude_paths(mut self, exclude_paths: Vec<String>) -> Self {
        self.exclude_paths = exclude_paths;
        self
    }
}

impl DevSyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut names = HashSet::new();
        for service in &self.services {
            if service.name.is_empty() {
                anyhow::bail!("Service names must not be empty");
            }
            if !names.insert(service.name.as_str()) {
                anyhow::bail!("Duplicate service name: {}", service.name);
            }
        }

        for (index, mapping) in self.sync.iter().enumerate() {
            if !mapping.container_path.starts_with('/') {
                anyhow::bail!(
                    "sync[{}]: container_path must start with '/', got '{}'",
                    index,
                    mapping.container_path
                );
            }
            if mapping.service.is_some() && mapping.label_selector.is_some() {
                anyhow::bail!(
                    "sync[{}]: 'service' and 'label_selector' are mutually exclusive",
                    index
                );
            }
        }

        Ok(())
    }
}

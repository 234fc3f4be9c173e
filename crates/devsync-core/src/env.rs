//! Environment collaborators consulted while resolving sync mappings.

use crate::config::DeploymentConfig;

/// Release name used when no helm deployment is configured.
pub const DEFAULT_RELEASE_NAME: &str = "devsync";

/// Source of the current working directory.
pub trait WorkingDirectory {
    fn current(&self) -> std::io::Result<String>;
}

/// Reads the working directory of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessWorkingDirectory;

impl WorkingDirectory for ProcessWorkingDirectory {
    fn current(&self) -> std::io::Result<String> {
        let dir = std::env::current_dir()?;
        Ok(dir.to_string_lossy().into_owned())
    }
}

/// Always reports the same directory.
#[derive(Debug, Clone)]
pub struct FixedWorkingDirectory(pub String);

impl WorkingDirectory for FixedWorkingDirectory {
    fn current(&self) -> std::io::Result<String> {
        Ok(self.0.clone())
    }
}

/// Lookup for the first deployed workload release.
///
/// Only consulted when no services are configured, to synthesize a
/// `release=<name>` selector.
pub trait ReleaseDiscoverer {
    fn first_deployed_release_name(&self) -> String;
}

/// Discovers releases from the configured deployments.
#[derive(Debug, Clone, Copy)]
pub struct DeploymentReleases<'a> {
    deployments: &'a [DeploymentConfig],
}

impl<'a> DeploymentReleases<'a> {
    pub fn new(deployments: &'a [DeploymentConfig]) -> Self {
        Self { deployments }
    }
}

impl ReleaseDiscoverer for DeploymentReleases<'_> {
    fn first_deployed_release_name(&self) -> String {
        self.deployments
            .iter()
            .find(|deployment| deployment.helm.is_some())
            .map(|deployment| deployment.name.clone())
            .unwrap_or_else(|| DEFAULT_RELEASE_NAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HelmConfig;

    fn deployment(name: &str, helm: bool) -> DeploymentConfig {
        DeploymentConfig {
            name: name.to_string(),
            namespace: None,
            helm: helm.then(|| HelmConfig {
                chart: "./chart".to_string(),
            }),
        }
    }

    #[test]
    fn first_helm_deployment_wins() {
        let deployments = vec![
            deployment("manifests", false),
            deployment("api", true),
            deployment("web", true),
        ];
        let releases = DeploymentReleases::new(&deployments);
        assert_eq!(releases.first_deployed_release_name(), "api");
    }

    #[test]
    fn falls_back_to_default_release() {
        let deployments = vec![deployment("manifests", false)];
        let releases = DeploymentReleases::new(&deployments);
        assert_eq!(releases.first_deployed_release_name(), DEFAULT_RELEASE_NAME);
        assert_eq!(
            DeploymentReleases::new(&[]).first_deployed_release_name(),
            DEFAULT_RELEASE_NAME
        );
    }

    #[test]
    fn fixed_working_directory() {
        let wd = FixedWorkingDirectory("/home/dev/project".to_string());
        assert_eq!(wd.current().unwrap(), "/home/dev/project");
    }

    #[test]
    fn process_working_directory_is_absolute() {
        let cwd = ProcessWorkingDirectory.current().unwrap();
        assert!(std::path::Path::new(&cwd).is_absolute());
    }
}

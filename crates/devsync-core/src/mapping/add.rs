//! Appending a sync mapping.

use crate::config::{ServiceConfig, SyncMapping};
use crate::env::ReleaseDiscoverer;
use crate::error::SyncError;
use crate::selector::{Selector, parse_selector};

/// Raw inputs for a new mapping. Empty strings mean "not given".
#[derive(Debug, Clone, Copy, Default)]
pub struct AddRequest<'a> {
    pub local_path: &'a str,
    pub container_path: &'a str,
    pub namespace: &'a str,
    pub label_selector: &'a str,
    pub exclude_paths: &'a str,
    pub service: &'a str,
}

/// Resolve the target of a new mapping and append it to `mappings`.
///
/// Without an explicit selector the mapping targets `request.service` (or
/// the first catalog service). With an empty catalog a `release=<name>`
/// selector is derived from `releases`. `working_dir` is stripped from the
/// front of the local path when present.
pub fn add_mapping(
    request: &AddRequest<'_>,
    mappings: &[SyncMapping],
    services: &[ServiceConfig],
    working_dir: &str,
    releases: &dyn ReleaseDiscoverer,
) -> Result<Vec<SyncMapping>, SyncError> {
    if !request.label_selector.is_empty() && !request.service.is_empty() {
        return Err(SyncError::ConflictingTargetSpec);
    }

    let selector = if request.label_selector.is_empty() {
        default_selector(request.service, services, releases)?
    } else {
        parse_selector(request.label_selector)?
    };

    let local_path = request
        .local_path
        .strip_prefix(working_dir)
        .unwrap_or(request.local_path);

    if !request.container_path.starts_with('/') {
        return Err(SyncError::InvalidContainerPath {
            path: request.container_path.to_string(),
        });
    }

    // Service-scoped mappings resolve their selector through the service at sync time.
    let (service, label_selector) = if request.service.is_empty() {
        (None, Some(selector))
    } else {
        (Some(request.service.to_string()), None)
    };

    let mut updated = mappings.to_vec();
    updated.push(SyncMapping {
        local_path: local_path.to_string(),
        container_path: request.container_path.to_string(),
        exclude_paths: parse_exclude_paths(request.exclude_paths),
        namespace: non_empty(request.namespace),
        service,
        label_selector,
    });
    Ok(updated)
}

fn default_selector(
    service_name: &str,
    services: &[ServiceConfig],
    releases: &dyn ReleaseDiscoverer,
) -> Result<Selector, SyncError> {
    let Some(first) = services.first() else {
        let expr = format!("release={}", releases.first_deployed_release_name());
        return parse_selector(&expr);
    };

    let service = if service_name.is_empty() {
        first
    } else {
        services
            .iter()
            .find(|s| s.name == service_name)
            .ok_or_else(|| SyncError::ServiceNotFound {
                name: service_name.to_string(),
            })?
    };
    Ok(service.label_selector.clone())
}

/// Split a comma-separated exclude list, trimming each pattern.
///
/// Tokens that are empty after trimming (`a,,b`, a trailing comma) are
/// dropped, so the result never holds a blank pattern.
pub fn parse_exclude_paths(expr: &str) -> Vec<String> {
    expr.split(',')
        .map(str::trim)
        .filter(|pattern| !pattern.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

//! Removing sync mappings.

use crate::config::SyncMapping;
use crate::error::SyncError;
use crate::selector::{Selector, parse_selector, selectors_equal};

/// Raw removal criteria. Empty strings mean "not given".
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveRequest<'a> {
    pub remove_all: bool,
    pub local_path: &'a str,
    pub container_path: &'a str,
    pub label_selector: &'a str,
}

/// Drop every mapping matched by *any* criterion of `request`.
///
/// A mapping is removed when `remove_all` is set, its local path or
/// container path equals the query literally, or it carries a label
/// selector equal to the query selector. Mappings without a stored selector
/// (service-scoped) are never matched by selector.
///
/// Matching is an OR over the criteria, so `--local a --container /b`
/// removes mappings that match either one. Paths are compared literally:
/// an empty query path matches a mapping whose stored path is also empty.
///
/// Surviving mappings keep their relative order.
pub fn remove_mappings(
    request: &RemoveRequest<'_>,
    mappings: &[SyncMapping],
) -> Result<Vec<SyncMapping>, SyncError> {
    let selector = parse_selector(request.label_selector)?;

    if !request.remove_all
        && selector.is_empty()
        && request.local_path.is_empty()
        && request.container_path.is_empty()
    {
        return Err(SyncError::NoCriteriaSpecified);
    }

    Ok(mappings
        .iter()
        .filter(|mapping| !is_match(request, &selector, mapping))
        .cloned()
        .collect())
}

fn is_match(request: &RemoveRequest<'_>, selector: &Selector, mapping: &SyncMapping) -> bool {
    request.remove_all
        || mapping.local_path == request.local_path
        || mapping.container_path == request.container_path
        || mapping
            .label_selector
            .as_ref()
            .is_some_and(|stored| selectors_equal(selector, stored))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(local: &str, container: &str, selector: &str) -> SyncMapping {
        SyncMapping::new(local, container).with_label_selector(parse_selector(selector).unwrap())
    }

    fn sample() -> Vec<SyncMapping> {
        vec![
            mapping("/a", "/x", "app=a"),
            mapping("/b", "/y", "app=b"),
            SyncMapping::new("/c", "/z").with_service("svc"),
        ]
    }

    #[test]
    fn requires_some_criterion() {
        let err = remove_mappings(&RemoveRequest::default(), &sample()).unwrap_err();
        assert!(matches!(err, SyncError::NoCriteriaSpecified));
    }

    #[test]
    fn invalid_selector_is_reported_first() {
        let req = RemoveRequest {
            label_selector: "broken",
            ..Default::default()
        };
        let err = remove_mappings(&req, &sample()).unwrap_err();
        assert!(matches!(err, SyncError::InvalidSelector { .. }));
    }

    #[test]
    fn removes_by_local_path() {
        let mappings = vec![
            SyncMapping::new("/a", "/x"),
            SyncMapping::new("/b", "/y"),
        ];
        let req = RemoveRequest {
            local_path: "/a",
            ..Default::default()
        };

        let remaining = remove_mappings(&req, &mappings).unwrap();

        assert_eq!(remaining, vec![SyncMapping::new("/b", "/y")]);
    }

    #[test]
    fn removes_by_container_path() {
        let req = RemoveRequest {
            container_path: "/z",
            ..Default::default()
        };

        let remaining = remove_mappings(&req, &sample()).unwrap();

        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|m| m.container_path != "/z"));
    }

    #[test]
    fn removes_by_selector() {
        let req = RemoveRequest {
            label_selector: "app = b",
            ..Default::default()
        };

        let remaining = remove_mappings(&req, &sample()).unwrap();

        let locals: Vec<_> = remaining.iter().map(|m| m.local_path.as_str()).collect();
        assert_eq!(locals, vec!["/a", "/c"]);
    }

    #[test]
    fn selector_must_match_exactly() {
        let req = RemoveRequest {
            label_selector: "app=a,tier=fe",
            ..Default::default()
        };

        let remaining = remove_mappings(&req, &sample()).unwrap();

        assert_eq!(remaining, sample());
    }

    #[test]
    fn remove_all_ignores_other_criteria() {
        let req = RemoveRequest {
            remove_all: true,
            local_path: "/does-not-exist",
            label_selector: "app=nope",
            ..Default::default()
        };

        assert!(remove_mappings(&req, &sample()).unwrap().is_empty());
    }

    #[test]
    fn criteria_are_combined_with_or() {
        let req = RemoveRequest {
            local_path: "/a",
            container_path: "/y",
            ..Default::default()
        };

        let remaining = remove_mappings(&req, &sample()).unwrap();

        assert_eq!(remaining, vec![SyncMapping::new("/c", "/z").with_service("svc")]);
    }

    #[test]
    fn empty_query_path_matches_empty_stored_path() {
        let mappings = vec![mapping("", "/root", "app=root"), mapping("/a", "/x", "app=a")];
        let req = RemoveRequest {
            container_path: "/x",
            ..Default::default()
        };

        // The empty local path of the query equals the first mapping's stored path.
        let remaining = remove_mappings(&req, &mappings).unwrap();

        assert!(remaining.is_empty());
    }

    #[test]
    fn empty_query_selector_matches_empty_stored_selector() {
        let mappings = vec![
            SyncMapping::new("/a", "/x").with_label_selector(Selector::new()),
            mapping("/b", "/y", "app=b"),
        ];
        let req = RemoveRequest {
            local_path: "/b",
            ..Default::default()
        };

        let remaining = remove_mappings(&req, &mappings).unwrap();

        assert!(remaining.is_empty());
    }

    #[test]
    fn service_mappings_are_not_matched_by_selector() {
        let req = RemoveRequest {
            local_path: "/a",
            ..Default::default()
        };

        let remaining = remove_mappings(&req, &sample()).unwrap();

        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[1].service.as_deref(), Some("svc"));
    }

    #[test]
    fn preserves_order_of_survivors() {
        let mappings = vec![
            mapping("/1", "/1", "n=1"),
            mapping("/2", "/2", "n=2"),
            mapping("/3", "/3", "n=3"),
            mapping("/4", "/4", "n=4"),
        ];
        let req = RemoveRequest {
            label_selector: "n=2",
            ..Default::default()
        };

        let remaining = remove_mappings(&req, &mappings).unwrap();

        let locals: Vec<_> = remaining.iter().map(|m| m.local_path.as_str()).collect();
        assert_eq!(locals, vec!["/1", "/3", "/4"]);
    }
}

//! Errors raised while resolving sync mapping changes.

use thiserror::Error;

/// Reasons an add or remove of a sync mapping is rejected.
///
/// None of these are retryable; the mapping list is left untouched.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(
        "both service and label selector specified; the label selector is already defined by the referenced service"
    )]
    ConflictingTargetSpec,

    #[error("no service with name '{name}' exists")]
    ServiceNotFound { name: String },

    #[error("wrong selector format: {expr}")]
    InvalidSelector { expr: String },

    #[error("container path must start with '/', got '{path}' (MINGW based terminals like git bash may rewrite it)")]
    InvalidContainerPath { path: String },

    #[error("at least one of --all, --local, --container or --label-selector must be specified")]
    NoCriteriaSpecified,

    #[error("unable to determine current working directory")]
    Environment(#[source] std::io::Error),
}

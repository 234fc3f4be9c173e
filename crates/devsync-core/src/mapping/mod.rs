//! Resolution of sync mapping additions and removals.
//!
//! Both resolvers are pure: they take a snapshot of the mapping list and
//! return a new list, or an error with the snapshot left as it was.
//! Loading and saving the list is the caller's job.

pub mod add;
pub mod remove;

pub use add::{AddRequest, add_mapping, parse_exclude_paths};
pub use remove::{RemoveRequest, remove_mappings};

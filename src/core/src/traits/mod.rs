//! Collaborator traits the engine reads through
//!
//! Every lookup is per request; implementations own persistence and must not
//! expect the engine to cache anything between calls.

pub mod directory;
pub mod storage;
pub mod access;
pub mod search;

// Re-export commonly used traits
pub use directory::{GrantTable, MembershipIndex};
pub use storage::TaxonomyStorage;
pub use access::PermissionCheck;
pub use search::{MatchOperator, Suggestion, SuggestionSearch};

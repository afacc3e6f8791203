//! Shared types for GroupScope

pub mod group;
pub mod taxonomy;

// Re-export commonly used types
pub use group::{Group, Membership, VocabularyGrant};
pub use taxonomy::{MatchResult, Term, Vocabulary};

/// Group identifier
pub type GroupId = String;

/// Grant (group-to-vocabulary association) identifier
pub type GrantId = String;

/// Vocabulary identifier (also the term bundle name)
pub type VocabularyId = String;

/// Term identifier
pub type TermId = String;

/// Content type (entity bundle) identifier, e.g. "article"
pub type ContentTypeId = String;

/// User identifier
pub type UserId = String;

/// Content entity identifier
pub type EntityId = String;

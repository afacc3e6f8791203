//! # GroupScope Core
//!
//! Shared identifiers, the group/taxonomy data model, collaborator traits and
//! error handling for the GroupScope engine. The engine crate depends on this
//! package only through the traits in [`traits`], so any storage backend can
//! be plugged in behind them.

pub mod types;
pub mod traits;
pub mod error;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{
    ContentTypeId, EntityId, Group, GroupId, GrantId, MatchResult, Membership, Term, TermId,
    UserId, Vocabulary, VocabularyGrant, VocabularyId,
};
pub use traits::{
    GrantTable, MatchOperator, MembershipIndex, PermissionCheck, Suggestion, SuggestionSearch,
    TaxonomyStorage,
};

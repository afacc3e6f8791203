//! Taxonomy and content storage lookups

use crate::error::Result;
use crate::types::{Group, GroupId, Term, TermId, Vocabulary, VocabularyId};
use async_trait::async_trait;

/// Read-only view of groups, vocabularies, terms and content links
#[async_trait]
pub trait TaxonomyStorage: Send + Sync {
    /// Full term tree of a vocabulary, in display order
    async fn load_term_tree(&self, vocabulary_id: &str) -> Result<Vec<Term>>;

    /// Vocabulary owning a term, `None` for dangling term ids
    async fn resolve_vocabulary_for_term(&self, term_id: &str) -> Result<Option<VocabularyId>>;

    /// Groups the content entity is linked to
    async fn groups_linked_to_entity(&self, entity_id: &str) -> Result<Vec<GroupId>>;

    /// Group with exactly this label, first match when labels collide
    async fn group_by_label(&self, label: &str) -> Result<Option<GroupId>>;

    /// Load a group record
    async fn load_group(&self, group_id: &str) -> Result<Option<Group>>;

    /// Load a vocabulary record
    async fn load_vocabulary(&self, vocabulary_id: &str) -> Result<Option<Vocabulary>>;

    /// Term ids persisted for an entity's reference field
    async fn persisted_selection(&self, entity_id: &str, field_name: &str) -> Result<Vec<TermId>>;
}

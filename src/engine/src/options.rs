//! Option building for the field-entry widget
//!
//! Expands allowed vocabularies into ordered term options, marks persisted
//! selections as defaults and decides which vocabulary selectors are
//! read-only for the acting user.

use std::sync::Arc;

use groupscope_core::{TaxonomyStorage, TermId, VocabularyId};
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::error::Result;
use crate::scope::{GroupSet, VocabularySet};

/// Term id -> term label, in tree order
pub type TermOptions = IndexMap<TermId, String>;

/// Vocabulary id -> its term options, in scope order
pub type OptionMap = IndexMap<VocabularyId, TermOptions>;

/// Vocabulary id -> selected term ids
pub type DefaultMap = IndexMap<VocabularyId, IndexSet<TermId>>;

/// Builds per-vocabulary term options from storage
#[derive(Clone)]
pub struct OptionBuilder {
    storage: Arc<dyn TaxonomyStorage>,
}

impl OptionBuilder {
    pub fn new(storage: Arc<dyn TaxonomyStorage>) -> Self {
        Self { storage }
    }

    /// Load the term tree of every allowed vocabulary
    ///
    /// A vocabulary without terms is kept with an empty option map so the
    /// caller can still show it as an empty group.
    pub async fn build_options(&self, vocabulary_ids: &VocabularySet) -> Result<OptionMap> {
        let mut options = OptionMap::with_capacity(vocabulary_ids.len());

        for vocabulary_id in vocabulary_ids {
            let terms = self.storage.load_term_tree(vocabulary_id).await?;
            let entry: TermOptions = terms.into_iter().map(|t| (t.id, t.name)).collect();
            debug!(vocabulary = %vocabulary_id, terms = entry.len(), "Loaded term options");
            options.insert(vocabulary_id.clone(), entry);
        }

        Ok(options)
    }
}

/// Persisted selections that are still offered, per vocabulary
///
/// Selected ids that no longer appear in any option set (deleted or
/// unreachable terms) are dropped silently.
pub fn compute_defaults(options: &OptionMap, selection: &[TermId]) -> DefaultMap {
    options
        .iter()
        .map(|(vocabulary_id, terms)| {
            let selected: IndexSet<TermId> = selection
                .iter()
                .filter(|term_id| terms.contains_key(term_id.as_str()))
                .cloned()
                .collect();
            (vocabulary_id.clone(), selected)
        })
        .collect()
}

/// Whether a vocabulary selector is read-only for the acting user
///
/// Disabled when the user lacks the override permission and the vocabulary's
/// owning group is not one of the user's groups. A vocabulary without an
/// owning group counts as outside the user's groups.
pub fn compute_disabled(
    owning_group: Option<&str>,
    acting_user_groups: &GroupSet,
    has_override_permission: bool,
) -> bool {
    if has_override_permission {
        return false;
    }
    match owning_group {
        Some(group_id) => !acting_user_groups.contains(group_id),
        None => true,
    }
}

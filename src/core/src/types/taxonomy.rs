//! Vocabularies, terms and search match results

use super::{TermId, VocabularyId};
use serde::{Deserialize, Serialize};

/// A taxonomy vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub id: VocabularyId,
    pub label: String,
}

impl Vocabulary {
    pub fn new(id: impl Into<VocabularyId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A term inside a vocabulary tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Term identifier
    pub id: TermId,

    /// Owning vocabulary
    pub vocabulary_id: VocabularyId,

    /// Term name (the option label)
    pub name: String,

    /// Parent term, `None` for roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TermId>,

    /// Sibling ordering weight (lower first)
    #[serde(default)]
    pub weight: i32,

    /// Depth in the loaded tree (roots are 0)
    #[serde(default)]
    pub depth: usize,
}

impl Term {
    /// Create a root term
    pub fn new(
        id: impl Into<TermId>,
        vocabulary_id: impl Into<VocabularyId>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            vocabulary_id: vocabulary_id.into(),
            name: name.into(),
            parent: None,
            weight: 0,
            depth: 0,
        }
    }

    /// Set the parent term
    pub fn with_parent(mut self, parent: impl Into<TermId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the sibling weight
    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }
}

/// A raw facet match produced by the search backend
///
/// Carries only the term id; the vocabulary has to be resolved through
/// storage before the result can be scoped or grouped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Term id the result refers to
    pub raw_value: TermId,

    /// Text shown for the result
    pub display_value: String,

    /// Number of matching documents
    #[serde(default)]
    pub count: u64,

    /// Whether the result is currently selected
    #[serde(default)]
    pub active: bool,
}

impl MatchResult {
    pub fn new(raw_value: impl Into<TermId>, display_value: impl Into<String>, count: u64) -> Self {
        Self {
            raw_value: raw_value.into(),
            display_value: display_value.into(),
            count,
            active: false,
        }
    }

    /// Mark the result as active
    pub fn activate(mut self) -> Self {
        self.active = true;
        self
    }
}

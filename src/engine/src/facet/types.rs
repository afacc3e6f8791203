//! Facet configuration and view types

use groupscope_core::{MatchResult, VocabularyId};
use serde::{Deserialize, Serialize};

use crate::exclusion::ExclusionList;
use crate::scope::ParentFacetSelection;

/// Per-facet configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetConfig {
    /// This facet's id
    pub facet_id: String,

    /// Facet whose active value (a group label) scopes this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_facet_id: Option<String>,

    /// Excluded vocabulary ids or labels
    #[serde(default)]
    pub exclude: ExclusionList,
}

impl FacetConfig {
    pub fn new(facet_id: impl Into<String>) -> Self {
        Self {
            facet_id: facet_id.into(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent_facet_id: impl Into<String>) -> Self {
        self.parent_facet_id = Some(parent_facet_id.into());
        self
    }

    pub fn excluding(mut self, text: &str) -> Self {
        self.exclude = ExclusionList::from_text(text);
        self
    }

    /// Parent selection applicable to this facet
    ///
    /// State reported for any facet other than the configured parent is ignored.
    pub fn parent_selection<'a>(&self, state: Option<&'a ParentFacetState>) -> Option<&'a ParentFacetSelection> {
        let parent_id = self.parent_facet_id.as_deref()?;
        state
            .filter(|s| s.facet_id == parent_id)
            .map(|s| &s.selection)
    }
}

/// Processed state of a parent facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentFacetState {
    pub facet_id: String,
    #[serde(flatten)]
    pub selection: ParentFacetSelection,
}

impl ParentFacetState {
    pub fn new(facet_id: impl Into<String>, active_items: Vec<String>) -> Self {
        Self {
            facet_id: facet_id.into(),
            selection: ParentFacetSelection::new(active_items),
        }
    }
}

/// Results sharing one vocabulary label
///
/// Vocabularies with the same label land in the same group, tagged with the
/// first vocabulary seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyGroup {
    /// Vocabulary label, the group heading
    pub label: String,
    /// Vocabulary the group was first seen for
    pub vocabulary_id: VocabularyId,
    /// Results in their original order
    pub results: Vec<MatchResult>,
}

/// Facet output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FacetView {
    /// Nothing survived; the facet must be treated as having no results
    Empty,
    /// Results grouped by vocabulary label, first-seen order
    Grouped { groups: Vec<VocabularyGroup> },
}

impl FacetView {
    pub fn is_empty(&self) -> bool {
        matches!(self, FacetView::Empty)
    }

    pub fn groups(&self) -> &[VocabularyGroup] {
        match self {
            FacetView::Empty => &[],
            FacetView::Grouped { groups } => groups,
        }
    }

    pub fn group(&self, label: &str) -> Option<&VocabularyGroup> {
        self.groups().iter().find(|g| g.label == label)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.groups().iter().map(|g| g.label.as_str()).collect()
    }
}

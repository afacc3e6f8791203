//! Groups, memberships and vocabulary grants

use super::{ContentTypeId, GrantId, GroupId, UserId, VocabularyId};
use serde::{Deserialize, Serialize};

/// A tenant that content and vocabularies are scoped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group identifier
    pub id: GroupId,

    /// Display label, also the value a parent facet selects by
    pub label: String,

    /// Whether taxonomy association is enabled for this group's type
    #[serde(default = "default_true")]
    pub taxonomy_enabled: bool,
}

impl Group {
    /// Create a new group with taxonomy enabled
    pub fn new(id: impl Into<GroupId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            taxonomy_enabled: true,
        }
    }

    /// Toggle taxonomy association for this group
    pub fn with_taxonomy_enabled(mut self, enabled: bool) -> Self {
        self.taxonomy_enabled = enabled;
        self
    }
}

fn default_true() -> bool {
    true
}

/// (user, group) membership record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: UserId,
    pub group_id: GroupId,
}

impl Membership {
    pub fn new(user_id: impl Into<UserId>, group_id: impl Into<GroupId>) -> Self {
        Self {
            user_id: user_id.into(),
            group_id: group_id.into(),
        }
    }
}

/// Permits a vocabulary inside a group for a set of content types
///
/// A vocabulary is usable for content of type `C` inside group `G` iff a grant
/// for `(G, vocabulary)` lists `C` among its allowed content types. The same
/// vocabulary may be granted to several groups independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyGrant {
    /// Grant identifier
    pub id: GrantId,

    /// Group the vocabulary is granted to
    pub group_id: GroupId,

    /// Granted vocabulary
    pub vocabulary_id: VocabularyId,

    /// Content types the vocabulary may be used for inside the group
    #[serde(default)]
    pub allowed_content_types: Vec<ContentTypeId>,
}

impl VocabularyGrant {
    /// Create a grant with no allowed content types
    pub fn new(
        id: impl Into<GrantId>,
        group_id: impl Into<GroupId>,
        vocabulary_id: impl Into<VocabularyId>,
    ) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            vocabulary_id: vocabulary_id.into(),
            allowed_content_types: Vec::new(),
        }
    }

    /// Add an allowed content type
    pub fn allow(mut self, content_type: impl Into<ContentTypeId>) -> Self {
        self.allowed_content_types.push(content_type.into());
        self
    }

    /// Check if the grant covers the given content type
    pub fn allows(&self, content_type: &str) -> bool {
        self.allowed_content_types.iter().any(|ct| ct == content_type)
    }
}

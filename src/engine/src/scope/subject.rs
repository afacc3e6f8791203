//! Strategies for deriving the groups a request is scoped to

use groupscope_core::{EntityId, GroupId, UserId};
use serde::{Deserialize, Serialize};

/// Where the scoping groups come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ScopeSubject {
    /// Every group the existing content entity is linked to
    ExistingEntity(EntityId),

    /// The single group a creation route targets
    RouteGroup(GroupId),

    /// The group whose label is the parent facet's active value
    ParentFacet(ParentFacetSelection),

    /// The groups a user is a member of
    User(UserId),
}

/// The active value of an upstream facet, interpreted as a group label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentFacetSelection {
    /// Active items of the parent facet, in activation order
    #[serde(default)]
    pub active_items: Vec<String>,
}

impl ParentFacetSelection {
    pub fn new(active_items: Vec<String>) -> Self {
        Self { active_items }
    }

    /// Label used for the group lookup: the first active item, if non-blank
    pub fn group_label(&self) -> Option<&str> {
        self.active_items
            .first()
            .map(|item| item.as_str())
            .filter(|label| !label.trim().is_empty())
    }
}

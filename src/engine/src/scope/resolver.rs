//! Scope resolver combining memberships, entity links and grants
//!
//! Stateless: every call reads fresh data from its collaborators, so a
//! resolver can be shared across requests without invalidation concerns.

use std::sync::Arc;

use groupscope_core::{
    ContentTypeId, GrantTable, GroupId, MembershipIndex, TaxonomyStorage, VocabularyGrant,
    VocabularyId,
};
use indexmap::IndexSet;
use tracing::debug;

use super::subject::ScopeSubject;
use crate::error::Result;

/// Groups in first-seen order
pub type GroupSet = IndexSet<GroupId>;

/// Vocabulary ids in first-granted order
pub type VocabularySet = IndexSet<VocabularyId>;

/// Resolves which groups a subject belongs to and which vocabularies they grant
///
/// Grants from several groups are combined additively: a vocabulary is in
/// scope if any of the groups grants it for the requested content type.
#[derive(Clone)]
pub struct ScopeResolver {
    memberships: Arc<dyn MembershipIndex>,
    grants: Arc<dyn GrantTable>,
    storage: Arc<dyn TaxonomyStorage>,
}

impl ScopeResolver {
    /// Create a resolver over the given collaborators
    pub fn new(
        memberships: Arc<dyn MembershipIndex>,
        grants: Arc<dyn GrantTable>,
        storage: Arc<dyn TaxonomyStorage>,
    ) -> Self {
        Self {
            memberships,
            grants,
            storage,
        }
    }

    /// Vocabularies granted by any of `groups` for `content_type`
    ///
    /// Empty `groups` yields an empty set; callers render nothing rather
    /// than treating it as a failure.
    pub async fn resolve_allowed_vocabularies(
        &self,
        groups: &GroupSet,
        content_type: &str,
    ) -> Result<VocabularySet> {
        self.collect(groups, |grant| grant.allows(content_type)).await
    }

    /// Vocabularies granted by any of `groups` for any of `content_types`
    pub async fn resolve_for_content_types(
        &self,
        groups: &GroupSet,
        content_types: &[ContentTypeId],
    ) -> Result<VocabularySet> {
        self.collect(groups, |grant| {
            content_types.iter().any(|ct| grant.allows(ct))
        })
        .await
    }

    /// Every vocabulary granted to any of `groups`, whatever the content type
    pub async fn resolve_full_grant_set(&self, groups: &GroupSet) -> Result<VocabularySet> {
        self.collect(groups, |_| true).await
    }

    /// Derive the scoping groups of a subject
    ///
    /// Unresolvable subjects (unknown route group, unmatched facet label,
    /// unlinked entity, user without memberships) yield an empty set.
    pub async fn resolve_groups_for_subject(&self, subject: &ScopeSubject) -> Result<GroupSet> {
        let groups: GroupSet = match subject {
            ScopeSubject::ExistingEntity(entity_id) => self
                .storage
                .groups_linked_to_entity(entity_id)
                .await?
                .into_iter()
                .collect(),

            ScopeSubject::RouteGroup(group_id) => {
                match self.storage.load_group(group_id).await? {
                    Some(group) => std::iter::once(group.id).collect(),
                    None => {
                        debug!(group = %group_id, "Route group does not exist");
                        GroupSet::new()
                    }
                }
            }

            ScopeSubject::ParentFacet(selection) => match selection.group_label() {
                Some(label) => match self.storage.group_by_label(label).await? {
                    Some(group_id) => std::iter::once(group_id).collect(),
                    None => {
                        debug!(label = %label, "No group matches parent facet selection");
                        GroupSet::new()
                    }
                },
                None => GroupSet::new(),
            },

            ScopeSubject::User(user_id) => self
                .memberships
                .groups_for_user(user_id)
                .await?
                .into_iter()
                .collect(),
        };

        debug!(subject = ?subject, groups = groups.len(), "Resolved scoping groups");
        Ok(groups)
    }

    /// Groups a user is a member of
    pub async fn user_groups(&self, user_id: &str) -> Result<GroupSet> {
        self.resolve_groups_for_subject(&ScopeSubject::User(user_id.to_string()))
            .await
    }

    /// Group owning a vocabulary (first grant record)
    pub async fn owning_group(&self, vocabulary_id: &str) -> Result<Option<GroupId>> {
        Ok(self.grants.owning_group(vocabulary_id).await?)
    }

    async fn collect<F>(&self, groups: &GroupSet, keep: F) -> Result<VocabularySet>
    where
        F: Fn(&VocabularyGrant) -> bool,
    {
        let mut allowed = VocabularySet::new();

        for group_id in groups {
            let grants = self.grants.grants_for_group(group_id).await?;
            for grant in grants.iter().filter(|grant| keep(grant)) {
                allowed.insert(grant.vocabulary_id.clone());
            }
        }

        debug!(groups = groups.len(), vocabularies = allowed.len(), "Resolved allowed vocabularies");
        Ok(allowed)
    }
}

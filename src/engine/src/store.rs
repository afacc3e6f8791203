//! In-memory collaborator implementation
//!
//! Implements every collaborator trait over a serde [`Dataset`], for tests,
//! fixtures and the bundled server. Production deployments put their own
//! storage behind the same traits.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use groupscope_core::{
    CoreError, GrantTable, Group, GroupId, MatchOperator, Membership, MembershipIndex,
    PermissionCheck, Suggestion, SuggestionSearch, TaxonomyStorage, Term, TermId, Vocabulary,
    VocabularyGrant, VocabularyId,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Link between a content entity and a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityGroupLink {
    pub entity_id: String,
    pub group_id: GroupId,
}

/// Term ids stored in an entity's reference field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSelection {
    pub entity_id: String,
    pub field_name: String,
    #[serde(default)]
    pub term_ids: Vec<TermId>,
}

/// Site-wide permission held by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPermission {
    pub user_id: String,
    pub permission: String,
}

/// Permission held by a user inside one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPermission {
    pub user_id: String,
    pub group_id: GroupId,
    pub permission: String,
}

/// Everything the in-memory directory knows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub memberships: Vec<Membership>,
    #[serde(default)]
    pub grants: Vec<VocabularyGrant>,
    #[serde(default)]
    pub vocabularies: Vec<Vocabulary>,
    #[serde(default)]
    pub terms: Vec<Term>,
    #[serde(default)]
    pub entity_groups: Vec<EntityGroupLink>,
    #[serde(default)]
    pub selections: Vec<PersistedSelection>,
    #[serde(default)]
    pub permissions: Vec<UserPermission>,
    #[serde(default)]
    pub group_permissions: Vec<GroupPermission>,
}

/// In-memory groups, grants, taxonomy and permissions
pub struct InMemoryDirectory {
    data: Arc<RwLock<Dataset>>,
}

impl InMemoryDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::from_dataset(Dataset::default())
    }

    /// Create a directory seeded with a dataset
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            data: Arc::new(RwLock::new(dataset)),
        }
    }

    /// Parse a JSON dataset
    pub fn from_json(json: &str) -> groupscope_core::Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        Ok(Self::from_dataset(dataset))
    }

    /// Load a JSON dataset from disk
    pub async fn load<P: AsRef<Path>>(path: P) -> groupscope_core::Result<Self> {
        let json = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&json)
    }

    /// Snapshot of the current dataset
    pub async fn snapshot(&self) -> Dataset {
        self.data.read().await.clone()
    }

    pub async fn add_group(&self, group: Group) {
        self.data.write().await.groups.push(group);
    }

    pub async fn add_membership(&self, user_id: &str, group_id: &str) {
        self.data
            .write()
            .await
            .memberships
            .push(Membership::new(user_id, group_id));
    }

    pub async fn add_grant(&self, grant: VocabularyGrant) {
        self.data.write().await.grants.push(grant);
    }

    pub async fn add_vocabulary(&self, vocabulary: Vocabulary) {
        self.data.write().await.vocabularies.push(vocabulary);
    }

    pub async fn add_term(&self, term: Term) {
        self.data.write().await.terms.push(term);
    }

    pub async fn remove_term(&self, term_id: &str) {
        self.data.write().await.terms.retain(|t| t.id != term_id);
    }

    pub async fn link_entity(&self, entity_id: &str, group_id: &str) {
        self.data.write().await.entity_groups.push(EntityGroupLink {
            entity_id: entity_id.to_string(),
            group_id: group_id.to_string(),
        });
    }

    pub async fn persist_selection(&self, entity_id: &str, field_name: &str, term_ids: Vec<TermId>) {
        let mut data = self.data.write().await;
        data.selections
            .retain(|s| !(s.entity_id == entity_id && s.field_name == field_name));
        data.selections.push(PersistedSelection {
            entity_id: entity_id.to_string(),
            field_name: field_name.to_string(),
            term_ids,
        });
    }

    pub async fn grant_permission(&self, user_id: &str, permission: &str) {
        self.data.write().await.permissions.push(UserPermission {
            user_id: user_id.to_string(),
            permission: permission.to_string(),
        });
    }

    pub async fn grant_group_permission(&self, user_id: &str, group_id: &str, permission: &str) {
        self.data.write().await.group_permissions.push(GroupPermission {
            user_id: user_id.to_string(),
            group_id: group_id.to_string(),
            permission: permission.to_string(),
        });
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first tree of a vocabulary, siblings ordered by weight then name
///
/// Terms whose parent is not part of the vocabulary are unreachable and left out.
fn build_tree(terms: &[Term], vocabulary_id: &str) -> Vec<Term> {
    let mut children: HashMap<Option<&str>, Vec<&Term>> = HashMap::new();
    for term in terms.iter().filter(|t| t.vocabulary_id == vocabulary_id) {
        children
            .entry(term.parent.as_deref())
            .or_default()
            .push(term);
    }
    for siblings in children.values_mut() {
        siblings.sort_by(|a, b| a.weight.cmp(&b.weight).then_with(|| a.name.cmp(&b.name)));
    }

    let mut tree = Vec::new();
    let mut visited = HashSet::new();
    let mut stack: Vec<(&Term, usize)> = children
        .get(&None)
        .map(|roots| roots.iter().rev().map(|t| (*t, 0)).collect())
        .unwrap_or_default();

    while let Some((term, depth)) = stack.pop() {
        if !visited.insert(term.id.as_str()) {
            continue;
        }
        let mut loaded = term.clone();
        loaded.depth = depth;
        tree.push(loaded);

        if let Some(kids) = children.get(&Some(term.id.as_str())) {
            stack.extend(kids.iter().rev().map(|t| (*t, depth + 1)));
        }
    }

    tree
}

#[async_trait]
impl MembershipIndex for InMemoryDirectory {
    async fn groups_for_user(&self, user_id: &str) -> groupscope_core::Result<Vec<GroupId>> {
        let data = self.data.read().await;
        Ok(data
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.group_id.clone())
            .collect())
    }
}

#[async_trait]
impl GrantTable for InMemoryDirectory {
    async fn grants_for_group(&self, group_id: &str) -> groupscope_core::Result<Vec<VocabularyGrant>> {
        let data = self.data.read().await;
        Ok(data
            .grants
            .iter()
            .filter(|g| g.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn owning_group(&self, vocabulary_id: &str) -> groupscope_core::Result<Option<GroupId>> {
        let data = self.data.read().await;
        Ok(data
            .grants
            .iter()
            .find(|g| g.vocabulary_id == vocabulary_id)
            .map(|g| g.group_id.clone()))
    }
}

#[async_trait]
impl TaxonomyStorage for InMemoryDirectory {
    async fn load_term_tree(&self, vocabulary_id: &str) -> groupscope_core::Result<Vec<Term>> {
        let data = self.data.read().await;
        Ok(build_tree(&data.terms, vocabulary_id))
    }

    async fn resolve_vocabulary_for_term(
        &self,
        term_id: &str,
    ) -> groupscope_core::Result<Option<VocabularyId>> {
        let data = self.data.read().await;
        Ok(data
            .terms
            .iter()
            .find(|t| t.id == term_id)
            .map(|t| t.vocabulary_id.clone()))
    }

    async fn groups_linked_to_entity(&self, entity_id: &str) -> groupscope_core::Result<Vec<GroupId>> {
        let data = self.data.read().await;
        Ok(data
            .entity_groups
            .iter()
            .filter(|link| link.entity_id == entity_id)
            .map(|link| link.group_id.clone())
            .collect())
    }

    async fn group_by_label(&self, label: &str) -> groupscope_core::Result<Option<GroupId>> {
        let data = self.data.read().await;
        Ok(data
            .groups
            .iter()
            .find(|g| g.label == label)
            .map(|g| g.id.clone()))
    }

    async fn load_group(&self, group_id: &str) -> groupscope_core::Result<Option<Group>> {
        let data = self.data.read().await;
        Ok(data.groups.iter().find(|g| g.id == group_id).cloned())
    }

    async fn load_vocabulary(&self, vocabulary_id: &str) -> groupscope_core::Result<Option<Vocabulary>> {
        let data = self.data.read().await;
        Ok(data
            .vocabularies
            .iter()
            .find(|v| v.id == vocabulary_id)
            .cloned())
    }

    async fn persisted_selection(
        &self,
        entity_id: &str,
        field_name: &str,
    ) -> groupscope_core::Result<Vec<TermId>> {
        let data = self.data.read().await;
        Ok(data
            .selections
            .iter()
            .find(|s| s.entity_id == entity_id && s.field_name == field_name)
            .map(|s| s.term_ids.clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl PermissionCheck for InMemoryDirectory {
    async fn has(&self, user_id: &str, permission: &str) -> groupscope_core::Result<bool> {
        let data = self.data.read().await;
        Ok(data
            .permissions
            .iter()
            .any(|p| p.user_id == user_id && p.permission == permission))
    }

    async fn has_in_group(
        &self,
        user_id: &str,
        group_id: &str,
        permission: &str,
    ) -> groupscope_core::Result<bool> {
        let data = self.data.read().await;
        let in_group = data.group_permissions.iter().any(|p| {
            p.user_id == user_id && p.group_id == group_id && p.permission == permission
        });
        Ok(in_group
            || data
                .permissions
                .iter()
                .any(|p| p.user_id == user_id && p.permission == permission))
    }
}

#[async_trait]
impl SuggestionSearch for InMemoryDirectory {
    async fn referenceable_terms(
        &self,
        input: &str,
        bundles: &[VocabularyId],
        operator: MatchOperator,
        limit: usize,
    ) -> groupscope_core::Result<Vec<Suggestion>> {
        if limit == 0 {
            return Err(CoreError::invalid("suggestion limit must be positive"));
        }

        let data = self.data.read().await;
        let mut suggestions = Vec::new();

        for bundle in bundles {
            for term in build_tree(&data.terms, bundle) {
                if suggestions.len() >= limit {
                    return Ok(suggestions);
                }
                if operator.matches(&term.name, input) {
                    suggestions.push(Suggestion {
                        vocabulary_id: bundle.clone(),
                        term_id: term.id,
                        label: term.name,
                    });
                }
            }
        }

        Ok(suggestions)
    }
}

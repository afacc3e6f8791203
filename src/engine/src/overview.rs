//! Group taxonomy overview
//!
//! Lists the vocabularies associated with one group, for group members with
//! the overview permission.

use std::sync::Arc;

use groupscope_core::{
    ContentTypeId, GrantId, GrantTable, Group, PermissionCheck, TaxonomyStorage, VocabularyId,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::Result;

pub const EMPTY_TEXT: &str = "There are no taxonomies related to this group yet.";

/// One associated vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewRow {
    pub grant_id: GrantId,
    pub vocabulary_id: VocabularyId,
    pub vocabulary_label: String,
    pub allowed_content_types: Vec<ContentTypeId>,
}

/// Link offered to users allowed to manage the group's vocabularies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewLink {
    pub title: String,
    pub path: String,
}

/// Rendered overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub title: String,
    pub rows: Vec<OverviewRow>,
    pub empty_text: String,
    #[serde(default)]
    pub controls: Vec<OverviewLink>,
}

/// Access outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum OverviewAccess {
    Granted(Overview),
    Denied,
}

/// Builds group taxonomy overviews
#[derive(Clone)]
pub struct GroupOverview {
    grants: Arc<dyn GrantTable>,
    storage: Arc<dyn TaxonomyStorage>,
    permissions: Arc<dyn PermissionCheck>,
    config: EngineConfig,
}

impl GroupOverview {
    pub fn new(
        grants: Arc<dyn GrantTable>,
        storage: Arc<dyn TaxonomyStorage>,
        permissions: Arc<dyn PermissionCheck>,
        config: EngineConfig,
    ) -> Self {
        Self {
            grants,
            storage,
            permissions,
            config,
        }
    }

    /// Whether the user may see the group's overview
    pub async fn access(&self, acting_user: &str, group_id: &str) -> Result<bool> {
        Ok(self.accessible_group(acting_user, group_id).await?.is_some())
    }

    async fn accessible_group(&self, acting_user: &str, group_id: &str) -> Result<Option<Group>> {
        let Some(group) = self.storage.load_group(group_id).await? else {
            return Ok(None);
        };
        if !group.taxonomy_enabled {
            return Ok(None);
        }
        let permitted = self
            .permissions
            .has_in_group(acting_user, group_id, &self.config.overview_permission)
            .await?;
        Ok(permitted.then_some(group))
    }

    /// Render the overview of a group's vocabularies
    pub async fn render(&self, acting_user: &str, group_id: &str) -> Result<OverviewAccess> {
        let Some(group) = self.accessible_group(acting_user, group_id).await? else {
            debug!(user = %acting_user, group = %group_id, "Overview access denied");
            return Ok(OverviewAccess::Denied);
        };

        let mut rows = Vec::new();
        for grant in self.grants.grants_for_group(group_id).await? {
            let vocabulary_label = self
                .storage
                .load_vocabulary(&grant.vocabulary_id)
                .await?
                .map(|v| v.label)
                .unwrap_or_else(|| grant.vocabulary_id.clone());
            rows.push(OverviewRow {
                grant_id: grant.id,
                vocabulary_id: grant.vocabulary_id,
                vocabulary_label,
                allowed_content_types: grant.allowed_content_types,
            });
        }

        let controls = if self
            .permissions
            .has(acting_user, &self.config.overview_controls_permission)
            .await?
        {
            vec![
                OverviewLink {
                    title: "Add new vocabulary".to_string(),
                    path: format!("/group/{}/content/create/group_taxonomy", group.id),
                },
                OverviewLink {
                    title: "Add existing vocabulary".to_string(),
                    path: format!("/group/{}/content/add/group_taxonomy", group.id),
                },
            ]
        } else {
            Vec::new()
        };

        info!(user = %acting_user, group = %group_id, rows = rows.len(), "Rendered group taxonomy overview");

        Ok(OverviewAccess::Granted(Overview {
            title: format!("{} taxonomies", group.label),
            rows,
            empty_text: EMPTY_TEXT.to_string(),
            controls,
        }))
    }
}

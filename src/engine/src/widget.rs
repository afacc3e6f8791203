//! Field-entry widget surface
//!
//! Renders one multi-select per vocabulary the edited entity's groups grant
//! for its content type, and flattens submitted selections back into a
//! single ordered reference list.

use std::sync::Arc;

use groupscope_core::{
    ContentTypeId, EntityId, GroupId, MatchOperator, PermissionCheck, TaxonomyStorage, TermId,
    VocabularyId,
};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::options::{compute_defaults, compute_disabled, DefaultMap, OptionBuilder, OptionMap, TermOptions};
use crate::scope::{ScopeResolver, ScopeSubject};

/// Definition of the term reference field being edited or autocompleted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field storage name, used to read persisted selections
    pub name: String,

    /// Vocabularies the field may reference
    #[serde(default)]
    pub target_bundles: Vec<VocabularyId>,

    /// Content types the field is attached to
    #[serde(default)]
    pub content_types: Vec<ContentTypeId>,

    /// Match operator for autocomplete, engine default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_operator: Option<MatchOperator>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_bundles: Vec::new(),
            content_types: Vec::new(),
            match_operator: None,
        }
    }
}

/// The content entity on the edit form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditedEntity {
    /// Entity id, `None` while the entity is unsaved
    #[serde(default)]
    pub id: Option<EntityId>,

    /// Content type of the entity
    pub bundle: ContentTypeId,
}

impl EditedEntity {
    pub fn new_entity(bundle: impl Into<ContentTypeId>) -> Self {
        Self { id: None, bundle: bundle.into() }
    }

    pub fn existing(id: impl Into<EntityId>, bundle: impl Into<ContentTypeId>) -> Self {
        Self { id: Some(id.into()), bundle: bundle.into() }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

/// Form being rendered: the entity plus the group the creation route targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormContext {
    pub entity: EditedEntity,

    /// Set only when the form was opened from a group-content creation route
    #[serde(default)]
    pub route_group: Option<GroupId>,
}

impl FormContext {
    pub fn new(entity: EditedEntity) -> Self {
        Self { entity, route_group: None }
    }

    pub fn in_group(mut self, group_id: impl Into<GroupId>) -> Self {
        self.route_group = Some(group_id.into());
        self
    }

    /// Where the scoping groups come from for this form, if anywhere
    pub fn subject(&self) -> Option<ScopeSubject> {
        match (&self.entity.id, &self.route_group) {
            (Some(entity_id), _) => Some(ScopeSubject::ExistingEntity(entity_id.clone())),
            (None, Some(group_id)) => Some(ScopeSubject::RouteGroup(group_id.clone())),
            (None, None) => None,
        }
    }
}

/// One vocabulary multi-select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularySelector {
    pub vocabulary_id: VocabularyId,
    pub label: String,
    pub options: TermOptions,
    pub defaults: IndexSet<TermId>,
    /// Visible but read-only for the acting user
    pub disabled: bool,
    pub multiple: bool,
}

/// Rendered widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetRender {
    pub vocabularies: Vec<VocabularySelector>,
}

impl WidgetRender {
    pub fn options(&self) -> OptionMap {
        self.vocabularies
            .iter()
            .map(|v| (v.vocabulary_id.clone(), v.options.clone()))
            .collect()
    }

    pub fn defaults(&self) -> DefaultMap {
        self.vocabularies
            .iter()
            .map(|v| (v.vocabulary_id.clone(), v.defaults.clone()))
            .collect()
    }

    pub fn disabled_flags(&self) -> IndexMap<VocabularyId, bool> {
        self.vocabularies
            .iter()
            .map(|v| (v.vocabulary_id.clone(), v.disabled))
            .collect()
    }

    pub fn selector(&self, vocabulary_id: &str) -> Option<&VocabularySelector> {
        self.vocabularies.iter().find(|v| v.vocabulary_id == vocabulary_id)
    }
}

/// Group-scoped term selection widget
#[derive(Clone)]
pub struct FieldWidget {
    resolver: ScopeResolver,
    options: OptionBuilder,
    storage: Arc<dyn TaxonomyStorage>,
    permissions: Arc<dyn PermissionCheck>,
    config: EngineConfig,
}

impl FieldWidget {
    pub fn new(
        resolver: ScopeResolver,
        storage: Arc<dyn TaxonomyStorage>,
        permissions: Arc<dyn PermissionCheck>,
        config: EngineConfig,
    ) -> Self {
        Self {
            resolver,
            options: OptionBuilder::new(storage.clone()),
            storage,
            permissions,
            config,
        }
    }

    /// Render the widget, `None` when the form is not scoped to any group
    pub async fn render(
        &self,
        form: &FormContext,
        field: &FieldDefinition,
        acting_user: &str,
    ) -> Result<Option<WidgetRender>> {
        let Some(subject) = form.subject() else {
            debug!(field = %field.name, "New entity outside a group route, nothing to render");
            return Ok(None);
        };

        let groups = self.resolver.resolve_groups_for_subject(&subject).await?;
        if groups.is_empty() {
            debug!(field = %field.name, "Form has no scoping groups, nothing to render");
            return Ok(None);
        }

        let allowed = self
            .resolver
            .resolve_allowed_vocabularies(&groups, &form.entity.bundle)
            .await?;
        let options = self.options.build_options(&allowed).await?;

        // New entities never have persisted selections
        let selection = match &form.entity.id {
            Some(entity_id) => self.storage.persisted_selection(entity_id, &field.name).await?,
            None => Vec::new(),
        };
        let mut defaults = compute_defaults(&options, &selection);

        let has_override = self
            .permissions
            .has(acting_user, &self.config.override_permission)
            .await?;
        let user_groups = if has_override {
            Default::default()
        } else {
            self.resolver.user_groups(acting_user).await?
        };

        let mut vocabularies = Vec::with_capacity(options.len());
        for (vocabulary_id, terms) in options {
            let label = self
                .storage
                .load_vocabulary(&vocabulary_id)
                .await?
                .map(|v| v.label)
                .unwrap_or_else(|| vocabulary_id.clone());

            let disabled = if has_override {
                false
            } else {
                let owner = self.resolver.owning_group(&vocabulary_id).await?;
                compute_disabled(owner.as_deref(), &user_groups, false)
            };
            if disabled {
                debug!(user = %acting_user, vocabulary = %vocabulary_id, "Vocabulary owned by another group, read-only");
            }

            vocabularies.push(VocabularySelector {
                defaults: defaults.swap_remove(&vocabulary_id).unwrap_or_default(),
                vocabulary_id,
                label,
                options: terms,
                disabled,
                multiple: true,
            });
        }

        info!(
            user = %acting_user,
            field = %field.name,
            groups = groups.len(),
            vocabularies = vocabularies.len(),
            "Rendered group taxonomy widget"
        );

        Ok(Some(WidgetRender { vocabularies }))
    }
}

/// Flatten per-vocabulary selections into one ordered reference list
///
/// Vocabulary order first, then selection order; blank ids are dropped.
pub fn reshape(raw_form_values: &IndexMap<VocabularyId, Vec<TermId>>) -> Vec<TermId> {
    raw_form_values
        .values()
        .flatten()
        .map(|term_id| term_id.trim())
        .filter(|term_id| !term_id.is_empty())
        .map(str::to_string)
        .collect()
}

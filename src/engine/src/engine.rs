//! Engine facade wiring collaborators into the three surfaces
//!
//! ```text
//! FormContext ──► FieldWidget ───────┐
//! Query ────────► GroupTermAutocomplete ─► ScopeResolver ─► MembershipIndex
//! MatchResults ─► FacetGrouper ──────┘          │          GrantTable
//!                     │                         └───────►  TaxonomyStorage
//!                     └─► ExclusionList
//! ```

use std::sync::Arc;

use groupscope_core::{
    GrantTable, MatchResult, MembershipIndex, PermissionCheck, SuggestionSearch, TaxonomyStorage,
    TermId, VocabularyId,
};
use indexmap::IndexMap;
use tracing::info;

use crate::autocomplete::{AutocompleteMatch, AutocompleteQuery, GroupTermAutocomplete};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::facet::{FacetConfig, FacetGrouper, FacetView, ParentFacetState};
use crate::overview::{GroupOverview, OverviewAccess};
use crate::scope::ScopeResolver;
use crate::store::InMemoryDirectory;
use crate::widget::{self, FieldDefinition, FieldWidget, FormContext, WidgetRender};

/// External collaborators the engine reads through
#[derive(Clone)]
pub struct Collaborators {
    pub memberships: Arc<dyn MembershipIndex>,
    pub grants: Arc<dyn GrantTable>,
    pub storage: Arc<dyn TaxonomyStorage>,
    pub permissions: Arc<dyn PermissionCheck>,
    pub search: Arc<dyn SuggestionSearch>,
}

impl Collaborators {
    /// Use one in-memory directory for every collaborator
    pub fn in_memory(directory: Arc<InMemoryDirectory>) -> Self {
        Self {
            memberships: directory.clone(),
            grants: directory.clone(),
            storage: directory.clone(),
            permissions: directory.clone(),
            search: directory,
        }
    }
}

/// Group-scoped taxonomy engine
///
/// Holds no request state; every call re-reads its collaborators, so one
/// engine can be shared behind an `Arc` by concurrent requests.
#[derive(Clone)]
pub struct GroupScopeEngine {
    resolver: ScopeResolver,
    widget: FieldWidget,
    autocomplete: GroupTermAutocomplete,
    facets: FacetGrouper,
    overview: GroupOverview,
    config: EngineConfig,
}

impl GroupScopeEngine {
    /// Create an engine over the given collaborators
    pub fn new(config: EngineConfig, collaborators: Collaborators) -> Result<Self> {
        if config.autocomplete_limit == 0 {
            return Err(EngineError::Configuration(
                "autocomplete limit must be at least 1".to_string(),
            ));
        }

        let Collaborators {
            memberships,
            grants,
            storage,
            permissions,
            search,
        } = collaborators;

        let resolver = ScopeResolver::new(memberships, grants.clone(), storage.clone());
        let widget = FieldWidget::new(resolver.clone(), storage.clone(), permissions.clone(), config.clone());
        let autocomplete = GroupTermAutocomplete::new(resolver.clone(), search, config.clone());
        let facets = FacetGrouper::new(resolver.clone(), storage.clone());
        let overview = GroupOverview::new(grants, storage, permissions, config.clone());

        info!(
            autocomplete_limit = config.autocomplete_limit,
            "GroupScopeEngine initialized"
        );

        Ok(Self {
            resolver,
            widget,
            autocomplete,
            facets,
            overview,
            config,
        })
    }

    /// Create an engine backed by an in-memory directory
    pub fn in_memory(config: EngineConfig, directory: Arc<InMemoryDirectory>) -> Result<Self> {
        Self::new(config, Collaborators::in_memory(directory))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn resolver(&self) -> &ScopeResolver {
        &self.resolver
    }

    /// Field widget: render the group-scoped selectors
    pub async fn render_widget(
        &self,
        form: &FormContext,
        field: &FieldDefinition,
        acting_user: &str,
    ) -> Result<Option<WidgetRender>> {
        self.widget.render(form, field, acting_user).await
    }

    /// Field widget: flatten submitted selections
    pub fn reshape(&self, raw_form_values: &IndexMap<VocabularyId, Vec<TermId>>) -> Vec<TermId> {
        widget::reshape(raw_form_values)
    }

    /// Autocomplete: scoped suggestions
    pub async fn suggest(&self, query: &AutocompleteQuery, acting_user: &str) -> Result<Vec<AutocompleteMatch>> {
        self.autocomplete.suggest(query, acting_user).await
    }

    /// Autocomplete: scoped suggestions for a term reference field
    pub async fn suggest_for_field(
        &self,
        input: &str,
        field: &FieldDefinition,
        acting_user: &str,
    ) -> Result<Vec<AutocompleteMatch>> {
        self.suggest(&AutocompleteQuery::for_field(input, field), acting_user)
            .await
    }

    /// Facets: grouped view or the empty signal
    pub async fn build_facet_view(
        &self,
        raw_results: &[MatchResult],
        config: &FacetConfig,
        parent_state: Option<&ParentFacetState>,
    ) -> Result<FacetView> {
        self.facets.build_facet_view(raw_results, config, parent_state).await
    }

    /// Whether the user may open a group's taxonomy overview
    pub async fn can_view_overview(&self, acting_user: &str, group_id: &str) -> Result<bool> {
        self.overview.access(acting_user, group_id).await
    }

    /// Group taxonomy overview
    pub async fn group_overview(&self, acting_user: &str, group_id: &str) -> Result<OverviewAccess> {
        self.overview.render(acting_user, group_id).await
    }
}

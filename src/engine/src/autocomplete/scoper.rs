//! Candidate bundle scoping and suggestion formatting

use std::sync::Arc;

use groupscope_core::{ContentTypeId, MatchOperator, SuggestionSearch, VocabularyId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::value::format_value;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::scope::ScopeResolver;
use crate::widget::FieldDefinition;

/// Restricts autocomplete bundles to the acting user's group scope
#[derive(Clone)]
pub struct AutocompleteScoper {
    resolver: ScopeResolver,
}

impl AutocompleteScoper {
    pub fn new(resolver: ScopeResolver) -> Self {
        Self { resolver }
    }

    /// Candidate bundles the user may autocomplete against
    ///
    /// Users without any group membership get the candidates back unchanged;
    /// they are served by the unrestricted global selection. For members the
    /// candidates are intersected with the vocabularies their groups grant
    /// for `content_types` (every granted vocabulary when none are given),
    /// keeping candidate order.
    pub async fn filter_bundles(
        &self,
        candidate_bundles: &[VocabularyId],
        user_id: &str,
        content_types: &[ContentTypeId],
    ) -> Result<Vec<VocabularyId>> {
        let groups = self.resolver.user_groups(user_id).await?;
        if groups.is_empty() {
            debug!(user = %user_id, "User has no group memberships, bundles pass through");
            return Ok(candidate_bundles.to_vec());
        }

        let allowed = if content_types.is_empty() {
            self.resolver.resolve_full_grant_set(&groups).await?
        } else {
            self.resolver
                .resolve_for_content_types(&groups, content_types)
                .await?
        };

        let scoped: Vec<VocabularyId> = candidate_bundles
            .iter()
            .filter(|bundle| allowed.contains(bundle.as_str()))
            .cloned()
            .collect();

        debug!(
            user = %user_id,
            candidates = candidate_bundles.len(),
            scoped = scoped.len(),
            "Scoped autocomplete bundles"
        );
        Ok(scoped)
    }
}

/// Autocomplete request for a term reference field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteQuery {
    /// Text typed so far
    pub input: String,

    /// Vocabularies the field may reference
    pub candidate_bundles: Vec<VocabularyId>,

    /// Content types the field is attached to
    #[serde(default)]
    pub content_types: Vec<ContentTypeId>,

    /// Overrides the engine's default match operator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_operator: Option<MatchOperator>,
}

impl AutocompleteQuery {
    pub fn new(input: impl Into<String>, candidate_bundles: Vec<VocabularyId>) -> Self {
        Self {
            input: input.into(),
            candidate_bundles,
            content_types: Vec::new(),
            match_operator: None,
        }
    }

    /// Query against a field's target bundles, content types and operator
    pub fn for_field(input: impl Into<String>, field: &FieldDefinition) -> Self {
        Self {
            input: input.into(),
            candidate_bundles: field.target_bundles.clone(),
            content_types: field.content_types.clone(),
            match_operator: field.match_operator,
        }
    }

    pub fn for_content_types(mut self, content_types: Vec<ContentTypeId>) -> Self {
        self.content_types = content_types;
        self
    }
}

/// One autocomplete suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteMatch {
    /// Re-parsable `"<label> (<id>)"` value
    pub value: String,
    /// Label as stored
    pub label: String,
}

/// Group-scoped term autocomplete
#[derive(Clone)]
pub struct GroupTermAutocomplete {
    scoper: AutocompleteScoper,
    search: Arc<dyn SuggestionSearch>,
    config: EngineConfig,
}

impl GroupTermAutocomplete {
    pub fn new(resolver: ScopeResolver, search: Arc<dyn SuggestionSearch>, config: EngineConfig) -> Self {
        Self {
            scoper: AutocompleteScoper::new(resolver),
            search,
            config,
        }
    }

    /// Suggestions for the typed input, in search order
    pub async fn suggest(&self, query: &AutocompleteQuery, acting_user: &str) -> Result<Vec<AutocompleteMatch>> {
        if query.input.trim().is_empty() {
            return Ok(Vec::new());
        }

        let bundles = self
            .scoper
            .filter_bundles(&query.candidate_bundles, acting_user, &query.content_types)
            .await?;
        if bundles.is_empty() {
            debug!(user = %acting_user, "No referenceable bundles left after scoping");
            return Ok(Vec::new());
        }

        let operator = query
            .match_operator
            .unwrap_or(self.config.default_match_operator);
        let suggestions = self
            .search
            .referenceable_terms(&query.input, &bundles, operator, self.config.autocomplete_limit)
            .await?;

        let matches: Vec<AutocompleteMatch> = suggestions
            .into_iter()
            .map(|s| AutocompleteMatch {
                value: format_value(&s.label, &s.term_id),
                label: s.label,
            })
            .collect();

        info!(user = %acting_user, input = %query.input, matches = matches.len(), "Autocomplete served");
        Ok(matches)
    }
}

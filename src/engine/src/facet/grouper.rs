//! Facet result scoping and grouping

use std::collections::HashMap;
use std::sync::Arc;

use groupscope_core::{MatchResult, TaxonomyStorage, Vocabulary, VocabularyId};
use indexmap::IndexMap;
use tracing::{debug, info};

use super::types::{FacetConfig, FacetView, ParentFacetState, VocabularyGroup};
use crate::error::{EngineError, Result};
use crate::exclusion::ExclusionList;
use crate::scope::{ParentFacetSelection, ScopeResolver, ScopeSubject, VocabularySet};

/// Groups raw facet results by vocabulary
///
/// Pipeline: resolve each result's vocabulary, keep only vocabularies granted
/// to the parent-selected group, drop excluded vocabularies, then group by
/// label in first-seen order.
#[derive(Clone)]
pub struct FacetGrouper {
    resolver: ScopeResolver,
    storage: Arc<dyn TaxonomyStorage>,
}

impl FacetGrouper {
    pub fn new(resolver: ScopeResolver, storage: Arc<dyn TaxonomyStorage>) -> Self {
        Self { resolver, storage }
    }

    /// Build the facet view for a configured facet
    pub async fn build_facet_view(
        &self,
        raw_results: &[MatchResult],
        config: &FacetConfig,
        parent_state: Option<&ParentFacetState>,
    ) -> Result<FacetView> {
        if config.facet_id.trim().is_empty() {
            return Err(EngineError::InvalidInput("facet id cannot be blank".to_string()));
        }

        let view = self
            .group(raw_results, config.parent_selection(parent_state), &config.exclude)
            .await?;

        info!(
            facet = %config.facet_id,
            results = raw_results.len(),
            groups = view.groups().len(),
            "Built grouped facet"
        );
        Ok(view)
    }

    /// Scope and group raw results
    pub async fn group(
        &self,
        raw_results: &[MatchResult],
        parent_selection: Option<&ParentFacetSelection>,
        exclusion: &ExclusionList,
    ) -> Result<FacetView> {
        let allowed = self.parent_scope(parent_selection).await?;

        // Per-call memo; several results usually share a vocabulary
        let mut vocabularies: HashMap<VocabularyId, Option<Vocabulary>> = HashMap::new();
        let mut grouped: IndexMap<String, VocabularyGroup> = IndexMap::new();

        for result in raw_results {
            let Some(vocabulary_id) = self
                .storage
                .resolve_vocabulary_for_term(&result.raw_value)
                .await?
            else {
                debug!(term = %result.raw_value, "Dropping result for dangling term");
                continue;
            };

            if !vocabularies.contains_key(&vocabulary_id) {
                let loaded = self.storage.load_vocabulary(&vocabulary_id).await?;
                vocabularies.insert(vocabulary_id.clone(), loaded);
            }
            let Some(vocabulary) = vocabularies.get(&vocabulary_id).and_then(Option::as_ref) else {
                debug!(vocabulary = %vocabulary_id, "Dropping result for missing vocabulary");
                continue;
            };

            if let Some(allowed) = &allowed {
                if !allowed.contains(&vocabulary.id) {
                    continue;
                }
            }

            if exclusion.excludes(&vocabulary.id, Some(&vocabulary.label)) {
                continue;
            }

            let group = grouped
                .entry(vocabulary.label.clone())
                .or_insert_with(|| VocabularyGroup {
                    label: vocabulary.label.clone(),
                    vocabulary_id: vocabulary.id.clone(),
                    results: Vec::new(),
                });
            if !group.results.iter().any(|r| r.raw_value == result.raw_value) {
                group.results.push(result.clone());
            }
        }

        if grouped.is_empty() {
            debug!(results = raw_results.len(), "No facet results survived scoping");
            return Ok(FacetView::Empty);
        }

        Ok(FacetView::Grouped {
            groups: grouped.into_values().collect(),
        })
    }

    /// Vocabularies granted to the parent-selected group
    ///
    /// `None` when there is no parent selection or it names no group; the
    /// results are then not restricted by group.
    async fn parent_scope(
        &self,
        parent_selection: Option<&ParentFacetSelection>,
    ) -> Result<Option<VocabularySet>> {
        let Some(selection) = parent_selection else {
            return Ok(None);
        };

        let groups = self
            .resolver
            .resolve_groups_for_subject(&ScopeSubject::ParentFacet(selection.clone()))
            .await?;
        if groups.is_empty() {
            return Ok(None);
        }

        let allowed = self.resolver.resolve_full_grant_set(&groups).await?;
        debug!(groups = groups.len(), vocabularies = allowed.len(), "Facet scoped by parent selection");
        Ok(Some(allowed))
    }
}

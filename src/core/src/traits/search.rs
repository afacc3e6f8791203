//! Term suggestion search backend

use crate::error::Result;
use crate::types::{TermId, VocabularyId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How the typed string is matched against term names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchOperator {
    /// Name contains the input
    #[default]
    Contains,
    /// Name starts with the input
    StartsWith,
    /// Name equals the input
    Equals,
}

impl MatchOperator {
    /// Case-insensitive match of `name` against `input`
    pub fn matches(&self, name: &str, input: &str) -> bool {
        let name = name.to_lowercase();
        let input = input.to_lowercase();
        match self {
            MatchOperator::Contains => name.contains(&input),
            MatchOperator::StartsWith => name.starts_with(&input),
            MatchOperator::Equals => name == input,
        }
    }
}

/// A referenceable term returned by the search backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub vocabulary_id: VocabularyId,
    pub term_id: TermId,
    pub label: String,
}

/// Produces referenceable terms for a partial input, ranking is its own concern
#[async_trait]
pub trait SuggestionSearch: Send + Sync {
    /// Terms in `bundles` whose names match `input`, at most `limit` of them
    async fn referenceable_terms(
        &self,
        input: &str,
        bundles: &[VocabularyId],
        operator: MatchOperator,
        limit: usize,
    ) -> Result<Vec<Suggestion>>;
}

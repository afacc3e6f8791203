//! Group-scoped autocomplete

mod common;

use common::{engine, engine_with, ids};
use groupscope_core::MatchOperator;
use groupscope_engine::autocomplete::{extract_term_id, AutocompleteQuery, AutocompleteScoper};
use groupscope_engine::widget::FieldDefinition;
use groupscope_engine::EngineConfig;

// ============================================================================
// BUNDLE SCOPING
// ============================================================================

#[tokio::test]
async fn test_user_without_groups_keeps_candidates() {
    let engine = engine().await;
    let scoper = AutocompleteScoper::new(engine.resolver().clone());

    let candidates = ids(&["sizes", "fruit", "unknown"]);
    let scoped = scoper.filter_bundles(&candidates, "carol", &[]).await.unwrap();

    assert_eq!(scoped, candidates);
}

#[tokio::test]
async fn test_member_gets_intersection() {
    let engine = engine().await;
    let scoper = AutocompleteScoper::new(engine.resolver().clone());

    let scoped = scoper
        .filter_bundles(&ids(&["fruit", "sizes", "colors"]), "bob", &[])
        .await
        .unwrap();

    assert_eq!(scoped, ids(&["sizes"]));
}

#[tokio::test]
async fn test_content_types_narrow_scope() {
    let engine = engine().await;
    let scoper = AutocompleteScoper::new(engine.resolver().clone());
    let candidates = ids(&["sizes", "campaign"]);

    let page = scoper.filter_bundles(&candidates, "bob", &ids(&["page"])).await.unwrap();
    assert_eq!(page, ids(&["campaign"]));

    let article = scoper.filter_bundles(&candidates, "bob", &ids(&["article"])).await.unwrap();
    assert_eq!(article, ids(&["sizes"]));
}

// ============================================================================
// SUGGESTIONS
// ============================================================================

#[tokio::test]
async fn test_suggest_only_from_scoped_vocabularies() {
    let engine = engine().await;
    let query = AutocompleteQuery::new("an", ids(&["fruit", "sizes"]));

    let matches = engine.suggest(&query, "alice").await.unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].label, "Banana");
    assert_eq!(matches[0].value, "Banana (t2)");
    assert_eq!(extract_term_id(&matches[0].value).as_deref(), Some("t2"));
}

#[tokio::test]
async fn test_suggest_unrestricted_without_groups() {
    let engine = engine().await;
    let query = AutocompleteQuery::new("a", ids(&["sizes"]));

    let labels: Vec<_> = engine
        .suggest(&query, "carol")
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.label)
        .collect();

    assert_eq!(labels, ids(&["Large", "Small"]));
}

#[tokio::test]
async fn test_suggest_nothing_when_scope_excludes_all() {
    let engine = engine().await;
    let query = AutocompleteQuery::new("a", ids(&["fruit"]));

    assert!(engine.suggest(&query, "bob").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_input_suggests_nothing() {
    let engine = engine().await;
    let query = AutocompleteQuery::new("   ", ids(&["fruit"]));

    assert!(engine.suggest(&query, "alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_match_operator_and_limit() {
    let engine = engine().await;

    let mut query = AutocompleteQuery::new("a", ids(&["fruit"]));
    assert_eq!(engine.suggest(&query, "alice").await.unwrap().len(), 2);

    query.match_operator = Some(MatchOperator::StartsWith);
    let matches = engine.suggest(&query, "alice").await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].label, "Apple");

    let limited = engine_with(EngineConfig {
        autocomplete_limit: 1,
        ..EngineConfig::default()
    })
    .await;
    let query = AutocompleteQuery::new("a", ids(&["fruit"]));
    assert_eq!(limited.suggest(&query, "alice").await.unwrap().len(), 1);
}

// ============================================================================
// FIELD CONFIGURATION
// ============================================================================

#[tokio::test]
async fn test_field_definition_drives_query() {
    let engine = engine().await;

    let mut field = FieldDefinition::new("field_tags");
    field.target_bundles = ids(&["sizes", "campaign"]);
    field.match_operator = Some(MatchOperator::StartsWith);

    let query = AutocompleteQuery::for_field("la", &field);
    assert_eq!(query.candidate_bundles, ids(&["sizes", "campaign"]));
    assert!(query.content_types.is_empty());

    let labels: Vec<_> = engine
        .suggest_for_field("la", &field, "bob")
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.label)
        .collect();
    assert_eq!(labels, ids(&["Large", "Launch"]));

    field.content_types = ids(&["page"]);
    let matches = engine.suggest_for_field("la", &field, "bob").await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].value, "Launch (k1)");
}

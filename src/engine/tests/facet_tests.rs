//! Facet scoping, exclusion and grouping

mod common;

use common::{directory, engine, result};
use groupscope_core::{Term, Vocabulary};
use groupscope_engine::{EngineConfig, EngineError, FacetConfig, FacetView, GroupScopeEngine, ParentFacetState};

fn raw_results() -> Vec<groupscope_core::MatchResult> {
    vec![
        result("c1", 4),
        result("s1", 2),
        result("t1", 7),
        result("c2", 1),
        result("s2", 3),
    ]
}

fn group_terms(view: &FacetView, label: &str) -> Vec<String> {
    view.group(label)
        .map(|g| g.results.iter().map(|r| r.raw_value.clone()).collect())
        .unwrap_or_default()
}

// ============================================================================
// GROUPING AND EXCLUSION
// ============================================================================

#[tokio::test]
async fn test_groups_in_first_seen_order() {
    let engine = engine().await;
    let config = FacetConfig::new("terms");

    let view = engine.build_facet_view(&raw_results(), &config, None).await.unwrap();

    assert_eq!(view.labels(), vec!["Colors", "Sizes", "Fruit"]);
    assert_eq!(group_terms(&view, "Colors"), vec!["c1", "c2"]);
    assert_eq!(view.group("Colors").unwrap().results[0].count, 4);
}

#[tokio::test]
async fn test_excluded_label_removes_vocabulary() {
    let engine = engine().await;
    let results = vec![result("c1", 4), result("s1", 2), result("c2", 1)];
    let config = FacetConfig::new("terms").excluding("Sizes");

    let view = engine.build_facet_view(&results, &config, None).await.unwrap();

    assert_eq!(view.labels(), vec!["Colors"]);
    assert_eq!(group_terms(&view, "Colors"), vec!["c1", "c2"]);
    assert!(view.group("Sizes").is_none());
}

#[tokio::test]
async fn test_excluded_id_and_messy_text() {
    let engine = engine().await;
    let config = FacetConfig::new("terms").excluding("  sizes \r\n\r\n\nFruit\nnot-in-scope");

    let view = engine.build_facet_view(&raw_results(), &config, None).await.unwrap();

    assert_eq!(view.labels(), vec!["Colors"]);
}

#[tokio::test]
async fn test_everything_excluded_is_empty() {
    let engine = engine().await;
    let config = FacetConfig::new("terms").excluding("Colors\nSizes\nFruit");

    let view = engine.build_facet_view(&raw_results(), &config, None).await.unwrap();

    assert_eq!(view, FacetView::Empty);
}

#[tokio::test]
async fn test_dangling_terms_are_dropped() {
    let engine = engine().await;
    let results = vec![result("deleted", 9), result("t2", 1)];

    let view = engine
        .build_facet_view(&results, &FacetConfig::new("terms"), None)
        .await
        .unwrap();

    assert_eq!(view.labels(), vec!["Fruit"]);
    assert_eq!(group_terms(&view, "Fruit"), vec!["t2"]);
}

#[tokio::test]
async fn test_deleted_term_drops_from_facet() {
    let directory = directory().await;
    let engine = GroupScopeEngine::in_memory(EngineConfig::default(), directory.clone()).unwrap();
    let results = vec![result("t1", 3), result("t2", 1)];
    let config = FacetConfig::new("terms");

    let before = engine.build_facet_view(&results, &config, None).await.unwrap();
    assert_eq!(group_terms(&before, "Fruit"), vec!["t1", "t2"]);

    directory.remove_term("t1").await;
    let after = engine.build_facet_view(&results, &config, None).await.unwrap();
    assert_eq!(group_terms(&after, "Fruit"), vec!["t2"]);

    directory.remove_term("t2").await;
    let emptied = engine.build_facet_view(&results, &config, None).await.unwrap();
    assert!(emptied.is_empty());
}

#[tokio::test]
async fn test_vocabularies_sharing_a_label_share_a_group() {
    let directory = directory().await;
    directory.add_vocabulary(Vocabulary::new("colours", "Colors")).await;
    directory.add_term(Term::new("x1", "colours", "Crimson")).await;
    let engine = GroupScopeEngine::in_memory(EngineConfig::default(), directory).unwrap();

    let results = vec![result("c1", 4), result("x1", 2), result("c2", 1)];
    let view = engine
        .build_facet_view(&results, &FacetConfig::new("terms"), None)
        .await
        .unwrap();

    assert_eq!(view.labels(), vec!["Colors"]);
    let colors = view.group("Colors").unwrap();
    assert_eq!(colors.vocabulary_id, "colors");
    assert_eq!(group_terms(&view, "Colors"), vec!["c1", "x1", "c2"]);
}

#[tokio::test]
async fn test_duplicate_term_keeps_first() {
    let engine = engine().await;
    let results = vec![result("t1", 3), result("t1", 5)];

    let view = engine
        .build_facet_view(&results, &FacetConfig::new("terms"), None)
        .await
        .unwrap();

    let fruit = view.group("Fruit").unwrap();
    assert_eq!(fruit.results.len(), 1);
    assert_eq!(fruit.results[0].count, 3);
}

#[tokio::test]
async fn test_no_results_is_empty() {
    let engine = engine().await;

    let view = engine
        .build_facet_view(&[], &FacetConfig::new("terms"), None)
        .await
        .unwrap();

    assert!(view.is_empty());
}

// ============================================================================
// PARENT FACET SCOPING
// ============================================================================

#[tokio::test]
async fn test_parent_selection_limits_to_group_grants() {
    let engine = engine().await;
    let config = FacetConfig::new("terms").with_parent("group");
    let parent = ParentFacetState::new("group", vec!["Group A".to_string()]);

    let view = engine
        .build_facet_view(&raw_results(), &config, Some(&parent))
        .await
        .unwrap();

    assert_eq!(view.labels(), vec!["Colors", "Fruit"]);
}

#[tokio::test]
async fn test_parent_scope_and_exclusion_combine() {
    let engine = engine().await;
    let parent = ParentFacetState::new("group", vec!["Group B".to_string()]);

    let excluding_colors = FacetConfig::new("terms").with_parent("group").excluding("Colors");
    let view = engine
        .build_facet_view(&raw_results(), &excluding_colors, Some(&parent))
        .await
        .unwrap();
    assert_eq!(view.labels(), vec!["Sizes"]);
    assert_eq!(group_terms(&view, "Sizes"), vec!["s1", "s2"]);

    let excluding_sizes = FacetConfig::new("terms").with_parent("group").excluding("Sizes");
    let view = engine
        .build_facet_view(&raw_results(), &excluding_sizes, Some(&parent))
        .await
        .unwrap();
    assert!(view.is_empty());
}

#[tokio::test]
async fn test_parent_group_without_grants_is_empty() {
    let engine = engine().await;
    let config = FacetConfig::new("terms").with_parent("group");
    let parent = ParentFacetState::new("group", vec!["Quiet".to_string()]);

    let view = engine
        .build_facet_view(&raw_results(), &config, Some(&parent))
        .await
        .unwrap();

    assert_eq!(view, FacetView::Empty);
}

#[tokio::test]
async fn test_unresolved_parent_label_does_not_restrict() {
    let engine = engine().await;
    let config = FacetConfig::new("terms").with_parent("group");
    let parent = ParentFacetState::new("group", vec!["No Such Group".to_string()]);

    let view = engine
        .build_facet_view(&raw_results(), &config, Some(&parent))
        .await
        .unwrap();

    assert_eq!(view.labels().len(), 3);
}

#[tokio::test]
async fn test_state_of_other_facet_is_ignored() {
    let engine = engine().await;
    let config = FacetConfig::new("terms").with_parent("group");
    let unrelated = ParentFacetState::new("author", vec!["Group A".to_string()]);

    let view = engine
        .build_facet_view(&raw_results(), &config, Some(&unrelated))
        .await
        .unwrap();

    assert_eq!(view.labels().len(), 3);
}

#[tokio::test]
async fn test_blank_facet_id_is_rejected() {
    let engine = engine().await;

    let err = engine
        .build_facet_view(&raw_results(), &FacetConfig::new(" "), None)
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::InvalidInput(_)));
}

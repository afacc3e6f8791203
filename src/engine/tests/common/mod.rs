//! Shared fixture for engine integration tests
//!
//! Groups:
//! - `ga` "Group A": grants Fruit (article), Colors (article, page)
//! - `gb` "Group B": grants Sizes (article), Campaign (page)
//! - `gc` "Closed": taxonomy disabled, grants Fruit (article)
//! - `gz` "Quiet": no grants
//!
//! Users: alice (A), bob (B), carol (none), dave (A, override and site-wide
//! overview permissions)

#![allow(dead_code)]

use groupscope_core::{Group, MatchResult, Term, Vocabulary, VocabularyGrant};
use groupscope_engine::store::InMemoryDirectory;
use groupscope_engine::{EngineConfig, GroupScopeEngine};
use std::sync::Arc;

pub async fn directory() -> Arc<InMemoryDirectory> {
    let directory = Arc::new(InMemoryDirectory::new());

    directory.add_group(Group::new("ga", "Group A")).await;
    directory.add_group(Group::new("gb", "Group B")).await;
    directory
        .add_group(Group::new("gc", "Closed").with_taxonomy_enabled(false))
        .await;
    directory.add_group(Group::new("gz", "Quiet")).await;

    directory.add_vocabulary(Vocabulary::new("fruit", "Fruit")).await;
    directory.add_vocabulary(Vocabulary::new("colors", "Colors")).await;
    directory.add_vocabulary(Vocabulary::new("sizes", "Sizes")).await;
    directory.add_vocabulary(Vocabulary::new("campaign", "Campaign")).await;

    directory.add_term(Term::new("t1", "fruit", "Apple")).await;
    directory.add_term(Term::new("t2", "fruit", "Banana")).await;
    directory.add_term(Term::new("c1", "colors", "Red")).await;
    directory.add_term(Term::new("c2", "colors", "Blue")).await;
    directory.add_term(Term::new("s1", "sizes", "Small")).await;
    directory.add_term(Term::new("s2", "sizes", "Large")).await;
    directory.add_term(Term::new("k1", "campaign", "Launch")).await;

    directory
        .add_grant(VocabularyGrant::new("1", "ga", "fruit").allow("article"))
        .await;
    directory
        .add_grant(VocabularyGrant::new("2", "ga", "colors").allow("article").allow("page"))
        .await;
    directory
        .add_grant(VocabularyGrant::new("3", "gb", "sizes").allow("article"))
        .await;
    directory
        .add_grant(VocabularyGrant::new("4", "gb", "campaign").allow("page"))
        .await;
    directory
        .add_grant(VocabularyGrant::new("5", "gc", "fruit").allow("article"))
        .await;

    directory.add_membership("alice", "ga").await;
    directory.add_membership("bob", "gb").await;
    directory.add_membership("dave", "ga").await;

    // node:1 is shared by both groups, node:2 by none, node:3 by A only
    directory.link_entity("node:1", "ga").await;
    directory.link_entity("node:1", "gb").await;
    directory.link_entity("node:3", "ga").await;
    directory
        .persist_selection("node:1", "field_tags", vec!["t1".into(), "s2".into(), "gone".into()])
        .await;
    directory
        .persist_selection("node:3", "field_tags", vec!["t1".into()])
        .await;

    let config = EngineConfig::default();
    directory.grant_permission("dave", &config.override_permission).await;
    directory.grant_permission("dave", &config.overview_permission).await;
    directory
        .grant_permission("dave", &config.overview_controls_permission)
        .await;
    directory
        .grant_group_permission("alice", "ga", &config.overview_permission)
        .await;

    directory
}

pub async fn engine() -> GroupScopeEngine {
    engine_with(EngineConfig::default()).await
}

pub async fn engine_with(config: EngineConfig) -> GroupScopeEngine {
    GroupScopeEngine::in_memory(config, directory().await).unwrap()
}

pub fn result(term_id: &str, count: u64) -> MatchResult {
    MatchResult::new(term_id, term_id.to_uppercase(), count)
}

pub fn ids(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

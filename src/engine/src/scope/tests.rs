/// Test suite for scope resolution
///
/// Tests cover:
/// - Content-type filtering of grants
/// - Union across groups
/// - Subject strategies
/// - Empty scope edge cases
/// - Collaborator failure propagation

use super::*;
use crate::error::EngineError;
use crate::store::InMemoryDirectory;
use async_trait::async_trait;
use groupscope_core::{CoreError, Group, GroupId, MembershipIndex, VocabularyGrant};
use std::sync::Arc;

async fn directory() -> Arc<InMemoryDirectory> {
    let directory = Arc::new(InMemoryDirectory::new());
    directory.add_group(Group::new("g1", "Alpha")).await;
    directory.add_group(Group::new("g2", "Beta")).await;
    directory.add_group(Group::new("g3", "Beta")).await;

    directory
        .add_grant(VocabularyGrant::new("1", "g1", "tags").allow("article"))
        .await;
    directory
        .add_grant(VocabularyGrant::new("2", "g1", "colors").allow("page"))
        .await;
    directory
        .add_grant(VocabularyGrant::new("3", "g2", "sizes").allow("article").allow("page"))
        .await;
    directory
        .add_grant(VocabularyGrant::new("4", "g2", "tags").allow("page"))
        .await;

    directory.add_membership("alice", "g1").await;
    directory.add_membership("alice", "g2").await;
    directory.link_entity("node:1", "g2").await;
    directory.link_entity("node:1", "g1").await;
    directory
}

fn resolver(directory: Arc<InMemoryDirectory>) -> ScopeResolver {
    ScopeResolver::new(directory.clone(), directory.clone(), directory)
}

fn groups(ids: &[&str]) -> GroupSet {
    ids.iter().map(|id| id.to_string()).collect()
}

// ============================================================================
// Allowed Vocabulary Tests
// ============================================================================

#[tokio::test]
async fn test_content_type_filters_grants() {
    let resolver = resolver(directory().await);

    let allowed = resolver
        .resolve_allowed_vocabularies(&groups(&["g1"]), "article")
        .await
        .unwrap();
    assert_eq!(allowed.into_iter().collect::<Vec<_>>(), vec!["tags"]);
}

#[tokio::test]
async fn test_union_across_groups() {
    let resolver = resolver(directory().await);

    let allowed = resolver
        .resolve_allowed_vocabularies(&groups(&["g1", "g2"]), "page")
        .await
        .unwrap();
    assert_eq!(allowed.len(), 3);
    assert!(allowed.contains("colors"));
    assert!(allowed.contains("sizes"));
    assert!(allowed.contains("tags"));
}

#[tokio::test]
async fn test_empty_groups_yield_empty_scope() {
    let resolver = resolver(directory().await);

    for content_type in ["article", "page", "event"] {
        let allowed = resolver
            .resolve_allowed_vocabularies(&GroupSet::new(), content_type)
            .await
            .unwrap();
        assert!(allowed.is_empty());
    }
}

#[tokio::test]
async fn test_unknown_content_type_yields_empty_scope() {
    let resolver = resolver(directory().await);

    let allowed = resolver
        .resolve_allowed_vocabularies(&groups(&["g1", "g2"]), "event")
        .await
        .unwrap();
    assert!(allowed.is_empty());
}

#[tokio::test]
async fn test_full_grant_set_ignores_content_type() {
    let resolver = resolver(directory().await);

    let allowed = resolver.resolve_full_grant_set(&groups(&["g1"])).await.unwrap();
    assert_eq!(allowed.into_iter().collect::<Vec<_>>(), vec!["tags", "colors"]);
}

#[tokio::test]
async fn test_multiple_content_types() {
    let resolver = resolver(directory().await);

    let allowed = resolver
        .resolve_for_content_types(&groups(&["g1"]), &["article".into(), "page".into()])
        .await
        .unwrap();
    assert_eq!(allowed.len(), 2);

    let allowed = resolver
        .resolve_for_content_types(&groups(&["g1"]), &[])
        .await
        .unwrap();
    assert!(allowed.is_empty());
}

// ============================================================================
// Subject Strategy Tests
// ============================================================================

#[tokio::test]
async fn test_existing_entity_uses_all_links() {
    let resolver = resolver(directory().await);

    let found = resolver
        .resolve_groups_for_subject(&ScopeSubject::ExistingEntity("node:1".into()))
        .await
        .unwrap();
    assert_eq!(found, groups(&["g2", "g1"]));

    let unlinked = resolver
        .resolve_groups_for_subject(&ScopeSubject::ExistingEntity("node:2".into()))
        .await
        .unwrap();
    assert!(unlinked.is_empty());
}

#[tokio::test]
async fn test_route_group_must_exist() {
    let resolver = resolver(directory().await);

    let found = resolver
        .resolve_groups_for_subject(&ScopeSubject::RouteGroup("g2".into()))
        .await
        .unwrap();
    assert_eq!(found, groups(&["g2"]));

    let missing = resolver
        .resolve_groups_for_subject(&ScopeSubject::RouteGroup("g9".into()))
        .await
        .unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
async fn test_parent_facet_takes_first_label_match() {
    let resolver = resolver(directory().await);

    let selection = ParentFacetSelection::new(vec!["Beta".into(), "Alpha".into()]);
    let found = resolver
        .resolve_groups_for_subject(&ScopeSubject::ParentFacet(selection))
        .await
        .unwrap();
    assert_eq!(found, groups(&["g2"]));
}

#[tokio::test]
async fn test_parent_facet_without_match() {
    let resolver = resolver(directory().await);

    let unmatched = ParentFacetSelection::new(vec!["Gamma".into()]);
    let found = resolver
        .resolve_groups_for_subject(&ScopeSubject::ParentFacet(unmatched))
        .await
        .unwrap();
    assert!(found.is_empty());

    let inactive = ParentFacetSelection::default();
    let found = resolver
        .resolve_groups_for_subject(&ScopeSubject::ParentFacet(inactive))
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_user_subject() {
    let resolver = resolver(directory().await);

    assert_eq!(resolver.user_groups("alice").await.unwrap(), groups(&["g1", "g2"]));
    assert!(resolver.user_groups("bob").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_owning_group() {
    let resolver = resolver(directory().await);

    assert_eq!(resolver.owning_group("tags").await.unwrap(), Some("g1".to_string()));
    assert_eq!(resolver.owning_group("unknown").await.unwrap(), None);
}

// ============================================================================
// Failure Propagation Tests
// ============================================================================

struct UnavailableMemberships;

#[async_trait]
impl MembershipIndex for UnavailableMemberships {
    async fn groups_for_user(&self, _user_id: &str) -> groupscope_core::Result<Vec<GroupId>> {
        Err(CoreError::storage("membership backend unavailable"))
    }
}

#[tokio::test]
async fn test_collaborator_failure_propagates() {
    let directory = directory().await;
    let resolver = ScopeResolver::new(
        Arc::new(UnavailableMemberships),
        directory.clone(),
        directory,
    );

    let err = resolver.user_groups("alice").await.unwrap_err();
    assert!(matches!(err, EngineError::Collaborator(CoreError::Storage(_))));
}

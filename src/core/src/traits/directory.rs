//! Membership and grant lookups

use crate::error::Result;
use crate::types::{GroupId, VocabularyGrant};
use async_trait::async_trait;

/// Answers "which groups does this user belong to?"
#[async_trait]
pub trait MembershipIndex: Send + Sync {
    /// Groups the user is a member of, in membership order
    async fn groups_for_user(&self, user_id: &str) -> Result<Vec<GroupId>>;

    /// Whether the user is a member of the group
    async fn is_member(&self, user_id: &str, group_id: &str) -> Result<bool> {
        Ok(self
            .groups_for_user(user_id)
            .await?
            .iter()
            .any(|g| g == group_id))
    }
}

/// Answers "which vocabularies are granted to this group, for which content types?"
#[async_trait]
pub trait GrantTable: Send + Sync {
    /// All grant records of a group, in grant order
    async fn grants_for_group(&self, group_id: &str) -> Result<Vec<VocabularyGrant>>;

    /// Group of the first grant record referencing the vocabulary
    async fn owning_group(&self, vocabulary_id: &str) -> Result<Option<GroupId>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMemberships(Vec<GroupId>);

    #[async_trait]
    impl MembershipIndex for FixedMemberships {
        async fn groups_for_user(&self, _user_id: &str) -> Result<Vec<GroupId>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_default_is_member() {
        let index = FixedMemberships(vec!["g1".to_string(), "g2".to_string()]);
        assert!(index.is_member("alice", "g2").await.unwrap());
        assert!(!index.is_member("alice", "g3").await.unwrap());
    }
}

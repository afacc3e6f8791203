//! Permission evaluation

use crate::error::Result;
use async_trait::async_trait;

/// Evaluates permission strings for a user
#[async_trait]
pub trait PermissionCheck: Send + Sync {
    /// Site-wide permission
    async fn has(&self, user_id: &str, permission: &str) -> Result<bool>;

    /// Permission inside a group; defaults to the site-wide check
    async fn has_in_group(&self, user_id: &str, _group_id: &str, permission: &str) -> Result<bool> {
        self.has(user_id, permission).await
    }
}

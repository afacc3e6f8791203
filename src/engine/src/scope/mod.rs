//! Group-scoped vocabulary resolution
//!
//! Turns a subject (an edited entity, a route group, a parent facet
//! selection or a user) into a set of groups, and a set of groups into the
//! vocabularies those groups grant.
//!
//! # Examples
//!
//! ```no_run
//! use groupscope_engine::scope::{ScopeResolver, ScopeSubject};
//! use groupscope_engine::store::InMemoryDirectory;
//! use std::sync::Arc;
//!
//! # async fn example() -> groupscope_engine::Result<()> {
//! let directory = Arc::new(InMemoryDirectory::new());
//! let resolver = ScopeResolver::new(directory.clone(), directory.clone(), directory);
//!
//! let groups = resolver
//!     .resolve_groups_for_subject(&ScopeSubject::RouteGroup("g1".to_string()))
//!     .await?;
//! let allowed = resolver.resolve_allowed_vocabularies(&groups, "article").await?;
//! assert!(allowed.is_empty());
//! # Ok(())
//! # }
//! ```

mod resolver;
mod subject;

#[cfg(test)]
mod tests;

pub use resolver::{GroupSet, ScopeResolver, VocabularySet};
pub use subject::{ParentFacetSelection, ScopeSubject};

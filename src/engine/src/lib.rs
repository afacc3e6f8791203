//! # GroupScope Engine
//!
//! Group-scoped taxonomy visibility for a multi-tenant content platform.
//! Decides which vocabularies and terms a user or rendering context may see
//! or select, and applies that scope identically on three surfaces.
//!
//! ## Features
//!
//! - **Field widget**: per-vocabulary term selectors for the groups an entity
//!   belongs to, with read-only selectors for other groups' vocabularies
//! - **Autocomplete**: candidate vocabularies narrowed to the user's groups
//! - **Facets**: term results grouped by vocabulary, scoped by a parent
//!   facet's selected group and a per-facet exclusion list
//! - **Overview**: vocabularies associated with a group
//!
//! ## Example
//!
//! ```rust
//! use groupscope_engine::{EngineConfig, GroupScopeEngine};
//! use groupscope_engine::store::InMemoryDirectory;
//! use groupscope_engine::widget::{EditedEntity, FieldDefinition, FormContext};
//! use groupscope_core::{Group, Term, Vocabulary, VocabularyGrant};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let directory = Arc::new(InMemoryDirectory::new());
//!     directory.add_group(Group::new("g1", "Editors")).await;
//!     directory.add_vocabulary(Vocabulary::new("fruit", "Fruit")).await;
//!     directory.add_term(Term::new("t1", "fruit", "Apple")).await;
//!     directory.add_grant(VocabularyGrant::new("1", "g1", "fruit").allow("article")).await;
//!     directory.add_membership("alice", "g1").await;
//!
//!     let engine = GroupScopeEngine::in_memory(EngineConfig::default(), directory)?;
//!     let form = FormContext::new(EditedEntity::new_entity("article")).in_group("g1");
//!     let field = FieldDefinition::new("field_tags");
//!
//!     let render = engine.render_widget(&form, &field, "alice").await?;
//!     assert_eq!(render.map(|r| r.vocabularies.len()), Some(1));
//!
//!     Ok(())
//! }
//! ```

pub mod autocomplete;
pub mod config;
pub mod engine;
pub mod error;
pub mod exclusion;
pub mod facet;
pub mod options;
pub mod overview;
pub mod scope;
pub mod store;
pub mod widget;

// Re-export commonly used types
pub use config::{EngineConfig, ServerConfig};
pub use engine::{Collaborators, GroupScopeEngine};
pub use error::{EngineError, Result};
pub use exclusion::ExclusionList;
pub use facet::{FacetConfig, FacetView, ParentFacetState};
pub use scope::{ParentFacetSelection, ScopeResolver, ScopeSubject};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

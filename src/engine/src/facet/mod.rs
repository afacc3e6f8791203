//! Faceted-search surface
//!
//! Regroups raw term facet results by vocabulary, limited to the vocabularies
//! granted to the group picked in a parent facet and minus the facet's
//! excluded vocabularies.

mod grouper;
mod types;

pub use grouper::FacetGrouper;
pub use types::{FacetConfig, FacetView, ParentFacetState, VocabularyGroup};

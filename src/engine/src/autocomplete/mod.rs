//! Autocomplete surface
//!
//! Narrows the candidate vocabularies to the acting user's group scope, then
//! delegates to the suggestion search and formats each hit so it can be
//! parsed back into a term id on submit.

mod scoper;
mod value;

pub use scoper::{AutocompleteMatch, AutocompleteQuery, AutocompleteScoper, GroupTermAutocomplete};
pub use value::{decode_tag, encode_tag, extract_term_id, format_value};

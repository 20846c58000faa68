//! Catalog search: the in-memory filter engine and the suggestion lists that
//! back the search form.

pub mod filter;
pub mod suggestions;

pub use filter::{FilterCriteria, SearchForm, filter_movies};
pub use suggestions::Suggestions;

//! sitesearch-query
//!
//! Query-time half of the hybrid pipeline: the per-URL result aggregation
//! engine and the dispatcher that coordinates the keyword and semantic
//! channels behind one text input.

pub mod aggregate;
pub mod dispatch;

pub use aggregate::aggregate;
pub use dispatch::{QueryDispatcher, SearchQueryState, SEMANTIC_DEBOUNCE};

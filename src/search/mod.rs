//! Intent resolution against the semantic catalog.
//!
//! Takes the structured query intent produced upstream and ranks candidate
//! models, dimensions, and metrics from the active catalog snapshot.

mod request;
mod resolver;
pub mod scoring;

pub use request::{QueryRequest, SearchResult};
pub use resolver::SearchResolver;
pub use scoring::MatchKind;

//! # lexgraph-core
//!
//! Foundation crate for lexical-graph retrieval.
//! Defines the data model, the graph/vector/reranker store contracts, errors,
//! config, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{LexGraphConfig, RetrievalConfig, RetrieverKind};
pub use errors::{LexGraphError, LexGraphResult};
pub use models::{
    Entity, EntityContext, EntityContexts, RetrievalCandidate, RetrievalOutput, ScoredEntity,
    SearchResult, Source, Statement,
};

//! # lexgraph-storage
//!
//! In-memory adapters for the graph and vector store contracts.
//!
//! - [`MemoryGraphStore`]: lexical graph indexed in memory, with the entity
//!   network held in a `petgraph` stable graph.
//! - [`MemoryVectorStore`]: brute-force cosine search over chunk and statement
//!   embeddings.
//! - [`GraphDocument`]: serde JSON snapshot both stores load from.
//! - [`HashingEmbedder`]: deterministic hashed term-frequency embeddings so text
//!   queries work without a model.

pub mod document;
pub mod embedding;
pub mod filter;
pub mod graph;
pub mod graph_store;
pub mod vector_store;

pub use document::GraphDocument;
pub use embedding::HashingEmbedder;
pub use graph::LexicalGraph;
pub use graph_store::MemoryGraphStore;
pub use vector_store::MemoryVectorStore;

/// Embedding width used when no model is configured.
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 256;

//! # lexgraph-retrieval
//!
//! The query engine. Builds query-relevant entity network contexts, fans out
//! over independent retrieval strategies, then merges, prunes, caps, and
//! reranks their candidate statements into bounded search results.
//!
//! ## Architecture
//!
//! ```text
//! TraversalRetriever (IRetriever)
//! ├── WorkerPool (num_workers permits, shared by every store/model call)
//! ├── EntityNetworkContextBuilder
//! │   ├── Discovery (id → exact → partial → full text → vector)
//! │   ├── Entity reranking (benchmark centrality)
//! │   ├── Expansion (per-depth fan-out schedule)
//! │   ├── Centrality pruning
//! │   └── Path selection (reranked transcriptions)
//! ├── RetrieverOrchestrator
//! │   ├── ChunkBasedSearch     (DiversityAwareTopK → TwoPhaseGraphQuery)
//! │   ├── EntityBasedSearch    (context entities → TwoPhaseGraphQuery)
//! │   └── EntityNetworkSearch  (transcriptions → DiversityAwareTopK → TwoPhaseGraphQuery)
//! ├── ResultAggregator
//! │   ├── Dedup (statement id)
//! │   ├── Grouping (topic + source)
//! │   ├── Pruning (relative + absolute)
//! │   └── Truncation (per topic, results, global statements)
//! └── RerankStrategy (tfidf | model | disabled)
//! ```

pub mod aggregation;
pub mod context;
pub mod engine;
pub mod graph;
pub mod orchestrator;
pub mod pool;
pub mod ranking;
pub mod search;
pub mod strategies;
pub mod text;

pub use aggregation::ResultAggregator;
pub use context::EntityNetworkContextBuilder;
pub use engine::TraversalRetriever;
pub use graph::TwoPhaseGraphQuery;
pub use orchestrator::RetrieverOrchestrator;
pub use pool::WorkerPool;
pub use ranking::RerankStrategy;
pub use search::DiversityAwareTopK;
pub use strategies::RetrievalStrategy;

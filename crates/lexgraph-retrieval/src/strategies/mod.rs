//! The three retrieval strategies. Each is a read-only consumer of vector
//! search, two-phase graph queries and the query's entity contexts.

pub mod candidates;
mod chunk_based;
mod entity_based;
mod entity_network;

use lexgraph_core::config::{RetrievalConfig, RetrieverKind};
use lexgraph_core::errors::LexGraphResult;
use lexgraph_core::models::{EntityContexts, MetadataFilter, RetrievalCandidate};

use crate::graph::TwoPhaseGraphQuery;
use crate::search::DiversityAwareTopK;

/// Everything a strategy reads while answering one query.
#[derive(Clone, Copy)]
pub struct StrategyContext<'a> {
    pub query: &'a str,
    pub config: &'a RetrievalConfig,
    pub entity_contexts: &'a EntityContexts,
    pub vectors: &'a DiversityAwareTopK,
    pub graph: &'a TwoPhaseGraphQuery,
    pub filter: Option<&'a MetadataFilter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetrievalStrategy {
    /// Vector search over chunks with the raw query, expanded locally.
    ChunkBased,
    /// Two-phase graph query seeded by the context entities.
    EntityBased,
    /// Vector search with context transcriptions, expanded locally.
    EntityNetwork,
}

impl RetrievalStrategy {
    pub fn from_kind(kind: RetrieverKind) -> Self {
        match kind {
            RetrieverKind::ChunkBasedSearch => RetrievalStrategy::ChunkBased,
            RetrieverKind::EntityBasedSearch => RetrievalStrategy::EntityBased,
            RetrieverKind::EntityNetworkSearch => RetrievalStrategy::EntityNetwork,
        }
    }

    pub fn kind(self) -> RetrieverKind {
        match self {
            RetrievalStrategy::ChunkBased => RetrieverKind::ChunkBasedSearch,
            RetrievalStrategy::EntityBased => RetrieverKind::EntityBasedSearch,
            RetrievalStrategy::EntityNetwork => RetrieverKind::EntityNetworkSearch,
        }
    }

    /// Candidates in no particular order; the aggregator sorts.
    pub async fn retrieve(self, ctx: &StrategyContext<'_>) -> LexGraphResult<Vec<RetrievalCandidate>> {
        match self {
            RetrievalStrategy::ChunkBased => chunk_based::retrieve(ctx).await,
            RetrievalStrategy::EntityBased => entity_based::retrieve(ctx).await,
            RetrievalStrategy::EntityNetwork => entity_network::retrieve(ctx).await,
        }
    }
}

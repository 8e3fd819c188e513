//! ChunkBasedSearch: similar chunks, expanded locally.

use tracing::debug;

use lexgraph_core::config::RetrieverKind;
use lexgraph_core::errors::LexGraphResult;
use lexgraph_core::models::{MatchedNode, RetrievalCandidate, VectorIndex, VectorQuery};

use super::candidates::expand_chunk_matches;
use super::StrategyContext;

pub(super) async fn retrieve(ctx: &StrategyContext<'_>) -> LexGraphResult<Vec<RetrievalCandidate>> {
    let config = ctx.config;
    let matches = ctx
        .vectors
        .select(
            VectorIndex::Chunk,
            &VectorQuery::text(ctx.query),
            config.vss_top_k,
            config.vss_diversity_factor,
            ctx.filter,
        )
        .await?;
    let chunks: Vec<(String, f64)> = matches
        .into_iter()
        .filter_map(|m| match m.node {
            MatchedNode::Chunk { chunk_id } => Some((chunk_id, m.score)),
            MatchedNode::Statement { .. } => None,
        })
        .collect();
    debug!(chunks = chunks.len(), "chunk-based search: chunks selected");

    expand_chunk_matches(
        ctx.graph,
        chunks,
        config.intermediate_limit,
        config.query_limit,
        ctx.filter,
        RetrieverKind::ChunkBasedSearch,
    )
    .await
}

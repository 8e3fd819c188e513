//! EntityNetworkSearch: chunks similar to context transcriptions rather than the
//! question itself, expanded like chunk-based search.

use std::collections::HashMap;

use futures::future::join_all;
use tracing::debug;

use lexgraph_core::config::RetrieverKind;
use lexgraph_core::errors::LexGraphResult;
use lexgraph_core::models::{MatchedNode, RetrievalCandidate, VectorIndex, VectorQuery};

use super::candidates::expand_chunk_matches;
use super::StrategyContext;
use crate::context::transcriptions;

pub(super) async fn retrieve(ctx: &StrategyContext<'_>) -> LexGraphResult<Vec<RetrievalCandidate>> {
    let config = ctx.config;
    let mut texts: Vec<String> = Vec::new();
    for context in &ctx.entity_contexts.contexts {
        for text in transcriptions(context) {
            if !texts.contains(&text) {
                texts.push(text);
            }
        }
    }
    if texts.is_empty() {
        debug!("entity-network search: no transcriptions");
        return Ok(Vec::new());
    }

    let queries: Vec<VectorQuery> = texts.iter().map(|t| VectorQuery::text(t.as_str())).collect();
    let searches = queries.iter().map(|query| {
        ctx.vectors.select(
            VectorIndex::Chunk,
            query,
            config.vss_top_k,
            config.vss_diversity_factor,
            ctx.filter,
        )
    });

    // Best similarity per chunk, in first-seen order.
    let mut order: Vec<String> = Vec::new();
    let mut best: HashMap<String, f64> = HashMap::new();
    for result in join_all(searches).await {
        for m in result? {
            let MatchedNode::Chunk { chunk_id } = m.node else {
                continue;
            };
            match best.get_mut(&chunk_id) {
                Some(score) => *score = score.max(m.score),
                None => {
                    best.insert(chunk_id.clone(), m.score);
                    order.push(chunk_id);
                }
            }
        }
    }
    debug!(
        transcriptions = texts.len(),
        chunks = order.len(),
        "entity-network search: chunks selected"
    );

    let chunks: Vec<(String, f64)> = order
        .into_iter()
        .map(|id| {
            let score = best.get(&id).copied().unwrap_or(0.0);
            (id, score)
        })
        .collect();
    expand_chunk_matches(
        ctx.graph,
        chunks,
        config.intermediate_limit,
        config.query_limit,
        ctx.filter,
        RetrieverKind::EntityNetworkSearch,
    )
    .await
}

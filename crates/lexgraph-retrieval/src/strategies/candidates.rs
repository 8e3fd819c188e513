//! Turning graph query output into retrieval candidates.

use futures::future::join_all;

use lexgraph_core::config::RetrieverKind;
use lexgraph_core::errors::LexGraphResult;
use lexgraph_core::models::{MetadataFilter, RetrievalCandidate, SourceStatements, StatementSeed};

use crate::aggregation::dedup_candidates;
use crate::graph::TwoPhaseGraphQuery;

/// One candidate per statement, scored `statement score * weight`.
pub fn from_groups(
    groups: Vec<SourceStatements>,
    weight: f64,
    retriever: RetrieverKind,
) -> Vec<RetrievalCandidate> {
    groups
        .into_iter()
        .flat_map(|group| {
            let source = group.source;
            group.statements.into_iter().map(move |s| {
                RetrievalCandidate::new(s.statement, source.clone(), s.score * weight, retriever)
            })
        })
        .collect()
}

/// Expand every matched chunk through its own two-phase query, concurrently.
/// Each chunk's statements are weighted by the chunk's similarity.
pub async fn expand_chunk_matches(
    graph: &TwoPhaseGraphQuery,
    chunks: Vec<(String, f64)>,
    intermediate_limit: usize,
    query_limit: usize,
    filter: Option<&MetadataFilter>,
    retriever: RetrieverKind,
) -> LexGraphResult<Vec<RetrievalCandidate>> {
    let queries = chunks.into_iter().map(|(chunk_id, similarity)| async move {
        let seed = StatementSeed::Chunks(vec![chunk_id]);
        graph
            .query(&seed, intermediate_limit, query_limit, filter)
            .await
            .map(|groups| from_groups(groups, similarity, retriever))
    });

    let mut candidates = Vec::new();
    for result in join_all(queries).await {
        candidates.extend(result?);
    }
    Ok(dedup_candidates(candidates))
}

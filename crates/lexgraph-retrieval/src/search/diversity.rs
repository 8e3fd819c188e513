//! DiversityAwareTopK: source-diverse top-k over raw vector matches.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use lexgraph_core::errors::LexGraphResult;
use lexgraph_core::models::{MetadataFilter, VectorIndex, VectorMatch, VectorQuery};
use lexgraph_core::traits::IVectorStore;

use crate::pool::WorkerPool;

#[derive(Clone)]
pub struct DiversityAwareTopK {
    store: Arc<dyn IVectorStore>,
    pool: WorkerPool,
}

impl DiversityAwareTopK {
    pub fn new(store: Arc<dyn IVectorStore>, pool: WorkerPool) -> Self {
        Self { store, pool }
    }

    /// Up to `k` matches. With a diversity factor, `k * factor` raw matches are
    /// fetched and every source contributes once before any source repeats.
    /// Without one, the first `k` raw matches are returned verbatim.
    pub async fn select(
        &self,
        index: VectorIndex,
        query: &VectorQuery,
        k: usize,
        diversity_factor: Option<usize>,
        filter: Option<&MetadataFilter>,
    ) -> LexGraphResult<Vec<VectorMatch>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let fetch = match diversity_factor {
            Some(factor) => k.saturating_mul(factor.max(1)),
            None => k,
        };
        let mut raw = self
            .pool
            .run(self.store.top_k_similar(index, query, fetch, filter))
            .await?;
        debug!(?index, fetched = raw.len(), requested = fetch, "raw vector matches");

        Ok(match diversity_factor {
            Some(_) => diversify(raw, k),
            None => {
                raw.truncate(k);
                raw
            }
        })
    }
}

/// First match of each source in score order, then the remaining matches in
/// score order, truncated to `k`. Equal scores keep their raw rank.
pub fn diversify(mut raw: Vec<VectorMatch>, k: usize) -> Vec<VectorMatch> {
    raw.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut seen = HashSet::new();
    let (mut selected, repeats): (Vec<_>, Vec<_>) = raw
        .into_iter()
        .partition(|m| seen.insert(m.source_id.clone()));
    selected.extend(repeats);
    selected.truncate(k);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexgraph_core::models::MatchedNode;

    fn m(id: &str, source: &str, score: f64) -> VectorMatch {
        VectorMatch {
            node: MatchedNode::Chunk {
                chunk_id: id.into(),
            },
            score,
            source_id: source.into(),
        }
    }

    fn ids(v: &[VectorMatch]) -> Vec<&str> {
        v.iter().map(|m| m.node.id()).collect()
    }

    #[test]
    fn every_source_before_any_repeat() {
        let raw = vec![
            m("a1", "A", 0.9),
            m("a2", "A", 0.8),
            m("b1", "B", 0.7),
            m("a3", "A", 0.6),
            m("c1", "C", 0.5),
        ];
        assert_eq!(ids(&diversify(raw.clone(), 4)), vec!["a1", "b1", "c1", "a2"]);
        assert_eq!(ids(&diversify(raw, 10)), vec!["a1", "b1", "c1", "a2", "a3"]);
    }

    #[test]
    fn fewer_slots_than_sources_keeps_best_per_source() {
        let raw = vec![m("a1", "A", 0.9), m("a2", "A", 0.85), m("b1", "B", 0.2)];
        assert_eq!(ids(&diversify(raw, 2)), vec!["a1", "b1"]);
    }

    #[test]
    fn ties_keep_raw_rank() {
        let raw = vec![m("x", "A", 0.5), m("y", "B", 0.5), m("z", "C", 0.5)];
        assert_eq!(ids(&diversify(raw, 3)), vec!["x", "y", "z"]);
    }

    #[test]
    fn unsorted_input_is_ordered_by_score() {
        let raw = vec![m("low", "A", 0.1), m("high", "B", 0.9)];
        assert_eq!(ids(&diversify(raw, 2)), vec!["high", "low"]);
    }
}

//! TwoPhaseGraphQuery: identify candidate statements, then expand their connections.
//!
//! Phase 1 caps the working set at `intermediate_limit` statements before any
//! connection is followed, so fan-out is bounded no matter how connected a
//! single match is. Phase 2 expands local (same topic) and global (shared
//! fact) neighbours and returns at most `result_limit` source groups.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, Instrument};

use lexgraph_core::errors::LexGraphResult;
use lexgraph_core::models::{MetadataFilter, SourceStatements, StatementSeed};
use lexgraph_core::traits::IGraphStore;
use lexgraph_observability::graph_query_span;

use crate::pool::WorkerPool;

#[derive(Clone)]
pub struct TwoPhaseGraphQuery {
    store: Arc<dyn IGraphStore>,
    pool: WorkerPool,
}

impl TwoPhaseGraphQuery {
    pub fn new(store: Arc<dyn IGraphStore>, pool: WorkerPool) -> Self {
        Self { store, pool }
    }

    /// Source groups ordered by top score, statements within each ordered by
    /// score. Scores are normalized into (0, 1] by the overall maximum.
    pub async fn query(
        &self,
        seed: &StatementSeed,
        intermediate_limit: usize,
        result_limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> LexGraphResult<Vec<SourceStatements>> {
        if seed.is_empty() || intermediate_limit == 0 || result_limit == 0 {
            return Ok(Vec::new());
        }
        let span = graph_query_span!(seed, intermediate_limit, result_limit);
        self.run(seed, intermediate_limit, result_limit, filter)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        seed: &StatementSeed,
        intermediate_limit: usize,
        result_limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> LexGraphResult<Vec<SourceStatements>> {
        let statements = self
            .pool
            .run(self.store.query_statements(seed, intermediate_limit, filter))
            .await?;
        if statements.is_empty() {
            return Ok(Vec::new());
        }
        debug!(phase1 = statements.len(), "two-phase query: statements identified");

        let mut groups = self
            .pool
            .run(self.store.expand_connections(&statements, result_limit))
            .await?;

        for group in &mut groups {
            group.statements.sort_by(|a, b| by_score_desc(a.score, b.score));
        }
        groups.retain(|g| !g.statements.is_empty());
        groups.sort_by(|a, b| by_score_desc(a.top_score(), b.top_score()));
        groups.truncate(result_limit);
        normalize_scores(&mut groups);

        debug!(
            groups = groups.len(),
            statements = groups.iter().map(|g| g.statements.len()).sum::<usize>(),
            "two-phase query: connections expanded"
        );
        Ok(groups)
    }
}

fn by_score_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Divide every score by the maximum across all groups.
pub fn normalize_scores(groups: &mut [SourceStatements]) {
    let max = groups
        .iter()
        .map(SourceStatements::top_score)
        .fold(0.0, f64::max);
    if max <= 0.0 {
        return;
    }
    for statement in groups.iter_mut().flat_map(|g| g.statements.iter_mut()) {
        statement.score = (statement.score / max).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexgraph_core::models::{ScoredStatement, Source, Statement, TopicRef};

    fn group(source: &str, scores: &[f64]) -> SourceStatements {
        SourceStatements {
            source: Source::new(source),
            statements: scores
                .iter()
                .enumerate()
                .map(|(i, s)| ScoredStatement {
                    statement: Statement {
                        statement_id: format!("{source}-{i}"),
                        value: String::new(),
                        topic: TopicRef {
                            topic_id: "t".into(),
                            value: "t".into(),
                        },
                        source_id: source.into(),
                        chunk_id: None,
                        facts: Vec::new(),
                    },
                    score: *s,
                })
                .collect(),
        }
    }

    #[test]
    fn normalizes_by_global_max() {
        let mut groups = vec![group("a", &[4.0, 2.0]), group("b", &[1.0])];
        normalize_scores(&mut groups);
        assert_eq!(groups[0].statements[0].score, 1.0);
        assert_eq!(groups[0].statements[1].score, 0.5);
        assert_eq!(groups[1].statements[0].score, 0.25);
    }

    #[test]
    fn zero_scores_are_left_alone() {
        let mut groups = vec![group("a", &[0.0])];
        normalize_scores(&mut groups);
        assert_eq!(groups[0].statements[0].score, 0.0);
    }
}

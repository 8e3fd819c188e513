//! ResultAggregator: merge strategy outputs into bounded, ordered search results.
//!
//! Deduplicate by statement, group by (topic, source), prune against the best
//! score and an absolute floor, cap statements per topic, sort and cap
//! results, then cap statements overall. Every step sorts explicitly, so the
//! output does not depend on the order strategies finished in.

pub mod dedup;
pub mod grouping;
pub mod pruning;
pub mod truncation;

use tracing::debug;

use lexgraph_core::config::{Limit, RetrievalConfig};
use lexgraph_core::models::{RetrievalCandidate, SearchResult, Source, StatementResult, TopicRef};

pub use dedup::dedup_candidates;
pub use grouping::group_by_topic_and_source;
pub use pruning::prune_statements;
pub use truncation::{cap_statements, sort_candidates, sort_groups, truncate_per_topic, truncate_results};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationLimits {
    pub max_search_results: Limit,
    pub max_statements_per_topic: Limit,
    pub max_statements: Limit,
    pub pruning_factor: Option<f64>,
    pub pruning_threshold: Option<f64>,
}

impl AggregationLimits {
    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self {
            max_search_results: config.max_search_results,
            max_statements_per_topic: config.max_statements_per_topic,
            max_statements: config.max_statements,
            pruning_factor: config.statement_pruning_factor,
            pruning_threshold: config.statement_pruning_threshold,
        }
    }

    pub fn unbounded() -> Self {
        Self {
            max_search_results: Limit::Unbounded,
            max_statements_per_topic: Limit::Unbounded,
            max_statements: Limit::Unbounded,
            pruning_factor: None,
            pruning_threshold: None,
        }
    }
}

/// A provisional search result: one topic of one source.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateGroup {
    pub source: Source,
    pub topic: TopicRef,
    pub candidates: Vec<RetrievalCandidate>,
}

impl CandidateGroup {
    pub fn top_score(&self) -> f64 {
        self.candidates.iter().map(|c| c.score).fold(0.0, f64::max)
    }

    pub fn into_search_result(self) -> SearchResult {
        let statements = self
            .candidates
            .into_iter()
            .map(StatementResult::from)
            .collect();
        SearchResult::new(self.source, self.topic, statements)
    }
}

#[derive(Debug, Clone)]
pub struct ResultAggregator {
    limits: AggregationLimits,
}

impl ResultAggregator {
    pub fn new(limits: AggregationLimits) -> Self {
        Self { limits }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(AggregationLimits::from_config(config))
    }

    pub fn limits(&self) -> &AggregationLimits {
        &self.limits
    }

    /// Ordered groups, each sorted internally, with every configured limit applied.
    pub fn aggregate(&self, candidates: Vec<RetrievalCandidate>) -> Vec<CandidateGroup> {
        let received = candidates.len();
        let merged = self.merge(candidates);
        debug!(received, distinct = merged.len(), "candidates merged");
        self.aggregate_merged(merged)
    }

    /// One candidate per statement, in first-seen order.
    pub fn merge(&self, candidates: Vec<RetrievalCandidate>) -> Vec<RetrievalCandidate> {
        dedup_candidates(candidates)
    }

    /// Group, prune, and cap candidates that are already one per statement.
    /// Scores are final here: pruning and every cap see the same scores the
    /// output carries.
    pub fn aggregate_merged(&self, merged: Vec<RetrievalCandidate>) -> Vec<CandidateGroup> {
        let distinct = merged.len();
        let groups = group_by_topic_and_source(merged);
        let grouped = groups.len();
        let mut groups = prune_statements(
            groups,
            self.limits.pruning_factor,
            self.limits.pruning_threshold,
        );
        truncate_per_topic(&mut groups, self.limits.max_statements_per_topic);
        truncate_results(&mut groups, self.limits.max_search_results);
        cap_statements(&mut groups, self.limits.max_statements);

        debug!(
            distinct,
            grouped,
            results = groups.len(),
            statements = groups.iter().map(|g| g.candidates.len()).sum::<usize>(),
            "candidates aggregated"
        );
        groups
    }

    pub fn aggregate_results(&self, candidates: Vec<RetrievalCandidate>) -> Vec<SearchResult> {
        self.aggregate(candidates)
            .into_iter()
            .map(CandidateGroup::into_search_result)
            .collect()
    }
}

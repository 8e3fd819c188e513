use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::RetrieverKind;

/// How one strategy fared during a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyOutcome {
    pub retriever: RetrieverKind,
    /// Candidates contributed to aggregation.
    pub candidates: usize,
    /// Failure message; failed strategies contribute nothing.
    pub error: Option<String>,
}

impl StrategyOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-query execution summary used for logging and metrics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RetrievalReport {
    pub query: String,
    pub elapsed: Duration,
    pub entity_contexts: usize,
    pub strategies: Vec<StrategyOutcome>,
    pub merged_candidates: usize,
    pub results: usize,
    pub statements: usize,
    /// The reranker failed and prior scores were kept.
    pub reranker_fallback: bool,
    /// The request timed out and partial candidates were kept.
    pub partial: bool,
}

impl RetrievalReport {
    pub fn failed_strategies(&self) -> impl Iterator<Item = &StrategyOutcome> {
        self.strategies.iter().filter(|s| !s.succeeded())
    }
}

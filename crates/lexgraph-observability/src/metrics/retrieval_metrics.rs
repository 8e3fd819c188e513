//! Per-strategy outcomes, empty results, reranker fallbacks, timeouts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use lexgraph_core::config::RetrieverKind;
use lexgraph_core::models::RetrievalReport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyCounters {
    pub succeeded: u64,
    pub failed: u64,
    pub candidates: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalMetrics {
    pub total_queries: u64,
    pub empty_results: u64,
    pub reranker_fallbacks: u64,
    pub partial_results: u64,
    /// Failed queries: fatal store errors, cancellations, every strategy failing.
    pub failed_queries: u64,
    pub strategies: BTreeMap<RetrieverKind, StrategyCounters>,
    total_statements: u64,
}

impl RetrievalMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one successful query's report into the counters.
    pub fn record(&mut self, report: &RetrievalReport) {
        self.total_queries += 1;
        self.total_statements += report.statements as u64;
        if report.results == 0 {
            self.empty_results += 1;
        }
        if report.reranker_fallback {
            self.reranker_fallbacks += 1;
        }
        if report.partial {
            self.partial_results += 1;
        }
        for outcome in &report.strategies {
            let counters = self.strategies.entry(outcome.retriever).or_default();
            if outcome.succeeded() {
                counters.succeeded += 1;
                counters.candidates += outcome.candidates as u64;
            } else {
                counters.failed += 1;
            }
        }
    }

    /// A query that ended with an error instead of results.
    pub fn record_failure(&mut self) {
        self.total_queries += 1;
        self.failed_queries += 1;
    }

    pub fn strategy(&self, retriever: RetrieverKind) -> StrategyCounters {
        self.strategies.get(&retriever).copied().unwrap_or_default()
    }

    /// Mean statements returned per successful query.
    pub fn avg_statements(&self) -> f64 {
        let ok = self.total_queries - self.failed_queries;
        if ok == 0 {
            return 0.0;
        }
        self.total_statements as f64 / ok as f64
    }

    /// Failed share of strategy runs.
    pub fn strategy_failure_rate(&self, retriever: RetrieverKind) -> f64 {
        let c = self.strategy(retriever);
        let runs = c.succeeded + c.failed;
        if runs == 0 {
            return 0.0;
        }
        c.failed as f64 / runs as f64
    }
}

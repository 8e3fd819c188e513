//! Query performance logging: query text, latency, result and statement counts,
//! failed strategies.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use lexgraph_core::config::RetrieverKind;
use lexgraph_core::models::RetrievalReport;

/// A single query log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    pub latency: Duration,
    pub result_count: usize,
    pub statement_count: usize,
    pub failed_strategies: Vec<RetrieverKind>,
    pub timestamp_epoch_ms: i64,
}

impl QueryLogEntry {
    /// Create a new entry with the timestamp set to now.
    pub fn new(
        query: impl Into<String>,
        latency: Duration,
        result_count: usize,
        statement_count: usize,
        failed_strategies: Vec<RetrieverKind>,
    ) -> Self {
        Self {
            query: query.into(),
            latency,
            result_count,
            statement_count,
            failed_strategies,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn from_report(report: &RetrievalReport) -> Self {
        Self::new(
            report.query.clone(),
            report.elapsed,
            report.results,
            report.statements,
            report.failed_strategies().map(|s| s.retriever).collect(),
        )
    }
}

/// Bounded query log; the oldest entries are dropped first.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: Vec<QueryLogEntry>,
    max_entries: usize,
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryLog {
    pub fn new() -> Self {
        Self::with_capacity(lexgraph_core::config::defaults::DEFAULT_QUERY_LOG_CAPACITY)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Record a query.
    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            query = %entry.query,
            latency_ms = entry.latency.as_millis() as u64,
            result_count = entry.result_count,
            statement_count = entry.statement_count,
            failed = entry.failed_strategies.len(),
            "query logged"
        );

        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            self.entries.drain(..self.entries.len() - self.max_entries);
        }
    }

    pub fn entries(&self) -> &[QueryLogEntry] {
        &self.entries
    }

    /// Average latency across all logged queries.
    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at the given percentile (0.0 to 1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let idx = ((p.clamp(0.0, 1.0) * (latencies.len() - 1) as f64).round() as usize)
            .min(latencies.len() - 1);
        latencies[idx]
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

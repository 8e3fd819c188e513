//! [`ObservabilityEngine`]: owns the metrics and query log subsystems.

use lexgraph_core::config::ObservabilityConfig;
use lexgraph_core::errors::{LexGraphError, LexGraphResult};
use lexgraph_core::models::RetrievalReport;

use crate::metrics::MetricsCollector;
use crate::query_log::{QueryLog, QueryLogEntry};

#[derive(Debug, Default)]
pub struct ObservabilityEngine {
    pub metrics: MetricsCollector,
    pub query_log: QueryLog,
}

impl ObservabilityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ObservabilityConfig) -> Self {
        Self {
            metrics: MetricsCollector::new(),
            query_log: QueryLog::with_capacity(config.query_log_capacity),
        }
    }

    /// Record a completed query.
    pub fn record_retrieval(&mut self, report: &RetrievalReport) {
        self.metrics.retrieval.record(report);
        self.query_log.record(QueryLogEntry::from_report(report));
    }

    /// Record a query that returned an error.
    pub fn record_failure(&mut self) {
        self.metrics.retrieval.record_failure();
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Current metrics and query log summary as JSON.
    pub fn metrics_snapshot(&self) -> LexGraphResult<serde_json::Value> {
        let metrics_json =
            serde_json::to_value(&self.metrics).map_err(LexGraphError::SerializationError)?;
        Ok(serde_json::json!({
            "metrics": metrics_json,
            "query_log_count": self.query_log.count(),
            "query_avg_latency_ms": self.query_log.avg_latency().as_millis() as u64,
            "query_p95_latency_ms": self.query_log.latency_percentile(0.95).as_millis() as u64,
        }))
    }
}

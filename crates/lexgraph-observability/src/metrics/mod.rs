//! Central metrics registry.

pub mod retrieval_metrics;

pub use retrieval_metrics::{RetrievalMetrics, StrategyCounters};

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct MetricsCollector {
    pub retrieval: RetrievalMetrics,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all metrics (useful for testing or periodic rotation).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

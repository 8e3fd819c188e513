//! # lexgraph-observability
//!
//! Subscriber setup, span macros, and the in-process query log and metrics
//! fed from the retrieval engine's per-query reports.

pub mod engine;
pub mod metrics;
pub mod query_log;
pub mod tracing_setup;

pub use engine::ObservabilityEngine;
pub use metrics::{MetricsCollector, RetrievalMetrics};
pub use query_log::{QueryLog, QueryLogEntry};
pub use tracing_setup::init_tracing;

#[doc(hidden)]
pub use tracing;

use std::time::Duration;

use lexgraph_core::config::{ObservabilityConfig, RetrieverKind};
use lexgraph_core::models::{RetrievalReport, StrategyOutcome};
use lexgraph_observability::tracing_setup::build_filter;
use lexgraph_observability::tracing_setup::spans::names;
use lexgraph_observability::{ObservabilityEngine, QueryLog, QueryLogEntry, RetrievalMetrics};

fn report(query: &str, ms: u64, results: usize, failed: Option<RetrieverKind>) -> RetrievalReport {
    let mut strategies = vec![StrategyOutcome {
        retriever: RetrieverKind::ChunkBasedSearch,
        candidates: 12,
        error: None,
    }];
    if let Some(retriever) = failed {
        strategies.push(StrategyOutcome {
            retriever,
            candidates: 0,
            error: Some("graph query failed".into()),
        });
    }
    RetrievalReport {
        query: query.into(),
        elapsed: Duration::from_millis(ms),
        entity_contexts: 2,
        strategies,
        merged_candidates: 12,
        results,
        statements: results * 2,
        reranker_fallback: false,
        partial: false,
    }
}

#[test]
fn query_log_is_bounded() {
    let mut log = QueryLog::with_capacity(3);
    for i in 0..5 {
        log.record(QueryLogEntry::new(format!("q{i}"), Duration::from_millis(i), 1, 1, Vec::new()));
    }
    assert_eq!(log.count(), 3);
    assert_eq!(log.entries()[0].query, "q2");
}

#[test]
fn latency_statistics() {
    let mut log = QueryLog::new();
    assert_eq!(log.avg_latency(), Duration::ZERO);
    for ms in [10, 20, 30, 40] {
        log.record(QueryLogEntry::new("q", Duration::from_millis(ms), 1, 1, Vec::new()));
    }
    assert_eq!(log.avg_latency(), Duration::from_millis(25));
    assert_eq!(log.latency_percentile(0.0), Duration::from_millis(10));
    assert_eq!(log.latency_percentile(1.0), Duration::from_millis(40));
}

#[test]
fn log_entry_lists_failed_strategies() {
    let entry = QueryLogEntry::from_report(&report(
        "neptune",
        15,
        3,
        Some(RetrieverKind::EntityBasedSearch),
    ));
    assert_eq!(entry.failed_strategies, vec![RetrieverKind::EntityBasedSearch]);
    assert_eq!(entry.statement_count, 6);
    assert!(entry.timestamp_epoch_ms > 0);
}

#[test]
fn metrics_count_strategy_outcomes() {
    let mut metrics = RetrievalMetrics::new();
    metrics.record(&report("a", 5, 3, Some(RetrieverKind::EntityBasedSearch)));
    metrics.record(&report("b", 5, 0, None));
    metrics.record_failure();

    assert_eq!(metrics.total_queries, 3);
    assert_eq!(metrics.failed_queries, 1);
    assert_eq!(metrics.empty_results, 1);
    let chunk = metrics.strategy(RetrieverKind::ChunkBasedSearch);
    assert_eq!(chunk.succeeded, 2);
    assert_eq!(chunk.candidates, 24);
    assert_eq!(metrics.strategy_failure_rate(RetrieverKind::EntityBasedSearch), 1.0);
    assert_eq!(metrics.strategy_failure_rate(RetrieverKind::EntityNetworkSearch), 0.0);
    assert_eq!(metrics.avg_statements(), 3.0);
}

#[test]
fn engine_snapshot_includes_query_log() {
    let config = ObservabilityConfig {
        query_log_capacity: 2,
        ..ObservabilityConfig::default()
    };
    let mut engine = ObservabilityEngine::from_config(&config);
    for q in ["a", "b", "c"] {
        engine.record_retrieval(&report(q, 10, 1, None));
    }
    let snapshot = engine.metrics_snapshot().unwrap();
    assert_eq!(snapshot["query_log_count"], 2);
    assert_eq!(snapshot["metrics"]["retrieval"]["total_queries"], 3);
    assert_eq!(snapshot["query_avg_latency_ms"], 10);

    engine.reset_metrics();
    assert_eq!(engine.metrics.retrieval.total_queries, 0);
}

#[test]
fn env_override_wins_over_configured_level() {
    let filter = build_filter(Some("lexgraph_retrieval=debug"), "info").unwrap();
    assert_eq!(filter.to_string(), "lexgraph_retrieval=debug");
    let filter = build_filter(Some("  "), "warn").unwrap();
    assert_eq!(filter.to_string(), "warn");
    assert!(build_filter(None, "lexgraph=loud").is_err());
}

#[test]
fn span_names_are_namespaced() {
    for name in [names::RETRIEVAL, names::STRATEGY, names::GRAPH_QUERY, names::RERANK] {
        assert!(name.starts_with("lexgraph."));
    }
    let span = lexgraph_observability::strategy_span!(RetrieverKind::ChunkBasedSearch);
    let _entered = span.enter();
}

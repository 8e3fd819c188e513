//! Span definitions per operation: retrieval, strategy, graph query, rerank.

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($query:expr, $retrievers:expr) => {
        $crate::tracing::info_span!("lexgraph.retrieval", query = %$query, retrievers = ?$retrievers)
    };
}

/// Create a span for one strategy run.
#[macro_export]
macro_rules! strategy_span {
    ($retriever:expr) => {
        $crate::tracing::debug_span!("lexgraph.strategy", retriever = %$retriever)
    };
}

/// Create a two-phase graph query span.
#[macro_export]
macro_rules! graph_query_span {
    ($seed:expr, $intermediate_limit:expr, $result_limit:expr) => {
        $crate::tracing::debug_span!(
            "lexgraph.graph_query",
            seed = ?$seed,
            intermediate_limit = $intermediate_limit,
            result_limit = $result_limit
        )
    };
}

/// Create a rerank span.
#[macro_export]
macro_rules! rerank_span {
    ($reranker:expr, $texts:expr) => {
        $crate::tracing::debug_span!("lexgraph.rerank", reranker = ?$reranker, texts = $texts)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RETRIEVAL: &str = "lexgraph.retrieval";
    pub const STRATEGY: &str = "lexgraph.strategy";
    pub const GRAPH_QUERY: &str = "lexgraph.graph_query";
    pub const RERANK: &str = "lexgraph.rerank";
}

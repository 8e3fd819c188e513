use std::fmt;

use serde::{Deserialize, Serialize};

use super::defaults;
use super::limit::{optional, Limit};
use crate::constants::retrievers;
use crate::errors::{LexGraphError, LexGraphResult};

/// The retrieval strategies that can be enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RetrieverKind {
    ChunkBasedSearch,
    EntityBasedSearch,
    EntityNetworkSearch,
}

impl RetrieverKind {
    pub const ALL: [RetrieverKind; 3] = [
        RetrieverKind::ChunkBasedSearch,
        RetrieverKind::EntityBasedSearch,
        RetrieverKind::EntityNetworkSearch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RetrieverKind::ChunkBasedSearch => retrievers::CHUNK_BASED_SEARCH,
            RetrieverKind::EntityBasedSearch => retrievers::ENTITY_BASED_SEARCH,
            RetrieverKind::EntityNetworkSearch => retrievers::ENTITY_NETWORK_SEARCH,
        }
    }
}

impl fmt::Display for RetrieverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which reranking regime scores paths and final statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RerankerKind {
    Model,
    Tfidf,
    #[serde(rename = "none", alias = "disabled")]
    Disabled,
}

/// How entities are matched against query terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMethod {
    Id,
    Exact,
    Partial,
    FullText,
    Vector,
}

/// Whether discovery unions every method's hits or stops at the first non-empty one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMode {
    Union,
    FirstNonEmpty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryPolicy {
    /// Methods in precedence order.
    pub methods: Vec<DiscoveryMethod>,
    pub mode: DiscoveryMode,
}

impl Default for DiscoveryPolicy {
    fn default() -> Self {
        Self {
            methods: vec![
                DiscoveryMethod::Id,
                DiscoveryMethod::Exact,
                DiscoveryMethod::Partial,
                DiscoveryMethod::FullText,
                DiscoveryMethod::Vector,
            ],
            mode: DiscoveryMode::Union,
        }
    }
}

/// What to do with candidates already produced when a request times out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartialResultsPolicy {
    #[default]
    Discard,
    Keep,
}

/// Retrieval configuration. Immutable once handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Maximum number of search results (topic + source groups) returned.
    pub max_search_results: Limit,
    /// Maximum statements kept inside one search result.
    pub max_statements_per_topic: Limit,
    /// Maximum statements across all search results.
    pub max_statements: Limit,
    /// Drop statements scoring below `max_score * factor`.
    #[serde(with = "optional")]
    pub statement_pruning_factor: Option<f64>,
    /// Drop statements scoring below this absolute value.
    #[serde(with = "optional")]
    pub statement_pruning_threshold: Option<f64>,
    /// Enabled strategies.
    pub retrievers: Vec<RetrieverKind>,
    pub reranker: RerankerKind,
    /// Phase-1 statement cap for two-phase graph queries.
    pub intermediate_limit: usize,
    /// Phase-2 source group cap for two-phase graph queries.
    pub query_limit: usize,
    pub vss_top_k: usize,
    /// `None` disables the diversity pass.
    #[serde(with = "optional")]
    pub vss_diversity_factor: Option<usize>,
    /// Maximum in-flight store and model calls.
    pub num_workers: usize,
    pub ec_max_depth: usize,
    pub ec_max_contexts: usize,
    pub ec_max_score_factor: f64,
    pub ec_min_score_factor: f64,
    /// Maximum root entities kept after discovery.
    pub ec_num_entities: usize,
    pub reranking_batch_size: usize,
    #[serde(with = "optional")]
    pub request_timeout_ms: Option<u64>,
    pub partial_results: PartialResultsPolicy,
    /// Retrievers whose full outputs are logged at debug level.
    pub debug_results: Vec<RetrieverKind>,
    /// Kept last: serialized as a TOML sub-table.
    pub ec_discovery: DiscoveryPolicy,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_search_results: Limit::Bounded(defaults::DEFAULT_MAX_SEARCH_RESULTS),
            max_statements_per_topic: Limit::Bounded(defaults::DEFAULT_MAX_STATEMENTS_PER_TOPIC),
            max_statements: Limit::Bounded(defaults::DEFAULT_MAX_STATEMENTS),
            statement_pruning_factor: defaults::DEFAULT_STATEMENT_PRUNING_FACTOR,
            statement_pruning_threshold: defaults::DEFAULT_STATEMENT_PRUNING_THRESHOLD,
            retrievers: vec![
                RetrieverKind::ChunkBasedSearch,
                RetrieverKind::EntityNetworkSearch,
            ],
            reranker: RerankerKind::Tfidf,
            intermediate_limit: defaults::DEFAULT_INTERMEDIATE_LIMIT,
            query_limit: defaults::DEFAULT_QUERY_LIMIT,
            vss_top_k: defaults::DEFAULT_VSS_TOP_K,
            vss_diversity_factor: defaults::DEFAULT_VSS_DIVERSITY_FACTOR,
            num_workers: defaults::DEFAULT_NUM_WORKERS,
            ec_max_depth: defaults::DEFAULT_EC_MAX_DEPTH,
            ec_max_contexts: defaults::DEFAULT_EC_MAX_CONTEXTS,
            ec_max_score_factor: defaults::DEFAULT_EC_MAX_SCORE_FACTOR,
            ec_min_score_factor: defaults::DEFAULT_EC_MIN_SCORE_FACTOR,
            ec_num_entities: defaults::DEFAULT_EC_NUM_ENTITIES,
            reranking_batch_size: defaults::DEFAULT_RERANKING_BATCH_SIZE,
            request_timeout_ms: defaults::DEFAULT_REQUEST_TIMEOUT_MS,
            partial_results: PartialResultsPolicy::default(),
            debug_results: Vec::new(),
            ec_discovery: DiscoveryPolicy::default(),
        }
    }
}

impl RetrievalConfig {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> LexGraphResult<()> {
        let positive = [
            ("num_workers", self.num_workers),
            ("vss_top_k", self.vss_top_k),
            ("intermediate_limit", self.intermediate_limit),
            ("query_limit", self.query_limit),
            ("ec_max_depth", self.ec_max_depth),
            ("reranking_batch_size", self.reranking_batch_size),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(LexGraphError::invalid_config(field, "must be at least 1"));
            }
        }

        if self.vss_diversity_factor == Some(0) {
            return Err(LexGraphError::invalid_config(
                "vss_diversity_factor",
                "must be at least 1 or \"none\"",
            ));
        }

        if self.retrievers.is_empty() {
            return Err(LexGraphError::invalid_config(
                "retrievers",
                "at least one retriever must be enabled",
            ));
        }

        if self.ec_min_score_factor < 0.0 || self.ec_max_score_factor < 0.0 {
            return Err(LexGraphError::invalid_config(
                "ec_min_score_factor",
                "score factors must be non-negative",
            ));
        }

        if self.ec_min_score_factor > self.ec_max_score_factor {
            return Err(LexGraphError::invalid_config(
                "ec_min_score_factor",
                format!(
                    "{} exceeds ec_max_score_factor {}",
                    self.ec_min_score_factor, self.ec_max_score_factor
                ),
            ));
        }

        for (field, value) in [
            ("statement_pruning_factor", self.statement_pruning_factor),
            ("statement_pruning_threshold", self.statement_pruning_threshold),
        ] {
            if value.is_some_and(|v| v < 0.0 || v.is_nan()) {
                return Err(LexGraphError::invalid_config(field, "must be non-negative"));
            }
        }

        if self.ec_discovery.methods.is_empty() {
            return Err(LexGraphError::invalid_config(
                "ec_discovery.methods",
                "at least one discovery method is required",
            ));
        }

        Ok(())
    }
}

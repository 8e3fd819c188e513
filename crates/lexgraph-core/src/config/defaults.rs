// Single source of truth for all default values.

// --- Aggregation ---
pub const DEFAULT_MAX_SEARCH_RESULTS: usize = 5;
pub const DEFAULT_MAX_STATEMENTS_PER_TOPIC: usize = 10;
pub const DEFAULT_MAX_STATEMENTS: usize = 100;
pub const DEFAULT_STATEMENT_PRUNING_FACTOR: Option<f64> = Some(0.1);
pub const DEFAULT_STATEMENT_PRUNING_THRESHOLD: Option<f64> = None;

// --- Graph traversal ---
pub const DEFAULT_INTERMEDIATE_LIMIT: usize = 50;
pub const DEFAULT_QUERY_LIMIT: usize = 10;

// --- Vector search ---
pub const DEFAULT_VSS_TOP_K: usize = 10;
pub const DEFAULT_VSS_DIVERSITY_FACTOR: Option<usize> = Some(5);

// --- Concurrency ---
pub const DEFAULT_NUM_WORKERS: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_MS: Option<u64> = None;

// --- Entity network contexts ---
pub const DEFAULT_EC_MAX_DEPTH: usize = 2;
pub const DEFAULT_EC_MAX_CONTEXTS: usize = 2;
pub const DEFAULT_EC_MAX_SCORE_FACTOR: f64 = 3.0;
pub const DEFAULT_EC_MIN_SCORE_FACTOR: f64 = 0.25;
pub const DEFAULT_EC_NUM_ENTITIES: usize = 10;

// --- Reranking ---
pub const DEFAULT_RERANKING_BATCH_SIZE: usize = 32;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 10_000;

/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("retriever {retriever} failed: {reason}")]
    StrategyFailed { retriever: String, reason: String },

    #[error("all {attempted} retrievers failed")]
    AllStrategiesFailed { attempted: usize },

    #[error("retrieval cancelled after {elapsed_ms} ms")]
    Cancelled { elapsed_ms: u64 },

    #[error("entity context build failed: {reason}")]
    ContextBuildFailed { reason: String },
}

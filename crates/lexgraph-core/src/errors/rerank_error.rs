/// Reranker errors. Never fatal: callers fall back to prior scores.
#[derive(Debug, thiserror::Error)]
pub enum RerankError {
    #[error("rerank model call failed: {reason}")]
    ModelFailed { reason: String },

    #[error("rerank model returned {actual} scores for {expected} inputs")]
    ScoreCountMismatch { expected: usize, actual: usize },

    #[error("model reranker selected but no model was provided")]
    ModelMissing,
}

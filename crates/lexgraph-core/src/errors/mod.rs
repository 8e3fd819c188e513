mod rerank_error;
mod retrieval_error;
mod store_error;

pub use rerank_error::RerankError;
pub use retrieval_error::RetrievalError;
pub use store_error::{StoreError, StoreKind};

/// Top-level error for every lexgraph operation.
#[derive(Debug, thiserror::Error)]
pub enum LexGraphError {
    #[error("store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("rerank error: {0}")]
    RerankError(#[from] RerankError),

    #[error("config error: {reason}")]
    ConfigError { reason: String },

    #[error("invalid config value for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl LexGraphError {
    /// Fatal errors abort the whole query instead of degrading one strategy.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LexGraphError::StoreError(StoreError::Unavailable { .. })
                | LexGraphError::ConfigError { .. }
                | LexGraphError::InvalidConfig { .. }
        )
    }

    /// The store a `StoreUnavailable` failure originated from, if any.
    pub fn unavailable_store(&self) -> Option<StoreKind> {
        match self {
            LexGraphError::StoreError(StoreError::Unavailable { store, .. }) => Some(*store),
            _ => None,
        }
    }

    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        LexGraphError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type LexGraphResult<T> = Result<T, LexGraphError>;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which backend a store error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Graph,
    Vector,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Graph => f.write_str("graph"),
            StoreKind::Vector => f.write_str("vector"),
        }
    }
}

/// Graph and vector store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{store} store unavailable: {reason}")]
    Unavailable { store: StoreKind, reason: String },

    #[error("{store} store query failed: {reason}")]
    QueryFailed { store: StoreKind, reason: String },

    #[error("{store} store has no node with id {id}")]
    NotFound { store: StoreKind, id: String },
}

impl StoreError {
    pub fn store(&self) -> StoreKind {
        match self {
            StoreError::Unavailable { store, .. }
            | StoreError::QueryFailed { store, .. }
            | StoreError::NotFound { store, .. } => *store,
        }
    }
}

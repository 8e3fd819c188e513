use serde::{Deserialize, Serialize};

/// Opaque metadata predicate. The retrieval core passes it to stores unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataFilter(pub serde_json::Value);

impl MetadataFilter {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

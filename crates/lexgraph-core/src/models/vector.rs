use serde::{Deserialize, Serialize};

/// Which vector index to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorIndex {
    Chunk,
    Statement,
}

/// Query input for a vector search. Stores embed text themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorQuery {
    Text(String),
    Embedding(Vec<f32>),
}

impl VectorQuery {
    pub fn text(text: impl Into<String>) -> Self {
        VectorQuery::Text(text.into())
    }
}

/// The node a vector match points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MatchedNode {
    Chunk {
        #[serde(rename = "chunkId")]
        chunk_id: String,
    },
    Statement {
        #[serde(rename = "statementId")]
        statement_id: String,
    },
}

impl MatchedNode {
    pub fn id(&self) -> &str {
        match self {
            MatchedNode::Chunk { chunk_id } => chunk_id,
            MatchedNode::Statement { statement_id } => statement_id,
        }
    }
}

/// One nearest-neighbor hit, in similarity order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatch {
    pub node: MatchedNode,
    /// Similarity score, higher is closer.
    pub score: f64,
    #[serde(rename = "sourceId")]
    pub source_id: String,
}

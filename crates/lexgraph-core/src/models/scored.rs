use serde::{Deserialize, Serialize};

use super::graph::{Entity, Source, Statement};

/// An entity with its degree centrality and reranking score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntity {
    pub entity: Entity,
    /// Degree centrality.
    pub score: f64,
    #[serde(default)]
    pub reranking_score: f64,
}

impl ScoredEntity {
    pub fn new(entity: Entity, score: f64) -> Self {
        Self {
            entity,
            score,
            reranking_score: 0.0,
        }
    }
}

/// A statement with its graph relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredStatement {
    pub statement: Statement,
    pub score: f64,
}

/// Phase-2 output: statements reached within one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceStatements {
    pub source: Source,
    pub statements: Vec<ScoredStatement>,
}

impl SourceStatements {
    pub fn top_score(&self) -> f64 {
        self.statements
            .iter()
            .map(|s| s.score)
            .fold(0.0, f64::max)
    }
}

use serde::{Deserialize, Serialize};

use super::graph::{Source, Statement, TopicRef};
use crate::config::RetrieverKind;

/// A statement proposed by one or more strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalCandidate {
    pub statement: Statement,
    pub source: Source,
    /// Non-negative relevance score.
    pub score: f64,
    /// Contributing strategies, sorted and distinct.
    pub retrievers: Vec<RetrieverKind>,
}

impl RetrievalCandidate {
    pub fn new(statement: Statement, source: Source, score: f64, retriever: RetrieverKind) -> Self {
        Self {
            statement,
            source,
            score: score.max(0.0),
            retrievers: vec![retriever],
        }
    }

    pub fn statement_id(&self) -> &str {
        &self.statement.statement_id
    }

    pub fn topic(&self) -> &TopicRef {
        &self.statement.topic
    }

    /// Grouping key: (topic id, source id).
    pub fn group_key(&self) -> (&str, &str) {
        (
            self.statement.topic.topic_id.as_str(),
            self.source.source_id.as_str(),
        )
    }

    /// Fold another sighting of the same statement into this one.
    pub fn merge(&mut self, other: RetrievalCandidate) {
        if other.score > self.score {
            self.score = other.score;
        }
        for retriever in other.retrievers {
            if let Err(pos) = self.retrievers.binary_search(&retriever) {
                self.retrievers.insert(pos, retriever);
            }
        }
    }
}

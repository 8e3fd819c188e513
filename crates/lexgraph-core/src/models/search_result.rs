//! The externally visible output shape.

use serde::{Deserialize, Serialize};

use super::candidate::RetrievalCandidate;
use super::entity_context::EntityContexts;
use super::graph::{Source, TopicRef};
use crate::config::RetrieverKind;

/// One statement as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementResult {
    #[serde(rename = "statementId")]
    pub statement_id: String,
    pub statement: String,
    pub facts: Vec<String>,
    #[serde(rename = "chunkId")]
    pub chunk_id: Option<String>,
    pub score: f64,
    pub statement_str: String,
    pub retrievers: Vec<RetrieverKind>,
}

impl From<RetrievalCandidate> for StatementResult {
    fn from(c: RetrievalCandidate) -> Self {
        let statement_str = c.statement.statement_str();
        Self {
            facts: c.statement.fact_values(),
            statement_id: c.statement.statement_id,
            statement: c.statement.value,
            chunk_id: c.statement.chunk_id,
            score: c.score,
            statement_str,
            retrievers: c.retrievers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicResult {
    pub topic: String,
    #[serde(rename = "topicId")]
    pub topic_id: String,
    pub statements: Vec<StatementResult>,
}

/// One topic within one source, with its ordered statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub source: Source,
    pub topics: Vec<TopicResult>,
}

impl SearchResult {
    pub fn new(source: Source, topic: TopicRef, statements: Vec<StatementResult>) -> Self {
        Self {
            source,
            topics: vec![TopicResult {
                topic: topic.value,
                topic_id: topic.topic_id,
                statements,
            }],
        }
    }

    pub fn statements(&self) -> impl Iterator<Item = &StatementResult> {
        self.topics.iter().flat_map(|t| t.statements.iter())
    }

    pub fn statement_count(&self) -> usize {
        self.topics.iter().map(|t| t.statements.len()).sum()
    }

    pub fn top_score(&self) -> f64 {
        self.statements().map(|s| s.score).fold(0.0, f64::max)
    }
}

/// Everything handed to the downstream generator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RetrievalOutput {
    pub results: Vec<SearchResult>,
    pub entity_contexts: EntityContexts,
}

impl RetrievalOutput {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn statement_count(&self) -> usize {
        self.results.iter().map(SearchResult::statement_count).sum()
    }

    pub fn to_json(&self) -> crate::errors::LexGraphResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

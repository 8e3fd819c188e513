//! Lexical graph nodes. Produced upstream by ingestion; read-only here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "sourceId")]
    pub source_id: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Source {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            metadata: BTreeMap::new(),
        }
    }
}

/// Reference to the topic a statement belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TopicRef {
    #[serde(rename = "topicId")]
    pub topic_id: String,
    #[serde(rename = "topic")]
    pub value: String,
}

/// A named, classified graph node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "entityId")]
    pub entity_id: String,
    pub value: String,
    pub classification: String,
}

impl Entity {
    /// Token used when reranking entities: `"value (classification)"`, lower-cased.
    pub fn rerank_token(&self) -> String {
        format!(
            "{} ({})",
            self.value.to_lowercase(),
            self.classification.to_lowercase()
        )
    }
}

/// A typed relation between two entities, or an entity and a literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    #[serde(rename = "factId")]
    pub fact_id: String,
    /// Rendered text, e.g. "Neptune Analytics SUPPORTS openCypher".
    pub value: String,
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    #[serde(rename = "objectId", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
}

impl Fact {
    /// Entity ids this fact touches.
    pub fn entity_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.subject_id.as_str()).chain(self.object_id.as_deref())
    }
}

/// A standalone proposition belonging to one topic within one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(rename = "statementId")]
    pub statement_id: String,
    pub value: String,
    pub topic: TopicRef,
    #[serde(rename = "sourceId")]
    pub source_id: String,
    #[serde(rename = "chunkId", default, skip_serializing_if = "Option::is_none")]
    pub chunk_id: Option<String>,
    #[serde(default)]
    pub facts: Vec<Fact>,
}

impl Statement {
    /// Statement text followed by its supporting facts, one per line.
    pub fn statement_str(&self) -> String {
        if self.facts.is_empty() {
            return self.value.clone();
        }
        let mut s = self.value.clone();
        for fact in &self.facts {
            s.push_str("\n  ");
            s.push_str(&fact.value);
        }
        s
    }

    pub fn fact_values(&self) -> Vec<String> {
        self.facts.iter().map(|f| f.value.clone()).collect()
    }
}

/// Smallest retrievable unit of a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(rename = "chunkId")]
    pub chunk_id: String,
    #[serde(rename = "sourceId")]
    pub source_id: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

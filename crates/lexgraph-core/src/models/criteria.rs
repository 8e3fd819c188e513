//! Inputs to graph store lookups.

use serde::{Deserialize, Serialize};

/// How to find entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "values", rename_all = "snake_case")]
pub enum EntityCriteria {
    /// Exact entity ids.
    Ids(Vec<String>),
    /// Case-insensitive whole-value match.
    Exact(Vec<String>),
    /// Case-insensitive substring match.
    Partial(Vec<String>),
    /// Term search over entity values.
    FullText(String),
    /// Entities mentioned by the statements of these chunks.
    Chunks(Vec<String>),
}

impl EntityCriteria {
    pub fn is_empty(&self) -> bool {
        match self {
            EntityCriteria::Ids(v)
            | EntityCriteria::Exact(v)
            | EntityCriteria::Partial(v)
            | EntityCriteria::Chunks(v) => v.is_empty(),
            EntityCriteria::FullText(s) => s.trim().is_empty(),
        }
    }
}

/// Seed for phase 1 of a two-phase graph query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "values", rename_all = "snake_case")]
pub enum StatementSeed {
    /// Statements supported by facts touching these entities.
    Entities(Vec<String>),
    /// Statements of the topics mentioned in these chunks.
    Chunks(Vec<String>),
    /// Statements by id.
    Statements(Vec<String>),
    /// Term search over statement text.
    FullText(String),
}

impl StatementSeed {
    pub fn is_empty(&self) -> bool {
        match self {
            StatementSeed::Entities(v) | StatementSeed::Chunks(v) | StatementSeed::Statements(v) => {
                v.is_empty()
            }
            StatementSeed::FullText(s) => s.trim().is_empty(),
        }
    }
}

/// Neighbours of one entity reached through shared facts, strongest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityNeighbours {
    #[serde(rename = "entityId")]
    pub entity_id: String,
    pub neighbours: Vec<String>,
}

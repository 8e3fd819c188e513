//! Serialized lexical graph snapshot.

use std::collections::HashMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use lexgraph_core::errors::LexGraphResult;
use lexgraph_core::models::{Chunk, Entity, Source, Statement};

/// Everything ingestion produced for a set of sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphDocument {
    pub sources: Vec<Source>,
    pub entities: Vec<Entity>,
    pub chunks: Vec<Chunk>,
    pub statements: Vec<Statement>,
}

impl GraphDocument {
    pub fn from_json(json: &str) -> LexGraphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> LexGraphResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json(&self) -> LexGraphResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sources keyed by id. Sources referenced but not listed get empty metadata.
    pub fn source_map(&self) -> HashMap<String, Source> {
        let mut map: HashMap<String, Source> = self
            .sources
            .iter()
            .map(|s| (s.source_id.clone(), s.clone()))
            .collect();
        let referenced = self
            .statements
            .iter()
            .map(|s| &s.source_id)
            .chain(self.chunks.iter().map(|c| &c.source_id));
        for id in referenced {
            map.entry(id.clone())
                .or_insert_with(|| Source::new(id.clone()));
        }
        map
    }
}

//! Indexed in-memory lexical graph.

mod network;

pub use network::{EntityGraph, EntityLink, EntityNetwork};

use std::collections::{BTreeSet, HashMap, HashSet};

use lexgraph_core::models::{Chunk, Entity, Source, Statement};

use crate::document::GraphDocument;

/// Lower-cased alphanumeric terms of at least two characters.
pub fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| s.chars().count() >= 2)
        .map(|s| s.to_lowercase())
}

/// Number of distinct query terms present in `text`.
pub fn term_overlap(query_terms: &HashSet<String>, text: &str) -> usize {
    let text_terms: HashSet<String> = terms(text).collect();
    query_terms.intersection(&text_terms).count()
}

/// Lexical graph with the lookups the graph store needs.
#[derive(Debug, Default)]
pub struct LexicalGraph {
    pub entities: HashMap<String, Entity>,
    /// Entity ids in snapshot order, for deterministic scans.
    pub entity_order: Vec<String>,
    pub network: EntityNetwork,
    /// Distinct facts each entity participates in.
    pub fact_degree: HashMap<String, usize>,
    pub statements: Vec<Statement>,
    pub statement_index: HashMap<String, usize>,
    pub by_entity: HashMap<String, Vec<usize>>,
    pub by_topic: HashMap<String, Vec<usize>>,
    pub by_chunk: HashMap<String, Vec<usize>>,
    pub by_fact: HashMap<String, Vec<usize>>,
    pub sources: HashMap<String, Source>,
    pub chunks: HashMap<String, Chunk>,
}

impl LexicalGraph {
    pub fn from_document(doc: &GraphDocument) -> Self {
        let mut graph = LexicalGraph {
            sources: doc.source_map(),
            ..Default::default()
        };

        for entity in &doc.entities {
            if graph
                .entities
                .insert(entity.entity_id.clone(), entity.clone())
                .is_none()
            {
                graph.entity_order.push(entity.entity_id.clone());
            }
        }
        for chunk in &doc.chunks {
            graph.chunks.insert(chunk.chunk_id.clone(), chunk.clone());
        }

        let mut entity_facts: HashMap<String, HashSet<String>> = HashMap::new();
        for statement in &doc.statements {
            if graph.statement_index.contains_key(&statement.statement_id) {
                continue;
            }
            let idx = graph.statements.len();
            graph
                .statement_index
                .insert(statement.statement_id.clone(), idx);
            graph
                .by_topic
                .entry(statement.topic.topic_id.clone())
                .or_default()
                .push(idx);
            if let Some(chunk_id) = &statement.chunk_id {
                graph.by_chunk.entry(chunk_id.clone()).or_default().push(idx);
            }

            let mut touched = BTreeSet::new();
            for fact in &statement.facts {
                graph
                    .by_fact
                    .entry(fact.fact_id.clone())
                    .or_default()
                    .push(idx);
                for entity_id in fact.entity_ids() {
                    touched.insert(entity_id.to_string());
                    entity_facts
                        .entry(entity_id.to_string())
                        .or_default()
                        .insert(fact.fact_id.clone());
                }
                if let Some(object_id) = &fact.object_id {
                    graph
                        .network
                        .link(&fact.subject_id, object_id, &fact.fact_id);
                }
            }
            for entity_id in touched {
                graph.by_entity.entry(entity_id).or_default().push(idx);
            }
            graph.statements.push(statement.clone());
        }

        graph.fact_degree = entity_facts
            .into_iter()
            .map(|(id, facts)| (id, facts.len()))
            .collect();
        graph
    }

    pub fn degree(&self, entity_id: &str) -> usize {
        self.fact_degree.get(entity_id).copied().unwrap_or(0)
    }

    pub fn statement(&self, idx: usize) -> &Statement {
        &self.statements[idx]
    }

    pub fn source_of(&self, statement: &Statement) -> Source {
        self.sources
            .get(&statement.source_id)
            .cloned()
            .unwrap_or_else(|| Source::new(statement.source_id.clone()))
    }

    /// Entities touched by the facts of the statements with the given indices.
    pub fn entities_of(&self, statement_indices: impl IntoIterator<Item = usize>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for idx in statement_indices {
            for fact in &self.statements[idx].facts {
                for id in fact.entity_ids() {
                    if self.entities.contains_key(id) && seen.insert(id.to_string()) {
                        out.push(id.to_string());
                    }
                }
            }
        }
        out
    }
}

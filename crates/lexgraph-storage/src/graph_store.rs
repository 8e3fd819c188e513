//! `IGraphStore` over an in-memory [`LexicalGraph`].

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use lexgraph_core::errors::{LexGraphResult, StoreError, StoreKind};
use lexgraph_core::models::{
    Entity, EntityCriteria, EntityNeighbours, MetadataFilter, ScoredStatement, SourceStatements,
    Statement, StatementSeed,
};
use lexgraph_core::traits::IGraphStore;

use crate::document::GraphDocument;
use crate::filter::source_matches;
use crate::graph::{term_overlap, terms, LexicalGraph};

pub struct MemoryGraphStore {
    graph: LexicalGraph,
    available: AtomicBool,
    latency: Option<Duration>,
}

impl MemoryGraphStore {
    pub fn new(graph: LexicalGraph) -> Self {
        Self {
            graph,
            available: AtomicBool::new(true),
            latency: None,
        }
    }

    pub fn from_document(doc: &GraphDocument) -> Self {
        let graph = LexicalGraph::from_document(doc);
        debug!(
            entities = graph.entities.len(),
            statements = graph.statements.len(),
            links = graph.network.edge_count(),
            "graph store loaded"
        );
        Self::new(graph)
    }

    /// Delay every call by `latency`, emulating a remote backend.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Toggle reachability. An unavailable store fails every call with `Unavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, AtomicOrdering::SeqCst);
    }

    pub fn graph(&self) -> &LexicalGraph {
        &self.graph
    }

    async fn check(&self) -> LexGraphResult<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if !self.available.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Unavailable {
                store: StoreKind::Graph,
                reason: "in-memory graph store marked unavailable".into(),
            }
            .into());
        }
        Ok(())
    }

    /// Order entity ids by (score desc, centrality desc, id) and resolve them.
    fn rank_entities(&self, mut scored: Vec<(String, usize)>, limit: usize) -> Vec<Entity> {
        scored.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| self.graph.degree(&b.0).cmp(&self.graph.degree(&a.0)))
                .then_with(|| a.0.cmp(&b.0))
        });
        scored
            .into_iter()
            .filter_map(|(id, _)| self.graph.entities.get(&id).cloned())
            .take(limit)
            .collect()
    }

    fn match_entities(&self, criteria: &EntityCriteria, limit: usize) -> Vec<Entity> {
        let g = &self.graph;
        match criteria {
            EntityCriteria::Ids(ids) => {
                let mut seen = HashSet::new();
                ids.iter()
                    .filter(|id| seen.insert(id.as_str()))
                    .filter_map(|id| g.entities.get(id).cloned())
                    .take(limit)
                    .collect()
            }
            EntityCriteria::Exact(values) => {
                let wanted: HashSet<String> = values.iter().map(|v| v.to_lowercase()).collect();
                let hits = g
                    .entity_order
                    .iter()
                    .filter(|id| wanted.contains(&g.entities[*id].value.to_lowercase()))
                    .map(|id| (id.clone(), 1))
                    .collect();
                self.rank_entities(hits, limit)
            }
            EntityCriteria::Partial(values) => {
                let wanted: Vec<String> = values
                    .iter()
                    .map(|v| v.to_lowercase())
                    .filter(|v| !v.is_empty())
                    .collect();
                let hits = g
                    .entity_order
                    .iter()
                    .filter_map(|id| {
                        let value = g.entities[id].value.to_lowercase();
                        let n = wanted.iter().filter(|w| value.contains(w.as_str())).count();
                        (n > 0).then(|| (id.clone(), n))
                    })
                    .collect();
                self.rank_entities(hits, limit)
            }
            EntityCriteria::FullText(text) => {
                let query: HashSet<String> = terms(text).collect();
                let hits = g
                    .entity_order
                    .iter()
                    .filter_map(|id| {
                        let n = term_overlap(&query, &g.entities[id].value);
                        (n > 0).then(|| (id.clone(), n))
                    })
                    .collect();
                self.rank_entities(hits, limit)
            }
            EntityCriteria::Chunks(chunk_ids) => {
                let indices = chunk_ids
                    .iter()
                    .filter_map(|c| g.by_chunk.get(c))
                    .flatten()
                    .copied();
                let hits = g.entities_of(indices).into_iter().map(|id| (id, 1)).collect();
                self.rank_entities(hits, limit)
            }
        }
    }

    /// Phase 1 hits as (statement index, match strength), unsorted.
    fn seed_statements(&self, seed: &StatementSeed) -> Vec<(usize, usize)> {
        let g = &self.graph;
        let mut strength: BTreeMap<usize, usize> = BTreeMap::new();
        match seed {
            StatementSeed::Entities(ids) => {
                for id in ids {
                    for &idx in g.by_entity.get(id).into_iter().flatten() {
                        *strength.entry(idx).or_default() += 1;
                    }
                }
            }
            StatementSeed::Chunks(chunk_ids) => {
                // Chunk membership reaches the whole topic, not just the chunk's own statements.
                let mut topics = Vec::new();
                for chunk_id in chunk_ids {
                    for &idx in g.by_chunk.get(chunk_id).into_iter().flatten() {
                        *strength.entry(idx).or_default() += 1;
                        let topic = &g.statement(idx).topic.topic_id;
                        if !topics.contains(topic) {
                            topics.push(topic.clone());
                        }
                    }
                }
                for topic in &topics {
                    for &idx in g.by_topic.get(topic).into_iter().flatten() {
                        strength.entry(idx).or_default();
                    }
                }
            }
            StatementSeed::Statements(ids) => {
                for id in ids {
                    if let Some(&idx) = g.statement_index.get(id) {
                        *strength.entry(idx).or_default() += 1;
                    }
                }
            }
            StatementSeed::FullText(text) => {
                let query: HashSet<String> = terms(text).collect();
                for (idx, statement) in g.statements.iter().enumerate() {
                    let n = term_overlap(&query, &statement.value);
                    if n > 0 {
                        strength.insert(idx, n);
                    }
                }
            }
        }
        strength.into_iter().collect()
    }
}

#[async_trait]
impl IGraphStore for MemoryGraphStore {
    async fn find_entities(
        &self,
        criteria: &EntityCriteria,
        limit: usize,
    ) -> LexGraphResult<Vec<Entity>> {
        self.check().await?;
        if criteria.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.match_entities(criteria, limit))
    }

    async fn degree_centrality(&self, entity_id: &str) -> LexGraphResult<f64> {
        self.check().await?;
        if !self.graph.entities.contains_key(entity_id) {
            return Err(StoreError::NotFound {
                store: StoreKind::Graph,
                id: entity_id.to_string(),
            }
            .into());
        }
        Ok(self.graph.degree(entity_id) as f64)
    }

    async fn degree_centralities(
        &self,
        entity_ids: &[String],
    ) -> LexGraphResult<HashMap<String, f64>> {
        self.check().await?;
        Ok(entity_ids
            .iter()
            .filter(|id| self.graph.entities.contains_key(*id))
            .map(|id| (id.clone(), self.graph.degree(id) as f64))
            .collect())
    }

    async fn entity_neighbours(
        &self,
        entity_ids: &[String],
        exclude: &HashSet<String>,
        limit: usize,
    ) -> LexGraphResult<Vec<EntityNeighbours>> {
        self.check().await?;
        Ok(entity_ids
            .iter()
            .map(|id| EntityNeighbours {
                entity_id: id.clone(),
                neighbours: self
                    .graph
                    .network
                    .neighbours(id, exclude, limit)
                    .into_iter()
                    .filter(|n| self.graph.entities.contains_key(n))
                    .collect(),
            })
            .collect())
    }

    async fn query_statements(
        &self,
        seed: &StatementSeed,
        intermediate_limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> LexGraphResult<Vec<Statement>> {
        self.check().await?;
        if seed.is_empty() {
            return Ok(Vec::new());
        }
        let mut hits = self.seed_statements(seed);
        hits.retain(|(idx, _)| {
            let statement = self.graph.statement(*idx);
            source_matches(filter, &self.graph.source_of(statement))
        });
        hits.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        hits.truncate(intermediate_limit);
        debug!(hits = hits.len(), "phase-1 statements identified");
        Ok(hits
            .into_iter()
            .map(|(idx, _)| self.graph.statement(idx).clone())
            .collect())
    }

    async fn expand_connections(
        &self,
        statements: &[Statement],
        result_limit: usize,
    ) -> LexGraphResult<Vec<SourceStatements>> {
        self.check().await?;
        let g = &self.graph;

        // Each seed votes once for itself, once for every same-topic statement,
        // and once per shared fact for every statement it shares facts with.
        let mut votes: HashMap<usize, usize> = HashMap::new();
        for seed in statements {
            let Some(&seed_idx) = g.statement_index.get(&seed.statement_id) else {
                continue;
            };
            *votes.entry(seed_idx).or_default() += 1;
            let seed_statement = g.statement(seed_idx);
            for &idx in g
                .by_topic
                .get(&seed_statement.topic.topic_id)
                .into_iter()
                .flatten()
            {
                if idx != seed_idx {
                    *votes.entry(idx).or_default() += 1;
                }
            }
            for fact in &seed_statement.facts {
                for &idx in g.by_fact.get(&fact.fact_id).into_iter().flatten() {
                    if idx != seed_idx {
                        *votes.entry(idx).or_default() += 1;
                    }
                }
            }
        }

        let mut groups: BTreeMap<String, Vec<(usize, usize)>> = BTreeMap::new();
        for (idx, count) in votes {
            groups
                .entry(g.statement(idx).source_id.clone())
                .or_default()
                .push((idx, count));
        }

        let mut out: Vec<SourceStatements> = groups
            .into_iter()
            .map(|(source_id, mut members)| {
                members.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                let source = g
                    .sources
                    .get(&source_id)
                    .cloned()
                    .unwrap_or_else(|| lexgraph_core::models::Source::new(source_id));
                SourceStatements {
                    source,
                    statements: members
                        .into_iter()
                        .map(|(idx, count)| ScoredStatement {
                            statement: g.statement(idx).clone(),
                            score: count as f64,
                        })
                        .collect(),
                }
            })
            .collect();
        out.sort_by(|a, b| {
            b.top_score()
                .partial_cmp(&a.top_score())
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.source.source_id.cmp(&b.source.source_id))
        });
        out.truncate(result_limit);
        Ok(out)
    }

    fn name(&self) -> &str {
        "memory-graph"
    }
}

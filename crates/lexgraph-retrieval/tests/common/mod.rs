#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use lexgraph_core::config::RetrievalConfig;
use lexgraph_core::errors::{LexGraphResult, StoreError, StoreKind};
use lexgraph_core::models::{
    Entity, EntityCriteria, EntityNeighbours, MetadataFilter, SourceStatements, Statement,
    StatementSeed,
};
use lexgraph_core::traits::IGraphStore;
use lexgraph_retrieval::TraversalRetriever;
use lexgraph_storage::{GraphDocument, HashingEmbedder, MemoryGraphStore, MemoryVectorStore};
use test_fixtures::{load_fixture, NEPTUNE_GRAPH};

pub fn document() -> GraphDocument {
    load_fixture(NEPTUNE_GRAPH)
}

pub fn graph_store() -> Arc<MemoryGraphStore> {
    Arc::new(MemoryGraphStore::from_document(&document()))
}

pub fn vector_store() -> Arc<MemoryVectorStore> {
    Arc::new(
        MemoryVectorStore::from_document(&document(), Arc::new(HashingEmbedder::default()))
            .unwrap(),
    )
}

pub fn retriever(config: RetrievalConfig) -> TraversalRetriever {
    TraversalRetriever::new(config, graph_store(), vector_store(), None).unwrap()
}

/// Which graph calls a [`FaultyGraph`] breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Phase-1 queries seeded by entities fail.
    EntitySeeds,
    /// Every phase-1 query fails.
    AllStatementQueries,
}

/// Delegates to the in-memory store, failing selected calls with a
/// non-fatal query error.
pub struct FaultyGraph {
    inner: Arc<MemoryGraphStore>,
    fault: Fault,
}

impl FaultyGraph {
    pub fn new(fault: Fault) -> Self {
        Self {
            inner: graph_store(),
            fault,
        }
    }

    fn broken(&self, seed: &StatementSeed) -> bool {
        match self.fault {
            Fault::EntitySeeds => matches!(seed, StatementSeed::Entities(_)),
            Fault::AllStatementQueries => true,
        }
    }
}

#[async_trait]
impl IGraphStore for FaultyGraph {
    async fn find_entities(
        &self,
        criteria: &EntityCriteria,
        limit: usize,
    ) -> LexGraphResult<Vec<Entity>> {
        self.inner.find_entities(criteria, limit).await
    }

    async fn degree_centrality(&self, entity_id: &str) -> LexGraphResult<f64> {
        self.inner.degree_centrality(entity_id).await
    }

    async fn degree_centralities(
        &self,
        entity_ids: &[String],
    ) -> LexGraphResult<HashMap<String, f64>> {
        self.inner.degree_centralities(entity_ids).await
    }

    async fn entity_neighbours(
        &self,
        entity_ids: &[String],
        exclude: &HashSet<String>,
        limit: usize,
    ) -> LexGraphResult<Vec<EntityNeighbours>> {
        self.inner.entity_neighbours(entity_ids, exclude, limit).await
    }

    async fn query_statements(
        &self,
        seed: &StatementSeed,
        intermediate_limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> LexGraphResult<Vec<Statement>> {
        if self.broken(seed) {
            return Err(StoreError::QueryFailed {
                store: StoreKind::Graph,
                reason: "injected phase-1 failure".into(),
            }
            .into());
        }
        self.inner
            .query_statements(seed, intermediate_limit, filter)
            .await
    }

    async fn expand_connections(
        &self,
        statements: &[Statement],
        result_limit: usize,
    ) -> LexGraphResult<Vec<SourceStatements>> {
        self.inner.expand_connections(statements, result_limit).await
    }

    fn name(&self) -> &str {
        "faulty"
    }
}

/// Tracks the highest number of concurrent graph calls.
pub struct CountingGraph {
    inner: Arc<MemoryGraphStore>,
    delay: Duration,
    in_flight: AtomicUsize,
    pub peak: AtomicUsize,
    pub calls: AtomicUsize,
}

impl CountingGraph {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: graph_store(),
            delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    async fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
    }

    fn exit(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl IGraphStore for CountingGraph {
    async fn find_entities(
        &self,
        criteria: &EntityCriteria,
        limit: usize,
    ) -> LexGraphResult<Vec<Entity>> {
        self.enter().await;
        let out = self.inner.find_entities(criteria, limit).await;
        self.exit();
        out
    }

    async fn degree_centrality(&self, entity_id: &str) -> LexGraphResult<f64> {
        self.enter().await;
        let out = self.inner.degree_centrality(entity_id).await;
        self.exit();
        out
    }

    async fn degree_centralities(
        &self,
        entity_ids: &[String],
    ) -> LexGraphResult<HashMap<String, f64>> {
        self.enter().await;
        let out = self.inner.degree_centralities(entity_ids).await;
        self.exit();
        out
    }

    async fn entity_neighbours(
        &self,
        entity_ids: &[String],
        exclude: &HashSet<String>,
        limit: usize,
    ) -> LexGraphResult<Vec<EntityNeighbours>> {
        self.enter().await;
        let out = self.inner.entity_neighbours(entity_ids, exclude, limit).await;
        self.exit();
        out
    }

    async fn query_statements(
        &self,
        seed: &StatementSeed,
        intermediate_limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> LexGraphResult<Vec<Statement>> {
        self.enter().await;
        let out = self
            .inner
            .query_statements(seed, intermediate_limit, filter)
            .await;
        self.exit();
        out
    }

    async fn expand_connections(
        &self,
        statements: &[Statement],
        result_limit: usize,
    ) -> LexGraphResult<Vec<SourceStatements>> {
        self.enter().await;
        let out = self.inner.expand_connections(statements, result_limit).await;
        self.exit();
        out
    }

    fn name(&self) -> &str {
        "counting"
    }
}

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::errors::LexGraphResult;
use crate::models::{
    Entity, EntityCriteria, EntityNeighbours, MetadataFilter, SourceStatements, Statement,
    StatementSeed,
};

/// Read-only query contract the retrieval core requires of a graph backend.
#[async_trait]
pub trait IGraphStore: Send + Sync {
    /// Entities matching the criteria, most relevant first.
    async fn find_entities(
        &self,
        criteria: &EntityCriteria,
        limit: usize,
    ) -> LexGraphResult<Vec<Entity>>;

    /// Count of facts the entity participates in.
    async fn degree_centrality(&self, entity_id: &str) -> LexGraphResult<f64>;

    /// Batched centrality lookup. Unknown ids are omitted.
    async fn degree_centralities(
        &self,
        entity_ids: &[String],
    ) -> LexGraphResult<HashMap<String, f64>> {
        let mut scores = HashMap::with_capacity(entity_ids.len());
        for id in entity_ids {
            scores.insert(id.clone(), self.degree_centrality(id).await?);
        }
        Ok(scores)
    }

    /// For each entity, up to `limit` neighbours reached through shared facts,
    /// skipping anything in `exclude`.
    async fn entity_neighbours(
        &self,
        entity_ids: &[String],
        exclude: &HashSet<String>,
        limit: usize,
    ) -> LexGraphResult<Vec<EntityNeighbours>>;

    /// Phase 1: identify up to `intermediate_limit` candidate statements.
    async fn query_statements(
        &self,
        seed: &StatementSeed,
        intermediate_limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> LexGraphResult<Vec<Statement>>;

    /// Phase 2: expand local and global connections, grouped per source.
    async fn expand_connections(
        &self,
        statements: &[Statement],
        result_limit: usize,
    ) -> LexGraphResult<Vec<SourceStatements>>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

//! EntityBasedSearch: statements reached from the context entities.

use tracing::debug;

use lexgraph_core::config::RetrieverKind;
use lexgraph_core::errors::LexGraphResult;
use lexgraph_core::models::{RetrievalCandidate, StatementSeed};

use super::candidates::from_groups;
use super::StrategyContext;

pub(super) async fn retrieve(ctx: &StrategyContext<'_>) -> LexGraphResult<Vec<RetrievalCandidate>> {
    let entity_ids = ctx.entity_contexts.entity_ids();
    if entity_ids.is_empty() {
        debug!("entity-based search: no context entities");
        return Ok(Vec::new());
    }
    debug!(entities = entity_ids.len(), "entity-based search: seeding graph query");

    let groups = ctx
        .graph
        .query(
            &StatementSeed::Entities(entity_ids),
            ctx.config.intermediate_limit,
            ctx.config.query_limit,
            ctx.filter,
        )
        .await?;
    Ok(from_groups(groups, 1.0, RetrieverKind::EntityBasedSearch))
}

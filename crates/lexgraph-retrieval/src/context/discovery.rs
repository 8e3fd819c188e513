//! Entity discovery: match query terms to graph entities.

use tracing::debug;

use lexgraph_core::config::{DiscoveryMethod, DiscoveryMode, DiscoveryPolicy};
use lexgraph_core::errors::LexGraphResult;
use lexgraph_core::models::{
    Entity, EntityCriteria, MatchedNode, MetadataFilter, VectorIndex, VectorQuery,
};

use super::EntityNetworkContextBuilder;

/// Raw query words that could be entity ids: whitespace separated, outer
/// punctuation trimmed, `-` and `_` kept.
pub fn id_candidates(query: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for word in query.split_whitespace() {
        let word = word.trim_matches(|c: char| !c.is_alphanumeric() && c != '-' && c != '_');
        if !word.is_empty() && !out.iter().any(|w| w == word) {
            out.push(word.to_string());
        }
    }
    out
}

impl EntityNetworkContextBuilder {
    /// Entities matched by the configured methods, deduplicated, in
    /// method-precedence order.
    pub(crate) async fn discover(
        &self,
        query: &str,
        keywords: &[String],
        policy: &DiscoveryPolicy,
        filter: Option<&MetadataFilter>,
    ) -> LexGraphResult<Vec<Entity>> {
        let mut found: Vec<Entity> = Vec::new();
        for method in &policy.methods {
            let criteria = match method {
                DiscoveryMethod::Id => EntityCriteria::Ids(id_candidates(query)),
                DiscoveryMethod::Exact => EntityCriteria::Exact(keywords.to_vec()),
                DiscoveryMethod::Partial => EntityCriteria::Partial(keywords.to_vec()),
                DiscoveryMethod::FullText => EntityCriteria::FullText(query.to_string()),
                DiscoveryMethod::Vector => {
                    let matches = self
                        .vectors
                        .select(
                            VectorIndex::Chunk,
                            &VectorQuery::text(query),
                            self.vss_top_k,
                            self.vss_diversity_factor,
                            filter,
                        )
                        .await?;
                    EntityCriteria::Chunks(
                        matches
                            .into_iter()
                            .filter_map(|m| match m.node {
                                MatchedNode::Chunk { chunk_id } => Some(chunk_id),
                                MatchedNode::Statement { .. } => None,
                            })
                            .collect(),
                    )
                }
            };
            if criteria.is_empty() {
                continue;
            }

            let hits = self
                .pool
                .run(self.graph.find_entities(&criteria, self.num_entities))
                .await?;
            debug!(?method, hits = hits.len(), "entity discovery");

            let before = found.len();
            for entity in hits {
                if !found.iter().any(|e| e.entity_id == entity.entity_id) {
                    found.push(entity);
                }
            }
            if policy.mode == DiscoveryMode::FirstNonEmpty && found.len() > before {
                break;
            }
        }
        Ok(found)
    }
}

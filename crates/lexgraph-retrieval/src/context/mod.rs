//! EntityNetworkContextBuilder: ranked entity paths relevant to a query.
//!
//! 1. Discovery matches query keywords to entities.
//! 2. Discovered entities are scored by degree centrality, reranked against the
//!    query, and truncated; the first one's centrality is the benchmark `B`.
//! 3. Each root is expanded through shared facts following the fan-out schedule.
//!    An entity joins at most one tree.
//! 4. Entities with centrality outside `[B * min, B * max]` are skipped along
//!    each path; their descendants are kept.
//! 5. Partial and duplicate paths are removed, the rest are reranked by their
//!    transcriptions and the best `max_contexts` returned.

mod discovery;
mod pruning;
mod schedule;
mod transcription;
mod tree;

pub use discovery::id_candidates;
pub use pruning::CentralityBand;
pub use schedule::fan_out_schedule;
pub use transcription::{path_transcription, transcriptions};
pub use tree::{dedup_by_value, pruned_paths, remove_partial_paths, ContextTree, TreeNode};

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use lexgraph_core::config::{DiscoveryPolicy, RetrievalConfig};
use lexgraph_core::errors::LexGraphResult;
use lexgraph_core::models::{
    EntityContext, EntityContexts, EntityCriteria, MetadataFilter, ScoredEntity,
};
use lexgraph_core::traits::IGraphStore;

use crate::pool::WorkerPool;
use crate::ranking::RerankStrategy;
use crate::search::DiversityAwareTopK;
use crate::text::keywords;

/// Per-call knobs of [`EntityNetworkContextBuilder::build`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextParams {
    pub max_depth: usize,
    pub max_contexts: usize,
    pub max_score_factor: f64,
    pub min_score_factor: f64,
}

impl ContextParams {
    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self {
            max_depth: config.ec_max_depth,
            max_contexts: config.ec_max_contexts,
            max_score_factor: config.ec_max_score_factor,
            min_score_factor: config.ec_min_score_factor,
        }
    }
}

pub struct EntityNetworkContextBuilder {
    graph: Arc<dyn IGraphStore>,
    vectors: DiversityAwareTopK,
    reranker: RerankStrategy,
    pool: WorkerPool,
    discovery: DiscoveryPolicy,
    num_entities: usize,
    vss_top_k: usize,
    vss_diversity_factor: Option<usize>,
}

impl EntityNetworkContextBuilder {
    pub fn new(
        graph: Arc<dyn IGraphStore>,
        vectors: DiversityAwareTopK,
        reranker: RerankStrategy,
        pool: WorkerPool,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            graph,
            vectors,
            reranker,
            pool,
            discovery: config.ec_discovery.clone(),
            num_entities: config.ec_num_entities.max(1),
            vss_top_k: config.vss_top_k,
            vss_diversity_factor: config.vss_diversity_factor,
        }
    }

    /// At most `max_contexts` paths, best first. No discovered entity means no contexts.
    pub async fn build(
        &self,
        query: &str,
        params: &ContextParams,
        filter: Option<&MetadataFilter>,
    ) -> LexGraphResult<EntityContexts> {
        if params.max_contexts == 0 {
            return Ok(EntityContexts::default());
        }

        let keywords = keywords(query);
        let mut rerank_queries = vec![query.to_string()];
        rerank_queries.extend(keywords.iter().cloned());

        let roots = self
            .ranked_entities(query, &keywords, &rerank_queries, filter)
            .await?;
        let Some(benchmark) = roots.first().map(|e| e.score) else {
            debug!("no entities discovered");
            return Ok(EntityContexts::default());
        };
        let band = CentralityBand::new(benchmark, params.min_score_factor, params.max_score_factor);
        debug!(
            roots = roots.len(),
            benchmark,
            lower = band.lower,
            upper = band.upper,
            "entity roots ranked"
        );

        let tree = self.expand(&roots, params.max_depth).await?;
        let entities = self.resolve(&tree, roots).await?;

        let paths = pruned_paths(&tree, &entities, band);
        let paths = dedup_by_value(remove_partial_paths(paths));
        let contexts = self
            .select_paths(paths, &rerank_queries, params.max_contexts)
            .await;

        debug!(
            tree = tree.len(),
            contexts = contexts.len(),
            paths = ?contexts.iter().map(|c| c.values().join(" > ")).collect::<Vec<_>>(),
            "entity contexts built"
        );
        Ok(EntityContexts { contexts })
    }

    /// Discovered entities with centrality and reranking scores, ordered by
    /// (reranking score desc, centrality desc), truncated to the entity cap.
    async fn ranked_entities(
        &self,
        query: &str,
        keywords: &[String],
        rerank_queries: &[String],
        filter: Option<&MetadataFilter>,
    ) -> LexGraphResult<Vec<ScoredEntity>> {
        let found = self
            .discover(query, keywords, &self.discovery, filter)
            .await?;
        if found.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = found.iter().map(|e| e.entity_id.clone()).collect();
        let centrality = self
            .pool
            .run(self.graph.degree_centralities(&ids))
            .await?;
        let mut scored: Vec<ScoredEntity> = found
            .into_iter()
            .map(|e| {
                let score = centrality.get(&e.entity_id).copied().unwrap_or(0.0);
                ScoredEntity::new(e, score)
            })
            .collect();

        if self.reranker.is_enabled() {
            let tokens: Vec<String> = scored.iter().map(|e| e.entity.rerank_token()).collect();
            let zeros = vec![0.0; tokens.len()];
            let outcome = self
                .reranker
                .score_or_prior(rerank_queries, &tokens, &zeros)
                .await;
            for (entity, score) in scored.iter_mut().zip(outcome.scores) {
                entity.reranking_score = score;
            }
        }

        scored.sort_by(|a, b| {
            desc(a.reranking_score, b.reranking_score).then_with(|| desc(a.score, b.score))
        });
        scored.truncate(self.num_entities);
        Ok(scored)
    }

    /// Breadth-first expansion of every root with positive centrality.
    pub async fn expand(
        &self,
        roots: &[ScoredEntity],
        max_depth: usize,
    ) -> LexGraphResult<ContextTree> {
        let schedule = fan_out_schedule(max_depth);
        let mut tree = ContextTree::new();
        let mut excluded: HashSet<String> = HashSet::new();

        for root in roots.iter().filter(|r| r.score > 0.0) {
            let root_id = &root.entity.entity_id;
            if !excluded.insert(root_id.clone()) {
                continue;
            }
            let mut frontier: Vec<usize> = vec![tree.add_root(root_id)];

            for &fan_out in &schedule {
                if frontier.is_empty() {
                    break;
                }
                let parent_ids: Vec<String> = frontier
                    .iter()
                    .map(|&idx| tree.node(idx).entity_id.clone())
                    .collect();
                let neighbours = self
                    .pool
                    .run(self.graph.entity_neighbours(&parent_ids, &excluded, fan_out))
                    .await?;
                let by_parent: HashMap<&str, &Vec<String>> = neighbours
                    .iter()
                    .map(|n| (n.entity_id.as_str(), &n.neighbours))
                    .collect();

                let mut next = Vec::new();
                for &parent in &frontier {
                    let parent_id = tree.node(parent).entity_id.clone();
                    let Some(children) = by_parent.get(parent_id.as_str()) else {
                        continue;
                    };
                    for child in children.iter().take(fan_out) {
                        if excluded.insert(child.clone()) {
                            next.push(tree.add_child(parent, child));
                        }
                    }
                }
                frontier = next;
            }
        }
        Ok(tree)
    }

    /// Scored details for every tree entity. Roots keep their reranking scores.
    async fn resolve(
        &self,
        tree: &ContextTree,
        roots: Vec<ScoredEntity>,
    ) -> LexGraphResult<HashMap<String, ScoredEntity>> {
        let mut entities: HashMap<String, ScoredEntity> = roots
            .into_iter()
            .map(|e| (e.entity.entity_id.clone(), e))
            .collect();
        let missing: Vec<String> = tree
            .entity_ids()
            .into_iter()
            .filter(|id| !entities.contains_key(id))
            .collect();
        if missing.is_empty() {
            return Ok(entities);
        }

        let criteria = EntityCriteria::Ids(missing.clone());
        let (details, centrality) = futures::future::try_join(
            self.pool
                .run(self.graph.find_entities(&criteria, missing.len())),
            self.pool.run(self.graph.degree_centralities(&missing)),
        )
        .await?;
        for entity in details {
            let score = centrality.get(&entity.entity_id).copied().unwrap_or(0.0);
            entities.insert(entity.entity_id.clone(), ScoredEntity::new(entity, score));
        }
        Ok(entities)
    }

    /// Rerank path transcriptions; ties fall back to mean centrality, then path order.
    async fn select_paths(
        &self,
        paths: Vec<Vec<ScoredEntity>>,
        rerank_queries: &[String],
        max_contexts: usize,
    ) -> Vec<EntityContext> {
        let contexts: Vec<EntityContext> = paths.into_iter().map(EntityContext::new).collect();
        if contexts.is_empty() {
            return contexts;
        }
        let texts: Vec<String> = contexts.iter().map(path_transcription).collect();
        let prior: Vec<f64> = contexts.iter().map(EntityContext::mean_score).collect();
        let outcome = self
            .reranker
            .score_or_prior(rerank_queries, &texts, &prior)
            .await;

        let mut ranked: Vec<(usize, f64, EntityContext)> = contexts
            .into_iter()
            .zip(outcome.scores)
            .enumerate()
            .map(|(i, (c, s))| (i, s, c))
            .collect();
        ranked.sort_by(|a, b| {
            desc(a.1, b.1)
                .then_with(|| desc(a.2.mean_score(), b.2.mean_score()))
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked
            .into_iter()
            .take(max_contexts)
            .map(|(_, _, c)| c)
            .collect()
    }
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

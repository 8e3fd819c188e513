//! Property tests for lexgraph-retrieval: diversity selection, aggregation
//! limits, ordering and idempotence, pruning floors, fan-out schedule,
//! context depth.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use proptest::prelude::*;

use lexgraph_core::config::{DiscoveryMethod, Limit, RetrievalConfig, RetrieverKind};
use lexgraph_core::errors::LexGraphResult;
use lexgraph_core::models::{
    Entity, EntityCriteria, EntityNeighbours, MatchedNode, MetadataFilter, RetrievalCandidate,
    ScoredEntity, Source, SourceStatements, Statement, StatementSeed, TopicRef, VectorIndex,
    VectorMatch, VectorQuery,
};
use lexgraph_core::traits::{IGraphStore, IVectorStore};
use lexgraph_retrieval::aggregation::{AggregationLimits, ResultAggregator};
use lexgraph_retrieval::context::{fan_out_schedule, ContextParams};
use lexgraph_retrieval::search::diversify;
use lexgraph_retrieval::{DiversityAwareTopK, EntityNetworkContextBuilder, RerankStrategy, WorkerPool};

fn vector_match(i: usize, source: usize, score: f64) -> VectorMatch {
    VectorMatch {
        node: MatchedNode::Chunk {
            chunk_id: format!("c{i}"),
        },
        score,
        source_id: format!("src{source}"),
    }
}

/// Statement `i` always belongs to the same topic and source.
fn candidate(i: usize, score: f64, retriever: RetrieverKind) -> RetrievalCandidate {
    let topic = i % 7;
    let source = i % 3;
    RetrievalCandidate::new(
        Statement {
            statement_id: format!("s{i:03}"),
            value: format!("statement {i}"),
            topic: TopicRef {
                topic_id: format!("t{topic}"),
                value: format!("topic {topic}"),
            },
            source_id: format!("src{source}"),
            chunk_id: None,
            facts: Vec::new(),
        },
        Source::new(format!("src{source}")),
        score,
        retriever,
    )
}

fn candidates_strategy() -> impl Strategy<Value = Vec<RetrievalCandidate>> {
    prop::collection::vec((0_usize..40, 0.0_f64..1.0, any::<bool>()), 0..80).prop_map(|raw| {
        raw.into_iter()
            .map(|(i, score, chunk)| {
                let retriever = if chunk {
                    RetrieverKind::ChunkBasedSearch
                } else {
                    RetrieverKind::EntityNetworkSearch
                };
                candidate(i, score, retriever)
            })
            .collect()
    })
}

fn limit_strategy() -> impl Strategy<Value = Limit> {
    prop_oneof![Just(Limit::Unbounded), (0_usize..12).prop_map(Limit::Bounded)]
}

fn limits_strategy() -> impl Strategy<Value = AggregationLimits> {
    (
        limit_strategy(),
        limit_strategy(),
        limit_strategy(),
        prop::option::of(0.0_f64..1.0),
        prop::option::of(0.0_f64..1.0),
    )
        .prop_map(
            |(max_search_results, max_statements_per_topic, max_statements, factor, threshold)| {
                AggregationLimits {
                    max_search_results,
                    max_statements_per_topic,
                    max_statements,
                    pruning_factor: factor,
                    pruning_threshold: threshold,
                }
            },
        )
}

// =============================================================================
// Diversity-aware top-k
// =============================================================================
proptest! {
    #[test]
    fn diversify_is_bounded_and_sources_come_first(
        raw in prop::collection::vec((0_usize..5, 0.0_f64..1.0), 0..40),
        k in 1_usize..15,
    ) {
        let matches: Vec<VectorMatch> = raw
            .iter()
            .enumerate()
            .map(|(i, (source, score))| vector_match(i, *source, *score))
            .collect();
        let sources: HashSet<&str> = matches.iter().map(|m| m.source_id.as_str()).collect();
        let out = diversify(matches.clone(), k);

        prop_assert_eq!(out.len(), k.min(matches.len()));
        for m in &out {
            prop_assert!(matches.contains(m));
        }
        let leading = k.min(sources.len());
        let leading_sources: HashSet<&str> =
            out.iter().take(leading).map(|m| m.source_id.as_str()).collect();
        prop_assert_eq!(leading_sources.len(), leading);
    }
}

// =============================================================================
// Aggregation
// =============================================================================
proptest! {
    #[test]
    fn aggregation_respects_every_limit(
        candidates in candidates_strategy(),
        limits in limits_strategy(),
    ) {
        let results = ResultAggregator::new(limits).aggregate_results(candidates);

        prop_assert!(limits.max_search_results.allows(results.len()));
        let mut keys = HashSet::new();
        let mut ids = HashSet::new();
        let mut total = 0;
        for r in &results {
            let scores: Vec<f64> = r.statements().map(|s| s.score).collect();
            prop_assert!(!scores.is_empty());
            prop_assert!(limits.max_statements_per_topic.allows(scores.len()));
            prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));
            prop_assert!(keys.insert((r.topics[0].topic_id.clone(), r.source.source_id.clone())));
            for s in r.statements() {
                prop_assert!(ids.insert(s.statement_id.clone()));
            }
            total += scores.len();
        }
        if let Some(max) = limits.max_statements.get() {
            prop_assert!(total <= max.max(results.len()));
        }
        let tops: Vec<f64> = results.iter().map(|r| r.top_score()).collect();
        prop_assert!(tops.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn pruning_floors_hold(
        candidates in candidates_strategy(),
        factor in prop::option::of(0.0_f64..1.0),
        threshold in prop::option::of(0.0_f64..1.0),
    ) {
        let mut best: HashMap<String, f64> = HashMap::new();
        for c in &candidates {
            let e = best.entry(c.statement_id().to_string()).or_insert(0.0);
            *e = e.max(c.score);
        }
        let max = best.values().copied().fold(0.0, f64::max);

        let limits = AggregationLimits {
            pruning_factor: factor,
            pruning_threshold: threshold,
            ..AggregationLimits::unbounded()
        };
        let results = ResultAggregator::new(limits).aggregate_results(candidates);
        let kept: Vec<f64> = results.iter().flat_map(|r| r.statements().map(|s| s.score)).collect();
        for score in &kept {
            if let Some(f) = factor {
                prop_assert!(*score >= max * f);
            }
            if let Some(t) = threshold {
                prop_assert!(*score >= t);
            }
        }
        if factor.is_none() && threshold.is_none() {
            prop_assert_eq!(kept.len(), best.len());
        }
    }

    #[test]
    fn aggregation_ignores_arrival_order(
        candidates in candidates_strategy(),
        limits in limits_strategy(),
    ) {
        let aggregator = ResultAggregator::new(limits);
        let mut reversed = candidates.clone();
        reversed.reverse();
        prop_assert_eq!(
            aggregator.aggregate_results(candidates),
            aggregator.aggregate_results(reversed)
        );
    }

    #[test]
    fn aggregation_is_idempotent(
        candidates in candidates_strategy(),
        limits in limits_strategy(),
    ) {
        let aggregator = ResultAggregator::new(limits);
        let once = aggregator.aggregate(candidates);
        let flattened: Vec<RetrievalCandidate> = once
            .iter()
            .flat_map(|g| g.candidates.iter().cloned())
            .collect();
        let twice = aggregator.aggregate(flattened);
        prop_assert_eq!(once, twice);
    }
}

// =============================================================================
// Entity network contexts
// =============================================================================

/// `n` entities, all linked to each other.
struct CompleteGraph {
    n: usize,
}

impl CompleteGraph {
    fn ids(&self) -> impl Iterator<Item = String> {
        (0..self.n).map(|i| format!("e{i:02}"))
    }
}

#[async_trait]
impl IGraphStore for CompleteGraph {
    async fn find_entities(&self, criteria: &EntityCriteria, limit: usize) -> LexGraphResult<Vec<Entity>> {
        let known: HashSet<String> = self.ids().collect();
        let found: Vec<String> = match criteria {
            EntityCriteria::Ids(ids) => ids.iter().filter(|id| known.contains(*id)).cloned().collect(),
            _ => Vec::new(),
        };
        Ok(found
            .into_iter()
            .take(limit)
            .map(|id: String| Entity {
                value: format!("Entity {id}"),
                entity_id: id,
                classification: "Thing".into(),
            })
            .collect())
    }

    async fn degree_centrality(&self, _entity_id: &str) -> LexGraphResult<f64> {
        Ok(self.n.saturating_sub(1) as f64)
    }

    async fn entity_neighbours(
        &self,
        entity_ids: &[String],
        exclude: &HashSet<String>,
        limit: usize,
    ) -> LexGraphResult<Vec<EntityNeighbours>> {
        Ok(entity_ids
            .iter()
            .map(|id| EntityNeighbours {
                entity_id: id.clone(),
                neighbours: self
                    .ids()
                    .filter(|other| other != id && !exclude.contains(other))
                    .take(limit)
                    .collect(),
            })
            .collect())
    }

    async fn query_statements(
        &self,
        _seed: &StatementSeed,
        _intermediate_limit: usize,
        _filter: Option<&MetadataFilter>,
    ) -> LexGraphResult<Vec<Statement>> {
        Ok(Vec::new())
    }

    async fn expand_connections(
        &self,
        _statements: &[Statement],
        _result_limit: usize,
    ) -> LexGraphResult<Vec<SourceStatements>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "complete"
    }
}

struct NoVectors;

#[async_trait]
impl IVectorStore for NoVectors {
    async fn top_k_similar(
        &self,
        _index: VectorIndex,
        _query: &VectorQuery,
        _k: usize,
        _filter: Option<&MetadataFilter>,
    ) -> LexGraphResult<Vec<VectorMatch>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "none"
    }
}

fn context_builder(n: usize) -> EntityNetworkContextBuilder {
    let pool = WorkerPool::new(4);
    let mut config = RetrievalConfig::default();
    config.ec_discovery.methods = vec![DiscoveryMethod::Id];
    EntityNetworkContextBuilder::new(
        Arc::new(CompleteGraph { n }),
        DiversityAwareTopK::new(Arc::new(NoVectors), pool.clone()),
        RerankStrategy::Tfidf,
        pool,
        &config,
    )
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn fan_out_schedule_decreases_to_two(max_depth in 1_usize..12) {
        let schedule = fan_out_schedule(max_depth);
        prop_assert_eq!(schedule.len(), max_depth);
        prop_assert_eq!(schedule[0], max_depth + 1);
        prop_assert_eq!(*schedule.last().unwrap(), 2);
        prop_assert!(schedule.windows(2).all(|w| w[0] == w[1] + 1));
    }

    #[test]
    fn expansion_respects_depth_fan_out_and_exclusion(
        n in 2_usize..30,
        max_depth in 1_usize..5,
        roots in prop::collection::vec(0_usize..30, 1..4),
    ) {
        let builder = context_builder(n);
        let roots: Vec<ScoredEntity> = roots
            .into_iter()
            .filter(|r| *r < n)
            .map(|r| ScoredEntity::new(
                Entity {
                    entity_id: format!("e{r:02}"),
                    value: format!("Entity e{r:02}"),
                    classification: "Thing".into(),
                },
                1.0,
            ))
            .collect();
        let tree = runtime().block_on(builder.expand(&roots, max_depth)).unwrap();

        prop_assert!(tree.depth() <= max_depth);
        let schedule = fan_out_schedule(max_depth);
        for level in 1..=max_depth {
            prop_assert!(tree.max_fan_out(level) <= schedule[level - 1]);
        }
        let ids = tree.entity_ids();
        let distinct: HashSet<&String> = ids.iter().collect();
        prop_assert_eq!(ids.len(), distinct.len());
    }

    #[test]
    fn contexts_are_bounded(
        n in 2_usize..20,
        max_depth in 1_usize..4,
        max_contexts in 0_usize..5,
        root in 0_usize..20,
    ) {
        let builder = context_builder(n);
        let params = ContextParams {
            max_depth,
            max_contexts,
            max_score_factor: 3.0,
            min_score_factor: 0.25,
        };
        let query = format!("tell me about e{root:02}");
        let contexts = runtime().block_on(builder.build(&query, &params, None)).unwrap();

        prop_assert!(contexts.len() <= max_contexts);
        for c in &contexts.contexts {
            prop_assert!(!c.is_empty());
            prop_assert!(c.depth() <= max_depth);
        }
        if root >= n || max_contexts == 0 {
            prop_assert!(contexts.is_empty());
        }
    }
}

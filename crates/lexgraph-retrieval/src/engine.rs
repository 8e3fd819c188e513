//! TraversalRetriever: implements IRetriever, orchestrates the full pipeline.
//!
//! Stage 1: Entity network contexts (discovery → expansion → pruning → path selection)
//! Stage 2: Strategy fan-out over the worker pool
//! Stage 3: Aggregation (dedup → rerank → group → prune → cap)

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, info, warn, Instrument};

use lexgraph_core::config::{PartialResultsPolicy, RetrievalConfig};
use lexgraph_core::errors::{LexGraphResult, RetrievalError};
use lexgraph_core::models::{
    EntityContexts, MetadataFilter, RetrievalCandidate, RetrievalOutput, RetrievalReport,
    SearchResult,
};
use lexgraph_core::traits::{IGraphStore, IRerankModel, IRetriever, IVectorStore};
use lexgraph_observability::{rerank_span, retrieval_span, ObservabilityEngine};

use crate::aggregation::{CandidateGroup, ResultAggregator};
use crate::context::{ContextParams, EntityNetworkContextBuilder};
use crate::graph::TwoPhaseGraphQuery;
use crate::orchestrator::RetrieverOrchestrator;
use crate::pool::WorkerPool;
use crate::ranking::RerankStrategy;
use crate::search::DiversityAwareTopK;
use crate::strategies::StrategyContext;
use crate::text::keywords;

/// The retrieval engine. Stores are shared read-only; every request owns its
/// own candidates and contexts.
pub struct TraversalRetriever {
    config: RetrievalConfig,
    graph: Arc<dyn IGraphStore>,
    vector: Arc<dyn IVectorStore>,
    pool: WorkerPool,
    reranker: RerankStrategy,
    orchestrator: RetrieverOrchestrator,
    aggregator: ResultAggregator,
    filter: Option<MetadataFilter>,
    observer: Option<Arc<Mutex<ObservabilityEngine>>>,
}

impl TraversalRetriever {
    /// Validates `config`. The model reranker needs `rerank_model`.
    pub fn new(
        config: RetrievalConfig,
        graph: Arc<dyn IGraphStore>,
        vector: Arc<dyn IVectorStore>,
        rerank_model: Option<Arc<dyn IRerankModel>>,
    ) -> LexGraphResult<Self> {
        config.validate()?;
        let pool = WorkerPool::new(config.num_workers);
        let reranker = RerankStrategy::from_config(
            config.reranker,
            rerank_model,
            config.reranking_batch_size,
            pool.clone(),
        )?;
        Ok(Self {
            orchestrator: RetrieverOrchestrator::from_config(&config),
            aggregator: ResultAggregator::from_config(&config),
            config,
            graph,
            vector,
            pool,
            reranker,
            filter: None,
            observer: None,
        })
    }

    /// Share a process-wide pool instead of the one sized from the config.
    pub fn with_pool(mut self, pool: WorkerPool) -> Self {
        if let RerankStrategy::Model { pool: model_pool, .. } = &mut self.reranker {
            *model_pool = pool.clone();
        }
        self.pool = pool;
        self
    }

    /// Passed unchanged to vector searches and phase-1 graph queries.
    pub fn with_filter(mut self, filter: MetadataFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Record every query's report into `observer`.
    pub fn with_observer(mut self, observer: Arc<Mutex<ObservabilityEngine>>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    pub fn reranker(&self) -> &RerankStrategy {
        &self.reranker
    }

    /// Results plus an execution summary of the query.
    pub async fn retrieve_with_report(
        &self,
        query: &str,
    ) -> LexGraphResult<(RetrievalOutput, RetrievalReport)> {
        let span = retrieval_span!(query, self.config.retrievers);
        let result = self.run(query).instrument(span).await;

        if let Some(observer) = &self.observer {
            if let Ok(mut observer) = observer.lock() {
                match &result {
                    Ok((_, report)) => observer.record_retrieval(report),
                    Err(_) => observer.record_failure(),
                }
            }
        }
        result
    }

    async fn run(&self, query: &str) -> LexGraphResult<(RetrievalOutput, RetrievalReport)> {
        let started = Instant::now();
        let deadline = self
            .config
            .request_timeout_ms
            .map(|ms| started + Duration::from_millis(ms));
        let policy = self.config.partial_results;
        let filter = self.filter.as_ref();

        let vectors = DiversityAwareTopK::new(self.vector.clone(), self.pool.clone());
        let graph = TwoPhaseGraphQuery::new(self.graph.clone(), self.pool.clone());
        let builder = EntityNetworkContextBuilder::new(
            self.graph.clone(),
            vectors.clone(),
            self.reranker.clone(),
            self.pool.clone(),
            &self.config,
        );

        let mut partial = false;
        let params = ContextParams::from_config(&self.config);
        let built = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, builder.build(query, &params, filter)).await {
                Ok(built) => built,
                Err(_) => {
                    let elapsed_ms = started.elapsed().as_millis() as u64;
                    if policy == PartialResultsPolicy::Discard {
                        warn!(elapsed_ms, "timed out building entity contexts");
                        return Err(RetrievalError::Cancelled { elapsed_ms }.into());
                    }
                    partial = true;
                    Ok(EntityContexts::default())
                }
            },
            None => builder.build(query, &params, filter).await,
        };
        let entity_contexts = match built {
            Ok(contexts) => contexts,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                let failure = RetrievalError::ContextBuildFailed {
                    reason: e.to_string(),
                };
                warn!(error = %failure, "continuing without entity contexts");
                EntityContexts::default()
            }
        };
        debug!(contexts = entity_contexts.len(), "entity contexts ready");

        let ctx = StrategyContext {
            query,
            config: &self.config,
            entity_contexts: &entity_contexts,
            vectors: &vectors,
            graph: &graph,
            filter,
        };
        let fanned = self.orchestrator.run(&ctx, deadline, policy).await?;
        partial |= fanned.partial;

        let merged = self.aggregator.merge(fanned.candidates);
        let merged_candidates = merged.len();

        let mut rerank_queries = vec![query.to_string()];
        rerank_queries.extend(keywords(query));
        let (merged, reranker_fallback) = self.rerank(merged, &rerank_queries).await;
        let groups = self.aggregator.aggregate_merged(merged);

        let results: Vec<SearchResult> = groups
            .into_iter()
            .map(CandidateGroup::into_search_result)
            .collect();
        let output = RetrievalOutput {
            results,
            entity_contexts,
        };
        let report = RetrievalReport {
            query: query.to_string(),
            elapsed: started.elapsed(),
            entity_contexts: output.entity_contexts.len(),
            strategies: fanned.outcomes,
            merged_candidates,
            results: output.results.len(),
            statements: output.statement_count(),
            reranker_fallback,
            partial,
        };

        info!(
            results = report.results,
            statements = report.statements,
            contexts = report.entity_contexts,
            failed = report.failed_strategies().count(),
            partial,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "retrieval complete"
        );
        Ok((output, report))
    }

    /// Rescore every merged statement against the query and keywords before
    /// pruning, so the limits apply to the scores the output carries.
    /// Returns whether the reranker failed and prior scores were kept.
    async fn rerank(
        &self,
        mut candidates: Vec<RetrievalCandidate>,
        queries: &[String],
    ) -> (Vec<RetrievalCandidate>, bool) {
        if !self.reranker.is_enabled() || candidates.is_empty() {
            return (candidates, false);
        }
        let texts: Vec<String> = candidates
            .iter()
            .map(|c| c.statement.statement_str())
            .collect();
        let prior: Vec<f64> = candidates.iter().map(|c| c.score).collect();

        let span = rerank_span!(self.reranker.kind(), texts.len());
        let outcome = self
            .reranker
            .score_or_prior(queries, &texts, &prior)
            .instrument(span)
            .await;
        if outcome.fell_back {
            return (candidates, true);
        }

        let mut scores = outcome.scores.into_iter();
        for candidate in &mut candidates {
            let prior = candidate.score;
            candidate.score = scores.next().unwrap_or(prior).max(0.0);
        }
        (candidates, false)
    }
}

#[async_trait]
impl IRetriever for TraversalRetriever {
    async fn retrieve(&self, query: &str) -> LexGraphResult<RetrievalOutput> {
        self.retrieve_with_report(query)
            .await
            .map(|(output, _)| output)
    }
}

//! RetrieverOrchestrator: runs the enabled strategies concurrently and
//! collects their candidates.
//!
//! Strategy outputs are sent over a channel tagged with the strategy kind as
//! each one finishes. A fatal error (an unreachable store) ends the run at
//! once and drops the outstanding strategies; any other failure is recorded
//! and the remaining strategies continue. With a deadline, expiry either
//! cancels the whole run or keeps what had already arrived, depending on the
//! partial-results policy.

use std::collections::HashMap;

use futures::future::{join_all, try_join};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn, Instrument};

use lexgraph_core::config::{PartialResultsPolicy, RetrievalConfig, RetrieverKind};
use lexgraph_core::errors::{LexGraphError, LexGraphResult, RetrievalError};
use lexgraph_core::models::{RetrievalCandidate, StrategyOutcome};
use lexgraph_observability::strategy_span;

use crate::strategies::{RetrievalStrategy, StrategyContext};

type StrategyResult = (RetrieverKind, LexGraphResult<Vec<RetrievalCandidate>>);

const TIMED_OUT: &str = "timed out";

/// Candidates from every strategy that finished, plus how each one fared.
#[derive(Debug, Clone, Default)]
pub struct OrchestratorOutput {
    /// Concatenated in strategy order; not deduplicated.
    pub candidates: Vec<RetrievalCandidate>,
    pub outcomes: Vec<StrategyOutcome>,
    /// The deadline expired and the policy kept partial results.
    pub partial: bool,
}

#[derive(Debug, Clone)]
pub struct RetrieverOrchestrator {
    strategies: Vec<RetrievalStrategy>,
    debug_results: Vec<RetrieverKind>,
}

impl RetrieverOrchestrator {
    pub fn new(strategies: Vec<RetrievalStrategy>) -> Self {
        let mut distinct: Vec<RetrievalStrategy> = Vec::with_capacity(strategies.len());
        for strategy in strategies {
            if !distinct.contains(&strategy) {
                distinct.push(strategy);
            }
        }
        Self {
            strategies: distinct,
            debug_results: Vec::new(),
        }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        let strategies = config
            .retrievers
            .iter()
            .map(|&kind| RetrievalStrategy::from_kind(kind))
            .collect();
        Self::new(strategies).with_debug_results(config.debug_results.clone())
    }

    /// Log the full output of these strategies at debug level.
    pub fn with_debug_results(mut self, retrievers: Vec<RetrieverKind>) -> Self {
        self.debug_results = retrievers;
        self
    }

    pub fn strategies(&self) -> &[RetrievalStrategy] {
        &self.strategies
    }

    pub async fn run(
        &self,
        ctx: &StrategyContext<'_>,
        deadline: Option<Instant>,
        policy: PartialResultsPolicy,
    ) -> LexGraphResult<OrchestratorOutput> {
        if self.strategies.is_empty() {
            return Ok(OrchestratorOutput::default());
        }
        let started = Instant::now();
        let (tx, mut rx) = mpsc::unbounded_channel::<StrategyResult>();
        let mut finished: Vec<StrategyResult> = Vec::with_capacity(self.strategies.len());

        let produce = async move {
            let runs = self.strategies.iter().map(|&strategy| {
                let tx = tx.clone();
                async move {
                    let result = strategy.retrieve(ctx).await;
                    // The receiver is only dropped after every producer.
                    let _ = tx.send((strategy.kind(), result));
                }
                .instrument(strategy_span!(strategy.kind()))
            });
            join_all(runs).await;
            Ok::<(), LexGraphError>(())
        };
        let consume = async {
            while let Some((kind, result)) = rx.recv().await {
                accept(&mut finished, kind, result)?;
            }
            Ok::<(), LexGraphError>(())
        };
        let collect = try_join(produce, consume);

        let timed_out = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, collect).await {
                Ok(done) => {
                    done?;
                    false
                }
                Err(_) => true,
            },
            None => {
                collect.await?;
                false
            }
        };
        while let Ok((kind, result)) = rx.try_recv() {
            accept(&mut finished, kind, result)?;
        }

        if timed_out {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            match policy {
                PartialResultsPolicy::Discard => {
                    warn!(elapsed_ms, finished = finished.len(), "retrieval timed out, discarding");
                    return Err(RetrievalError::Cancelled { elapsed_ms }.into());
                }
                PartialResultsPolicy::Keep => {
                    warn!(elapsed_ms, finished = finished.len(), "retrieval timed out, keeping partial results");
                }
            }
        }

        self.assemble(finished, timed_out)
    }

    /// Outcomes in configured strategy order.
    fn assemble(
        &self,
        finished: Vec<StrategyResult>,
        timed_out: bool,
    ) -> LexGraphResult<OrchestratorOutput> {
        let mut by_kind: HashMap<RetrieverKind, LexGraphResult<Vec<RetrievalCandidate>>> =
            finished.into_iter().collect();
        let mut output = OrchestratorOutput {
            partial: timed_out,
            ..OrchestratorOutput::default()
        };
        let mut errors = 0;

        for strategy in &self.strategies {
            let kind = strategy.kind();
            match by_kind.remove(&kind) {
                Some(Ok(candidates)) => {
                    debug!(retriever = %kind, candidates = candidates.len(), "strategy finished");
                    if self.debug_results.contains(&kind) {
                        log_candidates(kind, &candidates);
                    }
                    output.outcomes.push(StrategyOutcome {
                        retriever: kind,
                        candidates: candidates.len(),
                        error: None,
                    });
                    output.candidates.extend(candidates);
                }
                Some(Err(e)) => {
                    errors += 1;
                    warn!(retriever = %kind, error = %e, "strategy failed, continuing without it");
                    output.outcomes.push(StrategyOutcome {
                        retriever: kind,
                        candidates: 0,
                        error: Some(e.to_string()),
                    });
                }
                None => output.outcomes.push(StrategyOutcome {
                    retriever: kind,
                    candidates: 0,
                    error: Some(TIMED_OUT.to_string()),
                }),
            }
        }

        if errors == self.strategies.len() {
            return Err(RetrievalError::AllStrategiesFailed { attempted: errors }.into());
        }
        Ok(output)
    }
}

fn accept(
    finished: &mut Vec<StrategyResult>,
    kind: RetrieverKind,
    result: LexGraphResult<Vec<RetrievalCandidate>>,
) -> LexGraphResult<()> {
    match result {
        Err(e) if e.is_fatal() => {
            warn!(retriever = %kind, error = %e, "fatal strategy error, aborting query");
            Err(e)
        }
        other => {
            finished.push((kind, other));
            Ok(())
        }
    }
}

fn log_candidates(kind: RetrieverKind, candidates: &[RetrievalCandidate]) {
    for c in candidates {
        debug!(
            retriever = %kind,
            statement_id = %c.statement_id(),
            source_id = %c.source.source_id,
            topic = %c.topic().value,
            score = c.score,
            statement = %c.statement.value,
            "retriever result"
        );
    }
}

//! Reranking regimes shared by path selection and final statement ordering.

mod tfidf;

#[cfg(feature = "reranker")]
pub mod cross_encoder;

pub use tfidf::tfidf_scores;

use std::fmt;
use std::sync::Arc;

use futures::future::join_all;
use tracing::warn;

use lexgraph_core::config::RerankerKind;
use lexgraph_core::errors::{LexGraphResult, RerankError};
use lexgraph_core::traits::IRerankModel;

use crate::pool::WorkerPool;

/// Selected once per deployment; the same instance serves every call site.
#[derive(Clone)]
pub enum RerankStrategy {
    Tfidf,
    Model {
        model: Arc<dyn IRerankModel>,
        batch_size: usize,
        pool: WorkerPool,
    },
    Disabled,
}

/// Scores after reranking, or the priors when the reranker failed.
#[derive(Debug, Clone, PartialEq)]
pub struct RerankOutcome {
    pub scores: Vec<f64>,
    pub fell_back: bool,
}

impl fmt::Debug for RerankStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RerankStrategy::Tfidf => f.write_str("Tfidf"),
            RerankStrategy::Model {
                model, batch_size, ..
            } => f
                .debug_struct("Model")
                .field("model", &model.name())
                .field("batch_size", batch_size)
                .finish(),
            RerankStrategy::Disabled => f.write_str("Disabled"),
        }
    }
}

impl RerankStrategy {
    pub fn from_config(
        kind: RerankerKind,
        model: Option<Arc<dyn IRerankModel>>,
        batch_size: usize,
        pool: WorkerPool,
    ) -> LexGraphResult<Self> {
        Ok(match kind {
            RerankerKind::Tfidf => RerankStrategy::Tfidf,
            RerankerKind::Disabled => RerankStrategy::Disabled,
            RerankerKind::Model => RerankStrategy::Model {
                model: model.ok_or(RerankError::ModelMissing)?,
                batch_size: batch_size.max(1),
                pool,
            },
        })
    }

    pub fn kind(&self) -> RerankerKind {
        match self {
            RerankStrategy::Tfidf => RerankerKind::Tfidf,
            RerankStrategy::Model { .. } => RerankerKind::Model,
            RerankStrategy::Disabled => RerankerKind::Disabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, RerankStrategy::Disabled)
    }

    /// Relevance of each text to the queries, in input order. `None` when disabled.
    ///
    /// The lexical regime takes the best match over all query strings; the
    /// model regime scores against the first one, the question itself.
    pub async fn score(
        &self,
        queries: &[String],
        texts: &[String],
    ) -> Result<Option<Vec<f64>>, RerankError> {
        match self {
            RerankStrategy::Disabled => Ok(None),
            RerankStrategy::Tfidf => Ok(Some(tfidf_scores(queries, texts))),
            RerankStrategy::Model {
                model,
                batch_size,
                pool,
            } => {
                if texts.is_empty() {
                    return Ok(Some(Vec::new()));
                }
                let query = queries.first().map(String::as_str).unwrap_or_default();
                let batches = texts
                    .chunks(*batch_size)
                    .map(|batch| pool.run(model.score_batch(query, batch)));
                let mut scores = Vec::with_capacity(texts.len());
                for (batch, result) in texts.chunks(*batch_size).zip(join_all(batches).await) {
                    let batch_scores = result.map_err(|e| RerankError::ModelFailed {
                        reason: e.to_string(),
                    })?;
                    if batch_scores.len() != batch.len() {
                        return Err(RerankError::ScoreCountMismatch {
                            expected: batch.len(),
                            actual: batch_scores.len(),
                        });
                    }
                    scores.extend(batch_scores);
                }
                Ok(Some(scores))
            }
        }
    }

    /// Rerank, keeping `prior` when disabled or when the model fails.
    pub async fn score_or_prior(
        &self,
        queries: &[String],
        texts: &[String],
        prior: &[f64],
    ) -> RerankOutcome {
        match self.score(queries, texts).await {
            Ok(Some(scores)) => RerankOutcome {
                scores,
                fell_back: false,
            },
            Ok(None) => RerankOutcome {
                scores: prior.to_vec(),
                fell_back: false,
            },
            Err(e) => {
                warn!(error = %e, texts = texts.len(), "reranker failed, keeping prior scores");
                RerankOutcome {
                    scores: prior.to_vec(),
                    fell_back: true,
                }
            }
        }
    }
}

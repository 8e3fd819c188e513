//! fastembed cross-encoder behind the `reranker` feature.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fastembed::{RerankInitOptions, RerankerModel, TextRerank};

use lexgraph_core::errors::{LexGraphResult, RerankError};
use lexgraph_core::traits::IRerankModel;

/// Local cross-encoder scoring (query, text) pairs.
pub struct FastEmbedReranker {
    model: Arc<Mutex<TextRerank>>,
    name: String,
}

impl FastEmbedReranker {
    pub fn try_new(model: RerankerModel) -> LexGraphResult<Self> {
        let name = format!("fastembed:{model:?}");
        let model = TextRerank::try_new(RerankInitOptions::new(model)).map_err(|e| {
            RerankError::ModelFailed {
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            model: Arc::new(Mutex::new(model)),
            name,
        })
    }
}

#[async_trait]
impl IRerankModel for FastEmbedReranker {
    async fn score_batch(&self, query: &str, texts: &[String]) -> LexGraphResult<Vec<f64>> {
        let model = self.model.clone();
        let query = query.to_string();
        let texts = texts.to_vec();
        let scores = tokio::task::spawn_blocking(move || -> Result<Vec<f64>, RerankError> {
            let mut model = model.lock().map_err(|e| RerankError::ModelFailed {
                reason: e.to_string(),
            })?;
            let documents: Vec<&str> = texts.iter().map(String::as_str).collect();
            let results = model
                .rerank(query.as_str(), documents, false, None)
                .map_err(|e| RerankError::ModelFailed {
                    reason: e.to_string(),
                })?;
            let mut scores = vec![0.0; texts.len()];
            for r in results {
                if let Some(slot) = scores.get_mut(r.index) {
                    *slot = r.score as f64;
                }
            }
            Ok(scores)
        })
        .await
        .map_err(|e| RerankError::ModelFailed {
            reason: e.to_string(),
        })??;
        Ok(scores)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

use async_trait::async_trait;

use crate::errors::LexGraphResult;

/// A relevance model scoring (query, text) pairs, e.g. a cross-encoder.
#[async_trait]
pub trait IRerankModel: Send + Sync {
    /// One score per input text, in input order.
    async fn score_batch(&self, query: &str, texts: &[String]) -> LexGraphResult<Vec<f64>>;

    fn name(&self) -> &str;
}

use async_trait::async_trait;

use crate::errors::LexGraphResult;
use crate::models::RetrievalOutput;

/// Question in, ranked and bounded supporting statements out.
#[async_trait]
pub trait IRetriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> LexGraphResult<RetrievalOutput>;
}

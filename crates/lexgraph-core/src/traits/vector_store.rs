use async_trait::async_trait;

use crate::errors::LexGraphResult;
use crate::models::{MetadataFilter, VectorIndex, VectorMatch, VectorQuery};

/// Nearest-neighbor query contract.
#[async_trait]
pub trait IVectorStore: Send + Sync {
    /// Up to `k` matches ordered by similarity descending.
    async fn top_k_similar(
        &self,
        index: VectorIndex,
        query: &VectorQuery,
        k: usize,
        filter: Option<&MetadataFilter>,
    ) -> LexGraphResult<Vec<VectorMatch>>;

    fn name(&self) -> &str;
}

//! Brute-force cosine `IVectorStore` over chunk and statement embeddings.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use lexgraph_core::errors::{LexGraphResult, StoreError, StoreKind};
use lexgraph_core::models::{
    MatchedNode, MetadataFilter, Source, VectorIndex, VectorMatch, VectorQuery,
};
use lexgraph_core::traits::{IEmbeddingProvider, IVectorStore};

use crate::document::GraphDocument;
use crate::filter::source_matches;

#[derive(Debug, Clone)]
struct IndexedVector {
    node: MatchedNode,
    source_id: String,
    embedding: Vec<f32>,
}

pub struct MemoryVectorStore {
    embedder: Arc<dyn IEmbeddingProvider>,
    chunks: Vec<IndexedVector>,
    statements: Vec<IndexedVector>,
    sources: HashMap<String, Source>,
    available: AtomicBool,
    latency: Option<Duration>,
}

impl MemoryVectorStore {
    /// Index every chunk and statement. Missing embeddings are computed with `embedder`.
    pub fn from_document(
        doc: &GraphDocument,
        embedder: Arc<dyn IEmbeddingProvider>,
    ) -> LexGraphResult<Self> {
        let mut chunks = Vec::with_capacity(doc.chunks.len());
        for chunk in &doc.chunks {
            let embedding = match &chunk.embedding {
                Some(e) => e.clone(),
                None => embedder.embed(&chunk.value)?,
            };
            chunks.push(IndexedVector {
                node: MatchedNode::Chunk {
                    chunk_id: chunk.chunk_id.clone(),
                },
                source_id: chunk.source_id.clone(),
                embedding,
            });
        }

        let texts: Vec<String> = doc.statements.iter().map(|s| s.value.clone()).collect();
        let embeddings = embedder.embed_batch(&texts)?;
        let statements = doc
            .statements
            .iter()
            .zip(embeddings)
            .map(|(s, embedding)| IndexedVector {
                node: MatchedNode::Statement {
                    statement_id: s.statement_id.clone(),
                },
                source_id: s.source_id.clone(),
                embedding,
            })
            .collect::<Vec<_>>();

        debug!(
            chunks = chunks.len(),
            statements = statements.len(),
            embedder = embedder.name(),
            "vector store indexed"
        );
        Ok(Self {
            embedder,
            chunks,
            statements,
            sources: doc.source_map(),
            available: AtomicBool::new(true),
            latency: None,
        })
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, AtomicOrdering::SeqCst);
    }

    pub fn len(&self, index: VectorIndex) -> usize {
        self.entries(index).len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty() && self.statements.is_empty()
    }

    fn entries(&self, index: VectorIndex) -> &[IndexedVector] {
        match index {
            VectorIndex::Chunk => &self.chunks,
            VectorIndex::Statement => &self.statements,
        }
    }

    fn source_allowed(&self, source_id: &str, filter: Option<&MetadataFilter>) -> bool {
        if filter.is_none() {
            return true;
        }
        self.sources
            .get(source_id)
            .is_some_and(|s| source_matches(filter, s))
    }
}

/// Cosine similarity in f64. Zero vectors and dimension mismatches score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut na = 0.0f64;
    let mut nb = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}

#[async_trait]
impl IVectorStore for MemoryVectorStore {
    async fn top_k_similar(
        &self,
        index: VectorIndex,
        query: &VectorQuery,
        k: usize,
        filter: Option<&MetadataFilter>,
    ) -> LexGraphResult<Vec<VectorMatch>> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if !self.available.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Unavailable {
                store: StoreKind::Vector,
                reason: "in-memory vector store marked unavailable".into(),
            }
            .into());
        }

        let embedded;
        let query_vec: &[f32] = match query {
            VectorQuery::Embedding(v) => v,
            VectorQuery::Text(text) => {
                embedded = self.embedder.embed(text)?;
                &embedded
            }
        };
        if query_vec.iter().all(|x| *x == 0.0) {
            return Ok(Vec::new());
        }

        let mut scored: Vec<VectorMatch> = self
            .entries(index)
            .iter()
            .filter(|e| self.source_allowed(&e.source_id, filter))
            .filter_map(|e| {
                let score = cosine_similarity(query_vec, &e.embedding);
                (score > 0.0).then(|| VectorMatch {
                    node: e.node.clone(),
                    score,
                    source_id: e.source_id.clone(),
                })
            })
            .collect();
        // Stable: equal scores keep index order.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);
        Ok(scored)
    }

    fn name(&self) -> &str {
        "memory-vector"
    }
}

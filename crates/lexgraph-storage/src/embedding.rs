//! Hashed term-frequency embedding provider.
//!
//! Generates fixed-dimension vectors by hashing terms into buckets. Works
//! without a model; used for text queries against the in-memory vector store.

use std::collections::HashMap;

use lexgraph_core::errors::LexGraphResult;
use lexgraph_core::traits::IEmbeddingProvider;

pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// FNV-1a bucket for a term.
    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut tf: HashMap<String, f32> = HashMap::new();
        let mut total = 0.0f32;
        for term in crate::graph::terms(text) {
            *tf.entry(term).or_default() += 1.0;
            total += 1.0;
        }

        let mut vec = vec![0.0f32; self.dimensions];
        if total == 0.0 {
            return vec;
        }
        for (term, count) in &tf {
            // Longer terms carry more signal than short function words.
            let weight = 1.0 + (term.len() as f32).ln();
            vec[Self::bucket(term, self.dimensions)] += (count / total) * weight;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            vec.iter_mut().for_each(|v| *v /= norm);
        }
        vec
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(crate::DEFAULT_EMBEDDING_DIMENSIONS)
    }
}

impl IEmbeddingProvider for HashingEmbedder {
    fn embed(&self, text: &str) -> LexGraphResult<Vec<f32>> {
        Ok(self.vector(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing-tf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn empty_text_is_zero_vector() {
        let v = HashingEmbedder::new(64).embed("").unwrap();
        assert_eq!(v.len(), 64);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn output_is_unit_length() {
        let v = HashingEmbedder::new(128)
            .embed("Neptune Analytics supports openCypher")
            .unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn overlapping_texts_are_closer() {
        let e = HashingEmbedder::default();
        let a = e.embed("neptune database graph engine").unwrap();
        let b = e.embed("neptune database storage").unwrap();
        let c = e.embed("cooking recipes pasta").unwrap();
        assert!(cosine(&a, &b) > cosine(&a, &c));
    }

    #[test]
    fn batch_matches_single() {
        let e = HashingEmbedder::new(32);
        let texts = vec!["alpha beta".to_string(), "gamma".to_string()];
        let batch = e.embed_batch(&texts).unwrap();
        assert_eq!(batch[1], e.embed("gamma").unwrap());
    }
}

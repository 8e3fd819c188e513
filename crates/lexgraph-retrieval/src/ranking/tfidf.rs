//! TF-IDF cosine scoring over a local corpus of candidate texts and queries.

use std::collections::{HashMap, HashSet};

use crate::text::tokenize;

type SparseVector = HashMap<String, f64>;

/// Score each text by its best cosine similarity to any of `queries`.
///
/// The corpus is the texts plus the queries themselves; idf is smoothed so
/// terms present everywhere still contribute. Texts or queries with no
/// content terms score 0.
pub fn tfidf_scores(queries: &[String], texts: &[String]) -> Vec<f64> {
    if texts.is_empty() {
        return Vec::new();
    }

    let tokenized_texts: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();
    let tokenized_queries: Vec<Vec<String>> = queries.iter().map(|q| tokenize(q)).collect();

    let n_docs = (tokenized_texts.len() + tokenized_queries.len()) as f64;
    let mut df: HashMap<&str, usize> = HashMap::new();
    for tokens in tokenized_texts.iter().chain(&tokenized_queries) {
        let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in unique {
            *df.entry(term).or_insert(0) += 1;
        }
    }
    let idf = |term: &str| -> f64 {
        let doc_freq = df.get(term).copied().unwrap_or(0) as f64;
        ((1.0 + n_docs) / (1.0 + doc_freq)).ln() + 1.0
    };

    let vectorize = |tokens: &[String]| -> SparseVector {
        let mut tf: SparseVector = HashMap::new();
        for token in tokens {
            *tf.entry(token.clone()).or_insert(0.0) += 1.0;
        }
        for (term, weight) in tf.iter_mut() {
            *weight *= idf(term);
        }
        let norm = tf.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            tf.values_mut().for_each(|w| *w /= norm);
        }
        tf
    };

    let query_vectors: Vec<SparseVector> = tokenized_queries.iter().map(|q| vectorize(q)).collect();
    tokenized_texts
        .iter()
        .map(|tokens| {
            let v = vectorize(tokens);
            query_vectors
                .iter()
                .map(|q| cosine(&v, q))
                .fold(0.0, f64::max)
        })
        .collect()
}

fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|o| w * o))
        .sum()
}

//! Statement-level deduplication across strategies.

use std::collections::HashMap;

use lexgraph_core::models::RetrievalCandidate;

/// One candidate per statement id, in first-seen order. Repeats fold into the
/// first sighting: best score wins and attributions are unioned.
pub fn dedup_candidates(candidates: Vec<RetrievalCandidate>) -> Vec<RetrievalCandidate> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(candidates.len());
    let mut out: Vec<RetrievalCandidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match index.get(candidate.statement_id()) {
            Some(&pos) => out[pos].merge(candidate),
            None => {
                index.insert(candidate.statement_id().to_string(), out.len());
                out.push(candidate);
            }
        }
    }
    out
}

//! Grouping candidates into (topic, source) search results.

use std::collections::BTreeMap;

use lexgraph_core::models::RetrievalCandidate;

use super::CandidateGroup;

/// Groups keyed by (topic id, source id), in key order.
pub fn group_by_topic_and_source(candidates: Vec<RetrievalCandidate>) -> Vec<CandidateGroup> {
    let mut groups: BTreeMap<(String, String), CandidateGroup> = BTreeMap::new();
    for candidate in candidates {
        let key = (
            candidate.statement.topic.topic_id.clone(),
            candidate.source.source_id.clone(),
        );
        groups
            .entry(key)
            .or_insert_with(|| CandidateGroup {
                source: candidate.source.clone(),
                topic: candidate.topic().clone(),
                candidates: Vec::new(),
            })
            .candidates
            .push(candidate);
    }
    groups.into_values().collect()
}

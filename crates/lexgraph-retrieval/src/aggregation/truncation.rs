//! Ordering and the three caps: per topic, per result list, overall.

use std::cmp::Ordering;
use std::collections::HashSet;

use lexgraph_core::config::Limit;
use lexgraph_core::models::RetrievalCandidate;

use super::CandidateGroup;

pub(crate) fn by_score_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Score descending, statement id ascending.
pub fn sort_candidates(candidates: &mut [RetrievalCandidate]) {
    candidates.sort_by(|a, b| {
        by_score_desc(a.score, b.score).then_with(|| a.statement_id().cmp(b.statement_id()))
    });
}

/// Top score descending, then source id, then topic id.
pub fn sort_groups(groups: &mut [CandidateGroup]) {
    groups.sort_by(|a, b| {
        by_score_desc(a.top_score(), b.top_score())
            .then_with(|| a.source.source_id.cmp(&b.source.source_id))
            .then_with(|| a.topic.topic_id.cmp(&b.topic.topic_id))
    });
}

/// Sort each group's statements and keep the best `limit`.
pub fn truncate_per_topic(groups: &mut [CandidateGroup], limit: Limit) {
    for group in groups.iter_mut() {
        sort_candidates(&mut group.candidates);
        if let Some(n) = limit.get() {
            group.candidates.truncate(n);
        }
    }
}

/// Sort groups and keep the best `limit`. Groups emptied by a zero per-topic
/// cap are dropped first.
pub fn truncate_results(groups: &mut Vec<CandidateGroup>, limit: Limit) {
    groups.retain(|g| !g.candidates.is_empty());
    sort_groups(groups);
    if let Some(n) = limit.get() {
        groups.truncate(n);
    }
}

/// Drop the globally lowest-scoring statements until at most `limit` remain,
/// never removing a group's top statement. When there are more groups than
/// `limit`, one statement per group survives, so the total is the group
/// count and exceeds `limit`. Bounding the group count with
/// `max_search_results <= max_statements` keeps the total within `limit`.
///
/// Groups must already be sorted internally.
pub fn cap_statements(groups: &mut [CandidateGroup], limit: Limit) {
    let Some(max) = limit.get() else {
        return;
    };
    let total: usize = groups.iter().map(|g| g.candidates.len()).sum();
    let keep = max.max(groups.len());
    if total <= keep {
        return;
    }

    let mut removable: Vec<(usize, usize, f64)> = groups
        .iter()
        .enumerate()
        .flat_map(|(gi, g)| {
            g.candidates
                .iter()
                .enumerate()
                .skip(1)
                .map(move |(pos, c)| (gi, pos, c.score))
        })
        .collect();
    // Lowest score first; among ties, later groups and later positions go first.
    removable.sort_by(|a, b| {
        a.2.partial_cmp(&b.2)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.0.cmp(&a.0))
            .then_with(|| b.1.cmp(&a.1))
    });
    let dropped: HashSet<(usize, usize)> = removable
        .into_iter()
        .take(total - keep)
        .map(|(gi, pos, _)| (gi, pos))
        .collect();

    for (gi, group) in groups.iter_mut().enumerate() {
        let mut pos = 0;
        group.candidates.retain(|_| {
            let keep = !dropped.contains(&(gi, pos));
            pos += 1;
            keep
        });
    }
}

//! Score pruning relative to the best candidate and against an absolute floor.

use super::CandidateGroup;

/// Drop statements scoring below `max * factor` or below `threshold`, then
/// drop groups left empty. `max` is taken over every group.
pub fn prune_statements(
    groups: Vec<CandidateGroup>,
    factor: Option<f64>,
    threshold: Option<f64>,
) -> Vec<CandidateGroup> {
    if factor.is_none() && threshold.is_none() {
        return groups;
    }
    let max = groups.iter().map(CandidateGroup::top_score).fold(0.0, f64::max);
    let relative = factor.map(|f| max * f);

    groups
        .into_iter()
        .filter_map(|mut group| {
            group.candidates.retain(|c| {
                relative.map_or(true, |floor| c.score >= floor)
                    && threshold.map_or(true, |floor| c.score >= floor)
            });
            (!group.candidates.is_empty()).then_some(group)
        })
        .collect()
}

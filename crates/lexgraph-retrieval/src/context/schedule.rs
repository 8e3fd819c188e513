//! Per-depth fan-out schedule for entity network expansion.

/// Neighbours kept per parent at each level `1..=max_depth`.
///
/// Level `i` keeps `max_depth + 2 - i`: depth 2 gives `[3, 2]`, depth 3 gives
/// `[4, 3, 2]`. Other depths follow the same linear decrease, ending at 2.
pub fn fan_out_schedule(max_depth: usize) -> Vec<usize> {
    (1..=max_depth).map(|level| max_depth + 2 - level).collect()
}

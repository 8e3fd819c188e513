//! Bounded graph traversal.

mod two_phase;

pub use two_phase::{normalize_scores, TwoPhaseGraphQuery};

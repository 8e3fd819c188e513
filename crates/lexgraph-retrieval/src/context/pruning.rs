//! Centrality band relative to the benchmark entity.

/// Entities are kept when `benchmark * min_factor <= centrality <= benchmark * max_factor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralityBand {
    pub lower: f64,
    pub upper: f64,
}

impl CentralityBand {
    pub fn new(benchmark: f64, min_factor: f64, max_factor: f64) -> Self {
        Self {
            lower: benchmark * min_factor,
            upper: benchmark * max_factor,
        }
    }

    pub fn admits(&self, centrality: f64) -> bool {
        centrality >= self.lower && centrality <= self.upper
    }
}

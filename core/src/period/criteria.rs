use serde::{Deserialize, Serialize};

pub const TARGET_HALF_PERIOD_MS: f64 = 500.0;
/// ±10% of the target
pub const TOLERANCE_MS: f64 = 50.0;
pub const MIN_EDGES: usize = 16;
pub const MAX_EDGES: usize = 26;
/// ~20 edges over a 10 s capture
pub const EXPECTED_EDGES: usize = 20;

/// Acceptance thresholds for a blink capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodCriteria {
    #[serde(default = "default_target")]
    pub target_half_period_ms: f64,

    #[serde(default = "default_tolerance")]
    pub tolerance_ms: f64,

    /// Inclusive lower bound on edge count
    #[serde(default = "default_min_edges")]
    pub min_edges: usize,

    /// Inclusive upper bound on edge count
    #[serde(default = "default_max_edges")]
    pub max_edges: usize,

    /// Nominal edge count, used in failure messages
    #[serde(default = "default_expected_edges")]
    pub expected_edges: usize,
}

fn default_target() -> f64 {
    TARGET_HALF_PERIOD_MS
}

fn default_tolerance() -> f64 {
    TOLERANCE_MS
}

fn default_min_edges() -> usize {
    MIN_EDGES
}

fn default_max_edges() -> usize {
    MAX_EDGES
}

fn default_expected_edges() -> usize {
    EXPECTED_EDGES
}

impl Default for PeriodCriteria {
    fn default() -> Self {
        Self {
            target_half_period_ms: TARGET_HALF_PERIOD_MS,
            tolerance_ms: TOLERANCE_MS,
            min_edges: MIN_EDGES,
            max_edges: MAX_EDGES,
            expected_edges: EXPECTED_EDGES,
        }
    }
}

impl PeriodCriteria {
    /// At least two edges are always needed to measure anything
    pub fn accepts_edge_count(&self, edges: usize) -> bool {
        edges >= self.min_edges.max(2) && edges <= self.max_edges
    }

    pub fn is_within_tolerance(&self, half_period_ms: f64) -> bool {
        (half_period_ms - self.target_half_period_ms).abs() <= self.tolerance_ms
    }

    /// Length of the capture the expected edge count corresponds to
    pub fn window_secs(&self) -> f64 {
        self.expected_edges as f64 * self.target_half_period_ms / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_count_bounds_inclusive() {
        let c = PeriodCriteria::default();
        assert!(!c.accepts_edge_count(15));
        assert!(c.accepts_edge_count(16));
        assert!(c.accepts_edge_count(20));
        assert!(c.accepts_edge_count(26));
        assert!(!c.accepts_edge_count(27));
    }

    #[test]
    fn test_tolerance_boundary() {
        let c = PeriodCriteria::default();
        assert!(c.is_within_tolerance(450.0));
        assert!(c.is_within_tolerance(550.0));
        assert!(!c.is_within_tolerance(550.1));
        assert!(!c.is_within_tolerance(1.0));
    }

    #[test]
    fn test_window() {
        assert_eq!(PeriodCriteria::default().window_secs(), 10.0);
    }
}

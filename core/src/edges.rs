//! Edge extraction
//!
//! Edges are derived from consecutive samples whose level differs. Monitor
//! logs already hold only level changes, so there every recorded point is an
//! edge.

use crate::gpio_log::{Edge, Sample};
use serde::Serialize;

/// Timestamps where the level differs from the previous sample
pub fn extract_edges(samples: &[Sample]) -> Vec<Edge> {
    samples
        .windows(2)
        .filter(|w| w[0].level != w[1].level)
        .map(|w| Edge {
            timestamp_ms: w[1].timestamp_ms,
            level: w[1].level,
        })
        .collect()
}

/// Time between consecutive edges, one entry fewer than `edges`
pub fn half_periods(edges: &[Edge]) -> Vec<f64> {
    edges
        .windows(2)
        .map(|w| w[1].timestamp_ms - w[0].timestamp_ms)
        .collect()
}

/// Everything derived from one sample sequence
#[derive(Debug, Clone, Default, Serialize)]
pub struct EdgeAnalysis {
    pub sample_count: usize,
    pub edges: Vec<Edge>,
    pub half_periods_ms: Vec<f64>,
}

impl EdgeAnalysis {
    pub fn from_samples(samples: &[Sample]) -> Self {
        let edges = extract_edges(samples);
        let half_periods_ms = half_periods(&edges);
        Self {
            sample_count: samples.len(),
            edges,
            half_periods_ms,
        }
    }

    /// For change-only sequences: each point is taken as an edge as-is
    pub fn from_change_points(points: &[Sample]) -> Self {
        let edges: Vec<Edge> = points
            .iter()
            .map(|p| Edge {
                timestamp_ms: p.timestamp_ms,
                level: p.level,
            })
            .collect();
        let half_periods_ms = half_periods(&edges);
        Self {
            sample_count: points.len(),
            edges,
            half_periods_ms,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

use super::{PeriodCriteria, ValidationError};
use crate::edges::EdgeAnalysis;
use serde::Serialize;
use std::path::Path;

/// Number of half-periods echoed back when the tolerance check fails
pub const SAMPLE_PREVIEW_LEN: usize = 10;

/// Summary of a passing capture
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub sample_count: usize,
    pub edge_count: usize,
    pub mean_half_period_ms: f64,
    pub min_half_period_ms: f64,
    pub max_half_period_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PeriodValidator {
    criteria: PeriodCriteria,
}

impl PeriodValidator {
    pub fn new(criteria: PeriodCriteria) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &PeriodCriteria {
        &self.criteria
    }

    /// Apply the checks in order: samples present, edge count, then tolerance.
    /// The first failing check decides the error.
    pub fn check(
        &self,
        source: &Path,
        analysis: &EdgeAnalysis,
    ) -> Result<PeriodReport, ValidationError> {
        if analysis.sample_count == 0 {
            return Err(ValidationError::NoSamplesParsed {
                path: source.to_path_buf(),
            });
        }

        let c = &self.criteria;
        let count = analysis.edge_count();
        if !c.accepts_edge_count(count) {
            return Err(ValidationError::EdgeCountOutOfRange {
                count,
                expected: c.expected_edges,
                window_secs: c.window_secs(),
                min: c.min_edges,
                max: c.max_edges,
            });
        }

        let half = &analysis.half_periods_ms;
        let bad = half.iter().filter(|&&h| !c.is_within_tolerance(h)).count();
        if bad > 0 {
            tracing::debug!(bad, total = half.len(), "half-periods out of tolerance");
            return Err(ValidationError::HalfPeriodOutOfTolerance {
                bad,
                total: half.len(),
                target_ms: c.target_half_period_ms,
                tolerance_ms: c.tolerance_ms,
                sample: half
                    .iter()
                    .take(SAMPLE_PREVIEW_LEN)
                    .map(|&h| round_tenth(h))
                    .collect(),
            });
        }

        let mean = half.iter().sum::<f64>() / half.len() as f64;
        let min = half.iter().copied().fold(f64::INFINITY, f64::min);
        let max = half.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(PeriodReport {
            sample_count: analysis.sample_count,
            edge_count: count,
            mean_half_period_ms: mean,
            min_half_period_ms: min,
            max_half_period_ms: max,
        })
    }
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio_log::{PinLevel, Sample};

    fn square_wave(edge_times: &[f64]) -> EdgeAnalysis {
        // baseline low sample, then one sample per edge
        let mut samples = vec![Sample::new(0.0, PinLevel::Low)];
        for (i, &t) in edge_times.iter().enumerate() {
            samples.push(Sample::new(t, PinLevel::from_bit(i % 2 == 0)));
        }
        EdgeAnalysis::from_samples(&samples)
    }

    fn evenly_spaced(edges: usize, spacing: f64) -> Vec<f64> {
        (1..=edges).map(|i| i as f64 * spacing).collect()
    }

    #[test]
    fn test_twenty_edges_at_500ms_pass() {
        let analysis = square_wave(&evenly_spaced(20, 500.0));
        let report = PeriodValidator::default()
            .check(Path::new("out/renode_gpio_log.csv"), &analysis)
            .unwrap();

        assert_eq!(report.edge_count, 20);
        assert_eq!(report.sample_count, 21);
        assert_eq!(report.mean_half_period_ms, 500.0);
        assert_eq!(report.min_half_period_ms, 500.0);
        assert_eq!(report.max_half_period_ms, 500.0);
    }

    #[test]
    fn test_too_few_edges() {
        let analysis = square_wave(&evenly_spaced(10, 500.0));
        let err = PeriodValidator::default()
            .check(Path::new("x.csv"), &analysis)
            .unwrap_err();

        assert!(matches!(
            err,
            ValidationError::EdgeCountOutOfRange { count: 10, .. }
        ));
        assert_eq!(err.to_string(), "expected ~20 edges in 10s, got 10");
    }

    #[test]
    fn test_too_many_edges() {
        let analysis = square_wave(&evenly_spaced(27, 500.0));
        let err = PeriodValidator::default()
            .check(Path::new("x.csv"), &analysis)
            .unwrap_err();
        assert_eq!(err.kind(), "edge_count_out_of_range");
    }

    #[test]
    fn test_one_long_interval_fails() {
        let mut times = evenly_spaced(20, 500.0);
        // stretch the 5th interval to 600ms, shifting the rest
        for t in times.iter_mut().skip(5) {
            *t += 100.0;
        }
        let analysis = square_wave(&times);
        let err = PeriodValidator::default()
            .check(Path::new("x.csv"), &analysis)
            .unwrap_err();

        match &err {
            ValidationError::HalfPeriodOutOfTolerance {
                bad, total, sample, ..
            } => {
                assert_eq!(*bad, 1);
                assert_eq!(*total, 19);
                assert_eq!(sample.len(), SAMPLE_PREVIEW_LEN);
                assert_eq!(sample[4], 600.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "1 half-period(s) outside 500.0±50.0 ms"
        );
    }

    #[test]
    fn test_jitter_within_tolerance_passes() {
        let mut t = 0.0;
        let times: Vec<f64> = (0..18)
            .map(|i| {
                t += if i % 2 == 0 { 455.0 } else { 545.0 };
                t
            })
            .collect();
        let report = PeriodValidator::default()
            .check(Path::new("x.csv"), &square_wave(&times))
            .unwrap();

        assert_eq!(report.min_half_period_ms, 455.0);
        assert_eq!(report.max_half_period_ms, 545.0);
    }

    #[test]
    fn test_no_samples() {
        let err = PeriodValidator::default()
            .check(Path::new("out/renode_gpio_log.csv"), &EdgeAnalysis::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "no GPIO samples in out/renode_gpio_log.csv"
        );
    }

    #[test]
    fn test_custom_criteria() {
        let criteria = PeriodCriteria {
            target_half_period_ms: 1.0,
            tolerance_ms: 0.0,
            min_edges: 2,
            max_edges: 10,
            expected_edges: 4,
        };
        let analysis = square_wave(&[1.0, 2.0, 3.0, 4.0]);
        let report = PeriodValidator::new(criteria)
            .check(Path::new("m.log"), &analysis)
            .unwrap();
        assert_eq!(report.mean_half_period_ms, 1.0);
    }

    #[test]
    fn test_round_tenth() {
        assert_eq!(round_tenth(499.96), 500.0);
        assert_eq!(round_tenth(512.34), 512.3);
    }
}

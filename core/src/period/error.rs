//! Error types for a period check

use crate::gpio_log::ReaderError;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a capture fails the check. All of them end the run.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing input file {path}")]
    MissingFile { path: PathBuf },

    #[error("could not read {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: ReaderError,
    },

    #[error("no GPIO samples in {path}")]
    NoSamplesParsed { path: PathBuf },

    #[error("expected ~{expected} edges in {window_secs}s, got {count}")]
    EdgeCountOutOfRange {
        count: usize,
        expected: usize,
        window_secs: f64,
        min: usize,
        max: usize,
    },

    #[error("{bad} half-period(s) outside {target_ms:.1}±{tolerance_ms:.1} ms")]
    HalfPeriodOutOfTolerance {
        bad: usize,
        total: usize,
        target_ms: f64,
        tolerance_ms: f64,
        /// Leading half-periods, rounded to 0.1 ms
        sample: Vec<f64>,
    },
}

impl From<ReaderError> for ValidationError {
    fn from(err: ReaderError) -> Self {
        let path = match &err {
            ReaderError::NotFound { path } => {
                return ValidationError::MissingFile { path: path.clone() };
            }
            ReaderError::OpenFile { path, .. } | ReaderError::MemoryMap { path, .. } => {
                path.clone()
            }
        };
        ValidationError::Unreadable { path, source: err }
    }
}

impl ValidationError {
    /// Short machine-friendly name of the failure
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingFile { .. } => "missing_file",
            ValidationError::Unreadable { .. } => "unreadable",
            ValidationError::NoSamplesParsed { .. } => "no_samples_parsed",
            ValidationError::EdgeCountOutOfRange { .. } => "edge_count_out_of_range",
            ValidationError::HalfPeriodOutOfTolerance { .. } => "half_period_out_of_tolerance",
        }
    }
}

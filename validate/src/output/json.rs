//! Machine-readable verdict

use ledcheck_core::{CheckRun, InputFormat, ValidationError};
use serde::Serialize;
use std::path::PathBuf;

use super::cli::error_chain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
}

#[derive(Debug, Serialize)]
pub struct Failure {
    pub kind: &'static str,
    pub message: String,
}

/// Serializable summary of one run
#[derive(Debug, Serialize)]
pub struct Verdict {
    pub status: Status,
    pub source: PathBuf,
    pub format: InputFormat,
    pub sample_count: Option<usize>,
    pub edge_count: Option<usize>,
    pub half_periods_ms: Vec<f64>,
    pub mean_half_period_ms: Option<f64>,
    pub failure: Option<Failure>,
}

impl Verdict {
    pub fn from_run(run: &CheckRun) -> Self {
        let (status, mean, failure) = match &run.outcome {
            Ok(report) => (Status::Pass, Some(report.mean_half_period_ms), None),
            Err(err) => (Status::Fail, None, Some(Failure::from(err))),
        };

        Self {
            status,
            source: run.source.clone(),
            format: run.format,
            sample_count: run.analysis.as_ref().map(|a| a.sample_count),
            edge_count: run.analysis.as_ref().map(|a| a.edge_count()),
            half_periods_ms: run
                .analysis
                .as_ref()
                .map(|a| a.half_periods_ms.clone())
                .unwrap_or_default(),
            mean_half_period_ms: mean,
            failure,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&ValidationError> for Failure {
    fn from(err: &ValidationError) -> Self {
        Self {
            kind: err.kind(),
            message: error_chain(err),
        }
    }
}

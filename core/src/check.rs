//! One full pass over a capture: read, parse, extract edges, validate.

use crate::config::CheckConfig;
use crate::edges::EdgeAnalysis;
use crate::gpio_log::{InputFormat, Reader};
use crate::period::{PeriodReport, PeriodValidator, ValidationError};
use std::path::{Path, PathBuf};

/// Outcome of checking one file
#[derive(Debug)]
pub struct CheckRun {
    pub source: PathBuf,
    pub format: InputFormat,
    /// Absent when the file could not be read
    pub analysis: Option<EdgeAnalysis>,
    pub outcome: Result<PeriodReport, ValidationError>,
}

impl CheckRun {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub fn check_file(path: &Path, format: InputFormat, config: &CheckConfig) -> CheckRun {
    let log = match Reader::from(path).read() {
        Ok(log) => log,
        Err(err) => {
            return CheckRun {
                source: path.to_path_buf(),
                format,
                analysis: None,
                outcome: Err(err.into()),
            };
        }
    };

    let parser = format.parser(&config.monitor);
    let samples = parser.parse(&log);
    let analysis = if parser.change_only() {
        EdgeAnalysis::from_change_points(&samples)
    } else {
        EdgeAnalysis::from_samples(&samples)
    };
    let outcome = PeriodValidator::new(config.criteria.clone()).check(path, &analysis);

    match &outcome {
        Ok(report) => tracing::info!(
            path = %path.display(),
            %format,
            edges = report.edge_count,
            mean_ms = report.mean_half_period_ms,
            "capture passed"
        ),
        Err(err) => tracing::info!(
            path = %path.display(),
            %format,
            kind = err.kind(),
            "capture failed"
        ),
    }

    CheckRun {
        source: path.to_path_buf(),
        format,
        analysis: Some(analysis),
        outcome,
    }
}

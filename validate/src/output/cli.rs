//! Colored CLI output for check results
//!
//! The PASS/FAIL line always goes to stdout. Summary and per-edge detail
//! depend on the output level.

use ledcheck_core::{CheckRun, Edge, PeriodCriteria, PeriodReport, ValidationError};
use std::error::Error;
use std::io::{self, Write};

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum OutputLevel {
    /// Only the PASS/FAIL line
    Quiet,
    /// Verdict plus a short summary (default)
    #[default]
    Normal,
    /// Also every edge and half-period
    Verbose,
}

/// CLI output formatter with color support
#[derive(Debug)]
pub struct CliOutput {
    level: OutputLevel,
    use_colors: bool,
}

impl Default for CliOutput {
    fn default() -> Self {
        Self::new(OutputLevel::Normal)
    }
}

impl CliOutput {
    pub fn new(level: OutputLevel) -> Self {
        Self {
            level,
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn level(&self) -> OutputLevel {
        self.level
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ANSI Color Codes
    // ═══════════════════════════════════════════════════════════════════════════

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        self.paint("32", text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint("33", text)
    }

    fn red(&self, text: &str) -> String {
        self.paint("31", text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint("36", text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint("2", text)
    }

    fn bold(&self, text: &str) -> String {
        self.paint("1", text)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Verdict
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn pass_line(&self, report: &PeriodReport) -> String {
        format!(
            "{}: mean half-period = {:.1} ms; edges={}",
            self.bold(&self.green("PASS")),
            report.mean_half_period_ms,
            report.edge_count
        )
    }

    /// FAIL line, plus the half-period preview when tolerance was the problem
    pub fn fail_lines(&self, err: &(dyn Error + 'static)) -> Vec<String> {
        let label = self.bold(&self.red("FAIL"));
        let mut lines = vec![format!("{}: {}", label, error_chain(err))];
        if let Some(ValidationError::HalfPeriodOutOfTolerance { sample, .. }) =
            err.downcast_ref::<ValidationError>()
        {
            lines.push(format!("Half-periods (ms) sample: {}", format_ms_list(sample)));
        }
        lines
    }

    pub fn pass(&self, report: &PeriodReport) {
        println!("{}", self.pass_line(report));
    }

    pub fn fail(&self, err: &(dyn Error + 'static)) {
        for line in self.fail_lines(err) {
            println!("{}", line);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Detail
    // ═══════════════════════════════════════════════════════════════════════════

    /// One line per edge with the half-period that ended on it
    pub fn edge_lines(
        &self,
        edges: &[Edge],
        half_periods: &[f64],
        criteria: &PeriodCriteria,
    ) -> Vec<String> {
        edges
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                let marker = if edge.is_rising() {
                    self.green("_/‾")
                } else {
                    self.yellow("‾\\_")
                };
                let half = match i.checked_sub(1).and_then(|j| half_periods.get(j)) {
                    Some(&h) if criteria.is_within_tolerance(h) => format!("+{:.1} ms", h),
                    Some(&h) => self.red(&format!("+{:.1} ms", h)),
                    None => self.dim("(first edge)"),
                };
                format!("[{:>10.1} ms] {} {:>3} {}", edge.timestamp_ms, marker, i + 1, half)
            })
            .collect()
    }

    pub fn print_edges(&self, run: &CheckRun, criteria: &PeriodCriteria) {
        if self.level < OutputLevel::Verbose {
            return;
        }
        let Some(analysis) = &run.analysis else {
            return;
        };
        for line in self.edge_lines(&analysis.edges, &analysis.half_periods_ms, criteria) {
            println!("{}", line);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Summary Report
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn summary_lines(&self, run: &CheckRun, criteria: &PeriodCriteria) -> Vec<String> {
        let line = "═".repeat(51);
        let mut out = vec![
            line.clone(),
            "  LED PERIOD CHECK".to_string(),
            line.clone(),
            format!("Source:          {}", run.source.display()),
            format!("Format:          {}", self.cyan(run.format.as_str())),
        ];

        if let Some(analysis) = &run.analysis {
            out.push(format!("Samples:         {}", analysis.sample_count));
            out.push(format!(
                "Edges:           {} (allowed {}..={})",
                analysis.edge_count(),
                criteria.min_edges,
                criteria.max_edges
            ));
            if let (Some(min), Some(max)) = (
                analysis.half_periods_ms.iter().copied().reduce(f64::min),
                analysis.half_periods_ms.iter().copied().reduce(f64::max),
            ) {
                out.push(format!("Half-periods:    {:.1} .. {:.1} ms", min, max));
            }
        }
        out.push(format!(
            "Target:          {:.1} ± {:.1} ms",
            criteria.target_half_period_ms, criteria.tolerance_ms
        ));
        out.push(line);
        out
    }

    pub fn print_summary(&self, run: &CheckRun, criteria: &PeriodCriteria) {
        if self.level < OutputLevel::Normal {
            return;
        }
        println!();
        for line in self.summary_lines(run, criteria) {
            println!("{}", line);
        }
    }

    /// Print everything for a finished run, verdict last
    pub fn report(&self, run: &CheckRun, criteria: &PeriodCriteria) {
        self.print_edges(run, criteria);
        self.print_summary(run, criteria);
        match &run.outcome {
            Ok(report) => self.pass(report),
            Err(err) => self.fail(err),
        }
        self.flush();
    }

    /// Flush stdout
    pub fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

/// `err: source: source...`
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

/// `[500.0, 612.3]`
pub fn format_ms_list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("{:.1}", v)).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledcheck_core::{EdgeAnalysis, InputFormat, PinLevel, Sample};
    use std::path::PathBuf;

    fn plain() -> CliOutput {
        CliOutput::new(OutputLevel::Normal).with_colors(false)
    }

    fn report(edges: usize, mean: f64) -> PeriodReport {
        PeriodReport {
            sample_count: edges + 1,
            edge_count: edges,
            mean_half_period_ms: mean,
            min_half_period_ms: mean,
            max_half_period_ms: mean,
        }
    }

    #[test]
    fn test_pass_line() {
        assert_eq!(
            plain().pass_line(&report(20, 500.0)),
            "PASS: mean half-period = 500.0 ms; edges=20"
        );
    }

    #[test]
    fn test_fail_edge_count() {
        let err = ValidationError::EdgeCountOutOfRange {
            count: 10,
            expected: 20,
            window_secs: 10.0,
            min: 16,
            max: 26,
        };
        assert_eq!(
            plain().fail_lines(&err),
            vec!["FAIL: expected ~20 edges in 10s, got 10".to_string()]
        );
    }

    #[test]
    fn test_fail_half_period_includes_sample() {
        let err = ValidationError::HalfPeriodOutOfTolerance {
            bad: 1,
            total: 19,
            target_ms: 500.0,
            tolerance_ms: 50.0,
            sample: vec![500.0, 600.0, 499.9],
        };
        let lines = plain().fail_lines(&err);
        assert_eq!(lines[0], "FAIL: 1 half-period(s) outside 500.0±50.0 ms");
        assert_eq!(lines[1], "Half-periods (ms) sample: [500.0, 600.0, 499.9]");
    }

    #[test]
    fn test_fail_missing_file() {
        let err = ValidationError::MissingFile {
            path: PathBuf::from("out/renode_gpio_log.csv"),
        };
        assert_eq!(
            plain().fail_lines(&err),
            vec!["FAIL: missing input file out/renode_gpio_log.csv".to_string()]
        );
    }

    #[test]
    fn test_colors_wrap_verdict() {
        let colored = CliOutput::new(OutputLevel::Normal).with_colors(true);
        let line = colored.pass_line(&report(20, 500.0));
        assert!(line.starts_with("\x1b[1m\x1b[32mPASS"));
    }

    #[test]
    fn test_edge_lines_flag_bad_intervals() {
        let samples = vec![
            Sample::new(0.0, PinLevel::Low),
            Sample::new(500.0, PinLevel::High),
            Sample::new(1000.0, PinLevel::Low),
            Sample::new(1700.0, PinLevel::High),
        ];
        let analysis = EdgeAnalysis::from_samples(&samples);
        let lines = plain().edge_lines(
            &analysis.edges,
            &analysis.half_periods_ms,
            &PeriodCriteria::default(),
        );

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("(first edge)"));
        assert!(lines[1].ends_with("+500.0 ms"));
        assert!(lines[2].ends_with("+700.0 ms"));
    }

    #[test]
    fn test_summary_lists_counts() {
        let samples = vec![
            Sample::new(0.0, PinLevel::Low),
            Sample::new(480.0, PinLevel::High),
            Sample::new(1000.0, PinLevel::Low),
        ];
        let run = CheckRun {
            source: PathBuf::from("cap.csv"),
            format: InputFormat::Csv,
            analysis: Some(EdgeAnalysis::from_samples(&samples)),
            outcome: Err(ValidationError::EdgeCountOutOfRange {
                count: 2,
                expected: 20,
                window_secs: 10.0,
                min: 16,
                max: 26,
            }),
        };
        let lines = plain().summary_lines(&run, &PeriodCriteria::default());

        assert!(lines.contains(&"Samples:         3".to_string()));
        assert!(lines.contains(&"Edges:           2 (allowed 16..=26)".to_string()));
        assert!(lines.contains(&"Half-periods:    520.0 .. 520.0 ms".to_string()));
    }

    #[test]
    fn test_format_ms_list() {
        assert_eq!(format_ms_list(&[]), "[]");
        assert_eq!(format_ms_list(&[500.04, 512.26]), "[500.0, 512.3]");
    }
}

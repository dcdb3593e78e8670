use super::*;
use crate::config::MonitorSettings;
use memchr::memmem;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::path::Path;


/// Turns the text of one log file into an ordered pin sample sequence
pub trait SampleParser: Send + Sync {
    fn format(&self) -> InputFormat;

    fn parse(&self, log: &LogText) -> Vec<Sample>;

    /// True when `parse` only emits a sample on a level change, so every
    /// sample it returns is already an edge
    fn change_only(&self) -> bool {
        false
    }
}

/// Supported log layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputFormat {
    /// Timestamped `0`/`1` rows exported by the emulator's GPIO logger
    Csv,
    /// Raw monitor output with peripheral access traces
    MonitorLog,
}

impl InputFormat {
    /// Guess from the file extension: `.csv` is a sample export, anything else a monitor log
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
            _ => InputFormat::MonitorLog,
        }
    }

    pub fn parser(self, monitor: &MonitorSettings) -> Box<dyn SampleParser> {
        match self {
            InputFormat::Csv => Box::new(CsvParser),
            InputFormat::MonitorLog => Box::new(MonitorLogParser::new(monitor)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Csv => "csv",
            InputFormat::MonitorLog => "monitor-log",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CSV samples
// ─────────────────────────────────────────────────────────────────────────────

/// Parser for lines like `1500ms,1` or `t=1.5s value 0`.
///
/// A line yields a sample when it holds a number suffixed with `ms` or `s`
/// and, somewhere after it, a standalone `0` or `1`. Everything else on the
/// line is ignored, so headers and comments fall through.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvParser;

impl CsvParser {
    pub fn parse_line(line: &str) -> Option<Sample> {
        let b = line.as_bytes();
        for start in 0..b.len() {
            if !b[start].is_ascii_digit() {
                continue;
            }
            let Some((value_end, unit_end, scale)) = scan_time_token(b, start) else {
                continue;
            };
            let Some(level) = find_level_token(line, unit_end) else {
                continue;
            };
            let value = line[start..value_end].parse::<f64>().ok()?;
            return Some(Sample::new(value * scale, level));
        }
        None
    }
}

impl SampleParser for CsvParser {
    fn format(&self) -> InputFormat {
        InputFormat::Csv
    }

    fn parse(&self, log: &LogText) -> Vec<Sample> {
        let samples: Vec<Sample> = log
            .line_ranges()
            .par_iter()
            .filter_map(|&range| {
                let line = log.line(range);
                let sample = CsvParser::parse_line(line);
                if sample.is_none() {
                    tracing::trace!(line, "no sample on line");
                }
                sample
            })
            .collect();

        tracing::debug!(
            lines = log.line_count(),
            samples = samples.len(),
            "parsed csv samples"
        );
        samples
    }
}

// `<digits>[.<digits>]` then `ms` or `s`; returns (number end, unit end, scale to ms)
fn scan_time_token(b: &[u8], start: usize) -> Option<(usize, usize, f64)> {
    let mut i = start;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i + 1 < b.len() && b[i] == b'.' && b[i + 1].is_ascii_digit() {
        i += 1;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
    }

    let rest = &b[i..];
    if rest.starts_with(b"ms") {
        Some((i, i + 2, 1.0))
    } else if rest.starts_with(b"s") {
        Some((i, i + 1, 1000.0))
    } else {
        None
    }
}

// first `0`/`1` at or after `from` with a word boundary on both sides
fn find_level_token(line: &str, from: usize) -> Option<PinLevel> {
    let b = line.as_bytes();
    (from..b.len()).find_map(|p| {
        // ASCII digit, so `p` and `p + 1` are char boundaries
        let level = PinLevel::from_digit(b[p])?;
        let boundary_before = !word_char_before(line, p);
        let boundary_after = !line[p + 1..].chars().next().is_some_and(is_word_char);
        (boundary_before && boundary_after).then_some(level)
    })
}

// Unicode-aware like a `\b` in a str regex: letters, digits and `_` of any script
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn word_char_before(line: &str, idx: usize) -> bool {
    line[..idx].chars().next_back().is_some_and(is_word_char)
}

// ─────────────────────────────────────────────────────────────────────────────
// Monitor logs
// ─────────────────────────────────────────────────────────────────────────────

/// Parser for peripheral access traces, e.g.
/// `gpioPortA: WriteUInt32 to 0x14 (ODR), value 0x20`.
///
/// There are no timestamps in this format. Every qualifying access advances an
/// [`AccessClock`] by one tick and only changes of the watched bit are kept.
#[derive(Debug, Clone)]
pub struct MonitorLogParser {
    gpio_markers: Vec<String>,
    register_marker: String,
    bit: u32,
}

impl MonitorLogParser {
    pub fn new(settings: &MonitorSettings) -> Self {
        Self {
            gpio_markers: settings
                .gpio_markers
                .iter()
                .map(|m| m.to_ascii_lowercase())
                .collect(),
            register_marker: settings.register_marker.clone(),
            bit: settings.bit,
        }
    }

    pub fn bit(&self) -> u32 {
        self.bit
    }

    /// Output register value written on this line, if the line is a GPIO register access
    pub fn register_value(&self, line: &str) -> Option<u64> {
        let lower = line.to_ascii_lowercase();
        if !self
            .gpio_markers
            .iter()
            .any(|m| memmem::find(lower.as_bytes(), m.as_bytes()).is_some())
        {
            return None;
        }

        let marker_pos = memmem::find(line.as_bytes(), self.register_marker.as_bytes())?;
        parse_register_value(line, marker_pos + self.register_marker.len())
    }

    pub fn level_of(&self, value: u64) -> PinLevel {
        PinLevel::from_bit(value.checked_shr(self.bit).unwrap_or(0) & 1 == 1)
    }
}

impl SampleParser for MonitorLogParser {
    fn format(&self) -> InputFormat {
        InputFormat::MonitorLog
    }

    fn change_only(&self) -> bool {
        true
    }

    fn parse(&self, log: &LogText) -> Vec<Sample> {
        let mut clock = AccessClock::new();
        let mut samples: Vec<Sample> = Vec::new();
        let mut last: Option<PinLevel> = None;

        for line in log.lines() {
            let Some(value) = self.register_value(line) else {
                tracing::trace!(line, "no register access on line");
                continue;
            };
            let timestamp_ms = clock.tick();
            let level = self.level_of(value);
            if last != Some(level) {
                samples.push(Sample::new(timestamp_ms, level));
                last = Some(level);
            }
        }

        tracing::debug!(
            accesses = clock.accesses(),
            virtual_ms = clock.elapsed_ms(),
            samples = samples.len(),
            bit = self.bit,
            "parsed monitor log"
        );
        samples
    }
}

// First `0x..` or decimal token at or after `from` that isn't glued to a preceding word
fn parse_register_value(line: &str, from: usize) -> Option<u64> {
    let b = line.as_bytes();
    let mut i = from;
    while i < b.len() {
        if !b[i].is_ascii_digit() || word_char_before(line, i) {
            i += 1;
            continue;
        }

        if b[i] == b'0'
            && i + 2 < b.len()
            && (b[i + 1] == b'x' || b[i + 1] == b'X')
            && b[i + 2].is_ascii_hexdigit()
        {
            let digits_start = i + 2;
            let mut end = digits_start;
            while end < b.len() && b[end].is_ascii_hexdigit() {
                end += 1;
            }
            return u64::from_str_radix(&line[digits_start..end], 16).ok();
        }

        let mut end = i;
        while end < b.len() && b[end].is_ascii_digit() {
            end += 1;
        }
        return line[i..end].parse::<u64>().ok();
    }
    None
}

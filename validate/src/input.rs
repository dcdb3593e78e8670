//! Input discovery
//!
//! Without `--input`, the emulator's fixed output paths are tried in order:
//! the CSV export first, then the raw monitor log.

use clap::ValueEnum;
use ledcheck_core::InputFormat;
use std::path::{Path, PathBuf};

pub const DEFAULT_CSV_PATH: &str = "out/renode_gpio_log.csv";
pub const DEFAULT_MONITOR_PATH: &str = "out/renode_monitor.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatArg {
    /// Detect from the file extension
    #[default]
    Auto,
    /// Timestamped 0/1 samples
    Csv,
    /// Monitor log with GPIO register accesses
    MonitorLog,
}

/// Pick the file to check and how to parse it. `root` is prepended to the default paths.
pub fn resolve_input(
    explicit: Option<&Path>,
    format: FormatArg,
    root: &Path,
) -> (PathBuf, InputFormat) {
    if let Some(path) = explicit {
        let format = match format {
            FormatArg::Auto => InputFormat::detect(path),
            FormatArg::Csv => InputFormat::Csv,
            FormatArg::MonitorLog => InputFormat::MonitorLog,
        };
        return (path.to_path_buf(), format);
    }

    let csv = root.join(DEFAULT_CSV_PATH);
    let monitor = root.join(DEFAULT_MONITOR_PATH);
    match format {
        FormatArg::Csv => (csv, InputFormat::Csv),
        FormatArg::MonitorLog => (monitor, InputFormat::MonitorLog),
        FormatArg::Auto if csv.exists() => (csv, InputFormat::Csv),
        FormatArg::Auto if monitor.exists() => (monitor, InputFormat::MonitorLog),
        // Neither exists; report the primary path as missing
        FormatArg::Auto => (csv, InputFormat::Csv),
    }
}

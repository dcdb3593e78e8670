//! LED blink period check for emulator GPIO captures
//!
//! Reads a GPIO capture (CSV samples or a raw monitor log), extracts pin
//! edges and checks that the LED toggles with the expected half-period.
//! Exits 0 on PASS and 1 on any failure.

mod input;
mod logging;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use ledcheck_core::{CheckConfig, ConfigError, check_file};

use crate::input::{FormatArg, resolve_input};
use crate::output::{CliOutput, OutputLevel, Verdict};

// ═══════════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "ledcheck-validate")]
#[command(about = "Validate LED blink timing in an emulator GPIO capture")]
#[command(version)]
struct Args {
    /// Capture to check (defaults to out/renode_gpio_log.csv, then out/renode_monitor.log)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Capture format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Auto)]
    format: FormatArg,

    /// Path to a TOML file with criteria and monitor settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────────────────
    // Overrides
    // ─────────────────────────────────────────────────────────────────────────
    /// Register bit driving the LED (monitor logs)
    #[arg(long)]
    bit: Option<u32>,

    /// Expected half-period in milliseconds
    #[arg(long)]
    target_ms: Option<f64>,

    /// Allowed deviation from the half-period in milliseconds
    #[arg(long)]
    tolerance_ms: Option<f64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Output Mode
    // ─────────────────────────────────────────────────────────────────────────
    /// Quiet mode: PASS/FAIL line only
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode: list every edge and debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print a JSON verdict instead of text
    #[arg(long)]
    json: bool,
}

impl Args {
    fn output_level(&self) -> OutputLevel {
        if self.quiet {
            OutputLevel::Quiet
        } else if self.verbose {
            OutputLevel::Verbose
        } else {
            OutputLevel::Normal
        }
    }

    fn load_config(&self) -> Result<CheckConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => CheckConfig::load(path)?,
            None => CheckConfig::default(),
        };

        if let Some(bit) = self.bit {
            config.monitor.bit = bit;
        }
        if let Some(target) = self.target_ms {
            config.criteria.target_half_period_ms = target;
        }
        if let Some(tolerance) = self.tolerance_ms {
            config.criteria.tolerance_ms = tolerance;
        }
        config.validate()?;
        Ok(config)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Main
// ═══════════════════════════════════════════════════════════════════════════════

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut cli = CliOutput::new(args.output_level());
    if std::env::var_os("NO_COLOR").is_some() {
        cli = cli.with_colors(false);
    }

    let config = match args.load_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "configuration rejected");
            cli.fail(&err);
            return ExitCode::FAILURE;
        }
    };

    let (path, format) = resolve_input(args.input.as_deref(), args.format, Path::new(""));
    if !args.json && cli.level() > OutputLevel::Quiet {
        eprintln!("Checking: {} ({})", path.display(), format);
    }

    let run = check_file(&path, format, &config);

    if args.json {
        match Verdict::from_run(&run).to_json() {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("failed to serialize verdict: {}", err);
                return ExitCode::FAILURE;
            }
        }
    } else {
        cli.report(&run, &config.criteria);
    }

    if run.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

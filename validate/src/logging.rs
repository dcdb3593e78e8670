//! Logging setup.
//!
//! Diagnostics go to stderr so stdout carries only the report. Warnings and
//! errors by default; `-v` or `DEBUG_LOGGING=1` enables debug output for the
//! ledcheck crates. `RUST_LOG` overrides both.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub fn init(verbose: bool) {
    let debug_logging = verbose || std::env::var("DEBUG_LOGGING").is_ok();

    let filter_directive = if debug_logging {
        "warn,ledcheck_core=debug,ledcheck_validate=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .init();

    tracing::debug!(debug_logging, "ledcheck logging initialized");
}

//! Output formatting for check results
//!
//! Colored human-readable lines for terminals and a JSON verdict for CI.

pub mod cli;
pub mod json;

pub use cli::{CliOutput, OutputLevel};
pub use json::Verdict;

pub mod check;
pub mod config;
pub mod edges;
pub mod gpio_log;
pub mod period;

// Re-exports for convenience
pub use check::{CheckRun, check_file};
pub use config::{CheckConfig, ConfigError, MonitorSettings};
pub use edges::{EdgeAnalysis, extract_edges, half_periods};
pub use gpio_log::*;
pub use period::{PeriodCriteria, PeriodReport, PeriodValidator, ValidationError};

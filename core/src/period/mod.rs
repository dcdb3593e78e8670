//! Blink period validation
//!
//! Checks that the edge count fits the observation window and that every
//! half-period sits within tolerance of the target.

mod criteria;
mod error;
mod validator;

pub use criteria::{
    EXPECTED_EDGES, MAX_EDGES, MIN_EDGES, PeriodCriteria, TARGET_HALF_PERIOD_MS, TOLERANCE_MS,
};
pub use error::ValidationError;
pub use validator::{PeriodReport, PeriodValidator, SAMPLE_PREVIEW_LEN};

//! Synthetic clock for monitor logs
//!
//! Monitor logs carry no wall-clock timestamps, so each register access is
//! treated as one fixed tick of virtual time. The resulting timeline counts
//! accesses, not elapsed time.

/// Milliseconds of virtual time credited per register access
pub const MS_PER_ACCESS: f64 = 1.0;

/// Virtual clock advanced once per observed register access
#[derive(Debug, Clone, Default)]
pub struct AccessClock {
    accesses: u64,
}

impl AccessClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one access and return its virtual timestamp in milliseconds.
    /// The first access lands at 0 ms.
    pub fn tick(&mut self) -> f64 {
        let now = self.accesses as f64 * MS_PER_ACCESS;
        self.accesses += 1;
        now
    }

    /// Number of accesses seen so far
    pub fn accesses(&self) -> u64 {
        self.accesses
    }

    /// Virtual time elapsed between the first and the latest access
    pub fn elapsed_ms(&self) -> f64 {
        self.accesses.saturating_sub(1) as f64 * MS_PER_ACCESS
    }
}

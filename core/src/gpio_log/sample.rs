use serde::Serialize;

/// Logic level of the observed pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinLevel {
    #[default]
    Low,
    High,
}

impl PinLevel {
    pub fn from_bit(bit: bool) -> Self {
        if bit { PinLevel::High } else { PinLevel::Low }
    }

    /// Maps the `0`/`1` value tokens used by sample logs
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            b'0' => Some(PinLevel::Low),
            b'1' => Some(PinLevel::High),
            _ => None,
        }
    }
}

/// One timestamped reading of the pin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub timestamp_ms: f64,
    pub level: PinLevel,
}

impl Sample {
    pub fn new(timestamp_ms: f64, level: PinLevel) -> Self {
        Self {
            timestamp_ms,
            level,
        }
    }
}

/// A transition; `level` is the value the pin changed to
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub timestamp_ms: f64,
    pub level: PinLevel,
}

impl Edge {
    pub fn is_rising(&self) -> bool {
        self.level == PinLevel::High
    }
}

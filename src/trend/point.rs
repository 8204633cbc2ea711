use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a point in the zig-zag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendKind {
    /// Swing high (trend turns down after it)
    High,
    /// Swing low (trend turns up after it)
    Low,
}

impl TrendKind {
    pub fn opposite(self) -> Self {
        match self {
            TrendKind::High => TrendKind::Low,
            TrendKind::Low => TrendKind::High,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrendKind::High => "high",
            TrendKind::Low => "low",
        }
    }
}

impl fmt::Display for TrendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TrendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "hi" | "h" => Ok(TrendKind::High),
            "low" | "lo" | "l" => Ok(TrendKind::Low),
            other => Err(format!("Unknown trend kind '{}', expected high or low", other)),
        }
    }
}

/// One confirmed reversal or endpoint of the trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Index into the source series
    pub position: usize,
    /// Source value at `position`
    pub value: f64,
    pub kind: TrendKind,
}

impl TrendPoint {
    pub fn new(position: usize, value: f64, kind: TrendKind) -> Self {
        Self { position, value, kind }
    }

    pub fn is_high(&self) -> bool {
        self.kind == TrendKind::High
    }

    pub fn is_low(&self) -> bool {
        self.kind == TrendKind::Low
    }
}

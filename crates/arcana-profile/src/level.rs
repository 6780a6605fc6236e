//! Quantization of dimension scores into template levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantized band of a dimension score. Boundaries are inclusive-lower.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::VeryLow,
        Level::Low,
        Level::Moderate,
        Level::High,
        Level::VeryHigh,
    ];

    /// Total mapping from a score in [0, 100] to its band.
    pub fn from_score(score: f64) -> Level {
        if score >= 75.0 {
            Level::VeryHigh
        } else if score >= 60.0 {
            Level::High
        } else if score >= 40.0 {
            Level::Moderate
        } else if score >= 25.0 {
            Level::Low
        } else {
            Level::VeryLow
        }
    }

    /// Snapshot key for the template catalog.
    pub fn key(&self) -> &'static str {
        match self {
            Level::VeryLow => "very_low",
            Level::Low => "low",
            Level::Moderate => "moderate",
            Level::High => "high",
            Level::VeryHigh => "very_high",
        }
    }

    /// Short glyph used in the profile pattern string.
    pub fn glyph(&self) -> &'static str {
        match self {
            Level::VeryLow => "▁",
            Level::Low => "▂",
            Level::Moderate => "▄",
            Level::High => "▆",
            Level::VeryHigh => "█",
        }
    }

    /// Plain-language intensity adjective, safe for narrative text.
    pub fn adjective(&self) -> &'static str {
        match self {
            Level::VeryLow => "a quiet undercurrent",
            Level::Low => "a gentle presence",
            Level::Moderate => "a steady current",
            Level::High => "a strong current",
            Level::VeryHigh => "a defining force",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

//! Items and responses.

use crate::dimension::Dimension;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single catalog question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier.
    #[serde(rename = "item")]
    pub id: ItemId,
    /// Dimension the item loads on. Filled from the snapshot key.
    #[serde(skip, default = "default_dimension")]
    pub dimension: Dimension,
    /// Display text shown to the participant.
    pub text: String,
    /// Higher agreement indicates lower expression of the dimension.
    pub reversed: bool,
    /// Loading of the item on its dimension, in [0, 1].
    pub correlation: f64,
}

fn default_dimension() -> Dimension {
    Dimension::Lumen
}

/// Ordinal answer scale, 1 (strong disagreement) to 5 (strong agreement).
pub const MIN_VALUE: u8 = 1;
pub const MAX_VALUE: u8 = 5;

/// A recorded answer to a single item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Answer on the 1..=5 scale.
    pub value: u8,
    /// Friend-report only: the respondent could not judge the behavior.
    /// Unsure responses do not contribute to scores but do contribute to
    /// response quality.
    #[serde(default)]
    pub unsure: bool,
    /// Time from item display to answer, in milliseconds.
    pub latency_ms: u64,
}

impl Response {
    pub fn new(value: u8, latency_ms: u64) -> Self {
        Self {
            value,
            unsure: false,
            latency_ms,
        }
    }

    pub fn unsure(latency_ms: u64) -> Self {
        Self {
            // Neutral placeholder; never aggregated into scores.
            value: 3,
            unsure: true,
            latency_ms,
        }
    }

    /// Value after reverse-key inversion, if the item is reverse-keyed.
    pub fn keyed_value(&self, reversed: bool) -> u8 {
        if reversed {
            6 - self.value
        } else {
            self.value
        }
    }

    /// Keyed value mapped onto the unit interval.
    pub fn normalized(&self, reversed: bool) -> f64 {
        (self.keyed_value(reversed) as f64 - 1.0) / 4.0
    }
}

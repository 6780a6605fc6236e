//! The eight trait dimensions measured by the assessment.
//!
//! Dimension codes are opaque identifiers. User-facing text never exposes
//! the codes or the human-readable names; presentation surfaces use the
//! behavioral descriptions instead.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight trait dimensions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Lumen,
    Vesper,
    Aether,
    Orpheus,
    Chronos,
    Terra,
    Ignis,
    Umbra,
}

impl Dimension {
    /// All dimensions in canonical catalog order.
    pub const ALL: [Dimension; 8] = [
        Dimension::Lumen,
        Dimension::Vesper,
        Dimension::Aether,
        Dimension::Orpheus,
        Dimension::Chronos,
        Dimension::Terra,
        Dimension::Ignis,
        Dimension::Umbra,
    ];

    /// Stable opaque code used in the item pool snapshot.
    pub fn code(&self) -> &'static str {
        match self {
            Dimension::Lumen => "LUMEN",
            Dimension::Vesper => "VESPER",
            Dimension::Aether => "AETHER",
            Dimension::Orpheus => "ORPHEUS",
            Dimension::Chronos => "CHRONOS",
            Dimension::Terra => "TERRA",
            Dimension::Ignis => "IGNIS",
            Dimension::Umbra => "UMBRA",
        }
    }

    /// Human-readable name. Presentation only, never emitted in narrative text.
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Lumen => "Visionary Spark",
            Dimension::Vesper => "Emotional Depth",
            Dimension::Aether => "Abstract Mind",
            Dimension::Orpheus => "Empathic Resonance",
            Dimension::Chronos => "Ordered Discipline",
            Dimension::Terra => "Grounded Presence",
            Dimension::Ignis => "Driving Fire",
            Dimension::Umbra => "Shadow Insight",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Dimension::Lumen => "✨",
            Dimension::Vesper => "🌙",
            Dimension::Aether => "🌌",
            Dimension::Orpheus => "🎶",
            Dimension::Chronos => "⏳",
            Dimension::Terra => "🌿",
            Dimension::Ignis => "🔥",
            Dimension::Umbra => "🌑",
        }
    }

    /// Behavioral description of a high expression, phrased without any
    /// assessment vocabulary. Safe for prompts and narrative text.
    pub fn behavior_high(&self) -> &'static str {
        match self {
            Dimension::Lumen => {
                "imagines new possibilities easily and is drawn to ideas before they are practical"
            }
            Dimension::Vesper => {
                "feels experiences intensely and carries a rich, layered inner life"
            }
            Dimension::Aether => {
                "thinks in concepts and patterns, enjoying problems for their own sake"
            }
            Dimension::Orpheus => {
                "senses what other people are feeling and instinctively moves to care for them"
            }
            Dimension::Chronos => {
                "plans ahead, keeps commitments, and brings order to whatever they touch"
            }
            Dimension::Terra => {
                "stays calm and steady under pressure, rooted in the practical here-and-now"
            }
            Dimension::Ignis => {
                "pushes hard toward goals, energized by challenge and forward motion"
            }
            Dimension::Umbra => {
                "looks honestly at difficult truths, including the uncomfortable parts of themselves"
            }
        }
    }

    /// Behavioral description of a low expression.
    pub fn behavior_low(&self) -> &'static str {
        match self {
            Dimension::Lumen => "prefers proven approaches and concrete, familiar territory",
            Dimension::Vesper => "keeps an even emotional keel and rarely gets swept up in feeling",
            Dimension::Aether => "favors hands-on experience over theory and abstraction",
            Dimension::Orpheus => "keeps a certain distance from other people's emotional weather",
            Dimension::Chronos => "works in bursts and improvises rather than following a plan",
            Dimension::Terra => "is restless with routine and quick to change course",
            Dimension::Ignis => "moves at an unhurried pace and is content without competition",
            Dimension::Umbra => "prefers to keep attention on the bright and workable side of life",
        }
    }

    /// Parse a dimension from its snapshot code.
    pub fn from_code(code: &str) -> Option<Dimension> {
        Dimension::ALL.iter().copied().find(|d| d.code() == code)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

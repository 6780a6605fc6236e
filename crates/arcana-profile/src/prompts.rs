//! Prompt templates for narrative generation.
//!
//! Prompts describe the person entirely in plain behavioral language. No
//! internal code or measurement term appears in a prompt, so a well-behaved
//! generator has nothing to echo back that the vocabulary guard would reject.

use crate::level::Level;
use arcana_core::Dimension;
use serde::{Deserialize, Serialize};

/// System prompt shared by all section generations.
pub const NARRATIVE_SYSTEM_PROMPT: &str = r#"You are a gifted portrait writer. You turn observations about how a person tends to behave into warm, specific, second-person prose.

Rules:
- Address the reader directly as "you".
- Write in plain, vivid, everyday language.
- Never use technical or clinical terms of any kind.
- Never invent facts beyond the observations given.
- Keep the response to a single paragraph of 3 to 5 sentences."#;

/// The seven sections of a composed narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeSection {
    CoreIdentity,
    Motivations,
    Conflicts,
    Strengths,
    GrowthAreas,
    Relationships,
    WorkStyle,
}

impl NarrativeSection {
    pub const ALL: [NarrativeSection; 7] = [
        NarrativeSection::CoreIdentity,
        NarrativeSection::Motivations,
        NarrativeSection::Conflicts,
        NarrativeSection::Strengths,
        NarrativeSection::GrowthAreas,
        NarrativeSection::Relationships,
        NarrativeSection::WorkStyle,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            NarrativeSection::CoreIdentity => "core_identity",
            NarrativeSection::Motivations => "motivations",
            NarrativeSection::Conflicts => "conflicts",
            NarrativeSection::Strengths => "strengths",
            NarrativeSection::GrowthAreas => "growth_areas",
            NarrativeSection::Relationships => "relationships",
            NarrativeSection::WorkStyle => "work_style",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            NarrativeSection::CoreIdentity => "Who You Are",
            NarrativeSection::Motivations => "What Drives You",
            NarrativeSection::Conflicts => "Your Inner Tensions",
            NarrativeSection::Strengths => "Where You Shine",
            NarrativeSection::GrowthAreas => "Where You Can Grow",
            NarrativeSection::Relationships => "How You Love",
            NarrativeSection::WorkStyle => "How You Work",
        }
    }

    /// Section-specific instruction appended to the shared context.
    fn focus(&self) -> &'static str {
        match self {
            NarrativeSection::CoreIdentity => {
                "Describe the essence of who this person is, the quality people notice first about them."
            }
            NarrativeSection::Motivations => {
                "Describe what genuinely drives this person, what they are reaching for underneath their daily choices."
            }
            NarrativeSection::Conflicts => {
                "Describe the inner tensions this person lives with, named gently and without judgment."
            }
            NarrativeSection::Strengths => {
                "Describe this person's real strengths and what those strengths make possible for the people around them."
            }
            NarrativeSection::GrowthAreas => {
                "Describe where this person has room to grow, framed as invitation rather than criticism."
            }
            NarrativeSection::Relationships => {
                "Describe how this person tends to love and connect, and what they need from the people closest to them."
            }
            NarrativeSection::WorkStyle => {
                "Describe how this person works best and the conditions that let them do their finest work."
            }
        }
    }
}

/// Plain-language behavioral line for one dimension at one level.
pub fn describe_dimension(dimension: Dimension, level: Level) -> String {
    match level {
        Level::VeryHigh | Level::High => {
            format!("{} — {}", dimension.behavior_high(), level.adjective())
        }
        Level::Moderate => format!(
            "sometimes {}, sometimes {} — {}",
            dimension.behavior_high(),
            dimension.behavior_low(),
            level.adjective()
        ),
        Level::Low | Level::VeryLow => {
            format!("{} — {}", dimension.behavior_low(), level.adjective())
        }
    }
}

/// Full prompt for one section.
pub fn format_section_prompt(
    section: NarrativeSection,
    essence: &str,
    observations: &[String],
) -> String {
    let observed = observations
        .iter()
        .map(|o| format!("- {o}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"=== PORTRAIT BRIEF ===

In essence, this person: {essence}

Observed tendencies:
{observed}

Task: {task}"#,
        essence = essence,
        observed = observed,
        task = section.focus(),
    )
}

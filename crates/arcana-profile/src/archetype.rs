//! Archetype catalog and matching.
//!
//! An archetype is a named combination of dimensional thresholds plus
//! descriptive content. Patterns are plain data, sequences of
//! (dimension, comparator, threshold), so matching is data-driven and a
//! total function: every score vector yields exactly one archetype, with
//! a balanced fallback when nothing matches well enough.

use arcana_core::{Dimension, DimensionScores};
use serde::{Deserialize, Serialize};

/// Comparator in a pattern predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternOp {
    AtLeast,
    AtMost,
}

/// A single per-dimension predicate of an archetype pattern.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PatternRule {
    pub dimension: Dimension,
    pub op: PatternOp,
    pub threshold: f64,
}

impl PatternRule {
    fn at_least(dimension: Dimension, threshold: f64) -> Self {
        Self {
            dimension,
            op: PatternOp::AtLeast,
            threshold,
        }
    }

    fn at_most(dimension: Dimension, threshold: f64) -> Self {
        Self {
            dimension,
            op: PatternOp::AtMost,
            threshold,
        }
    }

    /// Whether the score vector satisfies this predicate, and by how much.
    /// A missing dimension never satisfies.
    fn margin(&self, scores: &DimensionScores) -> Option<f64> {
        let score = scores.get(self.dimension)?;
        match self.op {
            PatternOp::AtLeast if score >= self.threshold => Some(score - self.threshold),
            PatternOp::AtMost if score <= self.threshold => Some(self.threshold - score),
            _ => None,
        }
    }
}

/// A named archetype with its matching pattern and descriptive content.
/// Descriptive fields never affect matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Archetype {
    pub name: String,
    pub essence: String,
    pub description: String,
    pub pattern: Vec<PatternRule>,
    pub strengths: Vec<String>,
    pub challenges: Vec<String>,
    pub life_purpose: String,
    pub relationships: String,
    pub career_paths: Vec<String>,
    pub growth_direction: String,
}

/// Fixed catalog of archetypes plus the balanced fallback.
#[derive(Debug, Clone)]
pub struct ArchetypeCatalog {
    archetypes: Vec<Archetype>,
    fallback: Archetype,
    /// Minimum satisfied fraction of a pattern for a direct match.
    min_fraction: f64,
}

impl ArchetypeCatalog {
    pub fn new(archetypes: Vec<Archetype>, fallback: Archetype, min_fraction: f64) -> Self {
        Self {
            archetypes,
            fallback,
            min_fraction,
        }
    }

    /// Best-matching archetype for a score vector.
    ///
    /// Match score is the fraction of pattern predicates satisfied; ties
    /// break by the summed absolute margin over satisfied predicates, then
    /// by catalog order. Below the minimum fraction the balanced fallback
    /// is returned.
    pub fn match_scores(&self, scores: &DimensionScores) -> &Archetype {
        let mut best: Option<(&Archetype, f64, f64)> = None;

        for archetype in &self.archetypes {
            if archetype.pattern.is_empty() {
                continue;
            }
            let mut satisfied = 0usize;
            let mut margin = 0.0;
            for rule in &archetype.pattern {
                if let Some(m) = rule.margin(scores) {
                    satisfied += 1;
                    margin += m;
                }
            }
            let fraction = satisfied as f64 / archetype.pattern.len() as f64;

            let better = match best {
                None => true,
                Some((_, best_fraction, best_margin)) => {
                    fraction > best_fraction
                        || (fraction == best_fraction && margin > best_margin)
                }
            };
            if better {
                best = Some((archetype, fraction, margin));
            }
        }

        match best {
            Some((archetype, fraction, _)) if fraction >= self.min_fraction => {
                tracing::debug!(archetype = %archetype.name, fraction, "archetype matched");
                archetype
            }
            _ => {
                tracing::debug!("no archetype above threshold, balanced fallback");
                &self.fallback
            }
        }
    }

    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    pub fn fallback(&self) -> &Archetype {
        &self.fallback
    }

    /// The built-in catalog.
    pub fn bundled() -> Self {
        Self::new(bundled_archetypes(), renaissance_soul(), 0.6)
    }
}

impl Default for ArchetypeCatalog {
    fn default() -> Self {
        Self::bundled()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn bundled_archetypes() -> Vec<Archetype> {
    vec![
        Archetype {
            name: "The Luminary".to_string(),
            essence: "A mind that turns feeling and thought into light for others".to_string(),
            description: "You live at the meeting point of imagination, deep feeling, and \
                conceptual clarity. Ideas arrive to you already glowing with meaning, and you \
                cannot help sharing them in ways that make other people see further."
                .to_string(),
            pattern: vec![
                PatternRule::at_least(Dimension::Lumen, 75.0),
                PatternRule::at_least(Dimension::Vesper, 70.0),
                PatternRule::at_least(Dimension::Aether, 65.0),
            ],
            strengths: strings(&[
                "Seeing possibilities long before they are obvious",
                "Giving language to what others only sense",
                "Holding vision and feeling together without losing either",
            ]),
            challenges: strings(&[
                "Burning out on ideas that never land in the world",
                "Feeling isolated when others cannot keep up",
                "Neglecting the mundane scaffolding a vision needs",
            ]),
            life_purpose: "To illuminate paths other people did not know existed".to_string(),
            relationships: "You need partners and friends who treat your inner world as real, \
                and you flourish with people who ask what you see rather than why you dream."
                .to_string(),
            career_paths: strings(&[
                "Creative direction",
                "Research and invention",
                "Writing and speaking",
                "Founding ventures around a vision",
            ]),
            growth_direction: "Choose one vision at a time and walk it all the way into form."
                .to_string(),
        },
        Archetype {
            name: "The Healer".to_string(),
            essence: "Steady hands for other people's wounds".to_string(),
            description: "You combine a rare sensitivity to what others feel with the \
                discipline to show up for them again and again. You prefer the concrete act of \
                care to theory, and people trust you with what they trust to no one else."
                .to_string(),
            pattern: vec![
                PatternRule::at_least(Dimension::Orpheus, 75.0),
                PatternRule::at_least(Dimension::Chronos, 70.0),
                PatternRule::at_most(Dimension::Aether, 35.0),
            ],
            strengths: strings(&[
                "Making people feel genuinely seen",
                "Reliability that turns compassion into real help",
                "Staying present through pain without flinching",
            ]),
            challenges: strings(&[
                "Giving past your own limits",
                "Absorbing moods that are not yours",
                "Resenting those who never notice the cost",
            ]),
            life_purpose: "To repair what life has worn down in the people around you".to_string(),
            relationships: "You give enormously and must learn to receive; the right people \
                will insist on caring for you in return."
                .to_string(),
            career_paths: strings(&[
                "Care work and medicine",
                "Counseling and coaching",
                "Teaching",
                "Community building",
            ]),
            growth_direction: "Practice boundaries as a form of care for everyone involved."
                .to_string(),
        },
        Archetype {
            name: "The Architect".to_string(),
            essence: "Order imposed patiently on complexity".to_string(),
            description: "You think in structures and build in steps. Where others see chaos \
                you see an unfinished system, and you have the patience to bring it into \
                alignment piece by piece."
                .to_string(),
            pattern: vec![
                PatternRule::at_least(Dimension::Chronos, 75.0),
                PatternRule::at_least(Dimension::Aether, 70.0),
                PatternRule::at_most(Dimension::Vesper, 40.0),
            ],
            strengths: strings(&[
                "Designing systems that outlast you",
                "Calm, methodical execution",
                "Seeing the consequences of a decision three steps out",
            ]),
            challenges: strings(&[
                "Impatience with people who improvise",
                "Mistaking the map for the territory",
                "Underrating what cannot be measured",
            ]),
            life_purpose: "To build structures that let other people do their best work"
                .to_string(),
            relationships: "You show love through reliability; let the people close to you \
                know the feeling behind the structure."
                .to_string(),
            career_paths: strings(&[
                "Engineering and systems design",
                "Operations leadership",
                "Finance and planning",
                "Craft mastery",
            ]),
            growth_direction: "Leave deliberate room for the unplanned and the unfinished."
                .to_string(),
        },
        Archetype {
            name: "The Guardian".to_string(),
            essence: "A shelter other people can count on".to_string(),
            description: "You hold steady when everything shakes, and you use that stability \
                in service of others. Yours is the house people gather in when the storm comes."
                .to_string(),
            pattern: vec![
                PatternRule::at_least(Dimension::Terra, 75.0),
                PatternRule::at_least(Dimension::Orpheus, 70.0),
                PatternRule::at_most(Dimension::Ignis, 40.0),
            ],
            strengths: strings(&[
                "Unshakeable presence in a crisis",
                "Practical care that meets real needs",
                "Loyalty measured in decades",
            ]),
            challenges: strings(&[
                "Carrying others so long you forget your own weight",
                "Resisting change even when it is needed",
                "Being taken for granted",
            ]),
            life_purpose: "To keep the ground steady for the people you love".to_string(),
            relationships: "You are the anchor; choose people who celebrate your steadiness \
                rather than merely rely on it."
                .to_string(),
            career_paths: strings(&[
                "Stewardship and management",
                "Healthcare",
                "Public service",
                "Family enterprise",
            ]),
            growth_direction: "Ask for help before the weight becomes the story of your life."
                .to_string(),
        },
        Archetype {
            name: "The Catalyst".to_string(),
            essence: "Ignition for rooms, projects, and people".to_string(),
            description: "You pair relentless drive with a live imagination, and things start \
                happening the moment you arrive. Beginnings are your natural habitat."
                .to_string(),
            pattern: vec![
                PatternRule::at_least(Dimension::Ignis, 75.0),
                PatternRule::at_least(Dimension::Lumen, 70.0),
                PatternRule::at_most(Dimension::Terra, 40.0),
            ],
            strengths: strings(&[
                "Turning inertia into momentum",
                "Rallying people around a spark",
                "Fearless experimentation",
            ]),
            challenges: strings(&[
                "Leaving a trail of unfinished fires",
                "Exhausting yourself and others",
                "Boredom with maintenance",
            ]),
            life_purpose: "To start what the world did not know it was waiting for".to_string(),
            relationships: "You need companions with their own engines; steadier partners \
                ground you if you let them."
                .to_string(),
            career_paths: strings(&[
                "Entrepreneurship",
                "Sales and advocacy",
                "Emergency response",
                "Performance",
            ]),
            growth_direction: "Finish one difficult thing for every three you start.".to_string(),
        },
        Archetype {
            name: "The Sage".to_string(),
            essence: "Depth of understanding earned in stillness".to_string(),
            description: "You think past the surface of things and are unafraid of the dark \
                corners of a question. People come to you when easy answers have failed them."
                .to_string(),
            pattern: vec![
                PatternRule::at_least(Dimension::Aether, 75.0),
                PatternRule::at_least(Dimension::Umbra, 70.0),
                PatternRule::at_most(Dimension::Ignis, 40.0),
            ],
            strengths: strings(&[
                "Comfort with hard and unresolved questions",
                "Judgment that improves under pressure",
                "Honesty about what is actually known",
            ]),
            challenges: strings(&[
                "Endless analysis in place of action",
                "Distance from everyday warmth",
                "Pessimism disguised as realism",
            ]),
            life_purpose: "To understand deeply and hand that understanding on".to_string(),
            relationships: "Your care is quiet and easily missed; say plainly what those \
                close to you mean to you."
                .to_string(),
            career_paths: strings(&[
                "Research and scholarship",
                "Strategy",
                "Mentorship",
                "Writing",
            ]),
            growth_direction: "Let some understanding become action before it is complete."
                .to_string(),
        },
        Archetype {
            name: "The Wanderer".to_string(),
            essence: "A compass that points toward the unknown".to_string(),
            description: "You move toward what you have not yet seen, with imagination as the \
                map and appetite as the engine. Routine is the only country you cannot live in."
                .to_string(),
            pattern: vec![
                PatternRule::at_least(Dimension::Lumen, 70.0),
                PatternRule::at_least(Dimension::Ignis, 65.0),
                PatternRule::at_most(Dimension::Chronos, 35.0),
            ],
            strengths: strings(&[
                "Thriving in unfamiliar territory",
                "Improvising when plans dissolve",
                "Bringing back what the settled world cannot find",
            ]),
            challenges: strings(&[
                "Restlessness that uproots good things",
                "Commitments that feel like cages",
                "Mistaking motion for progress",
            ]),
            life_purpose: "To explore on behalf of everyone who stayed home".to_string(),
            relationships: "You love best those who travel beside you without holding the \
                leash; be honest early about your need for open doors."
                .to_string(),
            career_paths: strings(&[
                "Field work and travel",
                "Journalism",
                "Freelance craft",
                "Expedition and guiding",
            ]),
            growth_direction: "Choose a few anchors worth returning to, and return.".to_string(),
        },
        Archetype {
            name: "The Anchor".to_string(),
            essence: "Calm, order, and a long memory for what works".to_string(),
            description: "You are the still point: organized, grounded, and impossible to \
                rattle. Around you, other people's lives become more livable."
                .to_string(),
            pattern: vec![
                PatternRule::at_least(Dimension::Terra, 75.0),
                PatternRule::at_least(Dimension::Chronos, 70.0),
                PatternRule::at_most(Dimension::Umbra, 40.0),
            ],
            strengths: strings(&[
                "Consistency people can build on",
                "Practical wisdom over drama",
                "Keeping promises nobody remembers making",
            ]),
            challenges: strings(&[
                "Avoiding necessary confrontation",
                "Equating change with threat",
                "Deferring your own wants indefinitely",
            ]),
            life_purpose: "To be the steady ground a good life is built on".to_string(),
            relationships: "Your steadiness is a gift; pair it with saying what you need, \
                not only what you can give."
                .to_string(),
            career_paths: strings(&[
                "Administration",
                "Logistics",
                "Skilled trades",
                "Long-horizon stewardship",
            ]),
            growth_direction: "Rock the boat on purpose once in a while; some storms are \
                yours to start."
                .to_string(),
        },
    ]
}

fn renaissance_soul() -> Archetype {
    Archetype {
        name: "The Renaissance Soul".to_string(),
        essence: "Breadth held in balance".to_string(),
        description: "No single current dominates you; instead you move fluidly between \
            worlds that specialists never cross. Your gift is range — and the perspective \
            that only range can buy."
            .to_string(),
        pattern: Vec::new(),
        strengths: strings(&[
            "Translating between very different kinds of people",
            "Adapting to whatever a situation asks",
            "Learning anything you decide to learn",
        ]),
        challenges: strings(&[
            "Envying the certainty of the single-minded",
            "Spreading attention until nothing deepens",
            "Undervaluing your own versatility",
        ]),
        life_purpose: "To connect what specialization keeps apart".to_string(),
        relationships: "You meet people where they are, in nearly any world they live in; \
            let a few of them meet all of you."
            .to_string(),
        career_paths: strings(&[
            "Generalist leadership",
            "Product and program work",
            "Education",
            "Interdisciplinary craft",
        ]),
        growth_direction: "Pick one thread to follow deeply this season, without dropping \
            the loom."
            .to_string(),
    }
}

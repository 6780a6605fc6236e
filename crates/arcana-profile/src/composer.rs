//! Narrative document composition.
//!
//! Deterministic assembly from validated templates is the baseline; an
//! optional generator stage may rewrite the seven prose sections. Every
//! generated section passes the vocabulary guard or is regenerated, and any
//! section that still fails falls back to the assembled text, so composition
//! as a whole never fails on generator misbehavior.

use crate::archetype::{Archetype, ArchetypeCatalog};
use crate::generator::TextGenerator;
use crate::level::Level;
use crate::prompts::{self, NarrativeSection};
use crate::template::{SectionTemplate, TemplateCatalog};
use crate::validator::VocabularyGuard;
use arcana_core::{Dimension, DimensionScores, NarrativeConfig, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Number of dimensions highlighted at the top of a document.
const TOP_DIMENSIONS: usize = 3;

/// Where a section's prose came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionSource {
    /// Assembled deterministically from template fields.
    Assembled,
    /// Produced by the generator and accepted by the vocabulary guard.
    Generated,
}

/// How section prose is produced.
#[derive(Clone, Default)]
pub enum GenerationMode {
    #[default]
    Deterministic,
    WithGenerator(Arc<dyn TextGenerator>),
}

impl std::fmt::Debug for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationMode::Deterministic => f.write_str("Deterministic"),
            GenerationMode::WithGenerator(g) => {
                f.debug_tuple("WithGenerator").field(&g.name()).finish()
            }
        }
    }
}

/// One highlighted dimension in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopDimension {
    pub dimension: Dimension,
    pub score: f64,
    pub level: Level,
    pub title: String,
}

/// Per-dimension narrative block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionNarrative {
    pub dimension: Dimension,
    pub score: f64,
    pub level: Level,
    pub template: SectionTemplate,
}

/// One of the seven prose sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionText {
    pub section: NarrativeSection,
    pub heading: String,
    pub text: String,
    pub source: SectionSource,
}

/// Matched-archetype header of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypeSummary {
    pub name: String,
    pub essence: String,
    pub description: String,
    pub life_purpose: String,
}

/// A complete composed narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeDocument {
    pub archetype: ArchetypeSummary,
    pub top_dimensions: Vec<TopDimension>,
    pub dimension_narratives: Vec<DimensionNarrative>,
    pub sections: Vec<SectionText>,
    pub summary: String,
    /// One glyph per dimension, in fixed dimension order.
    pub profile_pattern: String,
}

/// Composes narrative documents from dimensional scores.
#[derive(Debug)]
pub struct NarrativeComposer {
    templates: TemplateCatalog,
    archetypes: ArchetypeCatalog,
    guard: VocabularyGuard,
    retry_attempts: u32,
    mode: GenerationMode,
}

impl NarrativeComposer {
    /// Composer over the bundled catalogs, deterministic assembly only.
    pub fn bundled() -> Result<Self> {
        Ok(Self {
            templates: TemplateCatalog::bundled()?,
            archetypes: ArchetypeCatalog::bundled(),
            guard: VocabularyGuard::new(),
            retry_attempts: NarrativeConfig::default().retry_attempts,
            mode: GenerationMode::Deterministic,
        })
    }

    pub fn new(
        templates: TemplateCatalog,
        archetypes: ArchetypeCatalog,
        config: &NarrativeConfig,
        mode: GenerationMode,
    ) -> Self {
        Self {
            templates,
            archetypes,
            guard: VocabularyGuard::with_config(config),
            retry_attempts: config.retry_attempts,
            mode,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.mode = GenerationMode::WithGenerator(generator);
        self
    }

    /// Best-matching archetype for a score vector.
    pub fn match_archetype(&self, scores: &DimensionScores) -> &Archetype {
        self.archetypes.match_scores(scores)
    }

    /// Compose a full document for a score vector and its matched archetype.
    pub async fn compose(
        &self,
        scores: &DimensionScores,
        archetype: &Archetype,
    ) -> Result<NarrativeDocument> {
        let dimension_narratives = self.dimension_narratives(scores)?;
        let top_dimensions = self.top_dimensions(scores, &dimension_narratives);

        let mut sections = Vec::with_capacity(NarrativeSection::ALL.len());
        for section in NarrativeSection::ALL {
            sections.push(
                self.compose_section(section, archetype, &dimension_narratives, scores)
                    .await,
            );
        }

        let summary = self.summary_line(archetype, &top_dimensions);
        let profile_pattern = profile_pattern(scores);

        tracing::info!(
            archetype = %archetype.name,
            generated = sections
                .iter()
                .filter(|s| s.source == SectionSource::Generated)
                .count(),
            "composed narrative document"
        );

        Ok(NarrativeDocument {
            archetype: ArchetypeSummary {
                name: archetype.name.clone(),
                essence: archetype.essence.clone(),
                description: archetype.description.clone(),
                life_purpose: archetype.life_purpose.clone(),
            },
            top_dimensions,
            dimension_narratives,
            sections,
            summary,
            profile_pattern,
        })
    }

    fn dimension_narratives(&self, scores: &DimensionScores) -> Result<Vec<DimensionNarrative>> {
        Dimension::ALL
            .into_iter()
            .map(|dimension| {
                let score = scores.get(dimension).unwrap_or(50.0);
                let level = Level::from_score(score);
                let template = self.templates.template(dimension, level)?.clone();
                Ok(DimensionNarrative {
                    dimension,
                    score,
                    level,
                    template,
                })
            })
            .collect()
    }

    fn top_dimensions(
        &self,
        scores: &DimensionScores,
        narratives: &[DimensionNarrative],
    ) -> Vec<TopDimension> {
        scores
            .top(TOP_DIMENSIONS)
            .into_iter()
            .filter_map(|dimension| {
                let narrative = narratives.iter().find(|n| n.dimension == dimension)?;
                Some(TopDimension {
                    dimension,
                    score: narrative.score,
                    level: narrative.level,
                    title: narrative.template.title.clone(),
                })
            })
            .collect()
    }

    /// One section, generator-first when a generator is attached.
    async fn compose_section(
        &self,
        section: NarrativeSection,
        archetype: &Archetype,
        narratives: &[DimensionNarrative],
        scores: &DimensionScores,
    ) -> SectionText {
        let assembled = assemble_section(section, narratives);

        let text_and_source = match &self.mode {
            GenerationMode::Deterministic => None,
            GenerationMode::WithGenerator(generator) => {
                self.generate_section(section, archetype, scores, generator.as_ref())
                    .await
            }
        };

        match text_and_source {
            Some(text) => SectionText {
                section,
                heading: section.heading().to_string(),
                text,
                source: SectionSource::Generated,
            },
            None => SectionText {
                section,
                heading: section.heading().to_string(),
                text: assembled,
                source: SectionSource::Assembled,
            },
        }
    }

    /// Generate one section, retrying rejected output before giving up.
    async fn generate_section(
        &self,
        section: NarrativeSection,
        archetype: &Archetype,
        scores: &DimensionScores,
        generator: &dyn TextGenerator,
    ) -> Option<String> {
        let observations: Vec<String> = scores
            .top(TOP_DIMENSIONS)
            .into_iter()
            .map(|d| {
                let score = scores.get(d).unwrap_or(50.0);
                prompts::describe_dimension(d, Level::from_score(score))
            })
            .collect();
        let prompt = prompts::format_section_prompt(section, &archetype.essence, &observations);

        for attempt in 0..=self.retry_attempts {
            match generator.generate(&prompt).await {
                Ok(text) => {
                    let text = text.trim().to_string();
                    match self.guard.find_forbidden(&text) {
                        None if !text.is_empty() => return Some(text),
                        None => {
                            tracing::warn!(section = section.key(), attempt, "empty generation");
                        }
                        Some(word) => {
                            tracing::warn!(
                                section = section.key(),
                                attempt,
                                word = %word,
                                "generated text rejected by vocabulary guard"
                            );
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(section = section.key(), attempt, error = %e, "generation failed");
                }
            }
        }

        tracing::warn!(
            section = section.key(),
            "falling back to assembled section text"
        );
        None
    }

    fn summary_line(&self, archetype: &Archetype, top: &[TopDimension]) -> String {
        let titles: Vec<&str> = top.iter().map(|t| t.title.as_str()).collect();
        match titles.as_slice() {
            [] => archetype.essence.clone(),
            [only] => format!("{} Above all: {only}.", archetype.essence),
            [first, rest @ ..] => format!(
                "{} Strongest in you: {first}, alongside {}.",
                archetype.essence,
                rest.join(" and ")
            ),
        }
    }
}

/// Glyph strip over all dimensions in fixed order.
pub fn profile_pattern(scores: &DimensionScores) -> String {
    Dimension::ALL
        .iter()
        .map(|d| Level::from_score(scores.get(*d).unwrap_or(50.0)).glyph())
        .collect()
}

/// Deterministic prose for one section from the per-dimension templates.
///
/// Each section draws on a fixed template field, leading with the three
/// highest-scoring dimensions' material.
fn assemble_section(section: NarrativeSection, narratives: &[DimensionNarrative]) -> String {
    let mut ranked: Vec<&DimensionNarrative> = narratives.iter().collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.dimension.code().cmp(b.dimension.code()))
    });
    let leading = &ranked[..ranked.len().min(TOP_DIMENSIONS)];

    match section {
        NarrativeSection::CoreIdentity => join_sentences(
            leading.iter().map(|n| n.template.core_nature.clone()),
        ),
        NarrativeSection::Motivations => join_listed(
            leading.iter().map(|n| n.template.motivations[0].clone()),
            "You are moved by",
        ),
        NarrativeSection::Conflicts => join_sentences(
            leading.iter().map(|n| n.template.under_stress.clone()),
        ),
        NarrativeSection::Strengths => join_listed(
            leading.iter().map(|n| n.template.strengths[0].clone()),
            "Your gifts include",
        ),
        NarrativeSection::GrowthAreas => join_sentences(
            leading.iter().map(|n| n.template.growth_path.clone()),
        ),
        NarrativeSection::Relationships => join_sentences(
            leading.iter().map(|n| n.template.in_relationships.clone()),
        ),
        NarrativeSection::WorkStyle => join_sentences(
            leading.iter().map(|n| n.template.at_work.clone()),
        ),
    }
}

fn join_sentences(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(" ")
}

fn join_listed(parts: impl Iterator<Item = String>, lead: &str) -> String {
    let mut items: Vec<String> = parts.collect();
    for item in &mut items {
        let mut chars = item.chars();
        if let Some(first) = chars.next() {
            *item = first.to_lowercase().chain(chars).collect();
        }
    }
    format!("{lead} {}.", items.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GeneratorError, GeneratorResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays a fixed script; `None` entries simulate failures. The last
    /// entry repeats once the script runs out.
    struct ScriptedGenerator {
        responses: Vec<Option<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedGenerator {
        fn new(responses: Vec<Option<String>>) -> Self {
            Self {
                responses,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, _prompt: &str) -> GeneratorResult<String> {
            let i = self.calls.fetch_add(1, Ordering::SeqCst);
            let slot = i.min(self.responses.len().saturating_sub(1));
            match self.responses.get(slot) {
                Some(Some(text)) => Ok(text.clone()),
                _ => Err(GeneratorError::Failed("scripted failure".into())),
            }
        }
    }

    async fn compose(composer: &NarrativeComposer, scores: &DimensionScores) -> NarrativeDocument {
        let archetype = composer.match_archetype(scores);
        composer.compose(scores, archetype).await.unwrap()
    }

    fn sample_scores() -> DimensionScores {
        let mut scores = DimensionScores::uniform(50.0);
        scores.set(Dimension::Lumen, 85.0);
        scores.set(Dimension::Vesper, 78.0);
        scores.set(Dimension::Aether, 72.0);
        scores.set(Dimension::Chronos, 30.0);
        scores
    }

    #[tokio::test]
    async fn test_deterministic_compose_is_complete() {
        let composer = NarrativeComposer::bundled().unwrap();
        let doc = compose(&composer, &sample_scores()).await;

        assert_eq!(doc.archetype.name, "The Luminary");
        assert_eq!(doc.top_dimensions.len(), 3);
        assert_eq!(doc.top_dimensions[0].dimension, Dimension::Lumen);
        assert_eq!(doc.dimension_narratives.len(), 8);
        assert_eq!(doc.sections.len(), 7);
        assert!(doc
            .sections
            .iter()
            .all(|s| s.source == SectionSource::Assembled && !s.text.is_empty()));
        assert_eq!(doc.profile_pattern.chars().count(), 8);
    }

    #[tokio::test]
    async fn test_all_assembled_text_passes_the_guard() {
        let composer = NarrativeComposer::bundled().unwrap();
        let guard = VocabularyGuard::new();

        for base in [5.0, 30.0, 50.0, 65.0, 90.0] {
            let doc = compose(&composer, &DimensionScores::uniform(base)).await;
            for section in &doc.sections {
                assert!(
                    guard.find_forbidden(&section.text).is_none(),
                    "leak in {} at base {base}: {}",
                    section.heading,
                    section.text
                );
            }
        }
    }

    #[tokio::test]
    async fn test_generator_output_used_when_clean() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Some(
            "You move through the world with an open, curious heart.".to_string(),
        )]));
        let composer = NarrativeComposer::bundled()
            .unwrap()
            .with_generator(generator);

        let doc = compose(&composer, &sample_scores()).await;
        assert!(doc
            .sections
            .iter()
            .all(|s| s.source == SectionSource::Generated));
    }

    #[tokio::test]
    async fn test_forbidden_generation_retried_then_fallback() {
        // Every call returns text the guard rejects; with one retry the
        // generator is consulted twice per section before fallback.
        let rejected = Some("Your LUMEN reading is off the charts.".to_string());
        let generator = Arc::new(ScriptedGenerator::new(vec![rejected; 20]));
        let composer = NarrativeComposer::bundled()
            .unwrap()
            .with_generator(Arc::clone(&generator) as Arc<dyn TextGenerator>);

        let doc = compose(&composer, &sample_scores()).await;
        assert!(doc
            .sections
            .iter()
            .all(|s| s.source == SectionSource::Assembled));
        assert_eq!(
            generator.calls.load(Ordering::SeqCst),
            NarrativeSection::ALL.len() * 2
        );
    }

    #[tokio::test]
    async fn test_failing_generator_never_fails_composition() {
        let generator = Arc::new(ScriptedGenerator::new(vec![None]));
        let composer = NarrativeComposer::bundled()
            .unwrap()
            .with_generator(generator);

        let doc = compose(&composer, &sample_scores()).await;
        assert_eq!(doc.sections.len(), 7);
        assert!(doc
            .sections
            .iter()
            .all(|s| s.source == SectionSource::Assembled));
    }

    #[tokio::test]
    async fn test_flat_profile_falls_back_to_renaissance_soul() {
        let composer = NarrativeComposer::bundled().unwrap();
        let doc = compose(&composer, &DimensionScores::uniform(50.0)).await;
        assert_eq!(doc.archetype.name, "The Renaissance Soul");
        assert_eq!(doc.profile_pattern, "▄▄▄▄▄▄▄▄");
    }
}

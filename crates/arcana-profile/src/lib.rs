//! # Arcana-Profile
//!
//! Turns dimensional scores into reader-facing narrative: archetype
//! matching, level quantization, validated narrative templates, and a
//! composer with an optional generator enrichment stage.

pub mod archetype;
pub mod composer;
pub mod generator;
pub mod level;
pub mod prompts;
pub mod template;
pub mod validator;

pub use archetype::{Archetype, ArchetypeCatalog, PatternOp, PatternRule};
pub use composer::{
    profile_pattern, ArchetypeSummary, DimensionNarrative, GenerationMode, NarrativeComposer,
    NarrativeDocument, SectionSource, SectionText, TopDimension,
};
pub use generator::{GeneratorError, GeneratorResult, TextGenerator};
pub use level::Level;
pub use prompts::NarrativeSection;
pub use template::{SectionTemplate, TemplateCatalog};
pub use validator::VocabularyGuard;

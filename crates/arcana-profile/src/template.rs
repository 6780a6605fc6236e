//! Narrative template catalog.
//!
//! One template per (dimension, level) pair, loaded from a JSON snapshot and
//! validated exhaustively at load time: every pair present, every list long
//! enough, every field clean of forbidden vocabulary. Lookups after a
//! successful load cannot fail.

use crate::level::Level;
use crate::validator::VocabularyGuard;
use arcana_core::{Dimension, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimum entries required in each list field.
const MIN_LIST_LEN: usize = 3;

/// Narrative building blocks for one (dimension, level) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionTemplate {
    pub title: String,
    pub core_nature: String,
    pub description: String,
    pub inner_world: String,
    pub motivations: Vec<String>,
    pub fears: Vec<String>,
    pub strengths: Vec<String>,
    pub shadows: Vec<String>,
    pub in_relationships: String,
    pub at_work: String,
    pub under_stress: String,
    pub at_best: String,
    pub growth_path: String,
}

impl SectionTemplate {
    fn prose_fields(&self) -> [(&'static str, &str); 9] {
        [
            ("title", &self.title),
            ("core_nature", &self.core_nature),
            ("description", &self.description),
            ("inner_world", &self.inner_world),
            ("in_relationships", &self.in_relationships),
            ("at_work", &self.at_work),
            ("under_stress", &self.under_stress),
            ("at_best", &self.at_best),
            ("growth_path", &self.growth_path),
        ]
    }

    fn list_fields(&self) -> [(&'static str, &Vec<String>); 4] {
        [
            ("motivations", &self.motivations),
            ("fears", &self.fears),
            ("strengths", &self.strengths),
            ("shadows", &self.shadows),
        ]
    }
}

/// Complete catalog covering all dimensions at all levels.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: BTreeMap<(Dimension, Level), SectionTemplate>,
}

impl TemplateCatalog {
    /// Loads and validates a catalog from its JSON snapshot form:
    /// a map of dimension code to a map of level key to template.
    pub fn from_snapshot(raw: &str) -> Result<Self> {
        let parsed: BTreeMap<String, BTreeMap<String, SectionTemplate>> =
            serde_json::from_str(raw)?;
        let guard = VocabularyGuard::new();
        let mut templates = BTreeMap::new();

        for (code, by_level) in parsed {
            let dimension = Dimension::from_code(&code).ok_or_else(|| {
                Error::PoolFormat(format!("unknown dimension code {code:?} in template catalog"))
            })?;
            for (key, template) in by_level {
                let level = level_from_key(&key).ok_or_else(|| {
                    Error::PoolFormat(format!("unknown level key {key:?} in template catalog"))
                })?;
                validate_template(&guard, dimension, level, &template)?;
                templates.insert((dimension, level), template);
            }
        }

        for dimension in Dimension::ALL {
            for level in Level::ALL {
                if !templates.contains_key(&(dimension, level)) {
                    return Err(Error::TemplateMissing {
                        dimension,
                        level: level.key().to_string(),
                    });
                }
            }
        }

        tracing::debug!(templates = templates.len(), "loaded narrative template catalog");
        Ok(Self { templates })
    }

    /// The bundled catalog. Validated at load, so failure here means the
    /// shipped asset is broken.
    pub fn bundled() -> Result<Self> {
        Self::from_snapshot(include_str!("../assets/templates.json"))
    }

    /// Template for a (dimension, level) pair. Total after a successful load.
    pub fn template(&self, dimension: Dimension, level: Level) -> Result<&SectionTemplate> {
        self.templates
            .get(&(dimension, level))
            .ok_or(Error::TemplateMissing {
                dimension,
                level: level.key().to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn level_from_key(key: &str) -> Option<Level> {
    Level::ALL.into_iter().find(|l| l.key() == key)
}

fn validate_template(
    guard: &VocabularyGuard,
    dimension: Dimension,
    level: Level,
    template: &SectionTemplate,
) -> Result<()> {
    for (field, text) in template.prose_fields() {
        if text.trim().is_empty() {
            return Err(Error::PoolFormat(format!(
                "empty field {field} in template ({dimension}, {})",
                level.key()
            )));
        }
        guard.check(text)?;
    }
    for (field, entries) in template.list_fields() {
        if entries.len() < MIN_LIST_LEN {
            return Err(Error::PoolFormat(format!(
                "field {field} in template ({dimension}, {}) needs at least {MIN_LIST_LEN} entries",
                level.key()
            )));
        }
        for entry in entries {
            guard.check(entry)?;
        }
    }
    Ok(())
}

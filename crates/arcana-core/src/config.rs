//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Tuning for the adaptive tester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveConfig {
    /// Minimum answered items per dimension before termination is allowed.
    pub min_per_dimension: usize,

    /// Hard cap on answered items.
    pub max_items: usize,

    /// Standard-error threshold on the unit scale below which a dimension
    /// is considered settled.
    pub uncertainty_threshold: f64,

    /// Answered items before emergency recovery for uncovered dimensions
    /// kicks in.
    pub warmup_items: usize,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            min_per_dimension: 2,
            max_items: 54,
            uncertainty_threshold: 0.3,
            warmup_items: 5,
        }
    }
}

/// Tuning for narrative composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeConfig {
    /// Additional forbidden words beyond the built-in vocabulary guard.
    pub forbidden_words: Vec<String>,

    /// Regeneration attempts after a rejected generator response, before
    /// falling back to deterministic assembly.
    pub retry_attempts: u32,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            forbidden_words: Vec::new(),
            retry_attempts: 1,
        }
    }
}

/// Complete core configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub adaptive: AdaptiveConfig,
    pub narrative: NarrativeConfig,
}

impl CoreConfig {
    /// Load configuration from a file, with `ARCANA_`-prefixed environment
    /// variables layered on top.
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("ARCANA").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Load from environment variables only.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("ARCANA").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

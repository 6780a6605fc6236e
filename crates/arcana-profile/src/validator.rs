//! Vocabulary guard for reader-facing narrative text.
//!
//! Narrative output must read as plain language about a person. Internal
//! dimension codes, dimension display names, and measurement jargon are
//! rejected wherever they appear, whether the text came from a template
//! file or from a generator.

use arcana_core::{Dimension, Error, NarrativeConfig, Result};

/// Measurement jargon that must never reach a reader.
const JARGON: &[&str] = &[
    "psychometric",
    "questionnaire",
    "trait",
    "traits",
    "subscale",
    "percentile",
    "quantile",
    "correlation",
    "likert",
    "reverse-keyed",
    "item pool",
];

/// Checks narrative text against the built-in forbidden vocabulary plus any
/// configured extra words.
#[derive(Debug, Clone, Default)]
pub struct VocabularyGuard {
    extra: Vec<String>,
}

impl VocabularyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &NarrativeConfig) -> Self {
        Self {
            extra: config
                .forbidden_words
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
        }
    }

    /// Returns the first forbidden word found in `text`, if any.
    ///
    /// Matching is case-insensitive. Single words match on token boundaries,
    /// so "terrace" does not trip on a dimension code; multi-word phrases
    /// match as substrings of the folded text.
    pub fn find_forbidden(&self, text: &str) -> Option<String> {
        let folded = text.to_lowercase();
        let tokens: Vec<&str> = folded
            .split(|c: char| !c.is_alphanumeric() && c != '-')
            .filter(|t| !t.is_empty())
            .collect();

        for dim in Dimension::ALL {
            let code = dim.code().to_lowercase();
            if tokens.iter().any(|t| *t == code) {
                return Some(code);
            }
            let name = dim.name().to_lowercase();
            if folded.contains(&name) {
                return Some(name);
            }
        }

        for word in JARGON.iter().copied().chain(self.extra.iter().map(String::as_str)) {
            if word.contains(' ') {
                if folded.contains(word) {
                    return Some(word.to_string());
                }
            } else if tokens.iter().any(|t| *t == word) {
                return Some(word.to_string());
            }
        }

        None
    }

    /// Errors unless `text` is free of forbidden vocabulary.
    pub fn check(&self, text: &str) -> Result<()> {
        match self.find_forbidden(text) {
            Some(word) => Err(Error::NarrativeValidation { word }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_passes() {
        let guard = VocabularyGuard::new();
        assert!(guard
            .check("You carry a steady warmth that people trust quickly.")
            .is_ok());
    }

    #[test]
    fn test_dimension_code_rejected() {
        let guard = VocabularyGuard::new();
        let err = guard
            .check("Your LUMEN energy shapes everything you touch.")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::NarrativeValidation { ref word } if word == "lumen"
        ));
    }

    #[test]
    fn test_dimension_name_rejected() {
        let guard = VocabularyGuard::new();
        assert!(guard
            .check("Your Visionary Spark burns brightly in every room.")
            .is_err());
    }

    #[test]
    fn test_jargon_rejected_case_insensitive() {
        let guard = VocabularyGuard::new();
        assert!(guard.check("This Trait defines you.").is_err());
        assert!(guard.check("a high-percentile result").is_err());
    }

    #[test]
    fn test_token_boundaries_respected() {
        let guard = VocabularyGuard::new();
        // Codes must match whole tokens, not substrings of ordinary words.
        assert!(guard.check("a sunlit terrace overlooking the sea").is_ok());
        assert!(guard.check("portraits of people you love").is_ok());
    }

    #[test]
    fn test_configured_extra_words() {
        let config = NarrativeConfig {
            forbidden_words: vec!["synergy".to_string()],
            retry_attempts: 1,
        };
        let guard = VocabularyGuard::with_config(&config);
        assert!(guard.check("Pure synergy with your team.").is_err());
        assert!(VocabularyGuard::new()
            .check("Pure synergy with your team.")
            .is_ok());
    }
}

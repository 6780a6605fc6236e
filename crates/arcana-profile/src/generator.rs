//! Text-generator seam for narrative composition.
//!
//! The composer works fully offline; a [`TextGenerator`] implementation is an
//! optional enrichment stage. Anything that can turn a prompt into prose can
//! plug in here, whether a hosted model, a local one, or a scripted stand-in
//! for tests.

use async_trait::async_trait;

/// Result type for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Generator error types
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("generation failed: {0}")]
    Failed(String),

    #[error("timeout after {0}ms")]
    Timeout(u64),
}

/// A source of free-form prose for narrative sections.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generator name/identifier
    fn name(&self) -> &str;

    /// Produce prose for a single section prompt.
    async fn generate(&self, prompt: &str) -> GeneratorResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            GeneratorError::Failed("connection refused".into()).to_string(),
            "generation failed: connection refused"
        );
        assert_eq!(
            GeneratorError::Timeout(30_000).to_string(),
            "timeout after 30000ms"
        );
    }
}

//! Error types for the Arcana assessment core.

use crate::dimension::Dimension;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("dimension {dimension} has no answered items")]
    DimensionUncovered { dimension: Dimension },

    #[error("item pool exhausted before termination criteria were satisfied")]
    NoItemsRemaining,

    #[error("no narrative template for ({dimension}, {level})")]
    TemplateMissing { dimension: Dimension, level: String },

    #[error("narrative text contained forbidden vocabulary: {word:?}")]
    NarrativeValidation { word: String },

    #[error("friend quality scoring requires at least one response")]
    InsufficientResponses,

    #[error("malformed pool snapshot: {0}")]
    PoolFormat(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

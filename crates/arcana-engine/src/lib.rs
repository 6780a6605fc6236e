//! # Arcana-Engine
//!
//! Adaptive item selection, dimensional scoring, friend-response quality
//! scoring, and score fusion for the Arcana assessment.

pub mod fusion;
pub mod quality;
pub mod scorer;
pub mod tester;

pub use fusion::fuse;
pub use quality::{
    score_quality, quality_rows, QualityBreakdown, QualityReport, QualityResponse, WeightClass,
};
pub use scorer::{score_dimension, score_self};
pub use tester::{AdaptiveTester, Selection};

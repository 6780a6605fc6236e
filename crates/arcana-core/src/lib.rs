//! # Arcana-Core
//!
//! Core types for the Arcana adaptive personality assessment: the eight
//! trait dimensions, the immutable item pool, the participant session
//! record, score vectors, configuration, and error types.

pub mod config;
pub mod dimension;
pub mod error;
pub mod item;
pub mod pool;
pub mod scores;
pub mod session;

pub use config::{AdaptiveConfig, CoreConfig, NarrativeConfig};
pub use dimension::Dimension;
pub use error::{Error, Result};
pub use item::{Item, ItemId, Response, MAX_VALUE, MIN_VALUE};
pub use pool::ItemPool;
pub use scores::DimensionScores;
pub use session::{Session, SessionEvent, SessionEventKind, SessionId};

//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod dream;
pub mod error;
pub mod locale;
pub mod recording;

// Re-export common types
pub use config::AppConfig;
pub use dream::{
    AudioData, AudioMimeType, CallOutcome, DreamHistory, DreamRecord, DreamSession, DreamState,
    Emotion, EmotionLabel, GeneratedImage, Operation,
};
pub use error::*;
pub use locale::Locale;
pub use recording::Duration;

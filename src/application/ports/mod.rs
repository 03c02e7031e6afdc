//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod emotion;
pub mod image;
pub mod recorder;
pub mod secrets;
pub mod transcriber;

// Re-export common types
pub use config::ConfigStore;
pub use emotion::EmotionClassifier;
pub use image::ImageSynthesizer;
pub use recorder::{AudioRecorder, ProgressCallback, RecordingError};
pub use secrets::{SecretStore, SecretStoreError};
pub use transcriber::Transcriber;

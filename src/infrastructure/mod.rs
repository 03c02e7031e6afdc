//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with Groq, Clipdrop, Mistral, the microphone and the filesystem.

pub mod config;
pub mod emotion;
mod http;
pub mod image;
pub mod recording;
pub mod secrets;
pub mod transcription;

// Re-export adapters
pub use config::XdgConfigStore;
pub use emotion::MistralEmotionClassifier;
pub use image::ClipdropImageSynthesizer;
pub use recording::CpalRecorder;
pub use secrets::TomlSecretStore;
pub use transcription::GroqTranscriber;

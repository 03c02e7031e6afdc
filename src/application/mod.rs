//! Application layer - Use cases and port interfaces
//!
//! Contains the dream orchestration, credential resolution and the
//! trait definitions for external system interactions.

pub mod credentials;
pub mod orchestrator;
pub mod ports;

// Re-export use cases
pub use credentials::{ApiKey, CredentialChannel, CredentialError, CredentialProvider};
pub use orchestrator::{DreamOrchestrator, EmotionAnalysis};

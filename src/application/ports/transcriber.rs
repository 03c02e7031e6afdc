//! Transcription port interface

use async_trait::async_trait;

use crate::domain::dream::AudioData;
use crate::domain::error::CapabilityError;

/// Port for speech-to-text transcription
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe audio data to text.
    ///
    /// # Arguments
    /// * `audio` - The audio bytes and file name hint
    /// * `prompt` - Priming text that biases the vocabulary toward dream narration
    ///
    /// # Returns
    /// The trimmed, non-empty transcript or a normalized failure
    async fn transcribe(&self, audio: &AudioData, prompt: &str) -> Result<String, CapabilityError>;
}

//! Emotion classification port interface

use async_trait::async_trait;

use crate::domain::dream::Emotion;
use crate::domain::error::CapabilityError;

/// Port for dream emotion classification
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    /// Classify the dominant emotion of a dream.
    ///
    /// # Arguments
    /// * `dream_text` - The transcribed dream, sent as the user message
    /// * `instruction` - System instruction restricting the answer to the label set
    ///
    /// # Returns
    /// The emotion, `CapabilityError::NoResult` when the response carried no
    /// label, or another failure
    async fn classify(&self, dream_text: &str, instruction: &str)
        -> Result<Emotion, CapabilityError>;
}

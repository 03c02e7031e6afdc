//! Image synthesis port interface

use async_trait::async_trait;

use crate::domain::dream::GeneratedImage;
use crate::domain::error::CapabilityError;

/// Port for text-to-image generation
#[async_trait]
pub trait ImageSynthesizer: Send + Sync {
    /// Generate an illustration for the given prompt text.
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, CapabilityError>;
}

//! Recording port interface

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::dream::AudioData;
use crate::domain::recording::Duration;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Recording failed: {0}")]
    RecordingFailed(String),

    #[error("No audio captured: {0}")]
    NothingCaptured(String),

    #[error("No audio device available")]
    NoAudioDevice,
}

/// Progress callback type for reporting recording progress.
/// Parameters: (elapsed_ms, total_ms)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Port for bounded microphone recording
#[async_trait]
pub trait AudioRecorder: Send + Sync {
    /// Record a spoken dream for a fixed duration.
    ///
    /// # Arguments
    /// * `duration` - How long to record
    /// * `on_progress` - Optional callback for progress updates
    async fn record(
        &self,
        duration: Duration,
        on_progress: Option<ProgressCallback>,
    ) -> Result<AudioData, RecordingError>;
}

//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::locale::Locale;
use crate::domain::recording::Duration;

/// Default speech-to-text model
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-large-v3";

/// Default chat model used for emotion classification
pub const DEFAULT_EMOTION_MODEL: &str = "mistral-small-latest";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub locale: Option<String>,
    pub transcription_model: Option<String>,
    pub emotion_model: Option<String>,
    pub request_timeout: Option<String>,
    pub transcription_timeout: Option<String>,
    pub record_duration: Option<String>,
    pub output_dir: Option<String>,
    pub secrets_path: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            locale: Some(Locale::default().to_string()),
            transcription_model: Some(DEFAULT_TRANSCRIPTION_MODEL.to_string()),
            emotion_model: Some(DEFAULT_EMOTION_MODEL.to_string()),
            request_timeout: Some(Duration::default_request_timeout().to_string()),
            transcription_timeout: None,
            record_duration: Some(Duration::default_record().to_string()),
            output_dir: Some(".".to_string()),
            secrets_path: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            locale: other.locale.or(self.locale),
            transcription_model: other.transcription_model.or(self.transcription_model),
            emotion_model: other.emotion_model.or(self.emotion_model),
            request_timeout: other.request_timeout.or(self.request_timeout),
            transcription_timeout: other.transcription_timeout.or(self.transcription_timeout),
            record_duration: other.record_duration.or(self.record_duration),
            output_dir: other.output_dir.or(self.output_dir),
            secrets_path: other.secrets_path.or(self.secrets_path),
        }
    }

    /// Get locale, or English if not set/invalid
    pub fn locale_or_default(&self) -> Locale {
        self.locale
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn transcription_model_or_default(&self) -> &str {
        self.transcription_model
            .as_deref()
            .unwrap_or(DEFAULT_TRANSCRIPTION_MODEL)
    }

    pub fn emotion_model_or_default(&self) -> &str {
        self.emotion_model.as_deref().unwrap_or(DEFAULT_EMOTION_MODEL)
    }

    /// Timeout for the image and emotion services, or 30s if not set/invalid
    pub fn request_timeout_or_default(&self) -> Duration {
        self.request_timeout
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_request_timeout)
    }

    /// Timeout for the transcription service. None means wait indefinitely.
    pub fn transcription_timeout(&self) -> Option<Duration> {
        self.transcription_timeout
            .as_ref()
            .and_then(|s| s.parse().ok())
    }

    /// Get microphone recording length, or default if not set/invalid
    pub fn record_duration_or_default(&self) -> Duration {
        self.record_duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_record)
    }

    /// Directory where generated images are saved
    pub fn output_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.output_dir.as_deref().unwrap_or("."))
    }

    pub fn secrets_path(&self) -> Option<PathBuf> {
        self.secrets_path.as_ref().map(PathBuf::from)
    }
}

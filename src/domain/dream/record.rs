//! Dream record entity

use chrono::{DateTime, Local};

use super::emotion::Emotion;

/// Timestamp format used when displaying history entries
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A completed dream, committed to history after a successful emotion analysis.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct DreamRecord {
    committed_at: DateTime<Local>,
    transcription: String,
    emotion: Emotion,
    image_generated: bool,
}

impl DreamRecord {
    pub(crate) fn new(
        committed_at: DateTime<Local>,
        transcription: String,
        emotion: Emotion,
        image_generated: bool,
    ) -> Self {
        Self {
            committed_at,
            transcription,
            emotion,
            image_generated,
        }
    }

    pub fn committed_at(&self) -> DateTime<Local> {
        self.committed_at
    }

    /// Commit time rendered as `YYYY-MM-DD HH:MM:SS`
    pub fn timestamp(&self) -> String {
        self.committed_at.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn transcription(&self) -> &str {
        &self.transcription
    }

    /// Transcription cut to at most `max_chars` characters, with an ellipsis when cut
    pub fn transcription_preview(&self, max_chars: usize) -> String {
        if self.transcription.chars().count() <= max_chars {
            return self.transcription.clone();
        }
        let head: String = self.transcription.chars().take(max_chars).collect();
        format!("{}...", head)
    }

    pub fn emotion(&self) -> &Emotion {
        &self.emotion
    }

    /// Whether an image had been generated for the dream at commit time
    pub fn image_generated(&self) -> bool {
        self.image_generated
    }
}

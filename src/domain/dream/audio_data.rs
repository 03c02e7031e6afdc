//! Audio data value object

use std::fmt;
use std::path::Path;

use crate::domain::error::AudioLoadError;

/// File name used for audio captured from the microphone
pub const RECORDED_FILE_NAME: &str = "recorded_audio.flac";

/// Audio formats accepted by the dream synthesizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioMimeType {
    #[default]
    Wav,
    Mp3,
    M4a,
    /// Only produced by the microphone recorder
    Flac,
}

impl AudioMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::M4a => "audio/mp4",
            Self::Flac => "audio/flac",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::M4a => "m4a",
            Self::Flac => "flac",
        }
    }

    /// Detect an uploadable format from a file name
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "m4a" => Some(Self::M4a),
            _ => None,
        }
    }
}

impl fmt::Display for AudioMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audio describing a dream, ready for transcription.
/// Carries the raw bytes, their format and a file name hint for the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioData {
    data: Vec<u8>,
    mime_type: AudioMimeType,
    file_name: String,
}

impl AudioData {
    /// Create AudioData from raw bytes
    pub fn new(data: Vec<u8>, mime_type: AudioMimeType, file_name: impl Into<String>) -> Self {
        Self {
            data,
            mime_type,
            file_name: file_name.into(),
        }
    }

    /// Accept an uploaded file (wav, mp3 or m4a)
    pub fn from_upload(file_name: impl Into<String>, data: Vec<u8>) -> Result<Self, AudioLoadError> {
        let file_name = file_name.into();
        let mime_type = AudioMimeType::from_file_name(&file_name).ok_or_else(|| {
            AudioLoadError::UnsupportedFormat {
                file_name: file_name.clone(),
            }
        })?;

        if data.is_empty() {
            return Err(AudioLoadError::Empty(file_name));
        }

        Ok(Self::new(data, mime_type, file_name))
    }

    /// Wrap FLAC bytes captured from the microphone
    pub fn recorded(data: Vec<u8>) -> Self {
        Self::new(data, AudioMimeType::Flac, RECORDED_FILE_NAME)
    }

    /// Get the raw audio data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the MIME type
    pub fn mime_type(&self) -> AudioMimeType {
        self.mime_type
    }

    /// File name hint sent along with the bytes
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}

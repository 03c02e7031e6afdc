//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration \"{input}\" (examples: 20, 45s, 1m30s, 1500ms)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when an unsupported locale is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid locale: \"{input}\". Valid locales are: en, fr")]
pub struct InvalidLocaleError {
    pub input: String,
}

/// Error when uploaded audio cannot be accepted
#[derive(Debug, Clone, Error)]
pub enum AudioLoadError {
    #[error("Unsupported audio format: \"{file_name}\". Supported formats are: wav, mp3, m4a")]
    UnsupportedFormat { file_name: String },

    #[error("Audio file is empty: {0}")]
    Empty(String),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

/// Broad category of a capability call failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The service did not answer within the request timeout
    Timeout,
    /// Network or protocol failure before a response was received
    Transport,
    /// The service answered with a non-success status
    Service,
    /// The response did not have the expected shape
    MalformedResponse,
    /// The response was well-formed but carried no usable result
    NoResult,
}

/// Failure of one outbound call to a transcription, image or emotion service.
///
/// Capability clients never raise past their boundary: every failure is
/// normalized into one of these variants.
#[derive(Debug, Clone, Error)]
pub enum CapabilityError {
    #[error("The server took too long to respond")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("HTTP {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Empty response")]
    EmptyResponse,

    #[error("No result found")]
    NoResult,
}

impl CapabilityError {
    /// Classify this failure
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Timeout => FailureKind::Timeout,
            Self::Request(_) => FailureKind::Transport,
            Self::InvalidApiKey | Self::RateLimited | Self::Service { .. } => FailureKind::Service,
            Self::Parse(_) | Self::EmptyResponse => FailureKind::MalformedResponse,
            Self::NoResult => FailureKind::NoResult,
        }
    }

    /// Whether this failure should be presented as an error rather than a notice.
    ///
    /// A missing emotion result is reported softly, everything else is a hard failure.
    pub fn is_hard_failure(&self) -> bool {
        self.kind() != FailureKind::NoResult
    }
}

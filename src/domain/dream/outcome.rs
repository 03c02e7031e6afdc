//! Typed result of one capability call

use std::fmt;

use crate::domain::error::{CapabilityError, FailureKind};

/// The three user-triggered service calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Transcription,
    ImageGeneration,
    EmotionAnalysis,
}

impl Operation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transcription => "transcription",
            Self::ImageGeneration => "image generation",
            Self::EmotionAnalysis => "emotion analysis",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a capability call as seen by the orchestrator's caller.
///
/// Callers branch on the variant; no text inspection is involved.
#[derive(Debug, Clone)]
pub enum CallOutcome<T> {
    Success(T),
    Failure(CapabilityError),
}

impl<T> CallOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Failure category, if the call failed
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err.kind()),
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&CapabilityError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CallOutcome<U> {
        match self {
            Self::Success(value) => CallOutcome::Success(f(value)),
            Self::Failure(err) => CallOutcome::Failure(err),
        }
    }
}

impl<T> From<Result<T, CapabilityError>> for CallOutcome<T> {
    fn from(result: Result<T, CapabilityError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) => Self::Failure(err),
        }
    }
}

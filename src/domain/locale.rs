//! Locale value object
//!
//! The dream synthesizer speaks English or French. The locale selects the
//! transcription priming prompt, the emotion label vocabulary and every
//! user-facing failure message, including the error marker word.

use std::fmt;
use std::str::FromStr;

use crate::domain::dream::{Operation, ALL_EMOTIONS};
use crate::domain::error::{CapabilityError, InvalidLocaleError};

/// Supported user-facing languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    English,
    French,
}

impl Locale {
    /// Get the string identifier for this locale
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
        }
    }

    /// Word that prefixes every hard failure message
    pub const fn error_marker(&self) -> &'static str {
        match self {
            Self::English => "Error",
            Self::French => "Erreur",
        }
    }

    /// Priming prompt that biases the speech-to-text vocabulary toward dream narration
    pub const fn transcription_prompt(&self) -> &'static str {
        match self {
            Self::English => "The dream described is...",
            Self::French => "Le rêve décrit est...",
        }
    }

    /// System instruction for the emotion classifier, listing the closed label set
    pub fn emotion_instruction(&self) -> String {
        let labels = ALL_EMOTIONS
            .iter()
            .map(|label| label.name(*self))
            .collect::<Vec<_>>()
            .join(", ");

        match self {
            Self::English => format!(
                "You are a dream emotion classifier. Analyze the dream text and answer with a single word describing the main emotion ({}).",
                labels
            ),
            Self::French => format!(
                "Vous êtes un classificateur d'émotions de rêves. Analysez le texte du rêve et renvoyez un seul mot décrivant l'émotion principale ({}).",
                labels
            ),
        }
    }

    /// Message shown when the emotion service returned no usable label
    pub const fn no_result_message(&self) -> &'static str {
        match self {
            Self::English => "No emotion result found.",
            Self::French => "Aucun résultat d'émotion trouvé.",
        }
    }

    /// Message shown when a service call timed out
    pub const fn timeout_message(&self) -> &'static str {
        match self {
            Self::English => "Error: the server is taking too long to respond",
            Self::French => "Erreur : Le serveur met trop de temps à répondre",
        }
    }

    /// Generic apology for unexpected failures in the interactive flow
    pub const fn unexpected_error_message(&self) -> &'static str {
        match self {
            Self::English => "An unexpected error occurred. Please try again or contact support.",
            Self::French => {
                "Une erreur inattendue s'est produite. Veuillez réessayer ou contacter le support."
            }
        }
    }

    /// Localized noun phrase for an operation, used inside failure messages
    pub const fn operation_phrase(&self, operation: Operation) -> &'static str {
        match (self, operation) {
            (Self::English, Operation::Transcription) => "audio transcription",
            (Self::English, Operation::ImageGeneration) => "image generation",
            (Self::English, Operation::EmotionAnalysis) => "emotion analysis",
            (Self::French, Operation::Transcription) => "la transcription audio",
            (Self::French, Operation::ImageGeneration) => "la génération de l'image",
            (Self::French, Operation::EmotionAnalysis) => "l'analyse émotionnelle",
        }
    }

    /// Render a capability failure as a user-facing message.
    ///
    /// Hard failures always contain [`Locale::error_marker`]; timeouts use a
    /// dedicated wording distinct from other failures.
    pub fn describe_failure(&self, operation: Operation, error: &CapabilityError) -> String {
        match error {
            CapabilityError::Timeout => self.timeout_message().to_string(),
            CapabilityError::NoResult => self.no_result_message().to_string(),
            other => match self {
                Self::English => format!(
                    "{} during {}: {}",
                    self.error_marker(),
                    self.operation_phrase(operation),
                    other
                ),
                Self::French => format!(
                    "{} lors de {} : {}",
                    self.error_marker(),
                    self.operation_phrase(operation),
                    other
                ),
            },
        }
    }
}

impl FromStr for Locale {
    type Err = InvalidLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::English),
            "fr" | "fr-fr" | "french" | "français" | "francais" => Ok(Self::French),
            _ => Err(InvalidLocaleError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

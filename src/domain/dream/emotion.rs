//! Emotion value objects

use std::fmt;

use crate::domain::locale::Locale;

/// The closed set of labels the classifier is asked to choose from
pub const ALL_EMOTIONS: &[EmotionLabel] = &[
    EmotionLabel::Happy,
    EmotionLabel::Stressful,
    EmotionLabel::Neutral,
    EmotionLabel::Sad,
    EmotionLabel::Excited,
    EmotionLabel::Frightening,
];

/// Dominant emotion of a dream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmotionLabel {
    Happy,
    Stressful,
    Neutral,
    Sad,
    Excited,
    Frightening,
}

impl EmotionLabel {
    /// Name of the label in the given locale
    pub const fn name(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::English, Self::Happy) => "Happy",
            (Locale::English, Self::Stressful) => "Stressful",
            (Locale::English, Self::Neutral) => "Neutral",
            (Locale::English, Self::Sad) => "Sad",
            (Locale::English, Self::Excited) => "Excited",
            (Locale::English, Self::Frightening) => "Frightening",
            (Locale::French, Self::Happy) => "Heureux",
            (Locale::French, Self::Stressful) => "Stressant",
            (Locale::French, Self::Neutral) => "Neutre",
            (Locale::French, Self::Sad) => "Triste",
            (Locale::French, Self::Excited) => "Excité",
            (Locale::French, Self::Frightening) => "Effrayant",
        }
    }

    /// Match a word against the label names of every locale, ignoring case
    pub fn from_word(word: &str) -> Option<Self> {
        let word = word.to_lowercase();
        ALL_EMOTIONS.iter().copied().find(|label| {
            [Locale::English, Locale::French]
                .iter()
                .any(|locale| label.name(*locale).to_lowercase() == word)
        })
    }
}

/// Emotion returned by the classifier.
///
/// Models occasionally answer outside the requested label set; such answers
/// are kept verbatim as [`Emotion::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emotion {
    Known(EmotionLabel),
    Other(String),
}

impl Emotion {
    /// Interpret the raw text answered by the classifier.
    ///
    /// Returns `None` when the answer is blank.
    pub fn from_response(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let word = trimmed.trim_end_matches(&['.', '!', ',', ';'][..]).trim();
        Some(match EmotionLabel::from_word(word) {
            Some(label) => Self::Known(label),
            None => Self::Other(trimmed.to_string()),
        })
    }

    /// Text of the emotion in the given locale (free text is returned unchanged)
    pub fn display_in(&self, locale: Locale) -> &str {
        match self {
            Self::Known(label) => label.name(locale),
            Self::Other(text) => text,
        }
    }

    /// Whether the emotion carries any text
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Known(_) => false,
            Self::Other(text) => text.trim().is_empty(),
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_in(Locale::English))
    }
}

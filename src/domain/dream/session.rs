//! Dream session state machine

use std::fmt;

use chrono::{DateTime, Local};
use thiserror::Error;

use super::audio_data::AudioData;
use super::emotion::Emotion;
use super::history::DreamHistory;
use super::image::GeneratedImage;
use super::record::DreamRecord;

/// Dream session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DreamState {
    #[default]
    Idle,
    AudioReady,
    Transcribing,
    TranscribedReady,
    GeneratingImage,
    ClassifyingEmotion,
    Committed,
}

impl DreamState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AudioReady => "audio ready",
            Self::Transcribing => "transcribing",
            Self::TranscribedReady => "transcribed",
            Self::GeneratingImage => "generating image",
            Self::ClassifyingEmotion => "classifying emotion",
            Self::Committed => "committed",
        }
    }

    /// Whether a service call is in flight
    pub const fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Transcribing | Self::GeneratingImage | Self::ClassifyingEmotion
        )
    }
}

impl fmt::Display for DreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: DreamState,
    pub action: String,
}

/// State of the dream currently in progress, plus the session's history.
///
/// State machine:
///   IDLE -> AUDIO_READY (attach_audio)
///   AUDIO_READY | TRANSCRIBED_READY | COMMITTED -> TRANSCRIBING (begin_transcription, clears results)
///   TRANSCRIBING -> TRANSCRIBED_READY (complete_transcription)
///   TRANSCRIBING -> AUDIO_READY (fail_transcription)
///   TRANSCRIBED_READY | COMMITTED -> GENERATING_IMAGE -> back (image steps)
///   TRANSCRIBED_READY | COMMITTED -> CLASSIFYING_EMOTION -> COMMITTED (complete_emotion_classification)
///   CLASSIFYING_EMOTION -> back (fail_emotion_classification)
///
/// Only one dream is in flight at a time: starting a transcription discards
/// the previous transcription, image and emotion.
#[derive(Debug, Default)]
pub struct DreamSession {
    state: DreamState,
    audio: Option<AudioData>,
    transcription: Option<String>,
    generated_image: Option<GeneratedImage>,
    emotion: Option<Emotion>,
    committed: bool,
    history: DreamHistory,
}

impl DreamSession {
    /// Create a new session in idle state with an empty history
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DreamState {
        self.state
    }

    pub fn audio(&self) -> Option<&AudioData> {
        self.audio.as_ref()
    }

    pub fn transcription(&self) -> Option<&str> {
        self.transcription.as_deref()
    }

    pub fn generated_image(&self) -> Option<&GeneratedImage> {
        self.generated_image.as_ref()
    }

    pub fn emotion(&self) -> Option<&Emotion> {
        self.emotion.as_ref()
    }

    pub fn history(&self) -> &DreamHistory {
        &self.history
    }

    /// State to return to once an image or emotion call finishes
    fn resting_state(&self) -> DreamState {
        if self.committed {
            DreamState::Committed
        } else {
            DreamState::TranscribedReady
        }
    }

    fn invalid(&self, action: &str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.state,
            action: action.to_string(),
        }
    }

    fn expect_state(&self, expected: DreamState, action: &str) -> Result<(), InvalidStateTransition> {
        if self.state != expected {
            return Err(self.invalid(action));
        }
        Ok(())
    }

    /// Provide captured or uploaded audio.
    ///
    /// Results of the previous dream stay visible until the next transcription.
    pub fn attach_audio(&mut self, audio: AudioData) -> Result<(), InvalidStateTransition> {
        if self.state.is_busy() {
            return Err(self.invalid("attach audio"));
        }
        self.audio = Some(audio);
        if self.state == DreamState::Idle {
            self.state = DreamState::AudioReady;
        }
        Ok(())
    }

    /// Start a new transcription, clearing every result of the previous dream.
    ///
    /// Returns the audio to submit.
    pub fn begin_transcription(&mut self) -> Result<AudioData, InvalidStateTransition> {
        if self.state.is_busy() {
            return Err(self.invalid("start transcription"));
        }
        let audio = self
            .audio
            .clone()
            .ok_or_else(|| self.invalid("start transcription"))?;

        self.transcription = None;
        self.generated_image = None;
        self.emotion = None;
        self.committed = false;
        self.state = DreamState::Transcribing;
        Ok(audio)
    }

    /// Store a successful transcript. Blank text counts as a failure.
    pub fn complete_transcription(&mut self, text: String) -> Result<(), InvalidStateTransition> {
        self.expect_state(DreamState::Transcribing, "complete transcription")?;
        if text.trim().is_empty() {
            self.state = DreamState::AudioReady;
            return Ok(());
        }
        self.transcription = Some(text);
        self.state = DreamState::TranscribedReady;
        Ok(())
    }

    pub fn fail_transcription(&mut self) -> Result<(), InvalidStateTransition> {
        self.expect_state(DreamState::Transcribing, "fail transcription")?;
        self.transcription = None;
        self.state = DreamState::AudioReady;
        Ok(())
    }

    /// Start image generation. Returns the prompt text (the transcription).
    pub fn begin_image_generation(&mut self) -> Result<String, InvalidStateTransition> {
        if self.state.is_busy() {
            return Err(self.invalid("generate image"));
        }
        let prompt = self
            .transcription
            .clone()
            .ok_or_else(|| self.invalid("generate image"))?;
        self.state = DreamState::GeneratingImage;
        Ok(prompt)
    }

    pub fn complete_image_generation(
        &mut self,
        image: GeneratedImage,
    ) -> Result<(), InvalidStateTransition> {
        self.expect_state(DreamState::GeneratingImage, "complete image generation")?;
        self.generated_image = Some(image);
        self.state = self.resting_state();
        Ok(())
    }

    /// A failed generation leaves the session without an image.
    pub fn fail_image_generation(&mut self) -> Result<(), InvalidStateTransition> {
        self.expect_state(DreamState::GeneratingImage, "fail image generation")?;
        self.generated_image = None;
        self.state = self.resting_state();
        Ok(())
    }

    /// Start emotion classification. Returns the dream text to classify.
    pub fn begin_emotion_classification(&mut self) -> Result<String, InvalidStateTransition> {
        if self.state.is_busy() {
            return Err(self.invalid("analyze emotion"));
        }
        let text = self
            .transcription
            .clone()
            .ok_or_else(|| self.invalid("analyze emotion"))?;
        self.state = DreamState::ClassifyingEmotion;
        Ok(text)
    }

    /// Store the emotion and commit the dream to history.
    ///
    /// A record is appended only when both transcription and emotion are
    /// non-empty; the image is never required.
    pub fn complete_emotion_classification(
        &mut self,
        emotion: Emotion,
        committed_at: DateTime<Local>,
    ) -> Result<Option<DreamRecord>, InvalidStateTransition> {
        self.expect_state(DreamState::ClassifyingEmotion, "complete emotion analysis")?;

        if emotion.is_empty() {
            self.emotion = None;
            self.state = self.resting_state();
            return Ok(None);
        }
        self.emotion = Some(emotion.clone());

        let record = match self.transcription.as_deref() {
            Some(text) if !text.trim().is_empty() => {
                let record = DreamRecord::new(
                    committed_at,
                    text.to_string(),
                    emotion,
                    self.generated_image.is_some(),
                );
                self.history.append(record.clone());
                self.committed = true;
                Some(record)
            }
            _ => None,
        };

        self.state = self.resting_state();
        Ok(record)
    }

    /// A failed classification leaves the session without an emotion.
    pub fn fail_emotion_classification(&mut self) -> Result<(), InvalidStateTransition> {
        self.expect_state(DreamState::ClassifyingEmotion, "fail emotion analysis")?;
        self.emotion = None;
        self.state = self.resting_state();
        Ok(())
    }
}

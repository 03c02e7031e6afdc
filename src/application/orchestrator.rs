//! Dream orchestration use case
//!
//! Sequences the user-triggered steps of one dream: transcription, then
//! image generation and emotion analysis in whatever order the user picks.
//! The session is passed in explicitly so each user session owns its state.

use chrono::Local;
use tracing::{info, instrument, warn};

use crate::domain::dream::{
    CallOutcome, DreamRecord, DreamSession, Emotion, GeneratedImage, InvalidStateTransition,
    Operation,
};
use crate::domain::error::CapabilityError;
use crate::domain::locale::Locale;

use super::ports::{EmotionClassifier, ImageSynthesizer, Transcriber};

/// Result of a successful emotion analysis
#[derive(Debug, Clone)]
pub struct EmotionAnalysis {
    pub emotion: Emotion,
    /// The history record created by this analysis, if the dream was committed
    pub record: Option<DreamRecord>,
}

/// Orchestrates the three capability clients against a dream session
pub struct DreamOrchestrator<T, I, E>
where
    T: Transcriber,
    I: ImageSynthesizer,
    E: EmotionClassifier,
{
    transcriber: T,
    image_synthesizer: I,
    emotion_classifier: E,
    locale: Locale,
}

impl<T, I, E> DreamOrchestrator<T, I, E>
where
    T: Transcriber,
    I: ImageSynthesizer,
    E: EmotionClassifier,
{
    /// Create a new orchestrator
    pub fn new(transcriber: T, image_synthesizer: I, emotion_classifier: E, locale: Locale) -> Self {
        Self {
            transcriber,
            image_synthesizer,
            emotion_classifier,
            locale,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// User-facing message for a failed step
    pub fn describe_failure(&self, operation: Operation, error: &CapabilityError) -> String {
        self.locale.describe_failure(operation, error)
    }

    /// Transcribe the session's audio.
    ///
    /// Clears the previous transcription, image and emotion before calling
    /// the service.
    #[instrument(skip_all)]
    pub async fn transcribe(
        &self,
        session: &mut DreamSession,
    ) -> Result<CallOutcome<String>, InvalidStateTransition> {
        let audio = session.begin_transcription()?;
        info!(
            file = audio.file_name(),
            size = audio.size_bytes(),
            "Starting audio transcription"
        );

        let result = self
            .transcriber
            .transcribe(&audio, self.locale.transcription_prompt())
            .await;

        match result {
            Ok(text) if !text.trim().is_empty() => {
                session.complete_transcription(text.clone())?;
                info!(chars = text.chars().count(), "Audio transcription succeeded");
                Ok(CallOutcome::Success(text))
            }
            Ok(_) => {
                session.fail_transcription()?;
                warn!("Transcription service returned empty text");
                Ok(CallOutcome::Failure(CapabilityError::EmptyResponse))
            }
            Err(err) => {
                session.fail_transcription()?;
                warn!(error = %err, "Audio transcription failed");
                Ok(CallOutcome::Failure(err))
            }
        }
    }

    /// Generate an illustration from the session's transcription.
    #[instrument(skip_all)]
    pub async fn generate_image(
        &self,
        session: &mut DreamSession,
    ) -> Result<CallOutcome<GeneratedImage>, InvalidStateTransition> {
        let prompt = session.begin_image_generation()?;
        info!("Starting image generation");

        match self.image_synthesizer.generate(&prompt).await {
            Ok(image) => {
                session.complete_image_generation(image.clone())?;
                info!(bytes = image.len(), "Image generation succeeded");
                Ok(CallOutcome::Success(image))
            }
            Err(err) => {
                session.fail_image_generation()?;
                warn!(error = %err, "Image generation failed");
                Ok(CallOutcome::Failure(err))
            }
        }
    }

    /// Classify the dream's emotion and commit the dream to history on success.
    #[instrument(skip_all)]
    pub async fn analyze_emotion(
        &self,
        session: &mut DreamSession,
    ) -> Result<CallOutcome<EmotionAnalysis>, InvalidStateTransition> {
        let text = session.begin_emotion_classification()?;
        info!("Starting emotion analysis");

        let instruction = self.locale.emotion_instruction();
        match self.emotion_classifier.classify(&text, &instruction).await {
            Ok(emotion) if !emotion.is_empty() => {
                let record =
                    session.complete_emotion_classification(emotion.clone(), Local::now())?;
                if record.is_some() {
                    info!(emotion = %emotion, "Dream added to history");
                }
                Ok(CallOutcome::Success(EmotionAnalysis { emotion, record }))
            }
            Ok(_) => {
                session.fail_emotion_classification()?;
                warn!("Emotion service returned an empty label");
                Ok(CallOutcome::Failure(CapabilityError::NoResult))
            }
            Err(err) => {
                session.fail_emotion_classification()?;
                warn!(error = %err, "Emotion analysis failed");
                Ok(CallOutcome::Failure(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dream::{AudioData, AudioMimeType, DreamState, EmotionLabel};
    use crate::domain::error::FailureKind;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockTranscriber {
        result: Result<String, CapabilityError>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockTranscriber {
        fn returning(result: Result<String, CapabilityError>) -> Self {
            Self {
                result,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transcriber for MockTranscriber {
        async fn transcribe(
            &self,
            _audio: &AudioData,
            prompt: &str,
        ) -> Result<String, CapabilityError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.result.clone()
        }
    }

    struct MockImage {
        result: Result<GeneratedImage, CapabilityError>,
    }

    #[async_trait]
    impl ImageSynthesizer for MockImage {
        async fn generate(&self, _prompt: &str) -> Result<GeneratedImage, CapabilityError> {
            self.result.clone()
        }
    }

    struct MockEmotion {
        result: Result<Emotion, CapabilityError>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockEmotion {
        fn returning(result: Result<Emotion, CapabilityError>) -> Self {
            Self {
                result,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl EmotionClassifier for MockEmotion {
        async fn classify(
            &self,
            dream_text: &str,
            instruction: &str,
        ) -> Result<Emotion, CapabilityError> {
            self.calls
                .lock()
                .unwrap()
                .push((dream_text.to_string(), instruction.to_string()));
            self.result.clone()
        }
    }

    const DREAM: &str = "I was flying over mountains";

    fn orchestrator(
        transcription: Result<String, CapabilityError>,
        image: Result<GeneratedImage, CapabilityError>,
        emotion: Result<Emotion, CapabilityError>,
    ) -> DreamOrchestrator<MockTranscriber, MockImage, MockEmotion> {
        DreamOrchestrator::new(
            MockTranscriber::returning(transcription),
            MockImage { result: image },
            MockEmotion::returning(emotion),
            Locale::English,
        )
    }

    fn session_with_audio() -> DreamSession {
        let mut session = DreamSession::new();
        session
            .attach_audio(AudioData::new(vec![1, 2, 3], AudioMimeType::Wav, "dream.wav"))
            .unwrap();
        session
    }

    #[tokio::test]
    async fn transcription_success_sets_text_and_clears_results() {
        let orch = orchestrator(
            Ok(DREAM.to_string()),
            Ok(GeneratedImage::new(vec![1])),
            Ok(Emotion::Known(EmotionLabel::Happy)),
        );
        let mut session = session_with_audio();

        orch.transcribe(&mut session).await.unwrap();
        orch.generate_image(&mut session).await.unwrap();
        orch.analyze_emotion(&mut session).await.unwrap();
        assert!(session.generated_image().is_some());

        let outcome = orch.transcribe(&mut session).await.unwrap();
        assert_eq!(outcome.success().as_deref(), Some(DREAM));
        assert_eq!(session.transcription(), Some(DREAM));
        assert!(session.generated_image().is_none());
        assert!(session.emotion().is_none());
        assert_eq!(session.state(), DreamState::TranscribedReady);
    }

    #[tokio::test]
    async fn transcription_uses_priming_prompt() {
        let orch = orchestrator(
            Ok(DREAM.to_string()),
            Err(CapabilityError::Timeout),
            Err(CapabilityError::Timeout),
        );
        let mut session = session_with_audio();
        orch.transcribe(&mut session).await.unwrap();

        let prompts = orch.transcriber.prompts.lock().unwrap();
        assert_eq!(prompts.as_slice(), ["The dream described is..."]);
    }

    #[tokio::test]
    async fn transcription_failure_leaves_no_text() {
        let orch = orchestrator(
            Err(CapabilityError::Request("connection refused".into())),
            Err(CapabilityError::Timeout),
            Err(CapabilityError::Timeout),
        );
        let mut session = session_with_audio();

        let outcome = orch.transcribe(&mut session).await.unwrap();
        assert_eq!(outcome.failure_kind(), Some(FailureKind::Transport));
        assert!(session.transcription().is_none());
        assert_eq!(session.state(), DreamState::AudioReady);
    }

    #[tokio::test]
    async fn success_text_containing_error_word_is_not_a_failure() {
        let text = "Error messages kept chasing me through a library";
        let orch = orchestrator(
            Ok(text.to_string()),
            Err(CapabilityError::Timeout),
            Ok(Emotion::Known(EmotionLabel::Stressful)),
        );
        let mut session = session_with_audio();

        assert!(orch.transcribe(&mut session).await.unwrap().is_success());
        assert_eq!(session.transcription(), Some(text));
        let outcome = orch.analyze_emotion(&mut session).await.unwrap();
        assert!(outcome.success().unwrap().record.is_some());
    }

    #[tokio::test]
    async fn emotion_receives_exact_text_and_label_instruction() {
        let orch = orchestrator(
            Ok(DREAM.to_string()),
            Err(CapabilityError::Timeout),
            Err(CapabilityError::NoResult),
        );
        let mut session = session_with_audio();
        orch.transcribe(&mut session).await.unwrap();

        let outcome = orch.analyze_emotion(&mut session).await.unwrap();
        assert_eq!(outcome.failure_kind(), Some(FailureKind::NoResult));
        assert_eq!(
            orch.describe_failure(Operation::EmotionAnalysis, outcome.failure().unwrap()),
            "No emotion result found."
        );
        assert!(session.history().is_empty());
        assert!(session.emotion().is_none());

        let calls = orch.emotion_classifier.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, DREAM);
        assert_eq!(calls[0].1, Locale::English.emotion_instruction());
    }

    #[tokio::test]
    async fn emotion_success_commits_without_image() {
        let orch = orchestrator(
            Ok(DREAM.to_string()),
            Err(CapabilityError::Timeout),
            Ok(Emotion::Known(EmotionLabel::Excited)),
        );
        let mut session = session_with_audio();
        orch.transcribe(&mut session).await.unwrap();

        let image = orch.generate_image(&mut session).await.unwrap();
        assert_eq!(image.failure_kind(), Some(FailureKind::Timeout));
        assert!(session.generated_image().is_none());

        let analysis = orch.analyze_emotion(&mut session).await.unwrap().success().unwrap();
        let record = analysis.record.expect("dream committed");
        assert_eq!(record.transcription(), DREAM);
        assert!(!record.image_generated());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.state(), DreamState::Committed);
    }

    #[tokio::test]
    async fn image_alone_never_commits() {
        let orch = orchestrator(
            Ok(DREAM.to_string()),
            Ok(GeneratedImage::new(vec![1, 2, 3])),
            Err(CapabilityError::Timeout),
        );
        let mut session = session_with_audio();
        orch.transcribe(&mut session).await.unwrap();

        assert!(orch.generate_image(&mut session).await.unwrap().is_success());
        assert!(!orch.analyze_emotion(&mut session).await.unwrap().is_success());
        assert!(session.history().is_empty());
        assert!(session.generated_image().is_some());
    }

    #[tokio::test]
    async fn image_without_transcription_is_rejected() {
        let orch = orchestrator(
            Ok(DREAM.to_string()),
            Ok(GeneratedImage::new(vec![1])),
            Ok(Emotion::Known(EmotionLabel::Sad)),
        );
        let mut session = session_with_audio();

        let err = orch.generate_image(&mut session).await.unwrap_err();
        assert_eq!(err.current_state, DreamState::AudioReady);
    }

    #[tokio::test]
    async fn empty_transcript_is_a_failure() {
        let orch = orchestrator(
            Ok("   ".to_string()),
            Err(CapabilityError::Timeout),
            Err(CapabilityError::Timeout),
        );
        let mut session = session_with_audio();

        let outcome = orch.transcribe(&mut session).await.unwrap();
        assert_eq!(outcome.failure_kind(), Some(FailureKind::MalformedResponse));
        assert!(session.transcription().is_none());
    }
}

//! Application wiring: configuration, credentials and the one-shot pipeline

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Local;
use thiserror::Error;
use tokio::fs;
use tracing::{error, info, warn};

use crate::application::credentials::{
    is_production_environment, ApiKey, CredentialChannel, CredentialError, CredentialProvider,
};
use crate::application::ports::{
    ConfigStore, EmotionClassifier, ImageSynthesizer, SecretStore, Transcriber,
};
use crate::application::DreamOrchestrator;
use crate::domain::config::AppConfig;
use crate::domain::dream::{
    AudioData, AudioMimeType, CallOutcome, DreamSession, GeneratedImage, InvalidStateTransition,
    Operation,
};
use crate::domain::error::AudioLoadError;
use crate::domain::locale::Locale;
use crate::infrastructure::{
    emotion, image, transcription, ClipdropImageSynthesizer, GroqTranscriber,
    MistralEmotionClassifier, TomlSecretStore, XdgConfigStore,
};

use super::args::RunOptions;
use super::messages::Messages;
use super::presenter::Presenter;
use super::terminal::TerminalInput;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the configured locale
pub const LOCALE_ENV_VAR: &str = "DREAM_SYNTH_LOCALE";

/// Orchestrator wired to the live services
pub type LiveOrchestrator =
    DreamOrchestrator<GroqTranscriber, ClipdropImageSynthesizer, MistralEmotionClassifier>;

/// Errors that stop the application before any dream is processed
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("No {name} API key provided")]
    KeyNotProvided { name: String },

    #[error("Failed to read from terminal: {0}")]
    Input(#[from] io::Error),
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = store.load_or_empty().await;

    let env_config = AppConfig {
        locale: env::var(LOCALE_ENV_VAR).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Whether production mode is on, from the flag or the environment
pub fn production_mode(flag: bool) -> bool {
    flag || is_production_environment(|key| env::var(key).ok())
}

/// Config store at the default location
pub fn config_store() -> XdgConfigStore {
    XdgConfigStore::new()
}

fn secret_store(config: &AppConfig) -> TomlSecretStore {
    match config.secrets_path() {
        Some(path) => TomlSecretStore::with_path(path),
        None => TomlSecretStore::new(),
    }
}

/// Resolve one key, asking on the terminal when development mode finds none
async fn resolve_key<S: SecretStore>(
    provider: &CredentialProvider<S>,
    name: &str,
    input: &mut TerminalInput,
    presenter: &Presenter,
    messages: &Messages,
) -> Result<ApiKey, StartupError> {
    match provider.resolve(name).await {
        Ok(key) => Ok(key),
        Err(CredentialError::Missing {
            name,
            env_var,
            secret_key,
        }) => {
            presenter.warn(&messages.configure_api_key(&name, &env_var, &secret_key));
            presenter.output_inline(&messages.enter_api_key(&name));

            let answer = input.read_secret().await?.unwrap_or_default();
            let answer = answer.trim();
            if answer.is_empty() {
                return Err(StartupError::KeyNotProvided { name });
            }
            info!(provider = %name, channel = %CredentialChannel::Prompt, "API key resolved");
            Ok(ApiKey::new(answer))
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve the three API keys and build the live orchestrator
pub async fn build_orchestrator(
    config: &AppConfig,
    production: bool,
    input: &mut TerminalInput,
    presenter: &Presenter,
) -> Result<LiveOrchestrator, StartupError> {
    let locale = config.locale_or_default();
    let messages = Messages::new(locale);
    let provider = CredentialProvider::new(secret_store(config), production);

    let groq = resolve_key(&provider, transcription::PROVIDER, input, presenter, &messages).await?;
    let clipdrop = resolve_key(&provider, image::PROVIDER, input, presenter, &messages).await?;
    let mistral = resolve_key(&provider, emotion::PROVIDER, input, presenter, &messages).await?;

    let mut transcriber =
        GroqTranscriber::new(groq).with_model(config.transcription_model_or_default());
    if let Some(timeout) = config.transcription_timeout() {
        transcriber = transcriber.with_timeout(timeout);
    }

    let request_timeout = config.request_timeout_or_default();
    let image_synthesizer = ClipdropImageSynthesizer::new(clipdrop).with_timeout(request_timeout);
    let emotion_classifier = MistralEmotionClassifier::new(mistral)
        .with_model(config.emotion_model_or_default())
        .with_timeout(request_timeout);

    Ok(DreamOrchestrator::new(
        transcriber,
        image_synthesizer,
        emotion_classifier,
        locale,
    ))
}

/// Read an audio file from disk as an upload
pub async fn load_audio_file(path: &Path) -> Result<AudioData, LoadAudioError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    // Reject unsupported formats before touching the disk
    if AudioMimeType::from_file_name(&file_name).is_none() {
        return Err(AudioLoadError::UnsupportedFormat { file_name }.into());
    }

    let data = fs::read(path).await.map_err(|e| LoadAudioError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(AudioData::from_upload(file_name, data)?)
}

/// Failure to bring an audio file into the session
#[derive(Debug, Error)]
pub enum LoadAudioError {
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Invalid(#[from] AudioLoadError),
}

/// Default location for a generated image
pub fn default_image_path(output_dir: &Path) -> PathBuf {
    output_dir.join(format!("dream-{}.png", Local::now().format("%Y%m%d-%H%M%S")))
}

/// Write image bytes, creating parent directories as needed
pub async fn save_image(image: &GeneratedImage, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, image.bytes()).await
}

/// Run transcription, optional image and emotion analysis on one file
pub async fn run_oneshot(options: RunOptions, config: AppConfig, production: bool) -> ExitCode {
    let mut presenter = Presenter::new();
    let locale = config.locale_or_default();

    let audio = match load_audio_file(&options.file).await {
        Ok(audio) => audio,
        Err(e @ LoadAudioError::Invalid(_)) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut input = TerminalInput::new();
    let orchestrator = match build_orchestrator(&config, production, &mut input, &presenter).await
    {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            error!(error = %e, "Startup failed");
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut session = DreamSession::new();
    if let Err(e) = session.attach_audio(audio) {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    match run_pipeline(&orchestrator, &mut session, &options, &config, &mut presenter, locale).await
    {
        Ok(true) => ExitCode::from(EXIT_SUCCESS),
        Ok(false) => ExitCode::from(EXIT_ERROR),
        Err(e) => {
            error!(error = %e, "Unexpected failure in pipeline");
            presenter.error(locale.unexpected_error_message());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Returns whether the dream was committed to history
async fn run_pipeline<T, I, E>(
    orchestrator: &DreamOrchestrator<T, I, E>,
    session: &mut DreamSession,
    options: &RunOptions,
    config: &AppConfig,
    presenter: &mut Presenter,
    locale: Locale,
) -> Result<bool, InvalidStateTransition>
where
    T: Transcriber,
    I: ImageSynthesizer,
    E: EmotionClassifier,
{
    let messages = Messages::new(locale);

    presenter.start_spinner(messages.transcribing());
    match orchestrator.transcribe(session).await? {
        CallOutcome::Success(_) => presenter.spinner_success(messages.transcription_complete()),
        CallOutcome::Failure(e) => {
            presenter.spinner_fail(&orchestrator.describe_failure(Operation::Transcription, &e));
            return Ok(false);
        }
    }

    if options.generate_image {
        presenter.start_spinner(messages.generating_image());
        match orchestrator.generate_image(session).await? {
            CallOutcome::Success(image) => {
                let path = options
                    .image_out
                    .clone()
                    .unwrap_or_else(|| default_image_path(&config.output_dir_or_default()));
                match save_image(&image, &path).await {
                    Ok(()) => presenter
                        .spinner_success(&format!("{} {}", messages.image_saved(), path.display())),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Generated image not written");
                        presenter.spinner_fail(&format!("{}: {}", messages.image_not_saved(), e));
                    }
                }
            }
            CallOutcome::Failure(e) => {
                presenter
                    .spinner_fail(&orchestrator.describe_failure(Operation::ImageGeneration, &e));
            }
        }
    }

    presenter.start_spinner(messages.analyzing_emotion());
    match orchestrator.analyze_emotion(session).await? {
        CallOutcome::Success(analysis) => {
            presenter.stop_spinner();
            match analysis.record {
                Some(record) => {
                    presenter.record(&record, &messages);
                    Ok(true)
                }
                None => Ok(false),
            }
        }
        CallOutcome::Failure(e) => {
            let message = orchestrator.describe_failure(Operation::EmotionAnalysis, &e);
            if e.is_hard_failure() {
                presenter.spinner_fail(&message);
            } else {
                presenter.stop_spinner();
                presenter.warn(&message);
            }
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dream::{Emotion, EmotionLabel};
    use crate::domain::error::CapabilityError;
    use async_trait::async_trait;

    struct SpokenDream;

    #[async_trait]
    impl Transcriber for SpokenDream {
        async fn transcribe(&self, _: &AudioData, _: &str) -> Result<String, CapabilityError> {
            Ok("A train made of clouds".to_string())
        }
    }

    struct Painter;

    #[async_trait]
    impl ImageSynthesizer for Painter {
        async fn generate(&self, _: &str) -> Result<GeneratedImage, CapabilityError> {
            Ok(GeneratedImage::new(vec![1, 2, 3]))
        }
    }

    struct Calm;

    #[async_trait]
    impl EmotionClassifier for Calm {
        async fn classify(&self, _: &str, _: &str) -> Result<Emotion, CapabilityError> {
            Ok(Emotion::Known(EmotionLabel::Neutral))
        }
    }

    fn session_with_audio() -> DreamSession {
        let mut session = DreamSession::new();
        session
            .attach_audio(AudioData::new(vec![0; 8], AudioMimeType::Wav, "dream.wav"))
            .unwrap();
        session
    }

    #[tokio::test]
    async fn unwritable_image_still_commits_dream() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let orchestrator = DreamOrchestrator::new(SpokenDream, Painter, Calm, Locale::English);
        let mut session = session_with_audio();
        let options = RunOptions {
            file: PathBuf::from("dream.wav"),
            generate_image: true,
            image_out: Some(blocker.join("dream.png")),
        };
        let mut presenter = Presenter::new();

        let committed = run_pipeline(
            &orchestrator,
            &mut session,
            &options,
            &AppConfig::defaults(),
            &mut presenter,
            Locale::English,
        )
        .await
        .unwrap();

        assert!(committed);
        assert_eq!(session.history().len(), 1);
        assert!(session.history().latest().unwrap().image_generated());
        assert!(presenter.spinner_handle().is_none());
    }

    #[tokio::test]
    async fn pipeline_writes_requested_image() {
        let dir = tempfile::tempdir().unwrap();
        let image_out = dir.path().join("art/dream.png");

        let orchestrator = DreamOrchestrator::new(SpokenDream, Painter, Calm, Locale::French);
        let mut session = session_with_audio();
        let options = RunOptions {
            file: PathBuf::from("dream.wav"),
            generate_image: true,
            image_out: Some(image_out.clone()),
        };

        let committed = run_pipeline(
            &orchestrator,
            &mut session,
            &options,
            &AppConfig::defaults(),
            &mut Presenter::new(),
            Locale::French,
        )
        .await
        .unwrap();

        assert!(committed);
        assert_eq!(std::fs::read(&image_out).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn default_image_path_is_timestamped_png() {
        let path = default_image_path(Path::new("/tmp/dreams"));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(path.starts_with("/tmp/dreams"));
        assert!(name.starts_with("dream-"));
        assert!(name.ends_with(".png"));
    }

    #[tokio::test]
    async fn load_audio_rejects_unsupported_extension() {
        let err = load_audio_file(Path::new("notes.txt")).await.unwrap_err();
        assert!(matches!(err, LoadAudioError::Invalid(_)));
    }

    #[tokio::test]
    async fn load_audio_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dream.m4a");
        std::fs::write(&path, [0u8, 1, 2, 3]).unwrap();

        let audio = load_audio_file(&path).await.unwrap();
        assert_eq!(audio.file_name(), "dream.m4a");
        assert_eq!(audio.size_bytes(), 4);
    }

    #[tokio::test]
    async fn load_audio_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_audio_file(&dir.path().join("absent.wav"))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadAudioError::Read { .. }));
    }

    #[tokio::test]
    async fn save_image_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.png");
        save_image(&GeneratedImage::new(vec![9, 9]), &path)
            .await
            .unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![9, 9]);
    }

    #[test]
    fn production_flag_wins() {
        assert!(production_mode(true));
    }
}

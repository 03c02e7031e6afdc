//! Interactive dream session
//!
//! Reads one command per line and drives the orchestrator against a single
//! session. Unexpected failures are logged and reported with a generic
//! apology; the loop keeps running.

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tracing::error;

use crate::application::ports::{
    AudioRecorder, EmotionClassifier, ImageSynthesizer, ProgressCallback, RecordingError,
    Transcriber,
};
use crate::application::DreamOrchestrator;
use crate::domain::config::AppConfig;
use crate::domain::dream::{CallOutcome, DreamSession, InvalidStateTransition, Operation};
use crate::domain::error::DurationParseError;
use crate::domain::recording::Duration;
use crate::infrastructure::CpalRecorder;

use super::app::{
    build_orchestrator, default_image_path, load_audio_file, save_image, LoadAudioError,
    EXIT_ERROR, EXIT_SUCCESS,
};
use super::args::SessionOptions;
use super::messages::Messages;
use super::presenter::{format_progress, Presenter};
use super::terminal::TerminalInput;

/// One line typed at the session prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Upload(PathBuf),
    Record(Option<String>),
    Transcribe,
    Image(Option<PathBuf>),
    Emotion,
    Status,
    History,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing argument for '{0}'")]
    MissingArgument(&'static str),
}

impl FromStr for SessionCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let argument = (!rest.is_empty()).then(|| rest.to_string());

        match name.to_lowercase().as_str() {
            "" => Ok(Self::Empty),
            "upload" | "load" => argument
                .map(|path| Self::Upload(PathBuf::from(path)))
                .ok_or(CommandParseError::MissingArgument("upload")),
            "record" => Ok(Self::Record(argument)),
            "transcribe" => Ok(Self::Transcribe),
            "image" => Ok(Self::Image(argument.map(PathBuf::from))),
            "emotion" => Ok(Self::Emotion),
            "status" => Ok(Self::Status),
            "history" => Ok(Self::History),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandParseError::Unknown(other.to_string())),
        }
    }
}

/// Whether the loop should keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Failures of a single session command
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadAudioError),

    #[error(transparent)]
    Recording(#[from] RecordingError),

    #[error(transparent)]
    InvalidDuration(#[from] DurationParseError),

    #[error(transparent)]
    State(#[from] InvalidStateTransition),
}

impl SessionError {
    /// Errors the user can fix by changing their input
    fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Load(_) | Self::Recording(_) | Self::InvalidDuration(_)
        )
    }
}

/// Executes session commands against one dream session
pub struct SessionRunner<T, I, E, R>
where
    T: Transcriber,
    I: ImageSynthesizer,
    E: EmotionClassifier,
    R: AudioRecorder,
{
    orchestrator: DreamOrchestrator<T, I, E>,
    recorder: R,
    session: DreamSession,
    config: AppConfig,
    messages: Messages,
    presenter: Presenter,
}

impl<T, I, E, R> SessionRunner<T, I, E, R>
where
    T: Transcriber,
    I: ImageSynthesizer,
    E: EmotionClassifier,
    R: AudioRecorder,
{
    pub fn new(
        orchestrator: DreamOrchestrator<T, I, E>,
        recorder: R,
        config: AppConfig,
        presenter: Presenter,
    ) -> Self {
        let messages = Messages::new(orchestrator.locale());
        Self {
            orchestrator,
            recorder,
            session: DreamSession::new(),
            config,
            messages,
            presenter,
        }
    }

    pub fn session(&self) -> &DreamSession {
        &self.session
    }

    /// Execute one command
    pub async fn handle(&mut self, command: SessionCommand) -> Result<Flow, SessionError> {
        match command {
            SessionCommand::Empty => {}
            SessionCommand::Help => self.presenter.output(self.messages.help()),
            SessionCommand::Quit => return Ok(Flow::Quit),
            SessionCommand::Upload(path) => self.upload(path).await?,
            SessionCommand::Record(duration) => self.record(duration).await?,
            SessionCommand::Transcribe => self.transcribe().await?,
            SessionCommand::Image(path) => self.image(path).await?,
            SessionCommand::Emotion => self.emotion().await?,
            SessionCommand::Status => self.status(),
            SessionCommand::History => {
                self.presenter.history(self.session.history(), &self.messages)
            }
        }
        Ok(Flow::Continue)
    }

    /// Report a failed command and keep the session alive
    pub fn report(&mut self, err: &SessionError) {
        self.presenter.stop_spinner();
        if err.is_user_error() {
            self.presenter.error(&err.to_string());
        } else {
            error!(error = %err, "Unexpected error in dream session");
            self.presenter
                .error(self.orchestrator.locale().unexpected_error_message());
        }
    }

    async fn upload(&mut self, path: PathBuf) -> Result<(), SessionError> {
        let audio = load_audio_file(&path).await?;
        let summary = format!(
            "{}: {} ({})",
            self.messages.audio_loaded(),
            audio.file_name(),
            audio.human_readable_size()
        );
        self.session.attach_audio(audio)?;
        self.presenter.success(&summary);
        Ok(())
    }

    async fn record(&mut self, duration: Option<String>) -> Result<(), SessionError> {
        let duration = match duration {
            Some(text) => text.parse::<Duration>()?,
            None => self.config.record_duration_or_default(),
        };

        self.presenter.start_spinner(self.messages.recording());
        let on_progress: Option<ProgressCallback> = self.presenter.spinner_handle().map(|bar| {
            let label = self.messages.recording();
            Arc::new(move |elapsed: u64, total: u64| {
                bar.set_message(format!("{} {}", label, format_progress(elapsed, total)));
            }) as ProgressCallback
        });

        let audio = self.recorder.record(duration, on_progress).await?;
        let summary = format!(
            "{} ({})",
            self.messages.recording_complete(),
            audio.human_readable_size()
        );
        self.session.attach_audio(audio)?;
        self.presenter.spinner_success(&summary);
        Ok(())
    }

    async fn transcribe(&mut self) -> Result<(), SessionError> {
        if self.session.audio().is_none() {
            self.presenter.warn(self.messages.need_audio());
            return Ok(());
        }

        self.presenter.start_spinner(self.messages.transcribing());
        match self.orchestrator.transcribe(&mut self.session).await? {
            CallOutcome::Success(text) => {
                self.presenter
                    .spinner_success(self.messages.transcription_complete());
                self.presenter.output(&text);
            }
            CallOutcome::Failure(e) => {
                let message = self
                    .orchestrator
                    .describe_failure(Operation::Transcription, &e);
                self.presenter.spinner_fail(&message);
            }
        }
        Ok(())
    }

    async fn image(&mut self, path: Option<PathBuf>) -> Result<(), SessionError> {
        if self.session.transcription().is_none() {
            self.presenter.warn(self.messages.need_transcription());
            return Ok(());
        }

        self.presenter.start_spinner(self.messages.generating_image());
        match self.orchestrator.generate_image(&mut self.session).await? {
            CallOutcome::Success(image) => {
                let path = path
                    .unwrap_or_else(|| default_image_path(&self.config.output_dir_or_default()));
                match save_image(&image, &path).await {
                    Ok(()) => self.presenter.spinner_success(&format!(
                        "{} {}",
                        self.messages.image_saved(),
                        path.display()
                    )),
                    Err(e) => self.presenter.spinner_fail(&format!(
                        "{}: {}",
                        self.messages.image_not_saved(),
                        e
                    )),
                }
            }
            CallOutcome::Failure(e) => {
                let message = self
                    .orchestrator
                    .describe_failure(Operation::ImageGeneration, &e);
                self.presenter.spinner_fail(&message);
            }
        }
        Ok(())
    }

    async fn emotion(&mut self) -> Result<(), SessionError> {
        if self.session.transcription().is_none() {
            self.presenter.warn(self.messages.need_transcription());
            return Ok(());
        }

        self.presenter.start_spinner(self.messages.analyzing_emotion());
        match self.orchestrator.analyze_emotion(&mut self.session).await? {
            CallOutcome::Success(analysis) => {
                let label = format!(
                    "{}: {}",
                    self.messages.emotion_label(),
                    analysis.emotion.display_in(self.messages.locale())
                );
                self.presenter.spinner_success(&label);
                if analysis.record.is_some() {
                    self.presenter.success(self.messages.dream_saved());
                }
            }
            CallOutcome::Failure(e) => {
                let message = self
                    .orchestrator
                    .describe_failure(Operation::EmotionAnalysis, &e);
                if e.is_hard_failure() {
                    self.presenter.spinner_fail(&message);
                } else {
                    self.presenter.stop_spinner();
                    self.presenter.warn(&message);
                }
            }
        }
        Ok(())
    }

    fn status(&self) {
        let m = &self.messages;
        let session = &self.session;
        let audio = session
            .audio()
            .map(|a| format!("{} ({})", a.file_name(), a.human_readable_size()));

        self.presenter.key_value(m.state_label(), session.state().as_str());
        self.presenter
            .key_value(m.audio_label(), audio.as_deref().unwrap_or(m.none()));
        self.presenter.key_value(
            m.transcription_label(),
            session.transcription().unwrap_or(m.none()),
        );
        self.presenter.key_value(
            m.emotion_label(),
            session
                .emotion()
                .map(|e| e.display_in(m.locale()))
                .unwrap_or(m.none()),
        );
        self.presenter
            .key_value(m.image_label(), m.yes_no(session.generated_image().is_some()));
    }
}

/// Run the interactive session on stdin/stdout
pub async fn run_session(options: SessionOptions, config: AppConfig, production: bool) -> ExitCode {
    let presenter = Presenter::new();
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

    let messages = Messages::new(orchestrator.locale());
    let mut runner = SessionRunner::new(orchestrator, CpalRecorder::new(), config, presenter);
    runner.presenter.info(messages.welcome());

    if let Some(path) = options.audio {
        if let Err(e) = runner.handle(SessionCommand::Upload(path)).await {
            runner.report(&e);
        }
    }

    loop {
        runner.presenter.output_inline(messages.prompt());
        let line = match input.read_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "Failed to read command");
                return ExitCode::from(EXIT_ERROR);
            }
        };

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(CommandParseError::Unknown(_)) => {
                runner.presenter.warn(messages.unknown_command());
                continue;
            }
            Err(e) => {
                runner.presenter.warn(&e.to_string());
                continue;
            }
        };

        match runner.handle(command).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => runner.report(&e),
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

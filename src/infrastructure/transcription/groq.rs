//! Groq Whisper transcriber adapter

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::super::http::{build_client, check_status, post, transport_error};
use crate::application::credentials::ApiKey;
use crate::application::ports::Transcriber;
use crate::domain::config::DEFAULT_TRANSCRIPTION_MODEL;
use crate::domain::dream::AudioData;
use crate::domain::error::CapabilityError;
use crate::domain::recording::Duration;

/// Provider name used for credential lookup
pub const PROVIDER: &str = "Groq";

/// OpenAI-compatible transcription endpoint
const API_URL: &str = "https://api.groq.com/openai/v1/audio/transcriptions";

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: Option<String>,
}

/// Speech-to-text through Groq's hosted Whisper
pub struct GroqTranscriber {
    api_key: ApiKey,
    model: String,
    endpoint: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl GroqTranscriber {
    /// Create a transcriber with no request timeout
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
            endpoint: API_URL.to_string(),
            client: build_client(),
            timeout: None,
        }
    }

    /// Use a different Whisper model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the transcriber at another endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Bound each request by a timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn build_form(&self, audio: &AudioData, prompt: &str) -> Result<Form, CapabilityError> {
        let file = Part::bytes(audio.data().to_vec())
            .file_name(audio.file_name().to_string())
            .mime_str(audio.mime_type().as_str())
            .map_err(|e| CapabilityError::Request(e.to_string()))?;

        Ok(Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("prompt", prompt.to_string()))
    }

    fn extract_text(response: TranscriptionResponse) -> Result<String, CapabilityError> {
        let text = response.text.ok_or_else(|| {
            CapabilityError::Parse("missing 'text' in transcription response".to_string())
        })?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CapabilityError::EmptyResponse);
        }
        Ok(trimmed.to_string())
    }
}

#[async_trait]
impl Transcriber for GroqTranscriber {
    #[instrument(skip_all, fields(provider = PROVIDER))]
    async fn transcribe(&self, audio: &AudioData, prompt: &str) -> Result<String, CapabilityError> {
        let form = self.build_form(audio, prompt)?;
        debug!(model = %self.model, file = audio.file_name(), "Sending audio to Groq");

        let response = post(&self.client, &self.endpoint, self.timeout)
            .bearer_auth(self.api_key.expose())
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response).await?;

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| CapabilityError::Parse(e.to_string()))?;

        Self::extract_text(body)
    }
}

//! Clipdrop text-to-image adapter

use async_trait::async_trait;
use reqwest::multipart::Form;
use tracing::{debug, instrument};

use super::super::http::{build_client, check_status, post, transport_error};
use crate::application::credentials::ApiKey;
use crate::application::ports::ImageSynthesizer;
use crate::domain::dream::GeneratedImage;
use crate::domain::error::CapabilityError;
use crate::domain::recording::Duration;

/// Provider name used for credential lookup
pub const PROVIDER: &str = "Clipdrop";

const API_URL: &str = "https://clipdrop-api.co/text-to-image/v1";

/// Header carrying the Clipdrop key
const API_KEY_HEADER: &str = "x-api-key";

/// Generates dream illustrations with Clipdrop
pub struct ClipdropImageSynthesizer {
    api_key: ApiKey,
    endpoint: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl ClipdropImageSynthesizer {
    /// Create a synthesizer with the default 30 second timeout
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            endpoint: API_URL.to_string(),
            client: build_client(),
            timeout: Some(Duration::default_request_timeout()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl ImageSynthesizer for ClipdropImageSynthesizer {
    #[instrument(skip_all, fields(provider = PROVIDER))]
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, CapabilityError> {
        debug!(chars = prompt.chars().count(), "Sending prompt to Clipdrop");
        let form = Form::new().text("prompt", prompt.to_string());

        let response = post(&self.client, &self.endpoint, self.timeout)
            .header(API_KEY_HEADER, self.api_key.expose())
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response).await?;

        let bytes = response.bytes().await.map_err(transport_error)?;
        if bytes.is_empty() {
            return Err(CapabilityError::EmptyResponse);
        }

        Ok(GeneratedImage::new(bytes.to_vec()))
    }
}

//! Mistral chat-completions emotion classifier

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::super::http::{build_client, check_status, post, transport_error};
use crate::application::credentials::ApiKey;
use crate::application::ports::EmotionClassifier;
use crate::domain::config::DEFAULT_EMOTION_MODEL;
use crate::domain::dream::Emotion;
use crate::domain::error::CapabilityError;
use crate::domain::recording::Duration;

/// Provider name used for credential lookup
pub const PROVIDER: &str = "Mistral";

const API_URL: &str = "https://api.mistral.ai/v1/chat/completions";

/// One word is enough for a label
const MAX_TOKENS: u32 = 10;

const TEMPERATURE: f32 = 0.7;

// Request types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

// Response types

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Classifies the dominant emotion of a dream with a Mistral chat model
pub struct MistralEmotionClassifier {
    api_key: ApiKey,
    model: String,
    endpoint: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl MistralEmotionClassifier {
    /// Create a classifier with the default 30 second timeout
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            model: DEFAULT_EMOTION_MODEL.to_string(),
            endpoint: API_URL.to_string(),
            client: build_client(),
            timeout: Some(Duration::default_request_timeout()),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn build_request(&self, dream_text: &str, instruction: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: instruction.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: dream_text.to_string(),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    /// First choice's message content, if the response carries one
    fn extract_content(response: ChatResponse) -> Option<String> {
        response
            .choices?
            .into_iter()
            .next()?
            .message?
            .content
    }
}

#[async_trait]
impl EmotionClassifier for MistralEmotionClassifier {
    #[instrument(skip_all, fields(provider = PROVIDER))]
    async fn classify(
        &self,
        dream_text: &str,
        instruction: &str,
    ) -> Result<Emotion, CapabilityError> {
        let body = self.build_request(dream_text, instruction);
        debug!(model = %self.model, "Sending dream text to Mistral");

        let response = post(&self.client, &self.endpoint, self.timeout)
            .bearer_auth(self.api_key.expose())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response).await?;

        let content = match response.json::<ChatResponse>().await {
            Ok(parsed) => Self::extract_content(parsed),
            Err(e) => {
                warn!(error = %e, "Emotion response did not match the expected shape");
                None
            }
        };

        match content.and_then(|text| Emotion::from_response(&text)) {
            Some(emotion) => Ok(emotion),
            None => {
                warn!("Emotion response carried no label");
                Err(CapabilityError::NoResult)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::locale::Locale;

    fn classifier() -> MistralEmotionClassifier {
        MistralEmotionClassifier::new(ApiKey::new("key"))
    }

    #[test]
    fn request_has_system_then_user_message() {
        let instruction = Locale::French.emotion_instruction();
        let request = classifier().build_request("Je volais au-dessus des montagnes", &instruction);

        assert_eq!(request.model, "mistral-small-latest");
        assert_eq!(request.max_tokens, 10);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[0].content, instruction);
        assert_eq!(request.messages[1].role, "user");
        assert_eq!(request.messages[1].content, "Je volais au-dessus des montagnes");
    }

    #[test]
    fn request_serializes_expected_fields() {
        let request = classifier().with_model("custom").build_request("text", "instruction");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "custom");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "text");
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn extract_content_from_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Happy"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            MistralEmotionClassifier::extract_content(response),
            Some("Happy".to_string())
        );
    }

    #[test]
    fn extract_content_missing_shapes() {
        for body in [r#"{}"#, r#"{"choices":[]}"#, r#"{"choices":[{}]}"#] {
            let response: ChatResponse = serde_json::from_str(body).unwrap();
            assert!(MistralEmotionClassifier::extract_content(response).is_none());
        }
    }
}

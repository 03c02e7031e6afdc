//! HTTP adapter tests against local mock servers

use std::time::Duration;

use dream_synth::application::ports::{EmotionClassifier, ImageSynthesizer, Transcriber};
use dream_synth::application::{ApiKey, DreamOrchestrator};
use dream_synth::domain::dream::{AudioData, AudioMimeType, DreamSession, DreamState, Emotion, EmotionLabel};
use dream_synth::domain::error::CapabilityError;
use dream_synth::domain::locale::Locale;
use dream_synth::infrastructure::{ClipdropImageSynthesizer, GroqTranscriber, MistralEmotionClassifier};
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TRANSCRIBE_PATH: &str = "/openai/v1/audio/transcriptions";
const IMAGE_PATH: &str = "/text-to-image/v1";
const CHAT_PATH: &str = "/v1/chat/completions";

fn dream_audio() -> AudioData {
    AudioData::new(b"fake mp3 bytes".to_vec(), AudioMimeType::Mp3, "dream.mp3")
}

fn transcriber(server: &MockServer) -> GroqTranscriber {
    GroqTranscriber::new(ApiKey::new("groq-key"))
        .with_endpoint(format!("{}{}", server.uri(), TRANSCRIBE_PATH))
}

fn image_synthesizer(server: &MockServer) -> ClipdropImageSynthesizer {
    ClipdropImageSynthesizer::new(ApiKey::new("clipdrop-key"))
        .with_endpoint(format!("{}{}", server.uri(), IMAGE_PATH))
}

fn emotion_classifier(server: &MockServer) -> MistralEmotionClassifier {
    MistralEmotionClassifier::new(ApiKey::new("mistral-key"))
        .with_endpoint(format!("{}{}", server.uri(), CHAT_PATH))
}

fn chat_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}

#[tokio::test]
async fn groq_sends_audio_model_and_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRANSCRIBE_PATH))
        .and(header("authorization", "Bearer groq-key"))
        .and(body_string_contains("whisper-large-v3"))
        .and(body_string_contains("dream.mp3"))
        .and(body_string_contains("Please transcribe"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "text": "  I was flying over the sea. " })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let text = transcriber(&server)
        .transcribe(&dream_audio(), "Please transcribe this dream.")
        .await
        .unwrap();

    assert_eq!(text, "I was flying over the sea.");
}

#[tokio::test]
async fn groq_uses_configured_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("distil-whisper"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "text": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let text = transcriber(&server)
        .with_model("distil-whisper")
        .transcribe(&dream_audio(), "prompt")
        .await
        .unwrap();

    assert_eq!(text, "ok");
}

#[tokio::test]
async fn groq_rejected_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = transcriber(&server)
        .transcribe(&dream_audio(), "prompt")
        .await
        .unwrap_err();

    assert!(matches!(err, CapabilityError::InvalidApiKey));
}

#[tokio::test]
async fn groq_blank_text_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "text": "   " })))
        .mount(&server)
        .await;

    let err = transcriber(&server)
        .transcribe(&dream_audio(), "prompt")
        .await
        .unwrap_err();

    assert!(matches!(err, CapabilityError::EmptyResponse));
}

#[tokio::test]
async fn groq_response_without_text_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "x_groq": {} })))
        .mount(&server)
        .await;

    let err = transcriber(&server)
        .transcribe(&dream_audio(), "prompt")
        .await
        .unwrap_err();

    assert!(matches!(err, CapabilityError::Parse(_)));
}

#[tokio::test]
async fn clipdrop_returns_image_bytes() {
    let server = MockServer::start().await;
    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(header("x-api-key", "clipdrop-key"))
        .and(body_string_contains("a lighthouse made of glass"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let image = image_synthesizer(&server)
        .generate("a lighthouse made of glass")
        .await
        .unwrap();

    assert_eq!(image.bytes(), png.as_slice());
}

#[tokio::test]
async fn clipdrop_server_error_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = image_synthesizer(&server).generate("prompt").await.unwrap_err();

    match err {
        CapabilityError::Service { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("upstream exploded"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn clipdrop_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![1, 2, 3])
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let err = image_synthesizer(&server)
        .with_timeout(dream_synth::domain::Duration::from_millis(50))
        .generate("prompt")
        .await
        .unwrap_err();

    assert!(matches!(err, CapabilityError::Timeout));
}

#[tokio::test]
async fn clipdrop_empty_body_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = image_synthesizer(&server).generate("prompt").await.unwrap_err();

    assert!(matches!(err, CapabilityError::EmptyResponse));
}

#[tokio::test]
async fn mistral_sends_instruction_and_dream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(header("authorization", "Bearer mistral-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "mistral-small-latest",
            "max_tokens": 10,
            "messages": [
                { "role": "system", "content": "Pick one emotion." },
                { "role": "user", "content": "A storm chased me." }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("Frightening.")))
        .expect(1)
        .mount(&server)
        .await;

    let emotion = emotion_classifier(&server)
        .classify("A storm chased me.", "Pick one emotion.")
        .await
        .unwrap();

    assert_eq!(emotion, Emotion::Known(EmotionLabel::Frightening));
}

#[tokio::test]
async fn mistral_free_text_label_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("Nostalgic")))
        .mount(&server)
        .await;

    let emotion = emotion_classifier(&server)
        .classify("dream", "instruction")
        .await
        .unwrap();

    assert_eq!(emotion, Emotion::Other("Nostalgic".to_string()));
}

#[tokio::test]
async fn mistral_without_choices_is_no_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let err = emotion_classifier(&server)
        .classify("dream", "instruction")
        .await
        .unwrap_err();

    assert!(matches!(err, CapabilityError::NoResult));
}

#[tokio::test]
async fn mistral_non_json_body_is_no_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = emotion_classifier(&server)
        .classify("dream", "instruction")
        .await
        .unwrap_err();

    assert!(matches!(err, CapabilityError::NoResult));
}

#[tokio::test]
async fn mistral_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = emotion_classifier(&server)
        .classify("dream", "instruction")
        .await
        .unwrap_err();

    assert!(matches!(err, CapabilityError::RateLimited));
}

#[tokio::test]
async fn full_dream_against_mock_services() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRANSCRIBE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "text": "Je volais au-dessus de Paris." })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(body_string_contains("Je volais"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![7u8; 16]))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("Heureux")))
        .mount(&server)
        .await;

    let orchestrator = DreamOrchestrator::new(
        transcriber(&server),
        image_synthesizer(&server),
        emotion_classifier(&server),
        Locale::French,
    );
    let mut session = DreamSession::new();
    session.attach_audio(dream_audio()).unwrap();

    let text = orchestrator.transcribe(&mut session).await.unwrap();
    assert_eq!(text.success().as_deref(), Some("Je volais au-dessus de Paris."));

    let image = orchestrator.generate_image(&mut session).await.unwrap();
    assert!(image.is_success());

    let analysis = orchestrator
        .analyze_emotion(&mut session)
        .await
        .unwrap()
        .success()
        .unwrap();
    assert_eq!(analysis.emotion.display_in(Locale::French), "Heureux");

    let record = analysis.record.unwrap();
    assert!(record.image_generated());
    assert_eq!(record.transcription(), "Je volais au-dessus de Paris.");
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.state(), DreamState::Committed);
}

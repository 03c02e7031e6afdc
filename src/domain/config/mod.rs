//! Configuration domain module

mod app_config;

pub use app_config::{AppConfig, DEFAULT_EMOTION_MODEL, DEFAULT_TRANSCRIPTION_MODEL};

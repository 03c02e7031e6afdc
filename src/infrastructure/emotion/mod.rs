//! Emotion classification infrastructure module

mod mistral;

pub use mistral::{MistralEmotionClassifier, PROVIDER};

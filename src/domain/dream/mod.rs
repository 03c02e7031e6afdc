//! Dream domain module

mod audio_data;
mod emotion;
mod history;
mod image;
mod outcome;
mod record;
mod session;

pub use audio_data::{AudioData, AudioMimeType, RECORDED_FILE_NAME};
pub use emotion::{Emotion, EmotionLabel, ALL_EMOTIONS};
pub use history::DreamHistory;
pub use image::GeneratedImage;
pub use outcome::{CallOutcome, Operation};
pub use record::{DreamRecord, TIMESTAMP_FORMAT};
pub use session::{DreamSession, DreamState, InvalidStateTransition};

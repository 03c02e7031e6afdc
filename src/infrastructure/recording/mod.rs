//! Recording infrastructure module
//!
//! Bounded microphone capture via cpal, encoded to FLAC.

mod cpal_recorder;
mod flac_encoder;

pub use cpal_recorder::CpalRecorder;
pub use flac_encoder::{encode_speech, EncodingError, TARGET_SAMPLE_RATE};

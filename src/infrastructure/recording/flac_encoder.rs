//! Lossless packaging of microphone captures for upload

use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::config::Encoder;
use flacenc::error::Verify;
use flacenc::source::MemSource;

use crate::domain::dream::AudioData;

/// Sample rate recordings are converted to before encoding
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

const MONO: usize = 1;
const SAMPLE_BITS: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("No samples to encode")]
    NoSamples,

    #[error("Invalid FLAC settings: {0}")]
    Settings(String),

    #[error("FLAC encoding failed: {0}")]
    Encode(String),
}

/// Encode 16 kHz mono PCM as a FLAC recording ready for transcription
pub fn encode_speech(pcm: &[i16]) -> Result<AudioData, EncodingError> {
    if pcm.is_empty() {
        return Err(EncodingError::NoSamples);
    }

    let settings = Encoder::default()
        .into_verified()
        .map_err(|(_, e)| EncodingError::Settings(format!("{e:?}")))?;

    let widened: Vec<i32> = pcm.iter().copied().map(i32::from).collect();
    let source = MemSource::from_samples(&widened, MONO, SAMPLE_BITS, TARGET_SAMPLE_RATE as usize);

    let stream = flacenc::encode_with_fixed_block_size(&settings, source, settings.block_size)
        .map_err(|e| EncodingError::Encode(format!("{e:?}")))?;

    let mut sink = ByteSink::new();
    stream
        .write(&mut sink)
        .map_err(|e| EncodingError::Encode(e.to_string()))?;

    Ok(AudioData::recorded(sink.into_inner()))
}

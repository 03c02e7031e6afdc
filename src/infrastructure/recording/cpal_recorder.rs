//! Microphone recorder using cpal
//!
//! Captures a fixed-length mono take from the default input device,
//! resamples it to 16kHz and encodes it as FLAC.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use tokio::time::{interval, Duration as TokioDuration};
use tracing::{debug, warn};

use super::flac_encoder::{encode_speech, EncodingError, TARGET_SAMPLE_RATE};
use crate::application::ports::{AudioRecorder, ProgressCallback, RecordingError};
use crate::domain::dream::AudioData;
use crate::domain::recording::Duration;

/// Input frames handed to the resampler per call
const RESAMPLE_CHUNK: usize = 1024;

type SampleBuffer = Arc<Mutex<Vec<i16>>>;

/// Records dreams from the default microphone
#[derive(Debug, Default)]
pub struct CpalRecorder;

impl CpalRecorder {
    pub fn new() -> Self {
        Self
    }

    fn input_device() -> Result<cpal::Device, RecordingError> {
        cpal::default_host()
            .default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Pick an i16 or f32 input config, preferring mono and 16kHz
    fn input_config(device: &cpal::Device) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supports_target = |range: &cpal::SupportedStreamConfigRange| {
            range.min_sample_rate().0 <= TARGET_SAMPLE_RATE
                && range.max_sample_rate().0 >= TARGET_SAMPLE_RATE
        };

        let range = device
            .supported_input_configs()
            .map_err(|e| RecordingError::StartFailed(format!("Failed to get configs: {}", e)))?
            .filter(|c| matches!(c.sample_format(), SampleFormat::I16 | SampleFormat::F32))
            .min_by_key(|c| (!supports_target(c), c.channels()))
            .ok_or_else(|| RecordingError::StartFailed("No suitable input config".into()))?;

        let sample_rate = if supports_target(&range) {
            SampleRate(TARGET_SAMPLE_RATE)
        } else {
            range.min_sample_rate()
        };

        let config = StreamConfig {
            channels: range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };
        Ok((config, range.sample_format()))
    }

    fn build_stream(
        device: &cpal::Device,
        config: &StreamConfig,
        format: SampleFormat,
        buffer: SampleBuffer,
    ) -> Result<cpal::Stream, RecordingError> {
        let channels = config.channels;
        let on_error = |err: cpal::StreamError| warn!(error = %err, "Audio stream error");

        let stream = match format {
            SampleFormat::I16 => device.build_input_stream(
                config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    let mono = downmix(data, channels);
                    if let Ok(mut samples) = buffer.lock() {
                        samples.extend_from_slice(&mono);
                    }
                },
                on_error,
                None,
            ),
            SampleFormat::F32 => device.build_input_stream(
                config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let pcm: Vec<i16> = data.iter().map(|&s| to_i16(s)).collect();
                    let mono = downmix(&pcm, channels);
                    if let Ok(mut samples) = buffer.lock() {
                        samples.extend_from_slice(&mono);
                    }
                },
                on_error,
                None,
            ),
            other => {
                return Err(RecordingError::StartFailed(format!(
                    "Unsupported sample format: {:?}",
                    other
                )))
            }
        };

        stream.map_err(|e| RecordingError::StartFailed(e.to_string()))
    }

    /// Capture `duration_ms` of audio. Blocks the calling thread.
    fn capture(duration_ms: u64) -> Result<(Vec<i16>, u32), RecordingError> {
        let device = Self::input_device()?;
        let (config, format) = Self::input_config(&device)?;
        let sample_rate = config.sample_rate.0;
        debug!(sample_rate, channels = config.channels, "Opening input stream");

        let buffer: SampleBuffer = Arc::new(Mutex::new(Vec::new()));
        let stream = Self::build_stream(&device, &config, format, Arc::clone(&buffer))?;
        stream
            .play()
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        std::thread::sleep(std::time::Duration::from_millis(duration_ms));
        drop(stream);

        let samples = buffer
            .lock()
            .map(|mut samples| std::mem::take(&mut *samples))
            .map_err(|_| RecordingError::RecordingFailed("Sample buffer poisoned".into()))?;
        Ok((samples, sample_rate))
    }

    fn encode(samples: &[i16], sample_rate: u32) -> Result<AudioData, RecordingError> {
        let resampled = resample(samples, sample_rate)?;
        encode_speech(&resampled).map_err(|e| match e {
            EncodingError::NoSamples => RecordingError::NothingCaptured(e.to_string()),
            other => RecordingError::RecordingFailed(other.to_string()),
        })
    }
}

/// Average interleaved channels into mono
fn downmix(samples: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels as usize)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| i32::from(s)).sum();
            (sum / frame.len() as i32) as i16
        })
        .collect()
}

fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}

/// Resample mono audio to the 16kHz encoding rate
fn resample(samples: &[i16], source_rate: u32) -> Result<Vec<i16>, RecordingError> {
    if source_rate == TARGET_SAMPLE_RATE || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        TARGET_SAMPLE_RATE as usize,
        RESAMPLE_CHUNK,
        2,
        1,
    )
    .map_err(|e| RecordingError::RecordingFailed(format!("Resampler init failed: {}", e)))?;

    let expected =
        (samples.len() as u64 * u64::from(TARGET_SAMPLE_RATE) / u64::from(source_rate)) as usize;

    let chunk = resampler.input_frames_next();
    let mut input: Vec<f32> = samples.iter().map(|&s| f32::from(s) / 32768.0).collect();
    input.resize(input.len().div_ceil(chunk) * chunk, 0.0);

    let mut output = Vec::with_capacity(expected);
    for block in input.chunks(chunk) {
        let resampled = resampler
            .process(&[block], None)
            .map_err(|e| RecordingError::RecordingFailed(format!("Resampling failed: {}", e)))?;
        output.extend(resampled[0].iter().map(|&s| to_i16(s)));
    }

    output.truncate(expected);
    Ok(output)
}

#[async_trait]
impl AudioRecorder for CpalRecorder {
    async fn record(
        &self,
        duration: Duration,
        on_progress: Option<ProgressCallback>,
    ) -> Result<AudioData, RecordingError> {
        let duration_ms = duration.as_millis();
        let recording = Arc::new(AtomicBool::new(true));

        // cpal::Stream is not Send, so the whole capture runs on a blocking thread
        let capture = tokio::task::spawn_blocking(move || Self::capture(duration_ms));

        if let Some(progress) = on_progress {
            let recording = Arc::clone(&recording);
            let start = Instant::now();
            tokio::spawn(async move {
                let mut ticker = interval(TokioDuration::from_millis(100));
                while recording.load(Ordering::SeqCst) {
                    ticker.tick().await;
                    let elapsed = (start.elapsed().as_millis() as u64).min(duration_ms);
                    progress(elapsed, duration_ms);
                    if elapsed >= duration_ms {
                        break;
                    }
                }
            });
        }

        let captured = capture
            .await
            .map_err(|e| RecordingError::RecordingFailed(format!("Task join error: {}", e)));
        recording.store(false, Ordering::SeqCst);
        let (samples, sample_rate) = captured??;

        if samples.is_empty() {
            return Err(RecordingError::NothingCaptured(
                "the microphone produced no samples".to_string(),
            ));
        }

        tokio::task::spawn_blocking(move || Self::encode(&samples, sample_rate))
            .await
            .map_err(|e| RecordingError::RecordingFailed(format!("Encode task error: {}", e)))?
    }
}

//! WAV file decoding.
//!
//! Decodes a whole audio file into 16kHz mono 16-bit PCM, downmixing stereo
//! and resampling arbitrary input rates. The chunker carves its windows out
//! of the returned sample buffer.

use crate::defaults::SAMPLE_RATE;
use crate::error::{Result, StreamscribeError};
use std::io::Read;
use std::path::Path;

/// Fully decoded audio, ready for chunking.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// 16-bit PCM samples at [`SAMPLE_RATE`], mono.
    pub samples: Vec<i16>,
    /// Sample rate of `samples` (always [`SAMPLE_RATE`] after decode).
    pub sample_rate: u32,
}

impl DecodedAudio {
    /// Decodes a WAV file from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = hound::WavReader::open(path).map_err(|e| StreamscribeError::AudioDecode {
            message: format!("Failed to open {}: {}", path.display(), e),
        })?;
        Self::decode(reader)
    }

    /// Decodes WAV data from any reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let reader = hound::WavReader::new(reader).map_err(|e| StreamscribeError::AudioDecode {
            message: format!("Failed to parse WAV data: {}", e),
        })?;
        Self::decode(reader)
    }

    fn decode<R: Read>(mut reader: hound::WavReader<R>) -> Result<Self> {
        let spec = reader.spec();
        let source_rate = spec.sample_rate;
        let source_channels = spec.channels;

        if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(StreamscribeError::AudioDecode {
                message: format!(
                    "Unsupported sample format: {:?} {}-bit (expected 16-bit PCM)",
                    spec.sample_format, spec.bits_per_sample
                ),
            });
        }

        let raw_samples: Vec<i16> = reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| StreamscribeError::AudioDecode {
                message: format!("Failed to read WAV samples: {}", e),
            })?;

        // Downmix to mono by averaging channels
        let mono_samples = match source_channels {
            0 => {
                return Err(StreamscribeError::AudioDecode {
                    message: "WAV file reports zero channels".to_string(),
                });
            }
            1 => raw_samples,
            n => raw_samples
                .chunks_exact(n as usize)
                .map(|frame| {
                    let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                    (sum / n as i32) as i16
                })
                .collect(),
        };

        let samples = if source_rate != SAMPLE_RATE {
            resample(&mono_samples, source_rate, SAMPLE_RATE)
        } else {
            mono_samples
        };

        Ok(Self {
            samples,
            sample_rate: SAMPLE_RATE,
        })
    }

    /// Total duration of the decoded audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Consumes the decode and returns the sample buffer.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }
}

/// Simple linear interpolation resampling.
fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[source_idx]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}

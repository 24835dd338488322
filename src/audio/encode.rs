//! In-memory WAV encoding for chunk upload.
//!
//! The remote transcription API accepts whole audio files, so each chunk's
//! raw samples are wrapped in a minimal WAV container before the request.

use crate::error::{Result, StreamscribeError};
use std::io::Cursor;

/// Encodes 16-bit mono PCM samples as WAV bytes.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer =
        hound::WavWriter::new(&mut cursor, spec).map_err(|e| StreamscribeError::AudioEncode {
            message: format!("Failed to create WAV writer: {}", e),
        })?;

    {
        let mut writer16 = writer.get_i16_writer(samples.len() as u32);
        for &sample in samples {
            writer16.write_sample(sample);
        }
        writer16.flush().map_err(|e| StreamscribeError::AudioEncode {
            message: format!("Failed to write WAV samples: {}", e),
        })?;
    }

    writer.finalize().map_err(|e| StreamscribeError::AudioEncode {
        message: format!("Failed to finalize WAV data: {}", e),
    })?;

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::wav::DecodedAudio;
    use std::io::Cursor;

    #[test]
    fn encoded_wav_decodes_back_to_same_samples() {
        let samples = vec![0i16, 1000, -1000, i16::MAX, i16::MIN];
        let wav = encode_wav(&samples, 16000).unwrap();

        let decoded = DecodedAudio::from_reader(Cursor::new(wav)).unwrap();
        assert_eq!(decoded.samples, samples);
    }

    #[test]
    fn encoded_wav_has_riff_header() {
        let wav = encode_wav(&[0i16; 100], 16000).unwrap();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
    }

    #[test]
    fn empty_samples_still_produce_valid_container() {
        let wav = encode_wav(&[], 16000).unwrap();
        assert!(wav.len() >= 44); // header only
    }
}

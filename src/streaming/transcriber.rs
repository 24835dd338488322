//! Per-chunk transcription.
//!
//! Encodes one chunk's samples to WAV and issues one service call. Failures
//! are not retried here; the scheduler decides what a chunk failure means
//! for the stream.

use crate::audio::encode_wav;
use crate::error::Result;
use crate::service::{ServiceResponse, TranscriptionService};
use crate::streaming::chunker::AudioChunk;
use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;

/// Issues transcription calls for individual chunks.
pub struct ChunkTranscriber<S> {
    service: Arc<S>,
    sample_rate: u32,
}

impl<S> Clone for ChunkTranscriber<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            sample_rate: self.sample_rate,
        }
    }
}

impl<S: TranscriptionService> ChunkTranscriber<S> {
    pub fn new(service: Arc<S>, sample_rate: u32) -> Self {
        Self {
            service,
            sample_rate,
        }
    }

    /// Transcribes one chunk.
    ///
    /// `language` is the resolved hint for every chunk except the detection
    /// chunk, which passes `None` so the service reports what it heard.
    pub async fn transcribe(
        &self,
        chunk: &AudioChunk,
        language: Option<&str>,
    ) -> Result<ServiceResponse> {
        let wav = encode_wav(&chunk.samples, self.sample_rate)?;
        debug!(
            chunk = chunk.index,
            start = chunk.start_offset,
            bytes = wav.len(),
            hint = ?language,
            "transcribing chunk"
        );

        let response = self.service.transcribe(Bytes::from(wav), language).await?;

        debug!(
            chunk = chunk.index,
            segments = response.segments.len(),
            "chunk transcribed"
        );
        Ok(response)
    }
}

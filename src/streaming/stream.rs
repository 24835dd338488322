//! Public entry point for streaming transcription.
//!
//! Decodes the audio file, resolves the language (explicit hint or one
//! detection call on the first chunk), then spawns the pipelined
//! transcription of the remaining chunks. The language is available as soon
//! as this call returns; segments arrive on the returned stream as chunks
//! complete.

use crate::audio::DecodedAudio;
use crate::error::{Result, StreamscribeError};
use crate::language::{self, Language};
use crate::service::TranscriptionService;
use crate::streaming::chunker::{Chunker, ChunkerConfig};
use crate::streaming::detector::detect_language;
use crate::streaming::scheduler::{PipelineScheduler, SchedulerConfig};
use crate::streaming::stitcher::{StitchedSegment, Stitcher, StitcherConfig, TranscribedChunk};
use crate::streaming::transcriber::ChunkTranscriber;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Options for one transcription run.
#[derive(Debug, Clone, Default)]
pub struct StreamOptions {
    /// Explicit language code. When set, detection is skipped entirely and
    /// every chunk (including the first) is transcribed with this hint.
    pub language: Option<String>,
    pub chunker: ChunkerConfig,
    pub stitcher: StitcherConfig,
    pub scheduler: SchedulerConfig,
}

impl StreamOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit language code, skipping detection.
    pub fn with_language(mut self, code: &str) -> Self {
        self.language = Some(code.to_string());
        self
    }
}

/// Lazy, finite sequence of stitched segments.
///
/// Consumed once per run: each `next` suspends until a segment is ready,
/// yields at most one terminal error, and returns `None` at end of stream.
/// Dropping the stream cancels in-flight and undispatched chunk calls.
pub struct SegmentStream {
    rx: mpsc::Receiver<Result<StitchedSegment>>,
}

impl SegmentStream {
    /// Waits for the next stitched segment.
    pub async fn next(&mut self) -> Option<Result<StitchedSegment>> {
        self.rx.recv().await
    }

    /// Collects the remaining segments, stopping at the first error.
    pub async fn collect(mut self) -> Result<Vec<StitchedSegment>> {
        let mut segments = Vec::new();
        while let Some(item) = self.next().await {
            segments.push(item?);
        }
        Ok(segments)
    }
}

/// Transcribes an audio file as a live stream of segments.
///
/// Returns the resolved language together with the segment stream; the
/// language is known after a single round-trip on the first chunk (or
/// immediately when `options.language` is set).
///
/// # Errors
/// Fails before returning the stream on decode errors, an unsupported
/// (detected or supplied) language, or a failure of the first chunk's
/// transcription call. Later chunk failures surface on the stream at the
/// position the failing chunk would have been stitched.
pub async fn transcribe_streaming<S>(
    service: Arc<S>,
    path: impl AsRef<Path>,
    options: StreamOptions,
) -> Result<(Language, SegmentStream)>
where
    S: TranscriptionService + Send + Sync + 'static,
{
    let audio = DecodedAudio::from_path(path.as_ref())?;
    debug!(
        path = %path.as_ref().display(),
        duration_secs = audio.duration_secs(),
        "audio decoded"
    );

    let sample_rate = audio.sample_rate;
    let mut chunker = Chunker::new(audio.into_samples(), options.chunker.clone());
    let first_chunk = chunker
        .next()
        .ok_or_else(|| StreamscribeError::AudioDecode {
            message: "Audio file contains no samples".to_string(),
        })?;

    let transcriber = ChunkTranscriber::new(service, sample_rate);

    // The language is resolved exactly once per run: either from the
    // caller's hint, or by the detection call whose segments double as the
    // first chunk's result.
    let (lang, first_segments) = match &options.language {
        Some(code) => {
            let lang =
                language::resolve(code).ok_or_else(|| StreamscribeError::UnsupportedLanguage {
                    reported: code.clone(),
                })?;
            let response = transcriber
                .transcribe(&first_chunk, Some(lang.code))
                .await?;
            (lang, response.segments)
        }
        None => {
            let detected = detect_language(&transcriber, &first_chunk).await?;
            (detected.language, detected.segments)
        }
    };

    let first = TranscribedChunk {
        index: first_chunk.index,
        start_offset: first_chunk.start_offset,
        overlap_prefix_secs: first_chunk.overlap_prefix_secs,
        segments: first_segments,
    };

    let scheduler = PipelineScheduler::new(transcriber, options.scheduler.clone());
    let stitcher = Stitcher::with_config(options.stitcher.clone());
    let (tx, rx) = mpsc::channel(options.scheduler.channel_capacity.max(1));
    let code = lang.code.to_string();

    tokio::spawn(async move {
        scheduler.run(chunker, first, code, stitcher, tx).await;
    });

    Ok((lang, SegmentStream { rx }))
}

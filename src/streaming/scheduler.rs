//! Pipeline scheduler.
//!
//! Overlaps chunk transcription calls so total latency approximates one
//! chunk round-trip instead of the sum over all chunks: up to
//! `max_in_flight` requests run concurrently, and a reorder buffer releases
//! results to the stitcher strictly in chunk-index order no matter which
//! call finishes first.
//!
//! Failure and cancellation both propagate through channel closure: a chunk
//! failure is emitted at its in-order position and the stream ends there;
//! a consumer that stops pulling closes the output channel, which abandons
//! in-flight calls and stops further dispatch.

use crate::defaults;
use crate::error::Result;
use crate::service::TranscriptionService;
use crate::streaming::chunker::AudioChunk;
use crate::streaming::stitcher::{StitchedSegment, Stitcher, TranscribedChunk};
use crate::streaming::transcriber::ChunkTranscriber;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, warn};

/// Configuration for the scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Maximum number of transcription calls in flight at once.
    pub max_in_flight: usize,
    /// Capacity of the stitched-segment output channel.
    pub channel_capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_in_flight: defaults::MAX_IN_FLIGHT,
            channel_capacity: defaults::CHANNEL_CAPACITY,
        }
    }
}

/// Dispatches chunk transcriptions and feeds the stitcher in order.
pub struct PipelineScheduler<S> {
    transcriber: ChunkTranscriber<S>,
    config: SchedulerConfig,
}

impl<S: TranscriptionService + Send + Sync + 'static> PipelineScheduler<S> {
    pub fn new(transcriber: ChunkTranscriber<S>, config: SchedulerConfig) -> Self {
        Self {
            transcriber,
            config,
        }
    }

    /// Runs the pipeline to completion.
    ///
    /// `first` is chunk 0's already-transcribed result (the detection call,
    /// or the first hinted call); `chunks` yields the remaining chunks in
    /// index order. Stitched segments and at most one terminal error go to
    /// `output`.
    pub async fn run(
        self,
        chunks: impl Iterator<Item = AudioChunk> + Send + 'static,
        first: TranscribedChunk,
        language: String,
        mut stitcher: Stitcher,
        output: mpsc::Sender<Result<StitchedSegment>>,
    ) {
        // Chunk 0 is already transcribed; stitch and emit it before any
        // network work so the caller sees output after one round-trip.
        for segment in stitcher.stitch(first) {
            if output.send(Ok(segment)).await.is_err() {
                return;
            }
        }

        let (results_tx, results_rx) =
            mpsc::channel::<(usize, Result<TranscribedChunk>)>(self.config.max_in_flight.max(1));

        let collector = tokio::spawn(collect_in_order(results_rx, stitcher, output));

        let semaphore = Arc::new(Semaphore::new(self.config.max_in_flight.max(1)));
        for chunk in chunks {
            // Collector gone means failure or cancellation: stop dispatching
            if results_tx.is_closed() {
                debug!(chunk = chunk.index, "skipping dispatch, pipeline stopped");
                break;
            }
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let transcriber = self.transcriber.clone();
            let results_tx = results_tx.clone();
            let language = language.clone();

            tokio::spawn(async move {
                let _permit = permit;
                // Re-check after waiting on the permit: abandon work nobody
                // will consume
                if results_tx.is_closed() {
                    return;
                }

                let index = chunk.index;
                let result = transcriber
                    .transcribe(&chunk, Some(&language))
                    .await
                    .map(|response| TranscribedChunk {
                        index,
                        start_offset: chunk.start_offset,
                        overlap_prefix_secs: chunk.overlap_prefix_secs,
                        segments: response.segments,
                    });
                let _ = results_tx.send((index, result)).await;
            });
        }

        drop(results_tx);
        let _ = collector.await;
    }
}

/// Reorder buffer: holds completed results until every lower-indexed chunk
/// has been stitched, then releases them to the stitcher.
async fn collect_in_order(
    mut results_rx: mpsc::Receiver<(usize, Result<TranscribedChunk>)>,
    mut stitcher: Stitcher,
    output: mpsc::Sender<Result<StitchedSegment>>,
) {
    let mut pending: BTreeMap<usize, Result<TranscribedChunk>> = BTreeMap::new();
    // Chunk 0 was stitched before dispatch began
    let mut next_index = 1usize;

    while let Some((index, result)) = results_rx.recv().await {
        pending.insert(index, result);

        while let Some(result) = pending.remove(&next_index) {
            match result {
                Ok(chunk) => {
                    debug!(chunk = chunk.index, "releasing chunk to stitcher");
                    for segment in stitcher.stitch(chunk) {
                        if output.send(Ok(segment)).await.is_err() {
                            // Consumer stopped pulling: normal early
                            // termination, drop everything
                            return;
                        }
                    }
                    next_index += 1;
                }
                Err(e) => {
                    // Skipping the chunk would leave an undetectable gap in
                    // the transcript, so the stream terminates here.
                    warn!(chunk = next_index, error = %e, "chunk failed, ending stream");
                    let _ = output.send(Err(e)).await;
                    return;
                }
            }
        }
    }
}

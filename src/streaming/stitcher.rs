//! Segment stitcher.
//!
//! Consumes per-chunk transcription results strictly in chunk-index order
//! and produces one globally-ordered, duplicate-free segment stream:
//! - rebases chunk-local timestamps onto the global timeline
//! - drops boundary segments already covered by the previous chunk's overlap
//! - keeps emitted segments non-overlapping and non-decreasing in start time
//!
//! Purely synchronous: all suspension happens in the scheduler that feeds it.

use crate::defaults;
use crate::service::RawSegment;
use tracing::debug;

/// Configuration for boundary duplicate detection.
#[derive(Debug, Clone)]
pub struct StitcherConfig {
    /// Minimum normalized text length for a segment to be dropped as a
    /// duplicate. Shorter fragments are kept and resolved by time clamping.
    pub min_match_chars: usize,
}

impl Default for StitcherConfig {
    fn default() -> Self {
        Self {
            min_match_chars: defaults::MIN_MATCH_CHARS,
        }
    }
}

/// A segment on the global timeline, ready for the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct StitchedSegment {
    /// Start time in seconds from the beginning of the audio.
    pub start: f64,
    /// End time in seconds from the beginning of the audio.
    pub end: f64,
    /// Transcribed text.
    pub text: String,
}

/// One chunk's transcription result, annotated with its global position.
#[derive(Debug, Clone)]
pub struct TranscribedChunk {
    pub index: usize,
    /// Chunk start on the global timeline, in seconds.
    pub start_offset: f64,
    /// Duration shared with the previous chunk, in seconds.
    pub overlap_prefix_secs: f64,
    /// Segments in chunk-local time.
    pub segments: Vec<RawSegment>,
}

/// Stateful stitcher over an in-order sequence of transcribed chunks.
pub struct Stitcher {
    config: StitcherConfig,
    /// Global end time of the last emitted segment.
    emitted_until: f64,
    /// Recently emitted segments as (global end, normalized text), kept for
    /// boundary matching and pruned once they fall out of overlap reach.
    recent: Vec<(f64, String)>,
    first_segment_emitted: bool,
}

impl Stitcher {
    pub fn new() -> Self {
        Self::with_config(StitcherConfig::default())
    }

    pub fn with_config(config: StitcherConfig) -> Self {
        Self {
            config,
            emitted_until: 0.0,
            recent: Vec::new(),
            first_segment_emitted: false,
        }
    }

    /// Global end time covered by emissions so far.
    pub fn emitted_until(&self) -> f64 {
        self.emitted_until
    }

    /// Stitches the next chunk (callers must pass chunks in index order) and
    /// returns the segments to emit for it.
    pub fn stitch(&mut self, chunk: TranscribedChunk) -> Vec<StitchedSegment> {
        // Only emissions reaching into this chunk's overlap matter for matching
        self.recent.retain(|(end, _)| *end > chunk.start_offset);
        let tail: String = self
            .recent
            .iter()
            .map(|(_, norm)| norm.as_str())
            .collect();

        let overlap_end = chunk.start_offset + chunk.overlap_prefix_secs;
        let mut emitted = Vec::new();

        for segment in chunk.segments {
            let start = segment.start + chunk.start_offset;
            let end = segment.end + chunk.start_offset;
            let norm = normalize(&segment.text);

            if chunk.index > 0
                && start < overlap_end
                && start < self.emitted_until
                && norm.len() >= self.config.min_match_chars
                && tail.contains(&norm)
            {
                debug!(
                    chunk = chunk.index,
                    start,
                    text = %segment.text.trim(),
                    "dropping duplicate boundary segment"
                );
                continue;
            }

            // Time ranges never overlap on output: anything already covered
            // is cut away, and a segment with nothing left is dropped.
            if end <= self.emitted_until {
                continue;
            }
            let start = start.max(self.emitted_until);

            let text = if self.first_segment_emitted {
                segment.text
            } else {
                self.first_segment_emitted = true;
                segment.text.trim_start().to_string()
            };

            self.emitted_until = end;
            self.recent.push((end, norm));
            emitted.push(StitchedSegment { start, end, text });
        }

        emitted
    }
}

impl Default for Stitcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercased alphanumeric projection of a segment's text, so boundary
/// matching ignores casing, whitespace and punctuation differences between
/// two decodings of the same audio.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

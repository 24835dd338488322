//! Audio chunker.
//!
//! Carves decoded audio into overlapping fixed-duration windows. Each chunk
//! after the first starts `overlap_secs` before the previous chunk ended, so
//! adjacent chunks share boundary content for the stitcher to match against.

use crate::defaults;

/// Configuration for the chunker.
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Target chunk duration in seconds.
    pub chunk_secs: f64,
    /// Overlap duration in seconds copied from the previous chunk's tail.
    pub overlap_secs: f64,
    /// Sample rate of the input samples.
    pub sample_rate: u32,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_secs: defaults::CHUNK_SECONDS,
            overlap_secs: defaults::OVERLAP_SECONDS,
            sample_rate: defaults::SAMPLE_RATE,
        }
    }
}

/// One bounded window of audio, positioned on the global timeline.
#[derive(Debug, Clone)]
pub struct AudioChunk {
    /// Ordinal position, ascending from 0.
    pub index: usize,
    /// Chunk start time on the global timeline, in seconds.
    pub start_offset: f64,
    /// Chunk end time on the global timeline, in seconds.
    pub end_offset: f64,
    /// Raw samples for this window.
    pub samples: Vec<i16>,
    /// Duration shared with the previous chunk, in seconds (0 for chunk 0).
    pub overlap_prefix_secs: f64,
}

/// Lazy iterator of [`AudioChunk`]s over a decoded sample buffer.
///
/// Finite and not restartable: it owns the samples and hands out windows in
/// ascending index order exactly once.
pub struct Chunker {
    config: ChunkerConfig,
    samples: Vec<i16>,
    /// Start sample of the next chunk.
    cursor: usize,
    index: usize,
    /// End sample of the previously emitted chunk.
    prev_end: usize,
    done: bool,
}

impl Chunker {
    pub fn new(samples: Vec<i16>, config: ChunkerConfig) -> Self {
        Self {
            config,
            samples,
            cursor: 0,
            index: 0,
            prev_end: 0,
            done: false,
        }
    }

    fn chunk_samples(&self) -> usize {
        (self.config.chunk_secs * self.config.sample_rate as f64) as usize
    }

    fn overlap_samples(&self) -> usize {
        (self.config.overlap_secs * self.config.sample_rate as f64) as usize
    }

    /// Distance between consecutive chunk starts. Clamped to at least one
    /// sample so a misconfigured overlap cannot stall the iterator.
    fn stride_samples(&self) -> usize {
        self.chunk_samples()
            .saturating_sub(self.overlap_samples())
            .max(1)
    }
}

impl Iterator for Chunker {
    type Item = AudioChunk;

    fn next(&mut self) -> Option<AudioChunk> {
        if self.done || self.cursor >= self.samples.len() {
            return None;
        }

        let rate = self.config.sample_rate as f64;
        let start = self.cursor;
        let end = (start + self.chunk_samples()).min(self.samples.len());

        // The stated prefix never extends past audio actually shared with the
        // previous chunk, which can be less than the configured overlap when
        // the stride is clamped.
        let overlap_prefix_secs = if self.index == 0 {
            0.0
        } else {
            let shared = self.prev_end.saturating_sub(start);
            self.overlap_samples().min(shared) as f64 / rate
        };

        let chunk = AudioChunk {
            index: self.index,
            start_offset: start as f64 / rate,
            end_offset: end as f64 / rate,
            samples: self.samples[start..end].to_vec(),
            overlap_prefix_secs,
        };

        if end >= self.samples.len() {
            self.done = true;
        }
        self.cursor = start + self.stride_samples();
        self.prev_end = end;
        self.index += 1;

        Some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(chunk_secs: f64, overlap_secs: f64) -> ChunkerConfig {
        ChunkerConfig {
            chunk_secs,
            overlap_secs,
            sample_rate: 16000,
        }
    }

    fn secs(n: f64) -> usize {
        (n * 16000.0) as usize
    }

    #[test]
    fn audio_shorter_than_chunk_yields_exactly_one_chunk() {
        let chunker = Chunker::new(vec![0i16; secs(5.0)], config(30.0, 2.0));

        let chunks: Vec<_> = chunker.collect();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].start_offset, 0.0);
        assert!((chunks[0].end_offset - 5.0).abs() < 1e-9);
        assert_eq!(chunks[0].overlap_prefix_secs, 0.0);
    }

    #[test]
    fn chunks_are_emitted_in_ascending_index_order() {
        // 10s chunks with 2s overlap: starts at 0, 8, 16; the chunk at 16
        // reaches the end of the 25s buffer and is the last
        let chunker = Chunker::new(vec![0i16; secs(25.0)], config(10.0, 2.0));

        let indexes: Vec<_> = chunker.map(|c| c.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn subsequent_chunks_start_inside_previous_chunk() {
        // 10s chunks with 2s overlap: starts at 0, 8, 16, ...
        let chunker = Chunker::new(vec![0i16; secs(25.0)], config(10.0, 2.0));
        let chunks: Vec<_> = chunker.collect();

        assert!((chunks[0].start_offset - 0.0).abs() < 1e-9);
        assert!((chunks[1].start_offset - 8.0).abs() < 1e-9);
        assert!((chunks[2].start_offset - 16.0).abs() < 1e-9);

        // Each chunk after the first shares exactly 2s with the previous,
        // and its stated prefix matches that shared span
        for pair in chunks.windows(2) {
            let shared = pair[0].end_offset - pair[1].start_offset;
            assert!((shared - 2.0).abs() < 1e-9, "overlap was {shared}");
            assert!((pair[1].overlap_prefix_secs - shared).abs() < 1e-9);
        }
    }

    #[test]
    fn final_chunk_may_be_short_but_is_emitted() {
        // 27s audio, 10s chunks, 2s overlap: starts at 0, 8, 16, 24 and the
        // last chunk covers 24..27
        let chunker = Chunker::new(vec![0i16; secs(27.0)], config(10.0, 2.0));
        let chunks: Vec<_> = chunker.collect();

        assert_eq!(chunks.len(), 4);
        let last = chunks.last().unwrap();
        assert!((last.start_offset - 24.0).abs() < 1e-9);
        assert!((last.end_offset - 27.0).abs() < 1e-9);
        assert_eq!(last.samples.len(), secs(3.0));
    }

    #[test]
    fn overlap_prefix_never_exceeds_audio_shared_with_predecessor() {
        // Clamped stride: 1s chunks with a 5s overlap advance one sample at
        // a time, so consecutive chunks share just under a full chunk
        let config = ChunkerConfig {
            chunk_secs: 1.0,
            overlap_secs: 5.0,
            sample_rate: 100,
        };
        let chunks: Vec<_> = Chunker::new(vec![0i16; 150], config).take(10).collect();

        assert!((chunks[1].overlap_prefix_secs - 0.99).abs() < 1e-9);
        for pair in chunks.windows(2) {
            let shared = pair[0].end_offset - pair[1].start_offset;
            assert!(
                pair[1].overlap_prefix_secs <= shared + 1e-9,
                "prefix {} overstates shared span {}",
                pair[1].overlap_prefix_secs,
                shared
            );
        }
    }

    #[test]
    fn chunks_cover_all_samples_without_gaps() {
        let total = secs(33.5);
        let chunker = Chunker::new(vec![0i16; total], config(10.0, 2.0));

        let mut covered_until = 0usize;
        for chunk in chunker {
            let start = secs(chunk.start_offset);
            let end = secs(chunk.end_offset);
            assert!(start <= covered_until, "gap before sample {start}");
            covered_until = covered_until.max(end);
        }
        assert_eq!(covered_until, total);
    }

    #[test]
    fn chunk_samples_match_their_global_span() {
        let samples: Vec<i16> = (0..secs(12.0)).map(|i| (i % 4096) as i16).collect();
        let chunker = Chunker::new(samples.clone(), config(10.0, 2.0));

        for chunk in chunker {
            let start = secs(chunk.start_offset);
            assert_eq!(chunk.samples[0], samples[start]);
            assert_eq!(
                chunk.samples.len(),
                secs(chunk.end_offset) - secs(chunk.start_offset)
            );
        }
    }

    #[test]
    fn empty_audio_yields_no_chunks() {
        let mut chunker = Chunker::new(Vec::new(), config(10.0, 2.0));
        assert!(chunker.next().is_none());
    }

    #[test]
    fn exact_multiple_of_chunk_length_has_no_empty_tail_chunk() {
        // 10s audio with 10s chunks: exactly one chunk, not a zero-length second
        let chunker = Chunker::new(vec![0i16; secs(10.0)], config(10.0, 2.0));
        let chunks: Vec<_> = chunker.collect();
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn overlap_larger_than_chunk_still_advances() {
        // Misconfigured overlap must not stall the iterator
        let config = ChunkerConfig {
            chunk_secs: 1.0,
            overlap_secs: 5.0,
            sample_rate: 100,
        };
        let chunker = Chunker::new(vec![0i16; 150], config);
        let count = chunker.take(1000).count();
        assert!(count > 0);
        assert!(count < 1000);
    }
}

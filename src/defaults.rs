//! Default configuration constants for streamscribe.
//!
//! Shared across the chunker, scheduler and service configs so the same
//! numbers are not duplicated in several `Default` impls.

/// Audio sample rate in Hz that the pipeline works with internally.
///
/// 16kHz mono is what speech models expect; decoded input is resampled
/// to this rate before chunking.
pub const SAMPLE_RATE: u32 = 16_000;

/// Default chunk duration in seconds.
///
/// Whisper-style models run inference on 30 seconds of audio at a time and
/// pad shorter inputs, so smaller chunks waste quota without improving
/// latency per word.
pub const CHUNK_SECONDS: f64 = 30.0;

/// Default overlap duration in seconds between adjacent chunks.
///
/// The overlap is what gives the stitcher shared content to match against
/// when removing duplicated text at chunk boundaries. Two seconds covers a
/// handful of words at normal speaking pace.
pub const OVERLAP_SECONDS: f64 = 2.0;

/// Default maximum number of transcription requests in flight at once.
///
/// Bounds both request rate against the remote service and the memory held
/// by completed-but-not-yet-stitchable results.
pub const MAX_IN_FLIGHT: usize = 2;

/// Default capacity of the stitched-segment output channel.
pub const CHANNEL_CAPACITY: usize = 32;

/// Minimum normalized length for boundary duplicate matching.
///
/// Fragments shorter than this are too ambiguous to treat as duplicates of
/// the previous chunk's tail.
pub const MIN_MATCH_CHARS: usize = 3;

/// Base URL of the remote transcription API.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default remote transcription model.
pub const OPENAI_MODEL: &str = "whisper-1";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

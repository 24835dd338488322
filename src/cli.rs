//! Command-line interface for streamscribe
//!
//! Provides argument parsing using clap derive macros.

use crate::defaults;
use clap::Parser;
use std::path::PathBuf;

/// Transcribe an audio file and stream the text as it is recognized
#[derive(Parser, Debug)]
#[command(
    name = "streamscribe",
    version,
    about = "Streaming transcription over a batch speech-to-text API"
)]
pub struct Cli {
    /// Path to the audio file (WAV) to transcribe
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Language code (e.g. en, de). Skips detection; default: auto-detect
    #[arg(short = 'l', long = "language-code", value_name = "LANG")]
    pub language_code: Option<String>,

    /// Chunk duration in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = defaults::CHUNK_SECONDS)]
    pub chunk_secs: f64,

    /// Overlap between adjacent chunks in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = defaults::OVERLAP_SECONDS)]
    pub overlap_secs: f64,

    /// Maximum concurrent transcription requests
    #[arg(long, value_name = "N", default_value_t = defaults::MAX_IN_FLIGHT)]
    pub max_in_flight: usize,

    /// Suppress the detected-language line
    #[arg(short, long)]
    pub quiet: bool,
}

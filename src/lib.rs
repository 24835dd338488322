//! streamscribe - streaming transcription over batch speech-to-text APIs.
//!
//! Splits a local audio file into overlapping chunks, pipelines the
//! per-chunk transcription calls against a whole-file API, and stitches the
//! results into one ordered, duplicate-free stream of timed segments. The
//! spoken language is detected once on the first chunk and reused for every
//! later one.
//!
//! ```no_run
//! use std::sync::Arc;
//! use streamscribe::{OpenAiConfig, OpenAiService, StreamOptions, transcribe_streaming};
//!
//! # async fn example() -> streamscribe::Result<()> {
//! let service = Arc::new(OpenAiService::new(OpenAiConfig::from_env()?));
//! let (language, mut segments) =
//!     transcribe_streaming(service, "voice.wav", StreamOptions::new()).await?;
//!
//! println!("Detected language: {}", language.name);
//! while let Some(segment) = segments.next().await {
//!     print!("{}", segment?.text);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod cli;
pub mod defaults;
pub mod error;
pub mod language;
pub mod service;
pub mod streaming;

// Service boundary (transcription call + deterministic fake)
pub use service::{
    OpenAiConfig, OpenAiService, RawSegment, ScriptedService, ServiceResponse,
    TranscriptionService,
};

// Streaming pipeline
pub use streaming::{
    SegmentStream, StitchedSegment, StreamOptions, transcribe_streaming,
};

// Error handling
pub use error::{Result, StreamscribeError};

// Language resolution
pub use language::Language;

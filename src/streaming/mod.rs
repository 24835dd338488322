//! Streaming emulation over a batch transcription service.
//!
//! ```text
//! ┌─────────┐   ┌──────────┐   ┌──────────────────────┐   ┌──────────┐
//! │ Decoded │──▶│ Chunker  │──▶│ Scheduler            │──▶│ Stitcher │──▶ SegmentStream
//! │ audio   │   │(overlap) │   │ (bounded in-flight   │   │ (rebase, │
//! └─────────┘   └──────────┘   │  calls + reorder)    │   │  dedup)  │
//!                    │         └──────────────────────┘   └──────────┘
//!                    ▼                    ▲
//!              first chunk ── Language ───┘
//!                             Detector   (language hint for all later chunks)
//! ```
//!
//! The chunker and stitcher are synchronous transforms; only the scheduler
//! and the per-chunk transcriber suspend, awaiting the remote service.

pub mod chunker;
pub mod detector;
pub mod scheduler;
pub mod stitcher;
pub mod stream;
pub mod transcriber;

pub use chunker::{AudioChunk, Chunker, ChunkerConfig};
pub use detector::{DetectedLanguage, detect_language};
pub use scheduler::{PipelineScheduler, SchedulerConfig};
pub use stitcher::{StitchedSegment, Stitcher, StitcherConfig, TranscribedChunk};
pub use stream::{SegmentStream, StreamOptions, transcribe_streaming};
pub use transcriber::ChunkTranscriber;

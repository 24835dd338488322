//! One-time language detection.
//!
//! The first chunk is transcribed without a language hint; the service
//! reports what it heard and that result gates every later chunk. The
//! detection call's segments are not thrown away: they are chunk 0's
//! transcription and flow into the stitcher, so detection costs no extra
//! request.

use crate::error::{Result, StreamscribeError};
use crate::language::{self, Language};
use crate::service::{RawSegment, TranscriptionService};
use crate::streaming::chunker::AudioChunk;
use crate::streaming::transcriber::ChunkTranscriber;
use tracing::debug;

/// Outcome of the detection call: the resolved language plus the first
/// chunk's segments.
#[derive(Debug, Clone)]
pub struct DetectedLanguage {
    pub language: Language,
    pub segments: Vec<RawSegment>,
}

/// Detects the spoken language from the first chunk.
///
/// Fails with `UnsupportedLanguage` when the service reports nothing or a
/// value outside the supported table.
pub async fn detect_language<S: TranscriptionService>(
    transcriber: &ChunkTranscriber<S>,
    first_chunk: &AudioChunk,
) -> Result<DetectedLanguage> {
    let response = transcriber.transcribe(first_chunk, None).await?;

    let reported =
        response
            .language
            .ok_or_else(|| StreamscribeError::UnsupportedLanguage {
                reported: "<not reported>".to_string(),
            })?;

    let language =
        language::resolve(&reported).ok_or(StreamscribeError::UnsupportedLanguage {
            reported,
        })?;

    debug!(code = language.code, name = language.name, "language detected");

    Ok(DetectedLanguage {
        language,
        segments: response.segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{ScriptedService, ServiceResponse};
    use std::sync::Arc;

    fn first_chunk() -> AudioChunk {
        AudioChunk {
            index: 0,
            start_offset: 0.0,
            end_offset: 1.0,
            samples: vec![0i16; 16000],
            overlap_prefix_secs: 0.0,
        }
    }

    #[tokio::test]
    async fn detection_resolves_reported_name_and_keeps_segments() {
        let service = Arc::new(ScriptedService::new().with_response(ServiceResponse {
            language: Some("english".to_string()),
            segments: vec![RawSegment::new(0.0, 0.8, " Hello there.")],
        }));
        let transcriber = ChunkTranscriber::new(Arc::clone(&service), 16000);

        let detected = detect_language(&transcriber, &first_chunk()).await.unwrap();

        assert_eq!(detected.language.code, "en");
        assert_eq!(detected.language.name, "English");
        assert_eq!(detected.segments.len(), 1);
        // The detection call carries no hint
        assert_eq!(service.hints(), vec![None]);
    }

    #[tokio::test]
    async fn detection_accepts_iso_code_reports() {
        let service = Arc::new(ScriptedService::new().with_response(ServiceResponse {
            language: Some("de".to_string()),
            segments: vec![],
        }));
        let transcriber = ChunkTranscriber::new(service, 16000);

        let detected = detect_language(&transcriber, &first_chunk()).await.unwrap();
        assert_eq!(detected.language.name, "German");
    }

    #[tokio::test]
    async fn unknown_reported_language_fails_with_unsupported() {
        let service = Arc::new(ScriptedService::new().with_response(ServiceResponse {
            language: Some("klingon".to_string()),
            segments: vec![],
        }));
        let transcriber = ChunkTranscriber::new(service, 16000);

        let err = detect_language(&transcriber, &first_chunk())
            .await
            .unwrap_err();
        match err {
            StreamscribeError::UnsupportedLanguage { reported } => {
                assert_eq!(reported, "klingon");
            }
            other => panic!("Expected UnsupportedLanguage, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_language_field_fails_with_unsupported() {
        let service = Arc::new(ScriptedService::new().with_response(ServiceResponse {
            language: None,
            segments: vec![],
        }));
        let transcriber = ChunkTranscriber::new(service, 16000);

        let err = detect_language(&transcriber, &first_chunk())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StreamscribeError::UnsupportedLanguage { .. }
        ));
    }

    #[tokio::test]
    async fn service_failure_propagates() {
        let service = Arc::new(ScriptedService::new().with_failure("quota exhausted"));
        let transcriber = ChunkTranscriber::new(service, 16000);

        let err = detect_language(&transcriber, &first_chunk())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StreamscribeError::TranscriptionService { .. }
        ));
    }
}

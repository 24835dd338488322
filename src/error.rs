//! Error types for streamscribe.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreamscribeError {
    // Audio input errors
    #[error("Failed to decode audio: {message}")]
    AudioDecode { message: String },

    #[error("Failed to encode audio chunk: {message}")]
    AudioEncode { message: String },

    // Language resolution errors
    #[error("Unsupported language: {reported}")]
    UnsupportedLanguage { reported: String },

    // Remote service errors
    #[error("Transcription service error: {message}")]
    TranscriptionService { message: String },

    #[error("No API key found in environment ({env_var} is not set)")]
    MissingApiKey { env_var: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, StreamscribeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_audio_decode_display() {
        let error = StreamscribeError::AudioDecode {
            message: "not a WAV file".to_string(),
        };
        assert_eq!(error.to_string(), "Failed to decode audio: not a WAV file");
    }

    #[test]
    fn test_unsupported_language_display() {
        let error = StreamscribeError::UnsupportedLanguage {
            reported: "klingon".to_string(),
        };
        assert_eq!(error.to_string(), "Unsupported language: klingon");
    }

    #[test]
    fn test_transcription_service_display() {
        let error = StreamscribeError::TranscriptionService {
            message: "HTTP 429: rate limited".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Transcription service error: HTTP 429: rate limited"
        );
    }

    #[test]
    fn test_missing_api_key_display() {
        let error = StreamscribeError::MissingApiKey {
            env_var: "OPENAI_API_KEY".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "No API key found in environment (OPENAI_API_KEY is not set)"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: StreamscribeError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_source_chain_io() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: StreamscribeError = io_error.into();

        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<StreamscribeError>();
        assert_sync::<StreamscribeError>();
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}

//! OpenAI Whisper API transcription service.
//!
//! Sends one multipart request per chunk to the `audio/transcriptions`
//! endpoint with `response_format=verbose_json`, which is the only format
//! that includes timed segments and the detected language.

use crate::defaults;
use crate::error::{Result, StreamscribeError};
use crate::service::{RawSegment, ServiceResponse, TranscriptionService};
use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use tracing::debug;

/// Configuration for the OpenAI transcription client.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Base URL of the API (override for proxies or compatible servers).
    pub base_url: String,
    /// Transcription model name.
    pub model: String,
}

impl OpenAiConfig {
    /// Builds a config from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(defaults::API_KEY_ENV).map_err(|_| {
            StreamscribeError::MissingApiKey {
                env_var: defaults::API_KEY_ENV.to_string(),
            }
        })?;
        Ok(Self::new(api_key))
    }

    /// Builds a config with an explicit API key and default endpoint/model.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: defaults::OPENAI_BASE_URL.to_string(),
            model: defaults::OPENAI_MODEL.to_string(),
        }
    }
}

/// Wire format of the `verbose_json` transcription response.
#[derive(Debug, Deserialize)]
struct VerboseJsonResponse {
    /// Detected language as an English name ("english"), present when the
    /// request carried no language field.
    language: Option<String>,
    #[serde(default)]
    segments: Vec<RawSegment>,
}

/// Transcription service backed by the OpenAI Whisper API.
pub struct OpenAiService {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiService {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TranscriptionService for OpenAiService {
    async fn transcribe(&self, audio: Bytes, language: Option<&str>) -> Result<ServiceResponse> {
        let file_part = reqwest::multipart::Part::bytes(audio.to_vec())
            .file_name("chunk.wav")
            .mime_str("audio/wav")
            .map_err(|e| StreamscribeError::TranscriptionService {
                message: format!("Failed to build upload part: {}", e),
            })?;

        let mut form = reqwest::multipart::Form::new()
            .text("model", self.config.model.clone())
            .text("response_format", "verbose_json")
            .part("file", file_part);
        if let Some(language) = language {
            form = form.text("language", language.to_string());
        }

        let url = format!("{}/audio/transcriptions", self.config.base_url);
        debug!(url = %url, hint = ?language, "sending transcription request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| StreamscribeError::TranscriptionService {
                message: format!("Request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StreamscribeError::TranscriptionService {
                message: format!("HTTP {}: {}", status, body.trim()),
            });
        }

        let parsed: VerboseJsonResponse =
            response
                .json()
                .await
                .map_err(|e| StreamscribeError::TranscriptionService {
                    message: format!("Failed to parse response: {}", e),
                })?;

        debug!(
            segments = parsed.segments.len(),
            language = ?parsed.language,
            "transcription response received"
        );

        Ok(ServiceResponse {
            language: parsed.language,
            segments: parsed.segments,
        })
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_env_fails_without_key() {
        unsafe { std::env::remove_var(defaults::API_KEY_ENV) };
        let result = OpenAiConfig::from_env();
        assert!(matches!(
            result,
            Err(StreamscribeError::MissingApiKey { .. })
        ));
    }

    #[test]
    fn config_new_uses_default_endpoint_and_model() {
        let config = OpenAiConfig::new("sk-test".to_string());
        assert_eq!(config.base_url, defaults::OPENAI_BASE_URL);
        assert_eq!(config.model, defaults::OPENAI_MODEL);
    }

    #[test]
    fn verbose_json_response_deserializes() {
        let body = r#"{
            "task": "transcribe",
            "language": "english",
            "duration": 2.5,
            "text": "Hello world.",
            "segments": [
                {"id": 0, "seek": 0, "start": 0.0, "end": 1.2, "text": " Hello"},
                {"id": 1, "seek": 0, "start": 1.2, "end": 2.5, "text": " world."}
            ]
        }"#;

        let parsed: VerboseJsonResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.language.as_deref(), Some("english"));
        assert_eq!(parsed.segments.len(), 2);
        assert_eq!(parsed.segments[0].text, " Hello");
        assert!((parsed.segments[1].end - 2.5).abs() < 1e-9);
    }

    #[test]
    fn verbose_json_response_tolerates_missing_segments() {
        let body = r#"{"language": "german", "text": ""}"#;
        let parsed: VerboseJsonResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.segments.is_empty());
    }
}

//! The transcription service boundary.
//!
//! The remote batch API is opaque: one request with audio bytes and an
//! optional language hint, one response with timed segments (and, when no
//! hint was given, the detected language). Everything above this trait is
//! deterministic and testable against [`ScriptedService`].

pub mod openai;

use crate::error::{Result, StreamscribeError};
use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub use openai::{OpenAiConfig, OpenAiService};

/// One transcribed segment in chunk-local time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSegment {
    /// Start time in seconds, relative to the start of the submitted audio.
    pub start: f64,
    /// End time in seconds, relative to the start of the submitted audio.
    pub end: f64,
    /// Transcribed text.
    pub text: String,
}

impl RawSegment {
    pub fn new(start: f64, end: f64, text: &str) -> Self {
        Self {
            start,
            end,
            text: text.to_string(),
        }
    }
}

/// Response from one transcription call.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    /// Detected language as reported by the service. Only meaningful when
    /// the request carried no language hint.
    pub language: Option<String>,
    /// Segments in ascending chunk-local time order.
    pub segments: Vec<RawSegment>,
}

/// Capability trait for the batch transcription call.
///
/// This trait allows swapping implementations (real HTTP API vs scripted fake).
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    /// Transcribe one chunk of audio.
    ///
    /// # Arguments
    /// * `audio` - WAV-encoded audio bytes for one chunk
    /// * `language` - Optional ISO 639-1 language hint; `None` asks the
    ///   service to detect the language and report it in the response
    async fn transcribe(&self, audio: Bytes, language: Option<&str>) -> Result<ServiceResponse>;

    /// Name of this service implementation for logging.
    fn name(&self) -> &str;
}

/// Allow sharing one service across pipeline tasks.
#[async_trait]
impl<T: TranscriptionService> TranscriptionService for Arc<T> {
    async fn transcribe(&self, audio: Bytes, language: Option<&str>) -> Result<ServiceResponse> {
        (**self).transcribe(audio, language).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Deterministic fake service for tests.
///
/// Responses are served from a script in call order; once the script is
/// exhausted the fallback response (if any) repeats. Every call's language
/// hint is recorded for assertions.
#[derive(Debug, Default)]
pub struct ScriptedService {
    script: Mutex<VecDeque<Result<ServiceResponse>>>,
    fallback: Option<ServiceResponse>,
    hints: Mutex<Vec<Option<String>>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a successful response to the script.
    pub fn with_response(self, response: ServiceResponse) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(response));
        self
    }

    /// Appends a failing call to the script.
    pub fn with_failure(self, message: &str) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(StreamscribeError::TranscriptionService {
                message: message.to_string(),
            }));
        self
    }

    /// Sets a response that repeats once the script is exhausted.
    pub fn with_fallback(mut self, response: ServiceResponse) -> Self {
        self.fallback = Some(response);
        self
    }

    /// Number of calls issued so far.
    pub fn call_count(&self) -> usize {
        self.hints.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Language hints passed to each call, in call order.
    pub fn hints(&self) -> Vec<Option<String>> {
        self.hints
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl TranscriptionService for ScriptedService {
    async fn transcribe(&self, _audio: Bytes, language: Option<&str>) -> Result<ServiceResponse> {
        self.hints
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(language.map(str::to_string));

        let scripted = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match scripted {
            Some(result) => result,
            None => match &self.fallback {
                Some(response) => Ok(response.clone()),
                None => Err(StreamscribeError::TranscriptionService {
                    message: "scripted service has no response left".to_string(),
                }),
            },
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

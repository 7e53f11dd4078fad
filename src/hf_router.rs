//! HTTP transcription client for the Hugging Face inference router.

use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::{error, info};

use crate::outcome::{FailureKind, TranscriptionOutcome, preview};
use crate::segment::Segment;
use crate::shapes::normalize_response;
use crate::transcriber::Transcriber;

/// Default inference endpoint (Whisper large-v3 behind the HF router).
pub const DEFAULT_ENDPOINT: &str =
    "https://router.huggingface.co/hf-inference/models/openai/whisper-large-v3";

/// Upload ceiling in kilobytes. Files above this are rejected locally,
/// without a network round trip.
pub const MAX_UPLOAD_KB: u64 = 25_000;

/// How much of an error response body is kept for diagnostics.
const BODY_PREVIEW_LEN: usize = 200;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

// Remote transcription of a 25 MB upload can legitimately take minutes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Transcription client holding its endpoint and bearer credential as
/// explicit state. Construct one per run and pass it into the pipeline;
/// there are no process-wide statics to configure.
///
/// No `Debug` impl on purpose: the struct holds the bearer credential.
pub struct HfRouterTranscriber {
    http: Client,
    endpoint: String,
    token: String,
}

impl HfRouterTranscriber {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the raw audio bytes and normalize the response.
    fn submit(&self, segment: &Segment, audio: Vec<u8>) -> TranscriptionOutcome {
        info!(
            segment = %segment.stem,
            size_kb = segment.size_kb(),
            "sending audio to transcription service"
        );

        let response = match self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "audio/mpeg")
            .body(audio)
            .send()
        {
            Ok(response) => response,
            Err(err) => return TranscriptionOutcome::Failed(FailureKind::Transport(err.to_string())),
        };

        let status = response.status();
        let body = match response.text() {
            Ok(body) => body,
            Err(err) => return TranscriptionOutcome::Failed(FailureKind::Transport(err.to_string())),
        };

        outcome_from_response(status, &body)
    }
}

/// Turn a service response into an outcome.
///
/// Pure over status and body, so every branch is testable without a server:
/// non-success statuses keep a bounded body preview, success bodies go
/// through shape normalization, and an empty transcription is a skip rather
/// than usable text.
fn outcome_from_response(status: reqwest::StatusCode, body: &str) -> TranscriptionOutcome {
    if !status.is_success() {
        return TranscriptionOutcome::Failed(FailureKind::ServiceError {
            status: status.as_u16(),
            body_preview: preview(body, BODY_PREVIEW_LEN),
        });
    }

    match normalize_response(body) {
        Some(text) if text.trim().is_empty() => {
            TranscriptionOutcome::Skipped("empty transcription".to_string())
        }
        Some(text) => TranscriptionOutcome::Text(text),
        None => TranscriptionOutcome::Failed(FailureKind::UnrecognizedShape),
    }
}

impl Transcriber for HfRouterTranscriber {
    fn needs_submission(&self, segment: &Segment) -> bool {
        segment.size_kb() <= MAX_UPLOAD_KB
    }

    fn transcribe(&self, segment: &Segment) -> TranscriptionOutcome {
        // The size ceiling is checked before any file or network I/O.
        if segment.size_kb() > MAX_UPLOAD_KB {
            let kind = FailureKind::TooLarge {
                size_kb: segment.size_kb(),
            };
            log_failure(segment, &kind);
            return TranscriptionOutcome::Failed(kind);
        }

        let audio = match fs::read(&segment.path) {
            Ok(audio) => audio,
            Err(err) => {
                let kind = FailureKind::Io(err.to_string());
                log_failure(segment, &kind);
                return TranscriptionOutcome::Failed(kind);
            }
        };

        let outcome = self.submit(segment, audio);
        if let TranscriptionOutcome::Failed(kind) = &outcome {
            log_failure(segment, kind);
        }
        outcome
    }
}

fn log_failure(segment: &Segment, kind: &FailureKind) {
    error!(
        segment = %segment.stem,
        size_kb = segment.size_kb(),
        failure = %kind,
        "transcription failed"
    );
}

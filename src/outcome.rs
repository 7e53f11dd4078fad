use std::fmt;

/// The result of attempting to transcribe a single segment.
///
/// Produced by a [`crate::transcriber::Transcriber`], consumed by the
/// pipeline driver and the output store. Only `Text` contributes to the
/// output artifacts; `Skipped` and `Failed` surface as log lines and the
/// absence of that segment's transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionOutcome {
    /// The service returned usable transcription text.
    Text(String),

    /// The segment was deliberately not transcribed (e.g. the service
    /// returned an empty transcription).
    Skipped(String),

    /// The attempt failed; the run continues with the next segment.
    Failed(FailureKind),
}

/// Why a single segment's transcription failed.
///
/// Every variant carries enough detail to diagnose the failure from logs
/// without re-running the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The source file exceeds the service's upload ceiling. No network
    /// request was made.
    TooLarge { size_kb: u64 },

    /// The service answered with a non-success status code.
    ServiceError { status: u16, body_preview: String },

    /// The service answered successfully but the body matched none of the
    /// known response shapes.
    UnrecognizedShape,

    /// Connection failure, timeout, or another transport-level error.
    Transport(String),

    /// Reading the segment's audio bytes from disk failed.
    Io(String),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::TooLarge { size_kb } => {
                write!(f, "file too large ({} MB), maximum 25 MB", size_kb / 1024)
            }
            FailureKind::ServiceError {
                status,
                body_preview,
            } => write!(f, "service error {status}: {body_preview}"),
            FailureKind::UnrecognizedShape => write!(f, "unrecognized response shape"),
            FailureKind::Transport(detail) => write!(f, "transport error: {detail}"),
            FailureKind::Io(detail) => write!(f, "read error: {detail}"),
        }
    }
}

/// Truncate `text` to a bounded, log-friendly preview.
pub fn preview(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_bounds_long_text() {
        let long = "x".repeat(500);
        let p = preview(&long, 150);
        assert_eq!(p.len(), 153);
        assert!(p.ends_with("..."));

        assert_eq!(preview("short", 150), "short");
        // Char-based truncation never splits a multi-byte character.
        assert_eq!(preview("ééé", 2), "éé...");
    }

    #[test]
    fn failure_kind_display_is_diagnostic() {
        let too_large = FailureKind::TooLarge { size_kb: 30_000 };
        assert_eq!(too_large.to_string(), "file too large (29 MB), maximum 25 MB");

        let service = FailureKind::ServiceError {
            status: 503,
            body_preview: "overloaded".to_string(),
        };
        assert_eq!(service.to_string(), "service error 503: overloaded");
    }
}

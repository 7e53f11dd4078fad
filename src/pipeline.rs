//! The end-to-end batch transcription run.
//!
//! The driver composes the leaf components into a single sequential flow:
//! enumerate → resume-filter → (pace → transcribe → persist → append) per
//! segment. One segment is in flight at any time; per-segment failures are
//! logged and skipped, never fatal to the run.

use std::path::Path;

use tracing::{info, warn};

use crate::Result;
use crate::hf_router::HfRouterTranscriber;
use crate::outcome::{TranscriptionOutcome, preview};
use crate::pacer::Pacer;
use crate::segment::{Segment, enumerate_segments};
use crate::store::OutputStore;
use crate::transcriber::Transcriber;

/// How much transcribed text is echoed into the success log line.
const SUCCESS_PREVIEW_LEN: usize = 150;

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Segments transcribed and persisted during this run.
    pub transcribed: usize,

    /// Segments skipped because their transcript artifact already existed.
    pub resumed: usize,

    /// Segments the transcriber deliberately skipped (e.g. empty text).
    pub skipped: usize,

    /// Segments that failed; their transcripts are absent from the output.
    pub failed: usize,
}

/// The pipeline driver.
///
/// Owns the transcriber, the pacer, and the output store for one run.
/// Construct it with an explicit [`Transcriber`] (the HTTP client in
/// production, a fake in tests); there is no hidden global state.
pub struct Pipeline<T: Transcriber = HfRouterTranscriber> {
    transcriber: T,
    pacer: Pacer,
    store: OutputStore,
    reset_output: bool,
}

impl<T: Transcriber> Pipeline<T> {
    pub fn new(transcriber: T, pacer: Pacer, store: OutputStore) -> Self {
        Self {
            transcriber,
            pacer,
            store,
            reset_output: true,
        }
    }

    /// Keep existing per-segment artifacts instead of wiping the output
    /// directory at the start of the run.
    ///
    /// The default destructive reset limits resume to the current
    /// invocation; with `keep` set, artifacts from earlier runs also count
    /// as done and are not re-submitted.
    pub fn keep_existing_output(mut self, keep: bool) -> Self {
        self.reset_output = !keep;
        self
    }

    /// Run the whole pipeline over `audio_dir`.
    ///
    /// Fatal errors (missing input directory, output-directory I/O) abort
    /// the run; everything scoped to one segment is recorded in the summary
    /// and logged instead.
    pub fn run(&mut self, audio_dir: &Path) -> Result<RunSummary> {
        if self.reset_output {
            self.store.reset()?;
        } else {
            self.store.prepare()?;
        }

        let segments = enumerate_segments(audio_dir)?;
        info!(
            count = segments.len(),
            dir = %audio_dir.display(),
            "found audio segments for transcription"
        );

        let mut summary = RunSummary::default();
        for segment in &segments {
            // Resume check first: a finished segment consumes no pacer
            // budget and triggers no network call.
            if self.store.has_transcript(segment) {
                info!(segment = %segment.stem, "skipping, already transcribed");
                summary.resumed += 1;
                continue;
            }

            info!(
                segment = %segment.stem,
                size_kb = segment.size_kb(),
                "transcribing"
            );

            // Locally-rejected segments (e.g. oversize) never reach the
            // service, so they are not paced either.
            if self.transcriber.needs_submission(segment) {
                let waited = self.pacer.wait_for_slot();
                if !waited.is_zero() {
                    info!(
                        wait_ms = waited.as_millis() as u64,
                        "waited before next request"
                    );
                }
            }

            match self.transcriber.transcribe(segment) {
                TranscriptionOutcome::Text(text) => match self.persist(segment, &text) {
                    Ok(()) => {
                        info!(
                            segment = %segment.stem,
                            preview = %preview(&text, SUCCESS_PREVIEW_LEN),
                            "transcription succeeded"
                        );
                        summary.transcribed += 1;
                    }
                    Err(err) => {
                        warn!(
                            segment = %segment.stem,
                            error = %err,
                            "failed to persist transcription"
                        );
                        summary.failed += 1;
                    }
                },
                TranscriptionOutcome::Skipped(reason) => {
                    warn!(segment = %segment.stem, reason = %reason, "segment skipped");
                    summary.skipped += 1;
                }
                TranscriptionOutcome::Failed(kind) => {
                    // The transcriber already logged the failure detail.
                    warn!(segment = %segment.stem, failure = %kind, "segment failed");
                    summary.failed += 1;
                }
            }
        }

        info!(
            transcribed = summary.transcribed,
            resumed = summary.resumed,
            skipped = summary.skipped,
            failed = summary.failed,
            "all transcriptions completed"
        );
        Ok(summary)
    }

    /// Persist the per-segment artifact, then append to the combined
    /// transcript.
    ///
    /// Strictly in that order: the combined transcript only ever contains
    /// blocks for segments whose own artifact is durably written, and blocks
    /// appear in segment order because the run is sequential.
    fn persist(&self, segment: &Segment, text: &str) -> Result<()> {
        self.store.persist_segment(segment, text)?;
        self.store.append_to_combined(text)?;
        Ok(())
    }
}

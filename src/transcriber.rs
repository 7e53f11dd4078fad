use crate::outcome::TranscriptionOutcome;
use crate::segment::Segment;

/// Pluggable transcription service used by [`crate::pipeline::Pipeline`].
///
/// A transcriber turns one segment into a [`TranscriptionOutcome`]. It never
/// returns an `Err`: per-segment problems are data (`Failed`/`Skipped`), not
/// run-fatal errors, so the pipeline can continue past them.
///
/// The production implementation is [`crate::hf_router::HfRouterTranscriber`];
/// tests substitute a fake.
pub trait Transcriber {
    /// Transcribe a single segment, including reading its bytes from disk.
    ///
    /// Implementations must check the upload size ceiling before doing any
    /// I/O or network work, so oversize rejections are free.
    fn transcribe(&self, segment: &Segment) -> TranscriptionOutcome;

    /// Whether transcribing `segment` would reach the external service.
    ///
    /// The driver paces only segments that answer true here; a segment the
    /// implementation will reject locally (e.g. oversize) must not consume
    /// rate-limit budget.
    fn needs_submission(&self, _segment: &Segment) -> bool {
        true
    }
}

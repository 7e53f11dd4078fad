//! Persistence for per-segment transcripts and the combined transcript.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::Result;
use crate::segment::Segment;
use crate::wrap::wrap_text;

/// Filename of the combined transcript inside the output directory.
pub const COMBINED_FILENAME: &str = "combined_transcription.txt";

/// Owns the output directory layout:
/// - `<output_dir>/<segment-stem>.txt` per transcribed segment
/// - `<output_dir>/combined_transcription.txt` for the wrapped concatenation
///
/// The existence of a per-segment artifact is the resume signal: the driver
/// asks [`OutputStore::has_transcript`] before pacing or submitting anything.
#[derive(Debug)]
pub struct OutputStore {
    dir: PathBuf,
    max_line_length: usize,
}

impl OutputStore {
    pub fn new(dir: impl Into<PathBuf>, max_line_length: usize) -> Self {
        Self {
            dir: dir.into(),
            max_line_length,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the per-segment artifact: file stem unchanged, extension
    /// swapped to `.txt`.
    pub fn transcript_path(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{stem}.txt"))
    }

    fn combined_path(&self) -> PathBuf {
        self.dir.join(COMBINED_FILENAME)
    }

    /// Wipe the output directory and start fresh.
    ///
    /// Removing existing artifacts here defeats resume across separate
    /// invocations; callers that want cross-run resume use
    /// [`OutputStore::prepare`] instead.
    pub fn reset(&self) -> Result<()> {
        if self.dir.exists() {
            warn!(dir = %self.dir.display(), "output directory exists, deleting");
            fs::remove_dir_all(&self.dir)?;
        }
        fs::create_dir_all(&self.dir)?;
        info!(dir = %self.dir.display(), "created clean output directory");

        fs::write(self.combined_path(), "")?;
        Ok(())
    }

    /// Ensure the output directory exists and truncate only the combined
    /// transcript, leaving per-segment artifacts in place for resume.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.combined_path(), "")?;
        Ok(())
    }

    /// The resume predicate: true iff the segment's transcript artifact
    /// already exists.
    pub fn has_transcript(&self, segment: &Segment) -> bool {
        self.transcript_path(&segment.stem).is_file()
    }

    /// Write (or overwrite) the per-segment transcript, trimmed of
    /// surrounding whitespace.
    ///
    /// The write goes through a temp file in the same directory followed by a
    /// rename, so a concurrent reader never observes a torn artifact. A torn
    /// artifact would also poison resume: its mere existence marks the
    /// segment as done.
    pub fn persist_segment(&self, segment: &Segment, text: &str) -> Result<()> {
        let path = self.transcript_path(&segment.stem);

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(text.trim().as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        info!(path = %path.display(), "transcription saved");
        Ok(())
    }

    /// Wrap `text` and append the lines, plus one blank separator line, to
    /// the combined transcript.
    ///
    /// The lines for one segment land in a single buffered write, so each
    /// call appends its block atomically.
    pub fn append_to_combined(&self, text: &str) -> Result<()> {
        let mut block = String::new();
        for line in wrap_text(text, self.max_line_length) {
            block.push_str(&line);
            block.push('\n');
        }
        block.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.combined_path())?;
        file.write_all(block.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(stem: &str) -> Segment {
        Segment {
            index: 0,
            stem: stem.to_string(),
            path: PathBuf::from(format!("{stem}.mp3")),
            size_bytes: 1,
        }
    }

    #[test]
    fn persist_trims_and_resume_predicate_flips() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = OutputStore::new(dir.path(), 120);
        store.reset()?;

        let segment = seg("segment_00001");
        assert!(!store.has_transcript(&segment));

        store.persist_segment(&segment, "  Hi there \n")?;
        assert!(store.has_transcript(&segment));

        let written = fs::read_to_string(store.transcript_path("segment_00001"))?;
        assert_eq!(written, "Hi there");
        Ok(())
    }

    #[test]
    fn persist_overwrites_existing_artifact() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = OutputStore::new(dir.path(), 120);
        store.reset()?;

        let segment = seg("a");
        store.persist_segment(&segment, "first")?;
        store.persist_segment(&segment, "second")?;

        assert_eq!(fs::read_to_string(store.transcript_path("a"))?, "second");
        Ok(())
    }

    #[test]
    fn append_wraps_and_separates_blocks() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = OutputStore::new(dir.path(), 10);
        store.reset()?;

        store.append_to_combined("alpha beta gamma")?;
        store.append_to_combined("delta")?;

        let combined = fs::read_to_string(store.dir().join(COMBINED_FILENAME))?;
        assert_eq!(combined, "alpha beta\ngamma\n\ndelta\n\n");
        Ok(())
    }

    #[test]
    fn reset_wipes_artifacts_but_prepare_keeps_them() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("out");
        let store = OutputStore::new(&out, 120);
        store.reset()?;

        let segment = seg("kept");
        store.persist_segment(&segment, "text")?;
        store.append_to_combined("text")?;

        store.prepare()?;
        assert!(store.has_transcript(&segment), "prepare must keep artifacts");
        assert_eq!(fs::read_to_string(out.join(COMBINED_FILENAME))?, "");

        store.reset()?;
        assert!(!store.has_transcript(&segment), "reset must wipe artifacts");
        Ok(())
    }
}

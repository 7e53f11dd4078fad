use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// The audio extension the enumerator accepts.
pub const AUDIO_EXTENSION: &str = "mp3";

/// One unit of audio input, transcribed independently.
///
/// Segments are created once per run by [`enumerate_segments`] and never
/// mutated. The `index` reflects the segment's position in sorted order and,
/// together with `stem`, is the stable identity used for resume and for the
/// combined transcript's ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Position in ascending lexicographic filename order, starting at 0.
    pub index: usize,

    /// File stem, e.g. `segment_00001` for `segment_00001.mp3`.
    ///
    /// The per-segment transcript artifact is `<stem>.txt`.
    pub stem: String,

    /// Full path to the source audio file.
    pub path: PathBuf,

    /// Size of the source file in bytes, captured at enumeration time.
    pub size_bytes: u64,
}

impl Segment {
    /// File size in whole kilobytes, as reported in logs and used for the
    /// service's upload ceiling.
    pub fn size_kb(&self) -> u64 {
        self.size_bytes / 1024
    }
}

/// List the audio segments in `dir`, sorted by filename in ascending
/// lexicographic order.
///
/// This ordering is the pipeline's sole sequencing authority: the combined
/// transcript's block order derives from it. Non-`.mp3` entries are ignored.
///
/// Fails with [`Error::DirectoryNotFound`] when `dir` does not exist; that is
/// fatal to the whole run.
pub fn enumerate_segments(dir: &Path) -> Result<Vec<Segment>> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_audio = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(AUDIO_EXTENSION));
        if is_audio {
            files.push(path);
        }
    }

    // Sort on the filename, not the full path, so ordering is independent of
    // how `dir` itself was spelled.
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut segments = Vec::with_capacity(files.len());
    for (index, path) in files.into_iter().enumerate() {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let size_bytes = fs::metadata(&path)?.len();
        segments.push(Segment {
            index,
            stem,
            path,
            size_bytes,
        });
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str, contents: &[u8]) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn enumerates_in_ascending_lexicographic_order() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), "segment_00003.mp3", b"c");
        touch(dir.path(), "segment_00001.mp3", b"a");
        touch(dir.path(), "segment_00002.mp3", b"bb");

        let segments = enumerate_segments(dir.path())?;
        let stems: Vec<&str> = segments.iter().map(|s| s.stem.as_str()).collect();
        assert_eq!(
            stems,
            ["segment_00001", "segment_00002", "segment_00003"]
        );
        assert_eq!(segments[0].index, 0);
        assert_eq!(segments[2].index, 2);
        assert_eq!(segments[1].size_bytes, 2);
        Ok(())
    }

    #[test]
    fn filters_to_audio_extension() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), "a.mp3", b"a");
        touch(dir.path(), "notes.txt", b"text");
        touch(dir.path(), "b.wav", b"wav");
        fs::create_dir(dir.path().join("nested.mp3"))?;

        let segments = enumerate_segments(dir.path())?;
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].stem, "a");
        Ok(())
    }

    #[test]
    fn missing_directory_is_fatal() {
        let err = enumerate_segments(Path::new("/definitely/not/a/real/dir")).unwrap_err();
        assert!(matches!(err, Error::DirectoryNotFound(_)));
    }

    #[test]
    fn size_kb_truncates_to_whole_kilobytes() {
        let seg = Segment {
            index: 0,
            stem: "a".to_string(),
            path: PathBuf::from("a.mp3"),
            size_bytes: 5 * 1024 + 512,
        };
        assert_eq!(seg.size_kb(), 5);
    }
}

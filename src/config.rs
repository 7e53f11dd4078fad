//! Run configuration, loaded from the JSON file passed on the command line.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::hf_router::DEFAULT_ENDPOINT;
use crate::{Error, Result};

/// Environment variable holding the bearer credential for the service.
pub const TOKEN_ENV_VAR: &str = "HF_TOKEN";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_min_spacing_ms() -> u64 {
    15_000
}

fn default_max_line_length() -> usize {
    120
}

/// Configuration for one pipeline run.
///
/// Only `audio_dir` and `output_dir` are required; the rest default to the
/// service's free-tier-friendly values.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Directory of pre-segmented audio files to transcribe.
    pub audio_dir: PathBuf,

    /// Directory receiving per-segment transcripts and the combined one.
    pub output_dir: PathBuf,

    /// Transcription service endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Minimum spacing between consecutive submissions, in milliseconds.
    #[serde(default = "default_min_spacing_ms")]
    pub min_spacing_ms: u64,

    /// Maximum line length in the combined transcript.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Skip the destructive output-directory reset at the start of the run.
    ///
    /// By default every run wipes `output_dir`, which limits resume to
    /// artifacts written after the wipe within the same invocation. Setting
    /// this keeps existing per-segment transcripts, so a re-run skips them
    /// without re-submitting anything (the combined transcript is still
    /// rebuilt from scratch).
    #[serde(default)]
    pub keep_existing_output: bool,
}

impl RunConfig {
    /// Load and parse the config file. Missing or malformed files are fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            Error::Config(format!("cannot read config file {}: {err}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|err| {
            Error::Config(format!("invalid config file {}: {err}", path.display()))
        })
    }

    pub fn min_spacing(&self) -> Duration {
        Duration::from_millis(self.min_spacing_ms)
    }
}

/// Read the required bearer credential from the environment.
///
/// A missing or blank value is a fatal startup error.
pub fn bearer_token_from_env() -> Result<String> {
    match env::var(TOKEN_ENV_VAR) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(Error::MissingCredential(TOKEN_ENV_VAR)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_minimal_config_with_defaults() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("run.json");
        std::fs::write(
            &path,
            r#"{"audio_dir": "/audio", "output_dir": "/out"}"#,
        )?;

        let cfg = RunConfig::load(&path)?;
        assert_eq!(cfg.audio_dir, PathBuf::from("/audio"));
        assert_eq!(cfg.output_dir, PathBuf::from("/out"));
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.min_spacing(), Duration::from_millis(15_000));
        assert_eq!(cfg.max_line_length, 120);
        assert!(!cfg.keep_existing_output);
        Ok(())
    }

    #[test]
    fn overrides_are_honored() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("run.json");
        std::fs::write(
            &path,
            r#"{
                "audio_dir": "/audio",
                "output_dir": "/out",
                "endpoint": "http://localhost:9000/asr",
                "min_spacing_ms": 500,
                "max_line_length": 80,
                "keep_existing_output": true
            }"#,
        )?;

        let cfg = RunConfig::load(&path)?;
        assert_eq!(cfg.endpoint, "http://localhost:9000/asr");
        assert_eq!(cfg.min_spacing(), Duration::from_millis(500));
        assert_eq!(cfg.max_line_length, 80);
        assert!(cfg.keep_existing_output);
        Ok(())
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = RunConfig::load(Path::new("/no/such/config.json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("cannot read config file"));
    }

    #[test]
    fn missing_required_field_is_a_config_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{"audio_dir": "/audio"}"#)?;

        let err = RunConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        Ok(())
    }
}

//! `batchscribe` — a resumable batch transcription pipeline.
//!
//! This crate walks a directory of pre-segmented audio files, submits each
//! segment exactly once to a remote speech-to-text service, and writes:
//! - one transcript file per segment
//! - a single line-wrapped combined transcript preserving segment order
//!
//! The pipeline is strictly sequential: a single request is in flight at any
//! time, and a configurable minimum spacing is enforced between consecutive
//! submissions. Segments whose transcript artifact already exists are skipped
//! without consuming any rate-limit budget, so an interrupted run can be
//! resumed without re-submitting finished work.

// High-level API (most consumers should start here).
pub mod config;
pub mod pipeline;

// Pipeline components, leaves first.
pub mod wrap;
pub mod store;
pub mod pacer;
pub mod segment;

// Transcription client seam and the HTTP implementation.
pub mod outcome;
pub mod shapes;
pub mod transcriber;
pub mod hf_router;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use error::{Error, Result};

//! Minimum inter-request spacing for the external transcription service.

use std::thread;
use std::time::{Duration, Instant};

/// Enforces a minimum elapsed time between the start of consecutive external
/// calls.
///
/// This is strictly sequential pacing, not a token bucket: one request may be
/// outstanding system-wide, and the next request's earliest start is gated by
/// the single `last_call` timestamp. The state lives for one run and is not
/// persisted.
#[derive(Debug)]
pub struct Pacer {
    min_spacing: Duration,
    last_call: Option<Instant>,
}

impl Pacer {
    pub fn new(min_spacing: Duration) -> Self {
        Self {
            min_spacing,
            last_call: None,
        }
    }

    /// How long a call starting at `now` would have to wait.
    ///
    /// Pure with respect to `now`; [`Pacer::wait_for_slot`] is this plus the
    /// actual block and timestamp update.
    pub fn required_wait(&self, now: Instant) -> Duration {
        match self.last_call {
            Some(last) => self
                .min_spacing
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Block until the next submission slot, then record it.
    ///
    /// Sleeps `max(0, min_spacing - elapsed_since_last_call)` and records the
    /// post-wait instant as the new last-call timestamp. The first call of a
    /// run never waits. Returns the waited duration for logging.
    pub fn wait_for_slot(&mut self) -> Duration {
        let wait = self.required_wait(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        self.last_call = Some(Instant::now());
        wait
    }
}

//! Monotonic timing for the `dur_ms` field of log events.
//!
//! TODO: Record per-phase timings (scoring vs permutations) once callers need the split.

use std::time::Instant;

/// Started on construction; reads never move backwards with wall-clock changes.
#[derive(Copy, Clone, Debug)]
pub struct Stopwatch(Instant);

impl Stopwatch {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    /// Whole milliseconds since [`Stopwatch::start`], saturating at `u64::MAX`.
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.0.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

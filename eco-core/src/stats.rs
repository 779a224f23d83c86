//! Frame-rate instrumentation for the mirrored output.
//!
//! Counts drawn frames and derives a point-in-time frames-per-second
//! value, recomputed at most once per sampling window (one second).
//! Timestamps are plain milliseconds so tests can drive the clock.

/// Minimum interval between two rate samples.
pub const SAMPLE_WINDOW_MS: u64 = 1000;

/// Counts frames and samples the rate once per second.
#[derive(Debug, Clone, Default)]
pub struct FrameRateTracker {
    /// Total frames drawn. Never reset.
    frame_counter: u64,
    /// Last computed rate.
    frames_per_second: f64,
    /// Timestamp of the last sample.
    previous_time_ms: u64,
    /// `frame_counter` at the last sample.
    previous_frame_counter: u64,
}

impl FrameRateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one drawn frame.
    pub fn record_frame(&mut self) {
        self.frame_counter += 1;
    }

    /// Recompute the rate if at least [`SAMPLE_WINDOW_MS`] elapsed since
    /// the last sample. Returns `true` if a new sample was taken.
    pub fn maybe_update_rate(&mut self, now_ms: u64) -> bool {
        let elapsed_ms = now_ms.saturating_sub(self.previous_time_ms);
        if elapsed_ms < SAMPLE_WINDOW_MS {
            return false;
        }

        let elapsed_secs = elapsed_ms as f64 / 1000.0;
        self.frames_per_second =
            (self.frame_counter - self.previous_frame_counter) as f64 / elapsed_secs;
        self.previous_time_ms = now_ms;
        self.previous_frame_counter = self.frame_counter;
        true
    }

    /// Start a fresh sampling window at `now_ms` without touching the
    /// counters, so idle time before it is not averaged in.
    pub fn rebase(&mut self, now_ms: u64) {
        self.previous_time_ms = now_ms;
        self.previous_frame_counter = self.frame_counter;
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn frames_per_second(&self) -> f64 {
        self.frames_per_second
    }

    /// The rate with at most two fraction digits, trailing zeros dropped.
    pub fn formatted_rate(&self) -> String {
        format_rate(self.frames_per_second)
    }
}

/// Format a rate with at most two fraction digits: `50`, `49.5`, `33.33`.
pub fn format_rate(rate: f64) -> String {
    let text = format!("{rate:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

// ── Tests ────────────────────────────────────────────────────────

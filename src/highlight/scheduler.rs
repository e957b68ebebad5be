//! Debounced highlight-pass scheduling
//!
//! Every edit cancels the pending pass and schedules a fresh one after the
//! configured delay, so only the last edit of a rapid burst actually pays
//! for a pass. The scheduler is a pure deadline store with no timer of its
//! own: the host pumps it from its event loop, and timestamps are passed in
//! so tests can fabricate them instead of sleeping.

use std::time::{Duration, Instant};

/// Default highlighting delay in milliseconds
pub const DEFAULT_UPDATE_DELAY_MS: u64 = 500;

/// When highlight passes get scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightMode {
    /// Reschedule on every change notification
    #[default]
    Live,
    /// Schedule once per logical edit, when the burst completes
    Settle,
}

/// Cancel-and-reschedule debouncer for the highlight pass
#[derive(Debug)]
pub struct HighlightScheduler {
    delay: Duration,
    mode: HighlightMode,
    deadline: Option<Instant>,
}

impl HighlightScheduler {
    /// Create a scheduler with the default delay, in live mode
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_UPDATE_DELAY_MS),
            mode: HighlightMode::default(),
            deadline: None,
        }
    }

    /// Schedule a pass `delay` from `now`, cancelling any pending one
    pub fn schedule_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Cancel the pending pass; cancelling with nothing pending is a no-op
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Check if a pass is pending
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the pending pass if its deadline has been reached
    ///
    /// Returns `true` exactly once per scheduled pass.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Change the scheduling delay; takes effect from the next schedule
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// The current scheduling delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Switch between live and settle scheduling
    pub fn set_mode(&mut self, mode: HighlightMode) {
        self.mode = mode;
    }

    /// The current scheduling mode
    pub fn mode(&self) -> HighlightMode {
        self.mode
    }
}

impl Default for HighlightScheduler {
    fn default() -> Self {
        Self::new()
    }
}

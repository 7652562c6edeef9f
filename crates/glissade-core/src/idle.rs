//! Quiescence detection.
//!
//! Every accepted position update re-arms a single deadline; re-arming
//! cancels the previous one (last-update-wins). When the deadline passes
//! with no further updates the scroller is considered stopped. The deadline
//! is a plain field polled by the frame pump, so tests can drive it with a
//! manual clock.

use web_time::{Duration, Instant};

pub const IDLE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug)]
pub struct IdleDetector {
    delay: Duration,
    deadline: Option<Instant>,
}

impl IdleDetector {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Cancel any pending deadline and schedule a new one.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// True exactly once per quiescence window, when the armed deadline has
    /// passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

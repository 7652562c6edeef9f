//! Single-shot eased interpolation used for snapping and programmatic
//! scrolls.

use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub(crate) struct Tween {
    from: f64,
    to: f64,
    start: Instant,
    duration: Duration,
}

impl Tween {
    pub(crate) fn new(from: f64, to: f64, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    pub(crate) fn value(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.start);
        if elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        // ease-out
        let eased = t * (2.0 - t);
        self.from + (self.to - self.from) * eased
    }

    pub(crate) fn finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}

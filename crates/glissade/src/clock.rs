//! Time source for the scroller.
//!
//! The scroller never reads the wall clock directly. It asks a [`Clock`]
//! for the current instant on every frame and every touch sample, so tests
//! can drive momentum and the idle timeout deterministically with
//! [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Real wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock advanced by hand.
///
/// Clones share the same underlying instant, so a test can hold one handle
/// while the scroller holds another.
#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

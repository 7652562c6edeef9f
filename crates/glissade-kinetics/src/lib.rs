//! # Kinetic scroll engine
//!
//! The physics half of a scroller, consumed as a black box: it accepts
//! touch-gesture input and programmatic scroll requests, and emits raw
//! offset updates at frame cadence while anything is moving. It knows
//! nothing about cells, indices, or recycling.
//!
//! Motion has three regimes:
//!
//! - **Dragging** — the offset tracks the finger directly; release velocity
//!   is estimated from the input cadence.
//! - **Momentum** — the release velocity decays exponentially per simulated
//!   60Hz frame until it falls below the snap threshold.
//! - **Snapping** — an eased tween lands the offset on the nearest multiple
//!   of the snap size.
//!
//! The engine is poll-driven: the host calls [`Kinetics::tick`] once per
//! frame and forwards the returned offset downstream. All timestamps are
//! passed in, so tests drive the engine with a manual timeline.

use web_time::{Duration, Instant};

mod tween;

use tween::Tween;

/// Exponential decay applied to momentum per simulated 60Hz frame.
const FRICTION_PER_FRAME: f64 = 0.95;
/// Below this speed (px/s) momentum hands over to the snap tween.
const SNAP_VELOCITY: f64 = 40.0;
/// Duration of the snap tween.
const SNAP_DURATION: Duration = Duration::from_millis(250);
/// Duration of an animated programmatic scroll.
const SCROLL_TO_DURATION: Duration = Duration::from_millis(300);
/// Largest dt one tick will integrate; protects against paused hosts.
const MAX_TICK_DT: f64 = 0.1;

#[derive(Clone, Copy, Debug)]
pub struct KineticsConfig {
    /// Scales drag deltas and release velocity.
    pub speed_multiplier: f64,
}

impl Default for KineticsConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Dragging,
    Momentum,
    Snapping,
}

#[derive(Clone, Copy, Debug)]
struct DragState {
    last_x: f64,
    last_t: Instant,
    /// px/s, most recent sample wins (input cadence estimate).
    vel: f64,
}

/// Poll-driven kinetic scroller for one horizontal axis.
#[derive(Debug)]
pub struct Kinetics {
    speed_multiplier: f64,

    viewport: f64,
    content_extent: f64,
    snap_size: f64,

    offset: f64,
    dirty: bool,

    phase: Phase,
    drag: Option<DragState>,
    vel: f64,
    last_tick: Option<Instant>,
    tween: Option<Tween>,
}

impl Kinetics {
    pub fn new(config: KineticsConfig) -> Self {
        Self {
            speed_multiplier: config.speed_multiplier,
            viewport: 0.0,
            content_extent: 0.0,
            snap_size: 0.0,
            offset: 0.0,
            dirty: false,
            phase: Phase::Idle,
            drag: None,
            vel: 0.0,
            last_tick: None,
            tween: None,
        }
    }

    /// Set viewport size, scrollable extent, and snap granularity.
    pub fn configure(&mut self, viewport: f64, content_extent: f64, snap_size: f64) {
        self.viewport = viewport.max(0.0);
        self.content_extent = content_extent.max(0.0);
        self.snap_size = snap_size.max(0.0);
        let clamped = self.clamp(self.offset);
        if clamped != self.offset {
            self.offset = clamped;
            self.dirty = true;
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Anything still in flight, including an unreported offset change.
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle || self.dirty
    }

    /// Jump or glide to an absolute offset. A new request supersedes any
    /// in-flight motion.
    pub fn scroll_to(&mut self, target: f64, animate: bool, now: Instant) {
        let target = self.clamp(target);
        self.drag = None;
        self.vel = 0.0;

        if animate {
            self.tween = Some(Tween::new(self.offset, target, now, SCROLL_TO_DURATION));
            self.phase = Phase::Snapping;
        } else {
            if target != self.offset {
                self.offset = target;
                self.dirty = true;
            }
            self.tween = None;
            self.phase = Phase::Idle;
        }
    }

    pub fn touch_start(&mut self, x: f64, now: Instant) {
        self.tween = None;
        self.vel = 0.0;
        self.phase = Phase::Dragging;
        self.drag = Some(DragState {
            last_x: x,
            last_t: now,
            vel: 0.0,
        });
    }

    pub fn touch_move(&mut self, x: f64, now: Instant) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        // Content moves against the finger.
        let delta = (drag.last_x - x) * self.speed_multiplier;
        let dt = now
            .saturating_duration_since(drag.last_t)
            .as_secs_f64()
            .clamp(1.0 / 240.0, 1.0 / 15.0);
        drag.vel = delta / dt;
        drag.last_x = x;
        drag.last_t = now;

        let next = self.clamp(self.offset + delta);
        if next != self.offset {
            self.offset = next;
            self.dirty = true;
        }
    }

    pub fn touch_end(&mut self, now: Instant) {
        let Some(drag) = self.drag.take() else {
            return;
        };

        self.vel = drag.vel;
        self.last_tick = Some(now);
        if self.vel.abs() > SNAP_VELOCITY {
            self.phase = Phase::Momentum;
        } else {
            self.begin_snap(now);
        }
    }

    /// Advance one frame. Returns the offset when it changed since the
    /// last report.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        match self.phase {
            Phase::Idle | Phase::Dragging => {}
            Phase::Momentum => self.tick_momentum(now),
            Phase::Snapping => self.tick_snap(now),
        }

        if self.dirty {
            self.dirty = false;
            Some(self.offset)
        } else {
            None
        }
    }

    fn tick_momentum(&mut self, now: Instant) {
        let last = self.last_tick.unwrap_or(now);
        let dt = now
            .saturating_duration_since(last)
            .as_secs_f64()
            .min(MAX_TICK_DT);
        self.last_tick = Some(now);
        if dt <= 0.0 {
            return;
        }

        let next = self.clamp(self.offset + self.vel * dt);
        if next != self.offset {
            self.offset = next;
            self.dirty = true;
        } else {
            // pinned against a bound; bleed off
            self.vel = 0.0;
        }

        self.vel *= FRICTION_PER_FRAME.powf(dt * 60.0);
        if self.vel.abs() < SNAP_VELOCITY {
            self.begin_snap(now);
        }
    }

    fn tick_snap(&mut self, now: Instant) {
        let Some(tween) = self.tween else {
            self.phase = Phase::Idle;
            return;
        };

        let next = tween.value(now);
        if next != self.offset {
            self.offset = next;
            self.dirty = true;
        }
        if tween.finished(now) {
            self.tween = None;
            self.phase = Phase::Idle;
            log::trace!("settled at {}", self.offset);
        }
    }

    fn begin_snap(&mut self, now: Instant) {
        self.vel = 0.0;
        let target = self.snap_target();
        if target == self.offset {
            self.tween = None;
            self.phase = Phase::Idle;
        } else {
            self.tween = Some(Tween::new(self.offset, target, now, SNAP_DURATION));
            self.phase = Phase::Snapping;
        }
    }

    fn snap_target(&self) -> f64 {
        if self.snap_size <= 0.0 {
            return self.offset;
        }
        self.clamp((self.offset / self.snap_size).round() * self.snap_size)
    }

    fn clamp(&self, offset: f64) -> f64 {
        let max = (self.content_extent - self.viewport).max(0.0);
        offset.clamp(0.0, max)
    }
}

#[cfg(test)]
mod tests;

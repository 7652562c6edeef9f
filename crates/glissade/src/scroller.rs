//! The scroller facade.
//!
//! [`Scroller`] owns the kinetic engine and the recycling core and pumps
//! them once per host frame. The host supplies touch samples and a frame
//! tick; the scroller answers with lifecycle callbacks and a content
//! transform to apply to the live strip.
//!
//! Mutating commands issued while the strip is moving (`scroll_to_index`,
//! `scroll_by`, `set_num_elems`) are queued and run one at a time once the
//! strip has come to rest, so a command never fights an in-flight gesture.

use std::collections::VecDeque;
use std::rc::Rc;

use glissade_core::{
    ConfigError, CoreOptions, EventBuf, IDLE_DELAY, ScrollCore, ScrollState,
};
use glissade_kinetics::{Kinetics, KineticsConfig};
use web_time::Duration;

use crate::callbacks::Callbacks;
use crate::clock::{Clock, SystemClock};

/// Scroller configuration.
///
/// `cell_width` and `num_elems` are required; everything else has a usable
/// default. `num_elems` is the number of live elements, which covers the
/// visible cells plus two spares for recycling.
#[derive(Clone)]
pub struct ScrollerOptions {
    pub cell_width: f64,
    pub num_elems: usize,
    /// How many cells the virtual strip spans in each direction before the
    /// engine would hit its bounds. Practically unreachable at the default.
    pub huge_range_multiplier: u32,
    /// Scales finger deltas before they reach the engine.
    pub speed_multiplier: f64,
    /// Quiet time after the last movement before `scrolling_stopped` fires.
    pub idle_delay: Duration,
    pub debug: bool,
    pub callbacks: Callbacks,
}

impl ScrollerOptions {
    pub fn new(cell_width: f64, num_elems: usize) -> Self {
        Self {
            cell_width,
            num_elems,
            huge_range_multiplier: 1000,
            speed_multiplier: 1.0,
            idle_delay: IDLE_DELAY,
            debug: false,
            callbacks: Callbacks::default(),
        }
    }
}

/// Deferred mutation, executed only while the strip is at rest.
enum Command {
    ScrollTo { index: i64, animate: bool },
    ScrollBy { delta: i64, animate: bool },
    Resize(usize),
}

/// An infinite horizontal scroller over a fixed pool of live elements.
pub struct Scroller {
    core: ScrollCore,
    kinetics: Kinetics,
    callbacks: Callbacks,
    clock: Rc<dyn Clock>,
    pending: VecDeque<Command>,
    debug: bool,
}

impl Scroller {
    /// Build a scroller on the wall clock.
    pub fn new(options: ScrollerOptions) -> Result<Self, ConfigError> {
        Self::with_clock(options, Rc::new(SystemClock))
    }

    /// Build a scroller on an injected clock.
    ///
    /// Seeds the live window, which fires the initial `create_element` and
    /// `became_visible` callbacks before this returns.
    pub fn with_clock(
        options: ScrollerOptions,
        clock: Rc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let mut core_opts = CoreOptions::new(options.cell_width, options.num_elems);
        core_opts.huge_range_multiplier = options.huge_range_multiplier;
        core_opts.idle_delay = options.idle_delay;
        core_opts.debug = options.debug;
        let mut core = ScrollCore::new(core_opts)?;

        let mut kinetics = Kinetics::new(KineticsConfig {
            speed_multiplier: options.speed_multiplier,
        });
        let content = options.cell_width * f64::from(options.huge_range_multiplier);
        kinetics.configure(
            Self::viewport_extent(options.cell_width, options.num_elems),
            content,
            options.cell_width,
        );

        // Park the engine in the middle of the huge range so both travel
        // directions have room. The jump is swallowed here: the core already
        // starts at the normalized equivalent of this offset.
        let now = clock.now();
        kinetics.scroll_to(core.translator().offset_value(), false, now);
        let _ = kinetics.tick(now);

        let mut out = EventBuf::new();
        core.seed(&mut out);

        let scroller = Self {
            core,
            kinetics,
            callbacks: options.callbacks,
            clock,
            pending: VecDeque::new(),
            debug: options.debug,
        };
        scroller.emit(&out);
        Ok(scroller)
    }

    /// Advance the scroller by one host frame.
    ///
    /// Pulls the current engine offset, feeds it through the recycling core,
    /// checks the idle timeout and runs any queued command once the strip is
    /// at rest. Lifecycle callbacks fire synchronously from here.
    pub fn on_frame(&mut self) {
        let now = self.clock.now();
        let mut out = EventBuf::new();
        if let Some(raw) = self.kinetics.tick(now) {
            self.core.on_raw_offset(raw, now, &mut out);
        }
        self.core.poll_idle(now, &mut out);
        self.emit(&out);
        self.flush_pending();
    }

    pub fn touch_start(&mut self, x: f64) {
        self.kinetics.touch_start(x, self.clock.now());
    }

    pub fn touch_move(&mut self, x: f64) {
        self.kinetics.touch_move(x, self.clock.now());
    }

    pub fn touch_end(&mut self) {
        self.kinetics.touch_end(self.clock.now());
    }

    /// Bring `index` to the leading edge of the viewport.
    ///
    /// Runs immediately when the strip is at rest, otherwise once it stops.
    pub fn scroll_to_index(&mut self, index: i64, animate: bool) {
        self.pending.push_back(Command::ScrollTo { index, animate });
        self.flush_pending();
    }

    /// Scroll by a whole number of cells relative to wherever the strip is
    /// resting when the command runs.
    pub fn scroll_by(&mut self, delta: i64, animate: bool) {
        self.pending.push_back(Command::ScrollBy { delta, animate });
        self.flush_pending();
    }

    /// Change the live element count. Validated now, applied at rest.
    pub fn set_num_elems(&mut self, num_elems: usize) -> Result<(), ConfigError> {
        if num_elems < 3 {
            return Err(ConfigError::TooFewElements(num_elems));
        }
        self.pending.push_back(Command::Resize(num_elems));
        self.flush_pending();
        Ok(())
    }

    /// Horizontal translation to apply to the live strip as a whole, in
    /// pixels. Keeps the strip visually continuous across pool rotations.
    pub fn content_transform(&self) -> f64 {
        self.core.swap_offset() - self.core.state().position
    }

    pub fn state(&self) -> &ScrollState {
        self.core.state()
    }

    /// Logical indices currently bound to live elements, in strip order.
    pub fn window(&self) -> Vec<i64> {
        self.core.pool().window()
    }

    /// Logical indices currently shown, in strip order.
    pub fn visible(&self) -> Vec<i64> {
        self.core.pool().visible()
    }

    pub fn is_moving(&self) -> bool {
        self.core.is_started() || self.kinetics.is_active()
    }

    fn viewport_extent(cell_width: f64, num_elems: usize) -> f64 {
        cell_width * (num_elems.saturating_sub(2)) as f64
    }

    fn emit(&self, out: &EventBuf) {
        for event in out {
            self.callbacks.dispatch(event, self.debug);
        }
    }

    /// Run queued commands one per rest period. Executing a command sets the
    /// engine moving again, which pauses the queue until the next stop.
    fn flush_pending(&mut self) {
        while !self.is_moving() {
            let Some(cmd) = self.pending.pop_front() else {
                return;
            };
            let now = self.clock.now();
            match cmd {
                Command::ScrollTo { index, animate } => {
                    let target = self
                        .core
                        .translator()
                        .denormalize(index as f64 * self.core.translator().cell_width());
                    self.kinetics.scroll_to(target, animate, now);
                }
                Command::ScrollBy { delta, animate } => {
                    let index = self.core.state().current_index + delta;
                    let target = self
                        .core
                        .translator()
                        .denormalize(index as f64 * self.core.translator().cell_width());
                    self.kinetics.scroll_to(target, animate, now);
                }
                Command::Resize(num_elems) => {
                    let mut out = EventBuf::new();
                    if let Err(err) = self.core.set_num_elems(num_elems, &mut out) {
                        log::warn!("deferred resize rejected: {err}");
                    }
                    self.emit(&out);
                    self.kinetics.configure(
                        Self::viewport_extent(
                            self.core.translator().cell_width(),
                            self.core.num_elems(),
                        ),
                        self.core.translator().offset_value() * 2.0,
                        self.core.translator().cell_width(),
                    );
                }
            }
        }
    }
}

//! # The position-to-index state machine
//!
//! Everything downstream of the kinetic engine is deterministic: given a raw
//! offset the machine derives the logical cell index, the intra-cell
//! progress fraction, and the recycle/visibility transitions needed to keep
//! the constant-size live window correct — including updates that jump more
//! than one cell (flings) or reverse mid-cell.
//!
//! One accepted update runs, in order:
//!
//! 1. no-op filter (engines emit redundant callbacks),
//! 2. multi-keypoint detection and replay (see [`Algorithm A`](#algorithm-a)),
//! 3. direction, master direction, and progress derivation,
//! 4. edge detection (index changed, or landed exactly on a boundary),
//! 5. otherwise the swap decision (forward commit past the midpoint, or the
//!    undo when travel reverses before the edge),
//! 6. started notification and idle re-arm,
//! 7. commit: the previous state changes here and nowhere else.
//!
//! Edge and swap are mutually exclusive within one accepted update;
//! processing both would recycle an element twice.
//!
//! ## Algorithm A
//!
//! A keypoint is a cell edge or a cell midpoint (granularity = half a cell).
//! When an update spans more than one keypoint the machine replays the
//! intermediate keypoints as synthetic single-step updates, in travel order,
//! with replay detection suppressed, then processes the real final position
//! as a normal update. Every skipped edge and swap fires exactly once, in
//! order, with correct direction and progress. Iteration count is unbounded
//! by design: an extreme fling degrades to extra synchronous work, never to
//! incorrect state.

use web_time::{Duration, Instant};

use crate::error::ConfigError;
use crate::events::{EventBuf, ScrollerEvent};
use crate::idle::{IDLE_DELAY, IdleDetector};
use crate::pool::RecyclePool;
use crate::position::PositionTranslator;
use crate::state::{Direction, ScrollState};

/// Core configuration. `cell_width` and `num_elems` have no usable defaults
/// and are validated at construction.
#[derive(Clone, Copy, Debug)]
pub struct CoreOptions {
    pub cell_width: f64,
    pub num_elems: usize,
    pub huge_range_multiplier: u32,
    pub idle_delay: Duration,
    pub debug: bool,
}

impl CoreOptions {
    pub fn new(cell_width: f64, num_elems: usize) -> Self {
        Self {
            cell_width,
            num_elems,
            huge_range_multiplier: 1000,
            idle_delay: IDLE_DELAY,
            debug: false,
        }
    }
}

/// The state machine plus the recycle pool and idle detector it drives.
///
/// Owned exclusively by one scroller; all methods take `&mut self` and run
/// synchronously inside the engine callback or the frame pump.
#[derive(Debug)]
pub struct ScrollCore {
    translator: PositionTranslator,
    num_elems: usize,
    debug: bool,

    state: ScrollState,
    last_state: ScrollState,
    /// Guard against double-processing an index change; only `index_change`
    /// writes it.
    last_index: i64,
    started: bool,
    /// Extra translation that keeps the visual strip continuous across
    /// swaps; recomputed whenever the window rotates.
    swap_offset: f64,

    pool: RecyclePool,
    idle: IdleDetector,
}

impl ScrollCore {
    pub fn new(opts: CoreOptions) -> Result<Self, ConfigError> {
        if !opts.cell_width.is_finite() || opts.cell_width <= 0.0 {
            return Err(ConfigError::InvalidCellWidth(opts.cell_width));
        }
        if opts.num_elems < 3 {
            return Err(ConfigError::TooFewElements(opts.num_elems));
        }
        if opts.huge_range_multiplier == 0 {
            return Err(ConfigError::ZeroRangeMultiplier);
        }

        Ok(Self {
            translator: PositionTranslator::new(opts.cell_width, opts.huge_range_multiplier),
            num_elems: opts.num_elems,
            debug: opts.debug,
            state: ScrollState::initial(),
            last_state: ScrollState::initial(),
            last_index: 0,
            started: false,
            swap_offset: 0.0,
            pool: RecyclePool::new(),
            idle: IdleDetector::new(opts.idle_delay),
        })
    }

    /// Materialize and announce the initial live window.
    pub fn seed(&mut self, out: &mut EventBuf) {
        self.pool
            .seed(self.state.current_index, self.num_elems, out);
        self.swap_offset = self.pool.first_index() as f64 * self.translator.cell_width();
    }

    /// Entry point for the engine callback: normalize, then update.
    pub fn on_raw_offset(&mut self, raw: f64, now: Instant, out: &mut EventBuf) {
        let position = self.translator.normalize(raw);
        self.update(position, false, now, out);
    }

    /// Feed an already-normalized position.
    pub fn on_position(&mut self, position: f64, now: Instant, out: &mut EventBuf) {
        self.update(position, false, now, out);
    }

    /// Fire `Stopped` (and the trailing-spare cleanup) once the idle
    /// deadline has passed. Called from the frame pump.
    pub fn poll_idle(&mut self, now: Instant, out: &mut EventBuf) {
        if self.idle.poll(now) {
            self.started = false;
            out.push(ScrollerEvent::Stopped);
            self.pool
                .hide_trailing_spare(self.state.current_index, out);
            if self.debug {
                log::debug!("stopped at index {}", self.state.current_index);
            }
        }
    }

    /// Grow or shrink the live window. Callers defer this until the
    /// scroller has stopped.
    pub fn set_num_elems(&mut self, num_elems: usize, out: &mut EventBuf) -> Result<(), ConfigError> {
        if num_elems < 3 {
            return Err(ConfigError::TooFewElements(num_elems));
        }
        self.num_elems = num_elems;
        self.pool.resize(num_elems, self.state.current_index, out);
        Ok(())
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn translator(&self) -> &PositionTranslator {
        &self.translator
    }

    pub fn pool(&self) -> &RecyclePool {
        &self.pool
    }

    pub fn num_elems(&self) -> usize {
        self.num_elems
    }

    pub fn swap_offset(&self) -> f64 {
        self.swap_offset
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    fn update(&mut self, position: f64, suppress_replay: bool, now: Instant, out: &mut EventBuf) {
        if position == self.last_state.position {
            return;
        }

        if !suppress_replay && self.spans_multiple_keypoints(position) {
            if self.debug {
                log::debug!(
                    "replay {} -> {} (granularity {})",
                    self.last_state.position,
                    position,
                    self.translator.granularity()
                );
            }
            self.replay_keypoints(position, now, out);
        }

        self.step(position, now, out);
    }

    /// More than one keypoint bucket lies between the committed position and
    /// the new one; the delta must be replayed rather than applied at once.
    fn spans_multiple_keypoints(&self, position: f64) -> bool {
        let g = self.translator.granularity();
        let from = (self.last_state.position / g).floor();
        let to = (position / g).floor();
        (to - from).abs() > 1.0
    }

    /// Algorithm A: synthesize single-step updates at the keypoints between
    /// the committed position and the target, in travel order. Each
    /// synthetic position is nudged 1px past its keypoint along travel, so
    /// a boundary reads as strictly inside the entered cell and a midpoint
    /// reads as strictly beyond one-half. Feeding a midpoint exactly would
    /// leave progress at 0.50, which arms a swap but can never undo one on
    /// reversed travel.
    fn replay_keypoints(&mut self, target: f64, now: Instant, out: &mut EventBuf) {
        let g = self.translator.granularity();
        let from = self.last_state.position;

        if target > from {
            let mut k = (from / g).floor() * g + g;
            while k < target {
                let kp = k + 1.0;
                if kp < target {
                    self.update(kp, true, now, out);
                }
                k += g;
            }
        } else {
            // Start at the keypoint at-or-above `from`: when `from` rests
            // exactly on a keypoint, the crossing below it still belongs to
            // this delta and fires via the nudged position.
            let mut k = (from / g).ceil() * g;
            while k > target {
                let kp = k - 1.0;
                if kp < from && kp > target {
                    self.update(kp, true, now, out);
                }
                k -= g;
            }
        }
    }

    /// One single-keypoint update: steps 3-10.
    fn step(&mut self, position: f64, now: Instant, out: &mut EventBuf) {
        let last = self.last_state;
        let w = self.translator.cell_width();

        let direction = Direction::from_delta(position - last.position);
        let current_index = self.translator.index_of(position);
        let passed_edge = current_index != last.current_index;

        // Master direction persists within a cell; it resets on entry.
        let master = match last.master_direction {
            Some(m) if !passed_edge => m,
            _ => direction,
        };

        // Progress counts up from the entry edge under the master direction.
        // The complement keeps 0 meaning "just entered" on both sides of the
        // origin. Rounded to 2 decimals so the edge and swap predicates
        // compare stably.
        let mut raw_progress = (position.abs() % w) / w;
        let complemented = if position >= 0.0 {
            master == Direction::Back
        } else {
            master == Direction::Fwd
        };
        if complemented {
            raw_progress = 1.0 - raw_progress;
        }
        let progress = (raw_progress * 100.0).round() / 100.0;

        self.state = ScrollState {
            position,
            direction,
            master_direction: Some(master),
            swapped: last.swapped,
            current_index,
            progress,
        };

        let on_edge = position % w == 0.0;
        if passed_edge || on_edge {
            self.index_change(out);
        } else if self.needs_swap() {
            self.do_swap(out);
        }

        if !self.started {
            self.started = true;
            out.push(ScrollerEvent::Started);
        }
        self.idle.arm(now);

        self.last_state = self.state;

        if self.debug {
            log::trace!("x: {position} {:?}", self.state);
        }
    }

    /// Visibility handover at a crossing. The `last_index` guard makes an
    /// exact boundary landing (which also trips the edge check on the next
    /// update) fire at most once.
    fn index_change(&mut self, out: &mut EventBuf) {
        let index = self.state.current_index;
        if index == self.last_index {
            return;
        }
        if self.debug {
            log::debug!("index change: {index}");
        }

        self.pool
            .edge(index, self.state.direction, self.num_elems, out);

        self.state.master_direction = Some(self.state.direction);
        self.state.swapped = None;
        // A crossing landed exactly on the boundary computes as 1 under the
        // complement; it reads 0 in the cell just entered.
        if self.state.progress == 1.0 {
            self.state.progress = 0.0;
        }
        self.last_index = index;
    }

    /// Swap predicate: commit once the cell is more than half traversed, or
    /// undo a committed swap when travel reverses before the edge.
    fn needs_swap(&self) -> bool {
        let s = &self.state;
        if s.progress >= 0.5 && s.progress < 1.0 && s.swapped.is_none() {
            return true;
        }
        s.progress < 0.5 && s.swapped.is_some() && s.swapped != Some(s.direction)
    }

    fn do_swap(&mut self, out: &mut EventBuf) {
        let index = self.state.current_index;
        let undo = self.state.swapped.is_some();

        match self.state.direction {
            Direction::Fwd => {
                if self.debug {
                    log::debug!("swap first => last in index {index}");
                }
                self.pool.swap_first_last(index, self.num_elems, out);
            }
            Direction::Back => {
                if self.debug {
                    log::debug!("swap last => first in index {index}");
                }
                self.pool.swap_last_first(index, out);
            }
        }

        // An undo cancels the armed swap outright; the cell is back in its
        // untraversed arrangement.
        self.state.swapped = if undo {
            None
        } else {
            Some(self.state.direction)
        };
        self.swap_offset = self.pool.first_index() as f64 * self.translator.cell_width();
    }
}

//! # Glissade core
//!
//! Virtualizes an unbounded horizontal strip of fixed-width cells behind a
//! fixed viewport by recycling a small pool of live elements, so memory and
//! element cost stay constant no matter how far the user scrolls.
//!
//! The crate is the deterministic half of a scroller. It knows nothing
//! about gestures, physics, or rendering; it consumes raw offsets from a
//! kinetic engine and emits the ordered create/destroy/show/hide events the
//! host needs to keep exactly `num_elems` elements correctly positioned and
//! labeled:
//!
//! - [`PositionTranslator`] — folds the engine's huge absolute coordinate
//!   into a position centered near zero and derives the cell index from it.
//! - [`ScrollCore`] — the state machine: direction, master direction,
//!   intra-cell progress, edge and swap decisions, multi-keypoint replay
//!   for fast flings, and quiescence detection.
//! - [`RecyclePool`] — the constant-size live window and its slot keys.
//!
//! ```rust
//! use glissade_core::{CoreOptions, EventBuf, ScrollCore};
//! use web_time::Instant;
//!
//! let mut core = ScrollCore::new(CoreOptions::new(100.0, 5)).unwrap();
//! let mut events = EventBuf::new();
//! core.seed(&mut events);
//!
//! let now = Instant::now();
//! core.on_position(60.0, now, &mut events);
//! assert_eq!(core.state().current_index, 0);
//! assert_eq!(core.state().progress, 0.6);
//! ```

mod error;
mod events;
mod idle;
mod machine;
mod pool;
mod position;
mod state;


pub use error::ConfigError;
pub use events::{EventBuf, ScrollerEvent};
pub use idle::{IDLE_DELAY, IdleDetector};
pub use machine::{CoreOptions, ScrollCore};
pub use pool::{RecyclePool, SlotKey};
pub use position::PositionTranslator;
pub use state::{Direction, ScrollState};

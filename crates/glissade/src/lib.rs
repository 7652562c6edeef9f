//! Infinite horizontal scroller over a fixed pool of recycled elements.
//!
//! A handful of live elements stand in for an unbounded strip of uniform
//! cells. As the strip moves, elements that fall off one end are rebound to
//! new cell indices on the other. The host learns about every rebinding and
//! visibility change through [`Callbacks`] and positions the strip with
//! [`Scroller::content_transform`].
//!
//! ```
//! use glissade::{Callbacks, Scroller, ScrollerOptions};
//! use std::rc::Rc;
//!
//! let mut callbacks = Callbacks::default();
//! callbacks.create_element = Some(Rc::new(|index, _slot| {
//!     println!("bind cell {index}");
//! }));
//!
//! let mut options = ScrollerOptions::new(100.0, 5);
//! options.callbacks = callbacks;
//! let mut scroller = Scroller::new(options).unwrap();
//!
//! // Per host frame:
//! scroller.on_frame();
//! let _shift = scroller.content_transform();
//! ```

mod callbacks;
mod clock;
mod scroller;

pub use callbacks::{Callbacks, ElementFn, MotionFn};
pub use clock::{Clock, ManualClock, SystemClock};
pub use scroller::{Scroller, ScrollerOptions};

pub use glissade_core::{ConfigError, Direction, ScrollState, SlotKey};

#[cfg(test)]
mod tests;

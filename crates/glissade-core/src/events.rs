//! Events emitted toward the element-lifecycle collaborator.
//!
//! The machine never calls user code directly; it pushes events into a small
//! buffer and the embedding layer dispatches them. Ordering inside one
//! update is significant: a recycled slot is always destroyed under its old
//! index before it is created under the new one, so observers never see two
//! elements claiming the same logical index.

use smallvec::SmallVec;

use crate::pool::SlotKey;

/// One lifecycle or activity transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollerEvent {
    /// A live slot now represents logical `index`.
    Created { index: i64, slot: SlotKey },
    /// The slot stopped representing logical `index`.
    Destroyed { index: i64, slot: SlotKey },
    /// The element's first edge entered the viewport.
    Shown { index: i64, slot: SlotKey },
    /// No part of the element is visible anymore.
    Hidden { index: i64, slot: SlotKey },
    /// The scroller started moving.
    Started,
    /// The scroller came to rest.
    Stopped,
}

/// Per-update event buffer. A single-cell step emits at most a handful of
/// events; flings replaying many keypoints spill to the heap.
pub type EventBuf = SmallVec<[ScrollerEvent; 8]>;

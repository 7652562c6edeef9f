//! Scroll state record and direction type.
//!
//! One `ScrollState` (plus a copy of the previously committed one) is owned
//! by each scroll machine. Every predicate in the machine is relative: it
//! compares the freshly derived state against the committed previous state,
//! never against an absolute position.

/// Direction of travel along the strip.
///
/// `Fwd` is rightward logical travel: position grows, `current_index` grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Back,
    Fwd,
}

impl Direction {
    pub fn from_delta(delta: f64) -> Self {
        if delta < 0.0 { Self::Back } else { Self::Fwd }
    }

    pub fn sign(self) -> i64 {
        match self {
            Self::Back => -1,
            Self::Fwd => 1,
        }
    }
}

/// The mutable per-scroller record.
///
/// `progress` is always recomputed from `position` and `master_direction`;
/// the machine only ever writes it directly to clamp an exact boundary
/// landing back to 0.
#[derive(Clone, Copy, Debug)]
pub struct ScrollState {
    /// Normalized offset. Not wrapped; the huge-range centering keeps it far
    /// from the physical extremes.
    pub position: f64,
    /// Sign of the change since the previous accepted update.
    pub direction: Direction,
    /// Direction in effect when the current cell was entered. `None` only
    /// before the first update.
    pub master_direction: Option<Direction>,
    /// Direction of the most recent recycle swap; `None` means no swap is
    /// armed for the current cell.
    pub swapped: Option<Direction>,
    /// Logical index of the cell whose leading edge coincides with, or most
    /// recently crossed, the viewport boundary.
    pub current_index: i64,
    /// Fraction of the current cell traversed, in [0, 1], oriented by
    /// `master_direction`, rounded to 2 decimals.
    pub progress: f64,
}

impl ScrollState {
    pub fn initial() -> Self {
        Self {
            position: 0.0,
            direction: Direction::Fwd,
            master_direction: None,
            swapped: None,
            current_index: 0,
            progress: 0.0,
        }
    }
}

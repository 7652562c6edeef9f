//! Raw-offset normalization and index derivation.
//!
//! The kinetic engine works in an absolute coordinate starting at a huge
//! centering offset so that practical scroll ranges never reach the physical
//! extremes. The translator folds that coordinate into a position centered
//! near zero, and derives the logical cell index from it. The index is
//! always recomputed from the position; it is never stepped ad hoc, so it
//! cannot drift.

/// Pure transform between the engine's raw offsets and normalized positions.
#[derive(Clone, Copy, Debug)]
pub struct PositionTranslator {
    cell_width: f64,
    offset_value: f64,
}

impl PositionTranslator {
    pub fn new(cell_width: f64, huge_range_multiplier: u32) -> Self {
        Self {
            cell_width,
            offset_value: cell_width * f64::from(huge_range_multiplier) / 2.0,
        }
    }

    /// The centering constant; also the raw offset the engine starts at.
    pub fn offset_value(&self) -> f64 {
        self.offset_value
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Keypoint granularity: a keypoint is a cell edge or a cell midpoint.
    pub fn granularity(&self) -> f64 {
        self.cell_width / 2.0
    }

    /// Raw engine offset -> normalized position.
    pub fn normalize(&self, raw: f64) -> f64 {
        raw - self.offset_value
    }

    /// Normalized position -> raw engine offset.
    pub fn denormalize(&self, position: f64) -> f64 {
        position + self.offset_value
    }

    /// Logical index of the cell owning `position`. Cell `i` owns
    /// `[i * cell_width, (i + 1) * cell_width)`.
    pub fn index_of(&self, position: f64) -> i64 {
        (position / self.cell_width).floor() as i64
    }
}

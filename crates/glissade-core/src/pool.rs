//! The recycle pool: a constant-size live window of element slots.
//!
//! Exactly `num_elems` slots exist at any quiescent moment. Scrolling never
//! allocates new slots; it rotates one slot from one end of the window to
//! the other and renames the logical index it represents. Slot keys are
//! stable for the life of a slot, so the host can key its real elements
//! (DOM nodes, views, ...) by them.

use std::collections::VecDeque;

use slotmap::SlotMap;

use crate::events::{EventBuf, ScrollerEvent};
use crate::state::Direction;

slotmap::new_key_type! {
    /// Opaque handle for one recycled element slot.
    pub struct SlotKey;
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    /// Logical index this slot currently represents.
    index: i64,
    visible: bool,
}

/// Ordered live window. Front = lowest logical index.
#[derive(Debug)]
pub struct RecyclePool {
    slots: SlotMap<SlotKey, Slot>,
    order: VecDeque<SlotKey>,
}

impl RecyclePool {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: VecDeque::new(),
        }
    }

    pub fn num_elems(&self) -> usize {
        self.order.len()
    }

    /// Logical index of the front slot; the window covers
    /// `first_index() ..= first_index() + num_elems - 1`.
    pub fn first_index(&self) -> i64 {
        self.order
            .front()
            .map(|k| self.slots[*k].index)
            .unwrap_or(0)
    }

    /// Initial publish: materialize the window around `current_index` and
    /// announce it. The front slot is the hidden trailing buffer.
    pub fn seed(&mut self, current_index: i64, num_elems: usize, out: &mut EventBuf) {
        for i in 0..num_elems {
            let index = current_index + i as i64 - 1;
            let key = self.slots.insert(Slot {
                index,
                visible: false,
            });
            self.order.push_back(key);
            out.push(ScrollerEvent::Created { index, slot: key });
        }

        for (i, key) in self.order.iter().enumerate() {
            let slot = &mut self.slots[*key];
            if i == 0 {
                out.push(ScrollerEvent::Hidden {
                    index: slot.index,
                    slot: *key,
                });
            } else {
                slot.visible = true;
                out.push(ScrollerEvent::Shown {
                    index: slot.index,
                    slot: *key,
                });
            }
        }
    }

    /// Visibility transitions for a crossing into cell `index`.
    ///
    /// Forward: the cell behind the window's front leaves the viewport and
    /// the freshly recycled cell at the back enters it. Backward is the
    /// mirror image.
    pub fn edge(&mut self, index: i64, direction: Direction, num_elems: usize, out: &mut EventBuf) {
        match direction {
            Direction::Fwd => {
                self.set_visible(index - 1, false, out);
                self.set_visible(index + num_elems as i64 - 2, true, out);
            }
            Direction::Back => {
                self.set_visible(index, true, out);
                self.set_visible(index + num_elems as i64 - 1, false, out);
            }
        }
    }

    /// Recycle the front slot to the far end of the window (forward travel
    /// committed past the cell midpoint).
    pub fn swap_first_last(&mut self, index: i64, num_elems: usize, out: &mut EventBuf) {
        if let Some(key) = self.order.pop_front() {
            let new_index = index + num_elems as i64 - 1;
            let slot = &mut self.slots[key];
            out.push(ScrollerEvent::Destroyed {
                index: slot.index,
                slot: key,
            });
            slot.index = new_index;
            slot.visible = false;
            out.push(ScrollerEvent::Created {
                index: new_index,
                slot: key,
            });
            self.order.push_back(key);
        }
    }

    /// Recycle the back slot to the front of the window (backward travel).
    pub fn swap_last_first(&mut self, index: i64, out: &mut EventBuf) {
        if let Some(key) = self.order.pop_back() {
            let new_index = index - 1;
            let slot = &mut self.slots[key];
            out.push(ScrollerEvent::Destroyed {
                index: slot.index,
                slot: key,
            });
            slot.index = new_index;
            slot.visible = false;
            out.push(ScrollerEvent::Created {
                index: new_index,
                slot: key,
            });
            self.order.push_front(key);
        }
    }

    /// Grow or shrink the live window at its back end.
    pub fn resize(&mut self, new_count: usize, current_index: i64, out: &mut EventBuf) {
        while self.order.len() > new_count {
            if let Some(key) = self.order.pop_back() {
                let slot = self.slots.remove(key);
                if let Some(slot) = slot {
                    out.push(ScrollerEvent::Destroyed {
                        index: slot.index,
                        slot: key,
                    });
                }
            }
        }

        while self.order.len() < new_count {
            let index = current_index + self.order.len() as i64 - 1;
            let key = self.slots.insert(Slot {
                index,
                visible: true,
            });
            self.order.push_back(key);
            out.push(ScrollerEvent::Created { index, slot: key });
            out.push(ScrollerEvent::Shown { index, slot: key });
        }
    }

    /// Stop-time cleanup: the visibility of the cell one past the settled
    /// view was kept as a buffer against re-acceleration; retire it.
    pub fn hide_trailing_spare(&mut self, current_index: i64, out: &mut EventBuf) {
        let spare = current_index + self.order.len() as i64 - 2;
        self.set_visible(spare, false, out);
    }

    /// Logical indices of the live window, front to back. Test support.
    pub fn window(&self) -> Vec<i64> {
        self.order.iter().map(|k| self.slots[*k].index).collect()
    }

    /// Logical indices currently marked visible, front to back. Test support.
    pub fn visible(&self) -> Vec<i64> {
        self.order
            .iter()
            .filter(|k| self.slots[**k].visible)
            .map(|k| self.slots[*k].index)
            .collect()
    }

    fn set_visible(&mut self, index: i64, visible: bool, out: &mut EventBuf) {
        let found = self
            .order
            .iter()
            .copied()
            .find(|k| self.slots[*k].index == index);
        if let Some(key) = found {
            let slot = &mut self.slots[key];
            if slot.visible != visible {
                slot.visible = visible;
                out.push(if visible {
                    ScrollerEvent::Shown { index, slot: key }
                } else {
                    ScrollerEvent::Hidden { index, slot: key }
                });
            }
        }
    }
}

impl Default for RecyclePool {
    fn default() -> Self {
        Self::new()
    }
}

//! Host-facing lifecycle callbacks.
//!
//! The host wires a closure for each event it cares about; unset slots are
//! simply skipped. Element callbacks receive the logical cell index plus the
//! pool slot key, so the host can keep its own per-slot resources (a DOM
//! node, a texture, a widget) in a secondary map keyed by [`SlotKey`].

use std::rc::Rc;

use glissade_core::{ScrollerEvent, SlotKey};

/// Closure invoked with a cell index and the recycled slot backing it.
pub type ElementFn = Rc<dyn Fn(i64, SlotKey)>;

/// Closure invoked on a motion transition.
pub type MotionFn = Rc<dyn Fn()>;

/// Optional closures for every scroller event.
#[derive(Clone, Default)]
pub struct Callbacks {
    /// A slot was rebound to a new cell index.
    pub create_element: Option<ElementFn>,
    /// A slot's old binding was retired.
    pub destroy_element: Option<ElementFn>,
    /// A bound cell entered the viewport.
    pub became_visible: Option<ElementFn>,
    /// A bound cell left the viewport.
    pub became_invisible: Option<ElementFn>,
    /// Motion began after a rest.
    pub scrolling_started: Option<MotionFn>,
    /// Motion has been quiet for the idle window.
    pub scrolling_stopped: Option<MotionFn>,
}

impl Callbacks {
    pub(crate) fn dispatch(&self, event: &ScrollerEvent, debug: bool) {
        if debug {
            log::debug!("callback {event:?}");
        }
        match *event {
            ScrollerEvent::Created { index, slot } => {
                if let Some(f) = &self.create_element {
                    f(index, slot);
                }
            }
            ScrollerEvent::Destroyed { index, slot } => {
                if let Some(f) = &self.destroy_element {
                    f(index, slot);
                }
            }
            ScrollerEvent::Shown { index, slot } => {
                if let Some(f) = &self.became_visible {
                    f(index, slot);
                }
            }
            ScrollerEvent::Hidden { index, slot } => {
                if let Some(f) = &self.became_invisible {
                    f(index, slot);
                }
            }
            ScrollerEvent::Started => {
                if let Some(f) = &self.scrolling_started {
                    f();
                }
            }
            ScrollerEvent::Stopped => {
                if let Some(f) = &self.scrolling_stopped {
                    f();
                }
            }
        }
    }
}

//! Headless demo: drives a scroller through a fling with a manual clock and
//! logs every lifecycle callback. Run with `RUST_LOG=info` (or `debug` for
//! the raw event stream).

use std::rc::Rc;
use std::time::Duration;

use glissade::{Callbacks, ManualClock, Scroller, ScrollerOptions};

fn main() {
    env_logger::init();

    let mut callbacks = Callbacks::default();
    callbacks.create_element = Some(Rc::new(|index, _| log::info!("bind cell {index}")));
    callbacks.destroy_element = Some(Rc::new(|index, _| log::info!("retire cell {index}")));
    callbacks.became_visible = Some(Rc::new(|index, _| log::info!("cell {index} entered view")));
    callbacks.became_invisible = Some(Rc::new(|index, _| log::info!("cell {index} left view")));
    callbacks.scrolling_started = Some(Rc::new(|| log::info!("scrolling started")));
    callbacks.scrolling_stopped = Some(Rc::new(|| log::info!("scrolling stopped")));

    let clock = ManualClock::new();
    let mut options = ScrollerOptions::new(100.0, 5);
    options.callbacks = callbacks;
    let mut scroller =
        Scroller::with_clock(options, Rc::new(clock.clone())).expect("valid options");

    // A leftward fling: three touch samples, then let momentum run out.
    scroller.touch_start(600.0);
    clock.advance(Duration::from_millis(16));
    scroller.touch_move(530.0);
    clock.advance(Duration::from_millis(16));
    scroller.touch_move(450.0);
    scroller.touch_end();

    let mut frames = 0u32;
    loop {
        clock.advance(Duration::from_millis(16));
        scroller.on_frame();
        frames += 1;
        if !scroller.is_moving() || frames > 1_000 {
            break;
        }
    }
    // Let the idle timeout fire.
    clock.advance(Duration::from_millis(250));
    scroller.on_frame();

    let state = scroller.state();
    log::info!(
        "settled after {frames} frames at index {} (position {:.0}, transform {:.0})",
        state.current_index,
        state.position,
        scroller.content_transform(),
    );

    // Jump a few cells back once at rest, animated.
    scroller.scroll_by(-2, true);
    while scroller.is_moving() {
        clock.advance(Duration::from_millis(16));
        scroller.on_frame();
    }
    clock.advance(Duration::from_millis(250));
    scroller.on_frame();
    log::info!("scroll_by(-2) landed on index {}", scroller.state().current_index);
}

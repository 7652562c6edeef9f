use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::{Callbacks, ConfigError, ManualClock, Scroller, ScrollerOptions};

type Log = Rc<RefCell<Vec<String>>>;

fn recording_callbacks(log: &Log) -> Callbacks {
    let mut callbacks = Callbacks::default();
    let l = log.clone();
    callbacks.create_element = Some(Rc::new(move |i, _| l.borrow_mut().push(format!("create {i}"))));
    let l = log.clone();
    callbacks.destroy_element =
        Some(Rc::new(move |i, _| l.borrow_mut().push(format!("destroy {i}"))));
    let l = log.clone();
    callbacks.became_visible = Some(Rc::new(move |i, _| l.borrow_mut().push(format!("show {i}"))));
    let l = log.clone();
    callbacks.became_invisible =
        Some(Rc::new(move |i, _| l.borrow_mut().push(format!("hide {i}"))));
    let l = log.clone();
    callbacks.scrolling_started = Some(Rc::new(move || l.borrow_mut().push("started".into())));
    let l = log.clone();
    callbacks.scrolling_stopped = Some(Rc::new(move || l.borrow_mut().push("stopped".into())));
    callbacks
}

fn recorded(cell_width: f64, num_elems: usize) -> (Scroller, ManualClock, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let clock = ManualClock::new();
    let mut options = ScrollerOptions::new(cell_width, num_elems);
    options.callbacks = recording_callbacks(&log);
    let scroller = Scroller::with_clock(options, Rc::new(clock.clone())).unwrap();
    (scroller, clock, log)
}

fn drain(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}

/// Pump 16 ms frames until the scroller is fully at rest (including the
/// idle window), with a hard cap against runaway motion.
fn settle(scroller: &mut Scroller, clock: &ManualClock) {
    for _ in 0..2_000 {
        clock.advance(Duration::from_millis(16));
        scroller.on_frame();
        if !scroller.is_moving() {
            // One more idle window so the stop callback has fired.
            clock.advance(Duration::from_millis(250));
            scroller.on_frame();
            if !scroller.is_moving() {
                return;
            }
        }
    }
    panic!("scroller did not settle");
}

fn count(log: &[String], needle: &str) -> usize {
    log.iter().filter(|e| *e == needle).count()
}

#[test]
fn construction_rejects_bad_options() {
    assert!(matches!(
        Scroller::new(ScrollerOptions::new(0.0, 5)),
        Err(ConfigError::InvalidCellWidth(_))
    ));
    assert!(matches!(
        Scroller::new(ScrollerOptions::new(100.0, 2)),
        Err(ConfigError::TooFewElements(2))
    ));
}

#[test]
fn seeding_fires_initial_callbacks_in_order() {
    let (scroller, _clock, log) = recorded(100.0, 5);
    assert_eq!(
        drain(&log),
        vec![
            "create -1", "create 0", "create 1", "create 2", "create 3", "hide -1", "show 0",
            "show 1", "show 2", "show 3",
        ]
    );
    assert_eq!(scroller.window(), vec![-1, 0, 1, 2, 3]);
    assert!(!scroller.is_moving());
}

#[test]
fn dragging_recycles_through_the_core() {
    let (mut scroller, clock, log) = recorded(100.0, 5);
    drain(&log);

    scroller.touch_start(500.0);
    clock.advance(Duration::from_millis(16));
    scroller.touch_move(400.0);
    scroller.on_frame();

    let events = drain(&log);
    assert_eq!(count(&events, "started"), 1);
    assert!(events.contains(&"destroy -1".to_string()));
    assert!(events.contains(&"create 4".to_string()));
    assert!(events.contains(&"hide 0".to_string()));
    assert!(events.contains(&"show 4".to_string()));
    assert_eq!(scroller.state().current_index, 1);
    assert_eq!(scroller.window(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn stop_fires_after_the_idle_window() {
    let (mut scroller, clock, log) = recorded(100.0, 5);
    scroller.scroll_to_index(1, false);
    clock.advance(Duration::from_millis(16));
    scroller.on_frame();
    drain(&log);

    // Quiet but not yet idle.
    clock.advance(Duration::from_millis(100));
    scroller.on_frame();
    assert!(drain(&log).is_empty());

    clock.advance(Duration::from_millis(150));
    scroller.on_frame();
    let events = drain(&log);
    assert_eq!(events, vec!["stopped", "hide 4"]);
    assert_eq!(scroller.visible(), vec![1, 2, 3]);
}

#[test]
fn fling_settles_on_a_cell_boundary() {
    let (mut scroller, clock, log) = recorded(100.0, 5);
    drain(&log);

    scroller.touch_start(600.0);
    clock.advance(Duration::from_millis(16));
    scroller.touch_move(520.0);
    clock.advance(Duration::from_millis(16));
    scroller.touch_move(430.0);
    scroller.touch_end();
    settle(&mut scroller, &clock);

    let events = drain(&log);
    assert_eq!(count(&events, "started"), 1);
    assert_eq!(count(&events, "stopped"), 1);
    let position = scroller.state().position;
    assert!(position > 100.0, "fling should travel, got {position}");
    assert_eq!(position % 100.0, 0.0, "must rest on a boundary: {position}");

    // Conservation: seeded five elements, still exactly five alive.
    let creates = events.iter().filter(|e| e.starts_with("create")).count();
    let destroys = events.iter().filter(|e| e.starts_with("destroy")).count();
    assert_eq!(creates, destroys);
    assert_eq!(scroller.window().len(), 5);
}

#[test]
fn commands_defer_until_the_strip_stops() {
    let (mut scroller, clock, log) = recorded(100.0, 5);
    drain(&log);

    scroller.scroll_to_index(1, true);
    assert!(scroller.is_moving());
    scroller.scroll_to_index(5, false);
    clock.advance(Duration::from_millis(16));
    scroller.on_frame();
    // Still animating toward the first target; the second waits.
    assert!(scroller.state().current_index < 5);

    settle(&mut scroller, &clock);
    assert_eq!(scroller.state().current_index, 5);

    let events = drain(&log);
    assert_eq!(count(&events, "started"), 2);
    assert_eq!(count(&events, "stopped"), 2);
    let first_stop = events.iter().position(|e| e == "stopped").unwrap();
    assert!(
        events[first_stop..].contains(&"create 8".to_string()),
        "second command must run after the first stop"
    );
}

#[test]
fn scroll_by_resolves_against_the_index_at_execution() {
    let (mut scroller, clock, _log) = recorded(100.0, 5);
    scroller.scroll_to_index(3, false);
    scroller.scroll_by(2, false);
    settle(&mut scroller, &clock);
    assert_eq!(scroller.state().current_index, 5);
}

#[test]
fn resize_applies_immediately_at_rest() {
    let (mut scroller, _clock, log) = recorded(100.0, 5);
    drain(&log);

    scroller.set_num_elems(6).unwrap();
    assert_eq!(drain(&log), vec!["create 4", "show 4"]);
    assert_eq!(scroller.window(), vec![-1, 0, 1, 2, 3, 4]);

    scroller.set_num_elems(4).unwrap();
    assert_eq!(drain(&log), vec!["destroy 4", "destroy 3"]);
    assert_eq!(scroller.window(), vec![-1, 0, 1, 2]);

    assert!(matches!(
        scroller.set_num_elems(2),
        Err(ConfigError::TooFewElements(2))
    ));
}

#[test]
fn content_transform_keeps_cells_continuous_across_a_swap() {
    let (mut scroller, clock, _log) = recorded(100.0, 5);

    let cell_x = |s: &Scroller, index: i64| {
        s.content_transform() + (index - s.window()[0]) as f64 * 100.0
    };

    scroller.touch_start(500.0);
    clock.advance(Duration::from_millis(16));
    scroller.touch_move(460.0);
    scroller.on_frame();
    // Position 40, window still [-1..3].
    let before = cell_x(&scroller, 0);

    clock.advance(Duration::from_millis(16));
    scroller.touch_move(440.0);
    scroller.on_frame();
    // Position 60, window rotated to [0..4].
    assert_eq!(scroller.window()[0], 0);
    let after = cell_x(&scroller, 0);

    assert!(
        (before - after - 20.0).abs() < 1e-9,
        "cell 0 must slide exactly with the strip: {before} -> {after}"
    );
}

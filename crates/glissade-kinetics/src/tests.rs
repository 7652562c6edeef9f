use web_time::{Duration, Instant};

use crate::{Kinetics, KineticsConfig};

fn engine() -> Kinetics {
    let mut k = Kinetics::new(KineticsConfig::default());
    k.configure(300.0, 100_000.0, 100.0);
    k
}

/// Run ticks at 16ms cadence until the engine goes idle.
fn settle(k: &mut Kinetics, mut now: Instant) -> (f64, Instant) {
    let mut last = k.offset();
    for _ in 0..10_000 {
        now += Duration::from_millis(16);
        if let Some(offset) = k.tick(now) {
            last = offset;
        }
        if !k.is_active() {
            return (last, now);
        }
    }
    panic!("engine never settled");
}

#[test]
fn drag_tracks_the_finger_inverted() {
    let mut k = engine();
    let t0 = Instant::now();
    k.scroll_to(5_000.0, false, t0);
    assert_eq!(k.tick(t0), Some(5_000.0));

    k.touch_start(200.0, t0);
    k.touch_move(150.0, t0 + Duration::from_millis(16));
    assert_eq!(k.tick(t0 + Duration::from_millis(16)), Some(5_050.0));

    k.touch_move(210.0, t0 + Duration::from_millis(32));
    assert_eq!(k.tick(t0 + Duration::from_millis(32)), Some(4_990.0));
}

#[test]
fn speed_multiplier_scales_drag() {
    let mut k = Kinetics::new(KineticsConfig {
        speed_multiplier: 2.0,
    });
    k.configure(300.0, 100_000.0, 100.0);
    let t0 = Instant::now();
    k.scroll_to(5_000.0, false, t0);
    k.tick(t0);

    k.touch_start(200.0, t0);
    k.touch_move(180.0, t0 + Duration::from_millis(16));
    assert_eq!(k.offset(), 5_040.0);
}

#[test]
fn release_decays_and_snaps_to_cell() {
    let mut k = engine();
    let t0 = Instant::now();
    k.scroll_to(5_000.0, false, t0);
    k.tick(t0);

    // a quick leftward swipe
    k.touch_start(300.0, t0);
    for i in 1..=5 {
        k.touch_move(300.0 - 30.0 * i as f64, t0 + Duration::from_millis(16 * i));
    }
    k.touch_end(t0 + Duration::from_millis(80));
    assert!(k.is_active());

    let (final_offset, _) = settle(&mut k, t0 + Duration::from_millis(80));
    assert_eq!(final_offset % 100.0, 0.0, "did not settle on a snap point");
    assert!(final_offset > 5_150.0, "fling had no momentum");
    assert!(!k.is_active());
}

#[test]
fn slow_release_just_snaps_back() {
    let mut k = engine();
    let t0 = Instant::now();
    k.scroll_to(5_000.0, false, t0);
    k.tick(t0);

    k.touch_start(300.0, t0);
    // crawl 30px over half a second: release velocity under threshold
    for i in 1..=10 {
        k.touch_move(300.0 - 3.0 * i as f64, t0 + Duration::from_millis(50 * i));
    }
    k.touch_end(t0 + Duration::from_millis(500));

    let (final_offset, _) = settle(&mut k, t0 + Duration::from_millis(500));
    assert_eq!(final_offset, 5_000.0);
}

#[test]
fn animated_scroll_to_lands_exactly() {
    let mut k = engine();
    let t0 = Instant::now();
    k.scroll_to(5_000.0, false, t0);
    k.tick(t0);

    k.scroll_to(5_300.0, true, t0);
    assert!(k.is_active());

    let mid = k.tick(t0 + Duration::from_millis(150)).unwrap();
    assert!(mid > 5_000.0 && mid < 5_300.0);

    let (final_offset, _) = settle(&mut k, t0 + Duration::from_millis(150));
    assert_eq!(final_offset, 5_300.0);
}

#[test]
fn offsets_clamp_to_content_bounds() {
    let mut k = Kinetics::new(KineticsConfig::default());
    k.configure(300.0, 1_000.0, 100.0);
    let t0 = Instant::now();

    k.scroll_to(5_000.0, false, t0);
    assert_eq!(k.offset(), 700.0);

    k.touch_start(0.0, t0);
    k.touch_move(900.0, t0 + Duration::from_millis(16));
    assert_eq!(k.offset(), 0.0);
}

#[test]
fn reconfigure_clamps_current_offset() {
    let mut k = engine();
    let t0 = Instant::now();
    k.scroll_to(90_000.0, false, t0);
    k.tick(t0);

    k.configure(300.0, 1_000.0, 100.0);
    assert_eq!(k.offset(), 700.0);
    assert_eq!(k.tick(t0 + Duration::from_millis(16)), Some(700.0));
}

mod support;

use std::time::Duration;

use cardreel::ReelConfig;
use support::{five_card_reel, reel_with, run_frames, scenario_config};

const STEP: Duration = Duration::from_millis(100);

/* ─────────────────── recycling & continuity ─────────────────────── */

#[test]
fn pitch_transit_recycles_the_head_exactly_once() {
    let mut reel = five_card_reel(scenario_config());
    reel.set_intersection(1.0);
    assert!(reel.is_running());

    // 24 × 0.1 s at 80 px/s: x ≈ 192, one step short of the head's
    // trailing edge reaching the leading bound.
    run_frames(&mut reel, 24, STEP);
    assert_eq!(reel.card_ids(), vec![0, 1, 2, 3, 4]);
    let before = reel.surface().rendered_lefts();

    // Step 25 carries x to 200: the head has fully exited, moves to the
    // tail, and the offset is compensated by one pitch (220) to -20.
    run_frames(&mut reel, 1, STEP);
    assert_eq!(reel.card_ids(), vec![1, 2, 3, 4, 0]);
    assert!((reel.offset_x() + 20.0).abs() < 1e-2, "x = {}", reel.offset_x());

    // No card other than the recycled one jumped: every survivor sits
    // exactly one frame of drift (8 px) left of where it was.
    let after = reel.surface().rendered_lefts();
    for (card, left_before) in before {
        if card == 0 {
            continue;
        }
        let (_, left_after) = after.iter().find(|(c, _)| *c == card).copied().unwrap();
        assert!(
            (left_after - (left_before - 8.0)).abs() <= 0.5,
            "card {card}: {left_before} -> {left_after}"
        );
    }

    // One pitch of cumulative travel (220 px ≈ 2.75 s) nets x back to
    // zero; on the 0.1 s grid that brackets to +4 at 2.8 s, with no
    // second recycle.
    run_frames(&mut reel, 3, STEP);
    assert_eq!(reel.card_ids(), vec![1, 2, 3, 4, 0]);
    assert!((reel.offset_x() - 4.0).abs() < 1e-2, "x = {}", reel.offset_x());
}

#[test]
fn cyclic_order_is_preserved_over_many_recycles() {
    let mut reel = five_card_reel(scenario_config());
    reel.set_intersection(1.0);
    run_frames(&mut reel, 600, STEP); // one minute of drift

    let ids = reel.card_ids();
    assert_eq!(ids.len(), 5);
    let head = ids[0];
    let expected: Vec<u64> = (0..5).map(|i| (head + i) % 5).collect();
    assert_eq!(ids, expected, "order is no longer a rotation of the original");
}

#[test]
fn single_card_strip_never_recycles() {
    let mut reel = reel_with(1, 200.0, 20.0, 660.0, scenario_config());
    reel.set_intersection(1.0);
    run_frames(&mut reel, 100, STEP);
    assert_eq!(reel.card_ids(), vec![0]);
    assert!((reel.offset_x() - 800.0).abs() < 0.5);
}

/* ─────────────────── pausing & visibility ───────────────────────── */

#[test]
fn hover_freezes_drift_until_it_ends() {
    let mut reel = five_card_reel(scenario_config());
    reel.set_intersection(1.0);
    run_frames(&mut reel, 5, STEP);
    let x = reel.offset_x();

    reel.set_hovered(true);
    run_frames(&mut reel, 50, STEP);
    assert_eq!(reel.offset_x(), x);

    reel.set_hovered(false);
    run_frames(&mut reel, 1, STEP);
    assert!(reel.offset_x() > x);
}

#[test]
fn hidden_tab_parks_the_loop() {
    let mut reel = five_card_reel(scenario_config());
    reel.set_intersection(1.0);
    run_frames(&mut reel, 5, STEP);
    let x = reel.offset_x();

    reel.set_page_visible(false);
    assert!(!reel.is_running());
    assert_eq!(reel.pending_frame(), None);
    run_frames(&mut reel, 20, STEP);
    assert_eq!(reel.offset_x(), x);

    reel.set_page_visible(true);
    run_frames(&mut reel, 1, STEP);
    assert!(reel.offset_x() > x);
}

#[test]
fn intersection_restart_defers_to_a_hidden_page() {
    let mut reel = five_card_reel(scenario_config());
    reel.set_page_visible(false);

    // The intersection signal restarts the loop, but the first frame sees
    // the hidden page and parks it again without advancing.
    reel.set_intersection(1.0);
    assert!(reel.is_running());
    run_frames(&mut reel, 1, STEP);
    assert!(!reel.is_running());
    assert_eq!(reel.offset_x(), 0.0);
}

#[test]
fn resume_on_visible_ignores_intersection() {
    let mut reel = five_card_reel(scenario_config());
    reel.set_intersection(0.0);
    assert!(!reel.is_running());

    reel.set_page_visible(false);
    // Visibility return restarts the loop even though the strip is still
    // out of the viewport.
    reel.set_page_visible(true);
    assert!(reel.is_running());
}

/* ─────────────────── gestures ───────────────────────────────────── */

#[test]
fn small_travel_clicks_through_to_the_card_target() {
    let mut reel = five_card_reel(scenario_config());
    reel.pointer_down(100.0);
    reel.pointer_move(103.0);
    assert_eq!(reel.pointer_up(), Some("dest/0".into()));
}

#[test]
fn long_travel_is_a_drag_with_no_navigation() {
    let mut reel = five_card_reel(scenario_config());
    reel.pointer_down(100.0);
    reel.pointer_move(140.0);
    assert_eq!(reel.pointer_up(), None);
    assert!((reel.offset_x() + 40.0).abs() < 1e-3);
}

#[test]
fn press_in_the_gap_never_navigates() {
    // 210 falls in the 20 px gap after the first card.
    let mut reel = five_card_reel(scenario_config());
    reel.pointer_down(210.0);
    assert_eq!(reel.pointer_up(), None);
}

#[test]
fn drag_overrides_drift_and_moves_the_strip_directly() {
    let mut reel = five_card_reel(scenario_config());
    reel.set_intersection(1.0);
    run_frames(&mut reel, 5, STEP);
    let x = reel.offset_x();

    reel.pointer_down(300.0);
    assert!(reel.dragging() && reel.paused());
    run_frames(&mut reel, 10, STEP);
    assert_eq!(reel.offset_x(), x); // drift is locked out while dragging

    // Dragging right by 120 px moves the strip right: x drops by 120 and
    // the translation is applied immediately.
    reel.pointer_move(420.0);
    assert!((reel.offset_x() - (x - 120.0)).abs() < 1e-3);
    assert!((reel.surface().layout.translation() - reel.offset_x()).abs() < 1e-3);

    assert_eq!(reel.pointer_cancel(), None);
    assert!(!reel.dragging() && !reel.paused());
}

/* ─────────────────── wheel ──────────────────────────────────────── */

#[test]
fn wheel_applies_instantly_and_quiet_period_restores_drift() {
    let mut reel = five_card_reel(scenario_config());
    reel.set_intersection(1.0);

    // No frame has run: the wheel still lands immediately, scaled by the
    // multiplier, and flips the drift direction.
    reel.wheel(0.0, -300.0);
    assert!((reel.offset_x() + 450.0).abs() < 1e-3);
    assert!((reel.surface().layout.translation() + 450.0).abs() < 1e-3);
    assert_eq!(reel.velocity(), -80.0);

    // Drift keeps the wheel's direction until 700 ms pass without input.
    run_frames(&mut reel, 4, STEP);
    assert_eq!(reel.velocity(), -80.0);

    run_frames(&mut reel, 4, STEP);
    assert_eq!(reel.velocity(), 80.0);
}

#[test]
fn horizontal_wheel_wins_when_dominant() {
    let mut reel = five_card_reel(scenario_config());
    reel.wheel(200.0, -50.0);
    assert!((reel.offset_x() - 300.0).abs() < 1e-3);
    assert_eq!(reel.velocity(), 80.0);
}

/* ─────────────────── driver state machine ───────────────────────── */

#[test]
fn stop_cancels_the_pending_frame_and_is_idempotent() {
    let mut reel = five_card_reel(scenario_config());
    reel.start();
    let token = reel.pending_frame().expect("start schedules a frame");

    reel.stop();
    reel.stop();
    assert_eq!(reel.pending_frame(), None);
    assert_eq!(reel.scheduler().pending(), None);

    // The canceled frame is dead even if the host fires it anyway.
    reel.scheduler_mut().advance(STEP);
    reel.frame(token);
    assert_eq!(reel.offset_x(), 0.0);
    assert_eq!(reel.pending_frame(), None);
}

#[test]
fn stale_tokens_are_ignored_after_restart() {
    let mut reel = five_card_reel(scenario_config());
    reel.start();
    let stale = reel.pending_frame().unwrap();
    reel.stop();
    reel.start();
    let live = reel.pending_frame().unwrap();
    assert_ne!(stale, live);

    reel.scheduler_mut().advance(STEP);
    reel.frame(stale);
    assert_eq!(reel.offset_x(), 0.0);
    assert_eq!(reel.pending_frame(), Some(live));

    reel.frame(live);
    assert!(reel.offset_x() > 0.0);
}

#[test]
fn stalled_frames_are_clamped() {
    let mut reel = five_card_reel(ReelConfig::default()); // 0.04 s clamp
    reel.set_intersection(1.0);
    run_frames(&mut reel, 1, Duration::from_secs(5));
    assert!((reel.offset_x() - 80.0 * 0.04).abs() < 1e-3);
}

/* ─────────────────── degraded geometry ──────────────────────────── */

#[test]
fn probe_failure_freezes_the_strip_but_not_the_loop() {
    let mut reel = five_card_reel(scenario_config());
    reel.set_intersection(1.0);
    run_frames(&mut reel, 3, STEP);

    reel.surface_mut().fail_probes = true;
    run_frames(&mut reel, 1, STEP);
    let x = reel.offset_x();
    assert!(reel.paused(), "failed step pauses drift");
    assert!(reel.is_running(), "loop survives the failure");
    assert!(reel.pending_frame().is_some());

    run_frames(&mut reel, 10, STEP);
    assert_eq!(reel.offset_x(), x);

    // Geometry comes back; the pause holds until an interaction clears
    // it, then drift resumes. Frozen, never corrupted.
    reel.surface_mut().fail_probes = false;
    run_frames(&mut reel, 5, STEP);
    assert_eq!(reel.offset_x(), x);

    reel.set_hovered(true);
    reel.set_hovered(false);
    run_frames(&mut reel, 1, STEP);
    assert!(reel.offset_x() > x);
    assert_eq!(reel.card_ids().len(), 5);
}

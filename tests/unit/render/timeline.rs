use super::*;

fn drain(tl: &mut Timeline<&'static str>, until: f64) -> Vec<&'static str> {
    let mut out = Vec::new();
    while let Some((_, t)) = tl.pop_due(Millis(until)) {
        out.push(t);
    }
    tl.set_now(Millis(until));
    out
}

#[test]
fn tasks_run_in_due_then_schedule_order() {
    let mut tl = Timeline::new();
    tl.schedule_after(Millis(30.0), "c");
    tl.schedule_after(Millis(10.0), "a");
    tl.schedule_after(Millis(10.0), "b");
    assert_eq!(drain(&mut tl, 5.0), Vec::<&str>::new());
    assert_eq!(drain(&mut tl, 30.0), vec!["a", "b", "c"]);
    assert!(tl.is_idle());
    assert_eq!(tl.now(), Millis(30.0));
}

#[test]
fn frames_snap_to_the_next_refresh() {
    let mut tl = Timeline::new();
    tl.set_now(Millis(20.0));
    tl.request_frame("f");
    assert_eq!(tl.next_due(), Some(Millis::from_micros(2 * FRAME_INTERVAL_US)));
    let (kind, _) = tl.pop_due(Millis(100.0)).unwrap();
    assert_eq!(kind, TaskKind::Frame);
}

#[test]
fn frame_requested_on_a_boundary_waits_a_full_frame() {
    let mut tl = Timeline::new();
    tl.set_now(Millis::from_micros(FRAME_INTERVAL_US));
    tl.request_frame("f");
    assert_eq!(tl.next_due(), Some(Millis::from_micros(2 * FRAME_INTERVAL_US)));
}

#[test]
fn cancel_and_retain_remove_pending_work() {
    let mut tl = Timeline::new();
    let a = tl.schedule_after(Millis(1.0), "a");
    tl.schedule_after(Millis(2.0), "b");
    tl.schedule_after(Millis(3.0), "c");
    assert_eq!(tl.cancel(a), Some("a"));
    assert_eq!(tl.cancel(a), None);
    assert_eq!(tl.retain(|t| *t != "b"), 1);
    assert_eq!(drain(&mut tl, 10.0), vec!["c"]);
}

#[test]
fn clock_never_moves_backward() {
    let mut tl: Timeline<()> = Timeline::new();
    tl.set_now(Millis(50.0));
    tl.set_now(Millis(10.0));
    assert_eq!(tl.now(), Millis(50.0));
}

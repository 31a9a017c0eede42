use super::*;

#[test]
fn new_scheduler_has_nothing_pending() {
    let s = FrameScheduler::new();
    assert!(!s.is_pending());
    assert_eq!(s.frames_requested(), 0);
    assert_eq!(s.frames_presented(), 0);
}

#[test]
fn first_request_asks_host_for_frame() {
    let mut s = FrameScheduler::new();
    assert!(s.request());
    assert!(s.is_pending());
}

#[test]
fn requests_before_frame_coalesce() {
    let mut s = FrameScheduler::new();
    assert!(s.request());
    for _ in 0..50 {
        assert!(!s.request());
    }
    assert_eq!(s.frames_requested(), 1);
    assert!(s.take());
    assert_eq!(s.frames_presented(), 1);
}

#[test]
fn take_without_request_is_false() {
    let mut s = FrameScheduler::new();
    assert!(!s.take());
    assert_eq!(s.frames_presented(), 0);
}

#[test]
fn request_after_take_schedules_again() {
    let mut s = FrameScheduler::new();
    s.request();
    s.take();
    assert!(s.request());
    assert_eq!(s.frames_requested(), 2);
}

#[test]
fn cancel_clears_pending_without_presenting() {
    let mut s = FrameScheduler::new();
    s.request();
    s.cancel();
    assert!(!s.is_pending());
    assert!(!s.take());
    assert_eq!(s.frames_presented(), 0);
}

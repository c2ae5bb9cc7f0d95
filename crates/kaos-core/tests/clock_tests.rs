// Host-side tests for the frame loop clock.

use kaos_core::*;

#[test]
fn elapsed_is_monotonic_even_when_host_time_goes_backwards() {
    let mut clock = AnimationClock::new();
    let token = clock.subscribe();
    let stamps = [1000.0, 1016.0, 1033.0, 900.0, 1050.0, 1049.0, 1100.0];
    let mut prev = -1.0_f32;
    for &ms in &stamps {
        let ft = clock.tick(token, ms).expect("current token ticks");
        assert!(ft.elapsed_sec >= prev);
        assert!(ft.dt_sec >= 0.0);
        prev = ft.elapsed_sec;
    }
    assert!((prev - 0.1).abs() < 1e-4, "elapsed {prev}");
}

#[test]
fn first_tick_starts_at_zero_and_counts_frames() {
    let mut clock = AnimationClock::new();
    let token = clock.subscribe();
    let a = clock.tick(token, 5000.0).expect("tick");
    assert_eq!(a.elapsed_sec, 0.0);
    assert_eq!(a.frame, 0);
    let b = clock.tick(token, 5016.0).expect("tick");
    assert_eq!(b.frame, 1);
    assert!((b.dt_sec - 0.016).abs() < 1e-6);
}

#[test]
fn cancel_happens_exactly_once() {
    let mut clock = AnimationClock::new();
    let token = clock.subscribe();
    assert!(clock.cancel());
    assert!(!clock.cancel());
    assert!(clock.tick(token, 16.0).is_none());
}

#[test]
fn stale_token_does_not_run_after_resubscribe() {
    let mut clock = AnimationClock::new();
    let old = clock.subscribe();
    clock.tick(old, 0.0);
    clock.cancel();
    let fresh = clock.subscribe();
    assert!(clock.tick(old, 16.0).is_none());
    assert!(!clock.is_current(old));
    assert!(clock.tick(fresh, 16.0).is_some());
}

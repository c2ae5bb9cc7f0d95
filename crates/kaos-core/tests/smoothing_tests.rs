// Host-side tests for the smoothed scalar and the uniform bridge.

use glam::Vec2;
use kaos_core::*;

#[test]
fn smoothed_approaches_held_target_monotonically_without_overshoot() {
    for &rate in &[0.04_f32, 0.05, 0.08, 0.1, 0.15, 1.0] {
        for &(start, target) in &[(0.0_f32, 1.0_f32), (1.0, 0.0), (2.2, 2.9), (-3.0, 4.0)] {
            let mut s = Smoothed::new(start, rate);
            let mut prev_dist = (target - start).abs();
            for _ in 0..500 {
                let v = s.step(target);
                let dist = (target - v).abs();
                assert!(dist <= prev_dist, "rate {rate}: distance grew");
                if start < target {
                    assert!(v <= target, "rate {rate}: overshoot {v} > {target}");
                } else {
                    assert!(v >= target, "rate {rate}: overshoot {v} < {target}");
                }
                prev_dist = dist;
            }
        }
    }
}

#[test]
fn smoothed_ignores_non_finite_targets() {
    let mut s = Smoothed::new(0.5, 0.1);
    s.step(f32::NAN);
    s.step(f32::INFINITY);
    assert_eq!(s.value(), 0.5);
}

#[test]
fn heartbeat_terms_are_bounded() {
    let mut t = 0.0_f32;
    while t < 60.0 {
        let (hb1, hb2) = heartbeat(t);
        assert!((0.0..=1.0).contains(&hb1));
        assert!((0.0..=0.5).contains(&hb2));
        let p = pulse_scale(t);
        assert!((1.0..=1.0 + 1.5 * MESH_PULSE_SCALE).contains(&p));
        t += 0.013;
    }
}

#[test]
fn glitch_intensity_tracks_flag_within_unit_range() {
    let mut u = UniformState::new(&SmoothingRates::default());
    let mut signals = SignalState {
        glitching: true,
        ..Default::default()
    };
    let mut prev = 0.0;
    for i in 0..120 {
        let snap = u.update(i as f32 / 60.0, &signals);
        assert!(snap.glitch_intensity >= prev);
        assert!((0.0..=1.0).contains(&snap.glitch_intensity));
        prev = snap.glitch_intensity;
    }
    assert!(prev > 0.99);
    signals.glitching = false;
    for i in 120..240 {
        let snap = u.update(i as f32 / 60.0, &signals);
        assert!(snap.glitch_intensity <= prev);
        prev = snap.glitch_intensity;
    }
}

#[test]
fn mouse_uniform_is_passed_through_unsmoothed() {
    let mut u = UniformState::new(&SmoothingRates::default());
    let mut signals = SignalState::default();
    signals.pointer = PointerSignal { x: 0.7, y: -0.3 };
    let snap = u.update(0.0, &signals);
    assert_eq!(snap.mouse, Vec2::new(0.7, -0.3));
}

#[test]
fn target_rotation_follows_formula() {
    let (x, y) = target_rotation(10.0, Vec2::new(0.5, -1.0));
    assert!((y - (10.0 * 0.08 + 0.5 * 0.6)).abs() < 1e-6);
    assert!((x - ((10.0_f32 * 0.04).sin() * 0.15 - 0.4)).abs() < 1e-6);
}

#[test]
fn mesh_scale_starts_at_base_and_grows_with_progress() {
    let mut u = UniformState::new(&SmoothingRates::default());
    assert_eq!(u.snapshot().scale, MESH_BASE_SCALE);
    let mut signals = SignalState::default();
    signals.scroll.progress = 1.0;
    let mut snap = u.snapshot();
    for i in 0..400 {
        snap = u.update(i as f32 / 60.0, &signals);
    }
    assert!(snap.scale > MESH_BASE_SCALE * 1.15);
    assert!(snap.scale < MESH_BASE_SCALE * 1.2 * (1.0 + 1.5 * MESH_PULSE_SCALE));
}

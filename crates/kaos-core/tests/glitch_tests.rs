// Host-side tests for the glitch pulse state machine.

use kaos_core::*;

fn controller() -> GlitchController {
    GlitchController::new(GlitchTiming {
        timeout_ms: GLITCH_TIMEOUT_MS,
        auto_threshold: GLITCH_AUTO_THRESHOLD,
        auto_min_ms: GLITCH_AUTO_MIN_MS,
        auto_span_ms: GLITCH_AUTO_SPAN_MS,
    })
}

#[test]
fn trigger_self_terminates_at_timeout() {
    let mut g = controller();
    assert!(g.trigger(1000.0));
    assert!(!g.poll(5999.0));
    assert!(g.is_glitching());
    assert!(g.poll(6000.0));
    assert!(!g.is_glitching());
}

#[test]
fn non_finite_trigger_time_never_starts_a_glitch() {
    let mut g = controller();
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(!g.trigger(bad));
        let mut rng = ScriptedRandom::new(vec![0.99, 0.5]);
        assert!(!g.supervise(bad, &mut rng));
        assert!(!g.is_glitching());
        assert_eq!(g.remaining_ms(0.0), None);
    }
    assert_eq!(g.activations(), 0);

    // A later finite trigger still times out normally.
    assert!(g.trigger(0.0));
    assert!(g.poll(GLITCH_TIMEOUT_MS));
}

#[test]
fn engine_glitch_with_nan_time_cannot_stick() {
    let mut e = KaosEngine::new(EngineConfig::default(), 0.0).unwrap();
    assert!(!e.trigger_glitch(f64::NAN));
    for i in 0..1200 {
        e.decay_tick(i as f64 * 50.0);
    }
    assert!(!e.is_glitching());
}

#[test]
fn clear_is_idempotent_and_noop_while_idle() {
    let mut g = controller();
    assert!(!g.clear());
    assert!(g.trigger(0.0));
    assert!(g.clear());
    assert!(!g.clear());
    assert_eq!(g.phase(), GlitchPhase::Idle);
}

#[test]
fn double_trigger_yields_one_window_and_one_transition() {
    let mut g = controller();
    assert!(g.trigger(0.0));
    assert!(!g.trigger(2000.0));
    assert_eq!(g.activations(), 1);

    let mut transitions = 0;
    let mut now = 0.0;
    while now <= 8000.0 {
        if g.poll(now) {
            transitions += 1;
            assert!(now <= 5000.0 + 16.0, "second trigger extended the window");
        }
        now += 16.0;
    }
    assert_eq!(transitions, 1);
}

#[test]
fn supervisor_never_fires_below_threshold() {
    let mut g = controller();
    let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.95]);
    for i in 0..30 {
        assert!(!g.supervise(i as f64 * 3000.0, &mut rng));
    }
    assert_eq!(g.activations(), 0);
}

#[test]
fn supervisor_fires_and_quick_clears_within_hold_range() {
    let mut g = controller();
    // First draw passes the threshold, second picks the hold fraction.
    let mut rng = ScriptedRandom::new(vec![0.99, 0.5]);
    assert!(g.supervise(0.0, &mut rng));
    assert!(g.is_glitching());
    let expected = GLITCH_AUTO_MIN_MS + 0.5 * GLITCH_AUTO_SPAN_MS;
    let remaining = g.remaining_ms(0.0).unwrap_or_default();
    assert!((remaining - expected).abs() < 1e-3);
    assert!(!g.poll(expected - 1.0));
    assert!(g.poll(expected));
}

#[test]
fn supervisor_only_fires_while_idle() {
    let mut g = controller();
    assert!(g.trigger(0.0));
    let mut rng = ScriptedRandom::new(vec![0.99, 0.0]);
    assert!(!g.supervise(100.0, &mut rng));
    assert_eq!(g.activations(), 1);
}

#[test]
fn stale_quick_clear_cannot_cut_later_activation_short() {
    let mut g = controller();
    let mut rng = ScriptedRandom::new(vec![0.99, 0.0]);
    assert!(g.supervise(0.0, &mut rng));
    // Manually cleared before its scheduled 200 ms quick clear.
    assert!(g.clear());
    assert!(g.trigger(100.0));
    assert!(!g.poll(300.0), "old quick clear ended the new activation");
    assert!(g.is_glitching());
    assert!(g.poll(5100.0));
}

#[test]
fn remaining_time_never_exceeds_timeout() {
    let mut g = controller();
    assert_eq!(g.remaining_ms(0.0), None);
    g.trigger(10.0);
    let r = g.remaining_ms(10.0).unwrap_or(f64::MAX);
    assert!(r <= GLITCH_TIMEOUT_MS);
    assert_eq!(g.remaining_ms(1e9), Some(0.0));
}

// Host-side tests for the state container driving a full frame loop.

use kaos_core::*;
use rand::prelude::*;

fn engine() -> KaosEngine {
    let config = EngineConfig {
        particle_count: 64,
        surface_subdivisions: 1,
        ..Default::default()
    };
    KaosEngine::new(config, 0.0).expect("default config is valid")
}

#[test]
fn frame_runs_in_order_and_reports_chaos() {
    let mut e = engine();
    let token = e.start_loop().expect("fresh engine starts");
    let out = e.frame(token, 16.0).expect("first frame");
    assert_eq!(out.time.frame, 0);
    assert_eq!(out.uniforms.time, 0.0);
    // 50 -> 30 target at rate 0.15
    assert!((out.chaos_level - 47.0).abs() < 1e-4);
    assert_eq!(out.post.aberration_offset, ABERRATION_BASE);
}

#[test]
fn teardown_twice_equals_teardown_once() {
    let mut e = engine();
    let token = e.start_loop().expect("start");
    assert!(e.teardown());
    assert!(!e.teardown());
    assert!(e.is_torn_down());
    assert!(e.frame(token, 32.0).is_none());
    assert!(e.start_loop().is_none());
}

#[test]
fn inputs_after_teardown_are_ignored() {
    let mut e = engine();
    e.teardown();
    e.pointer_move(0.0, 0.0, 100.0, 100.0);
    e.scroll_sample(500.0, 1000.0, 10.0);
    assert!(!e.trigger_glitch(20.0));
    assert!(!e.supervisor_tick(30.0));
    assert_eq!(e.signals(), SignalState::default());
}

#[test]
fn instant_scroll_scenario() {
    let mut e = engine();
    let token = e.start_loop().expect("start");
    e.frame(token, 0.0);
    e.scroll_sample(8000.0, 8000.0, 16.0);
    assert_eq!(e.scroll_progress(), 1.0);
    assert_eq!(e.signals().scroll.speed, 1.0);

    let out = e.frame(token, 16.0).expect("frame");
    assert_eq!(out.post.aberration_offset, ABERRATION_BASE + ABERRATION_SPEED_GAIN);

    let mut now = 16.0;
    for _ in 0..44 {
        now += DECAY_INTERVAL_MS;
        e.decay_tick(now);
    }
    assert!(e.signals().scroll.speed < 0.01);
    assert_eq!(e.scroll_progress(), 1.0);
}

const DECAY_INTERVAL_MS: f64 = SCROLL_DECAY_INTERVAL_MS as f64;

#[test]
fn glitch_events_are_reported_once_per_transition() {
    let mut e = engine();
    let token = e.start_loop().expect("start");
    e.frame(token, 0.0);
    assert!(e.trigger_glitch(10.0));
    assert!(!e.trigger_glitch(20.0));
    let out = e.frame(token, 16.0).expect("frame");
    assert_eq!(out.events.as_slice(), &[EngineEvent::GlitchStarted]);
    assert!(out.signals.glitching);
    assert_eq!(out.post.aberration_offset, ABERRATION_GLITCH);

    let out = e.frame(token, 5010.0).expect("frame");
    assert_eq!(out.events.as_slice(), &[EngineEvent::GlitchEnded]);
    assert!(!e.is_glitching());

    let out = e.frame(token, 5026.0).expect("frame");
    assert!(out.events.is_empty());
}

#[test]
fn glitch_query_applies_expiry_between_ticks() {
    let mut e = engine();
    let token = e.start_loop().expect("start");
    assert!(e.trigger_glitch(0.0));
    e.decay_tick(4990.0);
    assert!(e.is_glitching_at(4999.0));
    assert!(!e.is_glitching_at(5040.0));
    assert!(!e.is_glitching());

    // The transition is reported once, on the next frame.
    let out = e.frame(token, 5050.0).expect("frame");
    assert_eq!(
        out.events.as_slice(),
        &[EngineEvent::GlitchStarted, EngineEvent::GlitchEnded]
    );
}

#[test]
fn supervisor_uses_injected_randomness() {
    let config = EngineConfig {
        particle_count: 0,
        ..Default::default()
    };
    let rng = Box::new(ScriptedRandom::new(vec![0.99, 1.0]));
    let mut e = KaosEngine::with_random(config, 0.0, rng).expect("valid");
    assert!(e.supervisor_tick(3000.0));
    assert!(e.is_glitching());
    // Longest automatic hold is just under 700 ms.
    e.decay_tick(3700.0);
    assert!(!e.is_glitching());

    let mut quiet =
        KaosEngine::with_random(EngineConfig::default(), 0.0, Box::new(ScriptedRandom::new(vec![0.2])))
            .expect("valid");
    for i in 1..50 {
        assert!(!quiet.supervisor_tick(i as f64 * 3000.0));
    }
}

#[test]
fn every_signal_stays_bounded_under_random_input() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut e = engine();
    let token = e.start_loop().expect("start");
    let mut now = 0.0_f64;
    for _ in 0..4000 {
        now += rng.gen_range(0.0..40.0);
        match rng.gen_range(0..6) {
            0 => e.pointer_move(
                rng.gen_range(-500.0..3000.0),
                rng.gen_range(-500.0..3000.0),
                rng.gen_range(0.0..2000.0),
                rng.gen_range(0.0..2000.0),
            ),
            1 => e.scroll_sample(rng.gen_range(0.0..9000.0), rng.gen_range(0.0..9000.0), now),
            2 => {
                e.trigger_glitch(now);
            }
            3 => {
                e.clear_glitch();
            }
            4 => e.decay_tick(now),
            _ => {
                e.supervisor_tick(now);
            }
        }
        let out = e.frame(token, now).expect("frame");
        let s = out.signals;
        assert!((-1.0..=1.0).contains(&s.pointer.x));
        assert!((-1.0..=1.0).contains(&s.pointer.y));
        assert!((0.0..=1.0).contains(&s.scroll.progress));
        assert!((0.0..=1.0).contains(&s.scroll.speed));
        let u = out.uniforms;
        assert!((0.0..=1.0).contains(&u.glitch_intensity));
        assert!((0.0..=1.0).contains(&u.scroll_progress));
        assert!((0.0..=1.0).contains(&u.scroll_speed));
        assert!((0.0..=100.0).contains(&out.chaos_level));
        assert!(u.scale.is_finite() && u.scale > 0.0);
    }
}

#[test]
fn invalid_config_is_rejected() {
    let config = EngineConfig {
        scroll_speed_decay: 1.5,
        ..Default::default()
    };
    assert!(matches!(
        KaosEngine::new(config, 0.0),
        Err(ConfigError::DecayOutOfRange(_))
    ));
}

#[test]
fn surface_mesh_uses_configured_subdivisions() {
    let e = engine();
    assert_eq!(e.surface_mesh().triangle_count(), 80);
    assert_eq!(e.particles().len(), 64);
}

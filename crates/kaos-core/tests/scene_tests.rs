// Host-side tests for particles, post parameters and the chaos readout.

use glam::Vec3;
use kaos_core::*;

#[test]
fn particles_fill_the_shell_with_expected_attributes() {
    let field = ParticleField::generate(2000, DEFAULT_SEED);
    assert_eq!(field.len(), 2000);
    for p in field.particles() {
        let r = Vec3::from(p.position).length();
        assert!((2.999..8.001).contains(&r), "radius {r}");
        assert!((1.0..4.0).contains(&p.size));
        assert_eq!(p.color[3], PARTICLE_OPACITY);
        assert!(p.color[..3].iter().all(|c| (-1e-6..=1.0 + 1e-6).contains(c)));
    }
}

#[test]
fn particle_generation_is_seeded() {
    let a = ParticleField::generate(100, 1);
    let b = ParticleField::generate(100, 1);
    let c = ParticleField::generate(100, 2);
    assert_eq!(a.particles(), b.particles());
    assert_ne!(a.particles(), c.particles());
    assert!(ParticleField::generate(0, 1).is_empty());
}

#[test]
fn particle_transform_follows_time_and_scroll() {
    let t = ParticleTransform::at(100.0, 1.0);
    assert!((t.rotation_y - 2.0).abs() < 1e-5);
    assert!((t.rotation_x - (1.0_f32).sin() * 0.1).abs() < 1e-6);
    assert_eq!(t.scale, 1.5);
    assert_eq!(ParticleTransform::at(0.0, 0.0).scale, 1.0);
}

#[test]
fn aberration_offset_is_base_plus_capped_speed() {
    assert_eq!(aberration_offset(false, 0.0), 0.001);
    assert_eq!(aberration_offset(true, 0.0), 0.008);
    assert!((aberration_offset(false, 0.5) - 0.0025).abs() < 1e-7);
    assert!((aberration_offset(true, 1.0) - 0.011).abs() < 1e-7);
}

#[test]
fn post_params_carry_fixed_pass_settings() {
    let p = PostParams::from_signals(&SignalState::default());
    assert_eq!(p.bloom_threshold, 0.15);
    assert_eq!(p.bloom_intensity, 2.0);
    assert_eq!(p.grain_opacity, 0.04);
    assert_eq!(p.vignette_offset, 0.1);
    assert_eq!(p.vignette_darkness, 0.7);
}

#[test]
fn vignette_blends_toward_grey_by_squared_scaled_distance() {
    let (offset, darkness) = (VIGNETTE_OFFSET, VIGNETTE_DARKNESS);
    let color = [1.0, 0.2, 0.0];
    assert_eq!(vignette_weight([0.5, 0.5], offset), 0.0);
    assert_eq!(apply_vignette(color, [0.5, 0.5], offset, darkness), color);

    // Corner: dot((0.5, 0.5) * offset) = 0.5 * offset^2.
    let w = vignette_weight([1.0, 0.0], offset);
    assert!((w - 0.5 * offset * offset).abs() < 1e-7);
    let out = apply_vignette(color, [1.0, 0.0], offset, darkness);
    for (o, c) in out.iter().zip(color) {
        assert!((o - (c + (1.0 - darkness - c) * w)).abs() < 1e-6);
    }
    // A grey at 1 - darkness is a fixed point everywhere.
    let grey = [1.0 - darkness; 3];
    assert_eq!(apply_vignette(grey, [0.0, 1.0], offset, darkness), grey);
}

#[test]
fn post_shader_uses_the_mix_vignette() {
    let src = POST_WGSL;
    assert!(src.contains("(in.uv - vec2<f32>(0.5)) * P.vignette_offset"));
    assert!(src.contains("mix(color, vec3<f32>(1.0 - P.vignette_darkness), dot(vc, vc))"));
    assert!(!src.contains("smoothstep(0.8"));
}

#[test]
fn chaos_level_converges_to_target_and_tiers() {
    let mut chaos = ChaosLevel::new(RATE_CHAOS_LEVEL);
    assert_eq!(chaos.display(), 50);
    assert_eq!(chaos.tier(), ChaosTier::Agitated);

    let idle = ScrollSignal::default();
    for _ in 0..200 {
        chaos.tick(&idle);
    }
    assert_eq!(chaos.display(), 30);
    assert_eq!(chaos.tier(), ChaosTier::Calm);

    let wild = ScrollSignal {
        progress: 1.0,
        speed: 1.0,
    };
    for _ in 0..200 {
        let l = chaos.tick(&wild);
        assert!((0.0..=100.0).contains(&l));
    }
    assert_eq!(chaos.display(), 100);
    assert_eq!(chaos.tier(), ChaosTier::Critical);
    assert_eq!(chaos_target(&wild), 100.0);
}

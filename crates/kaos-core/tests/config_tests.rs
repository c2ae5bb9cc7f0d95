// Host-side tests for engine configuration and overrides.

use kaos_core::*;

#[test]
fn default_config_is_valid_and_matches_reference_constants() {
    let c = EngineConfig::default();
    assert!(c.validate().is_ok());
    assert_eq!(c.scroll_speed_gain, 10.0);
    assert_eq!(c.scroll_speed_decay, 0.9);
    assert_eq!(c.decay_interval_ms, 50);
    assert_eq!(c.glitch_timeout_ms, 5000.0);
    assert_eq!(c.glitch_supervisor_interval_ms, 3000);
    assert_eq!(c.particle_count, 2000);
    assert_eq!(c.surface_subdivisions, 5);
}

#[test]
fn rates_must_be_in_half_open_unit_interval() {
    for bad in [0.0_f32, -0.1, 1.01, f32::NAN] {
        let mut c = EngineConfig::default();
        c.rates.scroll_progress = bad;
        assert!(
            matches!(c.validate(), Err(ConfigError::RateOutOfRange { .. })),
            "rate {bad} accepted"
        );
    }
    let mut c = EngineConfig::default();
    c.rates.chaos_level = 1.0;
    assert!(c.validate().is_ok());
}

#[test]
fn automatic_glitch_must_fit_inside_timeout() {
    let c = EngineConfig {
        glitch_timeout_ms: 600.0,
        ..Default::default()
    };
    assert!(matches!(
        c.validate(),
        Err(ConfigError::AutoGlitchOutlivesTimeout(..))
    ));
}

#[test]
fn overrides_parse_known_keys() {
    let mut c = EngineConfig::default();
    assert_eq!(c.apply_override("particles", " 800 "), Ok(true));
    assert_eq!(c.apply_override("seed", "7"), Ok(true));
    assert_eq!(c.apply_override("subdivisions", "3"), Ok(true));
    assert_eq!(c.apply_override("unknown", "1"), Ok(false));
    assert_eq!(c.particle_count, 800);
    assert_eq!(c.seed, 7);
    assert_eq!(c.surface_subdivisions, 3);
}

#[test]
fn unparsable_override_is_an_error_and_leaves_value() {
    let mut c = EngineConfig::default();
    let err = c.apply_override("particles", "lots");
    assert!(matches!(err, Err(ConfigError::Unparsable { key: "particles", .. })));
    assert_eq!(c.particle_count, PARTICLE_COUNT);
}

#[test]
fn oversized_scene_is_rejected() {
    let mut c = EngineConfig::default();
    c.particle_count = PARTICLE_MAX_COUNT + 1;
    assert!(matches!(c.validate(), Err(ConfigError::TooManyParticles { .. })));
    let mut c = EngineConfig::default();
    c.surface_subdivisions = SURFACE_MAX_SUBDIVISIONS + 1;
    assert!(matches!(c.validate(), Err(ConfigError::TooManySubdivisions { .. })));
}

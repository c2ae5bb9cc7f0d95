//! Engine configuration.
//!
//! Defaults reproduce the reference feel of the site. Front-ends may override a
//! handful of keys (see [`EngineConfig::apply_override`]) and must call
//! [`EngineConfig::validate`] before building an engine.

use crate::constants::*;
use crate::error::ConfigError;

/// Per-signal exponential smoothing rates, each in (0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingRates {
    pub glitch_intensity: f32,
    pub scroll_progress: f32,
    pub scroll_speed: f32,
    pub mesh_scale: f32,
    pub mesh_rotation: f32,
    pub chaos_level: f32,
}

impl Default for SmoothingRates {
    fn default() -> Self {
        Self {
            glitch_intensity: RATE_GLITCH_INTENSITY,
            scroll_progress: RATE_SCROLL_PROGRESS,
            scroll_speed: RATE_SCROLL_SPEED,
            mesh_scale: RATE_MESH_SCALE,
            mesh_rotation: RATE_MESH_ROTATION,
            chaos_level: RATE_CHAOS_LEVEL,
        }
    }
}

impl SmoothingRates {
    fn named(&self) -> [(&'static str, f32); 6] {
        [
            ("glitch_intensity", self.glitch_intensity),
            ("scroll_progress", self.scroll_progress),
            ("scroll_speed", self.scroll_speed),
            ("mesh_scale", self.mesh_scale),
            ("mesh_rotation", self.mesh_rotation),
            ("chaos_level", self.chaos_level),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Empirical multiplier turning px/ms into a 0..1 speed. Tuned for feel.
    pub scroll_speed_gain: f32,
    pub scroll_speed_decay: f32,
    pub decay_interval_ms: u32,
    pub glitch_timeout_ms: f64,
    pub glitch_supervisor_interval_ms: u32,
    pub glitch_auto_threshold: f32,
    pub glitch_auto_min_ms: f64,
    pub glitch_auto_span_ms: f64,
    pub rates: SmoothingRates,
    pub particle_count: usize,
    pub surface_subdivisions: u32,
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scroll_speed_gain: SCROLL_SPEED_GAIN,
            scroll_speed_decay: SCROLL_SPEED_DECAY,
            decay_interval_ms: SCROLL_DECAY_INTERVAL_MS,
            glitch_timeout_ms: GLITCH_TIMEOUT_MS,
            glitch_supervisor_interval_ms: GLITCH_SUPERVISOR_INTERVAL_MS,
            glitch_auto_threshold: GLITCH_AUTO_THRESHOLD,
            glitch_auto_min_ms: GLITCH_AUTO_MIN_MS,
            glitch_auto_span_ms: GLITCH_AUTO_SPAN_MS,
            rates: SmoothingRates::default(),
            particle_count: PARTICLE_COUNT,
            surface_subdivisions: SURFACE_SUBDIVISIONS,
            seed: DEFAULT_SEED,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.rates.named() {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::RateOutOfRange { name, value });
            }
        }
        if !(0.0..1.0).contains(&self.scroll_speed_decay) {
            return Err(ConfigError::DecayOutOfRange(self.scroll_speed_decay));
        }
        let positive: [(&'static str, f64); 5] = [
            ("scroll_speed_gain", self.scroll_speed_gain as f64),
            ("decay_interval_ms", self.decay_interval_ms as f64),
            ("glitch_timeout_ms", self.glitch_timeout_ms),
            (
                "glitch_supervisor_interval_ms",
                self.glitch_supervisor_interval_ms as f64,
            ),
            ("glitch_auto_min_ms", self.glitch_auto_min_ms),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if !(self.glitch_auto_span_ms.is_finite() && self.glitch_auto_span_ms >= 0.0) {
            return Err(ConfigError::NotPositive {
                name: "glitch_auto_span_ms",
                value: self.glitch_auto_span_ms,
            });
        }
        if !(0.0..=1.0).contains(&self.glitch_auto_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.glitch_auto_threshold));
        }
        let longest_auto = self.glitch_auto_min_ms + self.glitch_auto_span_ms;
        if longest_auto > self.glitch_timeout_ms {
            return Err(ConfigError::AutoGlitchOutlivesTimeout(
                longest_auto,
                self.glitch_timeout_ms,
            ));
        }
        if self.particle_count > PARTICLE_MAX_COUNT {
            return Err(ConfigError::TooManyParticles {
                count: self.particle_count,
                max: PARTICLE_MAX_COUNT,
            });
        }
        if self.surface_subdivisions > SURFACE_MAX_SUBDIVISIONS {
            return Err(ConfigError::TooManySubdivisions {
                level: self.surface_subdivisions,
                max: SURFACE_MAX_SUBDIVISIONS,
            });
        }
        Ok(())
    }

    /// Apply a string override such as a `data-particles="800"` attribute.
    ///
    /// Unknown keys are ignored and reported as `Ok(false)`.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<bool, ConfigError> {
        let value = value.trim();
        match key {
            "particles" => {
                self.particle_count = parse(value, "particles")?;
            }
            "seed" => {
                self.seed = parse(value, "seed")?;
            }
            "subdivisions" => {
                self.surface_subdivisions = parse(value, "subdivisions")?;
            }
            "speed-gain" => {
                self.scroll_speed_gain = parse(value, "speed-gain")?;
            }
            "glitch-timeout" => {
                self.glitch_timeout_ms = parse(value, "glitch-timeout")?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn parse<T: std::str::FromStr>(value: &str, key: &'static str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Unparsable {
        key,
        value: value.to_string(),
    })
}

use thiserror::Error;

/// Rejected [`EngineConfig`](crate::EngineConfig) values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("smoothing rate `{name}` must lie in (0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f32 },
    #[error("scroll speed decay must lie in [0, 1), got {0}")]
    DecayOutOfRange(f32),
    #[error("`{name}` must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("auto glitch threshold must lie in [0, 1], got {0}")]
    ThresholdOutOfRange(f32),
    #[error("auto glitch duration ({0} ms) must stay below the glitch timeout ({1} ms)")]
    AutoGlitchOutlivesTimeout(f64, f64),
    #[error("particle count {count} exceeds the supported maximum {max}")]
    TooManyParticles { count: usize, max: usize },
    #[error("surface subdivision level {level} exceeds the supported maximum {max}")]
    TooManySubdivisions { level: u32, max: u32 },
    #[error("invalid value for `{key}`: {value:?}")]
    Unparsable { key: &'static str, value: String },
}

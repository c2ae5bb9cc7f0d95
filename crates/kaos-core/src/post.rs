use crate::constants::*;
use crate::state::SignalState;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostParams {
    pub bloom_threshold: f32,
    pub bloom_smoothing: f32,
    pub bloom_intensity: f32,
    /// UV offset of the red/blue channels, identical on both axes.
    pub aberration_offset: f32,
    pub grain_opacity: f32,
    pub vignette_offset: f32,
    pub vignette_darkness: f32,
}

/// Aberration offset: a fixed base (larger while glitching) plus a capped
/// share of the raw scroll speed.
#[inline]
pub fn aberration_offset(glitching: bool, scroll_speed: f32) -> f32 {
    let base = if glitching {
        ABERRATION_GLITCH
    } else {
        ABERRATION_BASE
    };
    base + (scroll_speed.max(0.0) * ABERRATION_SPEED_GAIN).min(ABERRATION_SPEED_MAX)
}

/// Blend weight toward `1 - darkness` at screen position `uv` (0..1 on both
/// axes). Zero at the center, growing with squared distance scaled by `offset`.
#[inline]
pub fn vignette_weight(uv: [f32; 2], offset: f32) -> f32 {
    let x = (uv[0] - 0.5) * offset;
    let y = (uv[1] - 0.5) * offset;
    x * x + y * y
}

/// Vignette applied to one linear color.
#[inline]
pub fn apply_vignette(color: [f32; 3], uv: [f32; 2], offset: f32, darkness: f32) -> [f32; 3] {
    let w = vignette_weight(uv, offset);
    color.map(|c| c + (1.0 - darkness - c) * w)
}

impl PostParams {
    pub fn from_signals(signals: &SignalState) -> Self {
        Self {
            bloom_threshold: BLOOM_THRESHOLD,
            bloom_smoothing: BLOOM_SMOOTHING,
            bloom_intensity: BLOOM_INTENSITY,
            aberration_offset: aberration_offset(signals.glitching, signals.scroll.speed),
            grain_opacity: GRAIN_OPACITY,
            vignette_offset: VIGNETTE_OFFSET,
            vignette_darkness: VIGNETTE_DARKNESS,
        }
    }
}

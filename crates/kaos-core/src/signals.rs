//! Raw input signals and the sampler that normalizes host events into them.
//!
//! Every value produced here is bounded: pointer in [-1, 1]², scroll progress
//! and speed in [0, 1]. Degenerate inputs (zero-sized viewport, zero scroll
//! extent, NaN) never leak NaN into the state.

use crate::constants::{MIN_SAMPLE_DT_MS, ORIENTATION_NEUTRAL_BETA_DEG, ORIENTATION_RANGE_DEG};
use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSignal {
    pub x: f32,
    pub y: f32,
}

impl PointerSignal {
    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSignal {
    pub progress: f32,
    pub speed: f32,
}

#[derive(Clone, Debug)]
pub struct SignalSampler {
    pub pointer: PointerSignal,
    pub scroll: ScrollSignal,
    speed_gain: f32,
    decay: f32,
    last_scroll_y: f64,
    last_sample_ms: f64,
}

impl SignalSampler {
    /// `mount_ms` is the baseline time for the first scroll sample; the
    /// baseline position is the top of the page.
    pub fn new(speed_gain: f32, decay: f32, mount_ms: f64) -> Self {
        Self {
            pointer: PointerSignal::default(),
            scroll: ScrollSignal::default(),
            speed_gain,
            decay,
            last_scroll_y: 0.0,
            last_sample_ms: if mount_ms.is_finite() { mount_ms } else { 0.0 },
        }
    }

    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32, viewport_w: f32, viewport_h: f32) {
        self.pointer = PointerSignal {
            x: normalize_axis(client_x, viewport_w),
            y: -normalize_axis(client_y, viewport_h),
        };
    }

    /// Device tilt as a pointer substitute. `None` or non-finite angles (sensor
    /// absent or still warming up) leave the pointer untouched.
    pub fn on_orientation(&mut self, beta_deg: Option<f64>, gamma_deg: Option<f64>) {
        let (Some(beta), Some(gamma)) = (beta_deg, gamma_deg) else {
            return;
        };
        if !(beta.is_finite() && gamma.is_finite()) {
            return;
        }
        self.pointer = PointerSignal {
            x: (gamma as f32 / ORIENTATION_RANGE_DEG).clamp(-1.0, 1.0),
            y: (-(beta as f32 - ORIENTATION_NEUTRAL_BETA_DEG) / ORIENTATION_RANGE_DEG)
                .clamp(-1.0, 1.0),
        };
    }

    /// Record a scroll position. `now_ms` is any monotonic millisecond clock.
    pub fn on_scroll_sample(&mut self, scroll_y: f64, max_scroll_y: f64, now_ms: f64) {
        if !scroll_y.is_finite() {
            return;
        }
        self.scroll.progress = if max_scroll_y > 0.0 {
            ((scroll_y / max_scroll_y) as f32).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let dt = if now_ms.is_finite() {
            (now_ms - self.last_sample_ms).max(MIN_SAMPLE_DT_MS)
        } else {
            MIN_SAMPLE_DT_MS
        };
        let dy = (scroll_y - self.last_scroll_y).abs();
        self.scroll.speed = ((dy / dt) as f32 * self.speed_gain).clamp(0.0, 1.0);

        self.last_scroll_y = scroll_y;
        if now_ms.is_finite() {
            self.last_sample_ms = now_ms;
        }
    }

    /// Fixed-cadence decay so a stale burst cannot freeze `speed` above zero.
    pub fn decay_tick(&mut self) {
        self.scroll.speed *= self.decay;
    }
}

#[inline]
fn normalize_axis(pos: f32, extent: f32) -> f32 {
    if !(extent > 0.0) || !pos.is_finite() {
        return 0.0;
    }
    ((pos / extent) * 2.0 - 1.0).clamp(-1.0, 1.0)
}

//! Per-frame smoothing of raw signals into shader uniforms and mesh transform.
//!
//! Raw signals arrive in bursts from discrete events; everything here changes
//! a little every frame so nothing on screen pops.

use crate::config::SmoothingRates;
use crate::constants::*;
use crate::smoothing::Smoothed;
use crate::state::SignalState;
use glam::{Quat, Vec2};

/// The organic double beat: a sharp primary peak followed by a softer echo.
#[inline]
pub fn heartbeat(time: f32) -> (f32, f32) {
    let hb1 = ((time * HEARTBEAT_FREQ).sin() * 0.5 + 0.5).powi(4);
    let hb2 = ((time * HEARTBEAT_FREQ + HEARTBEAT_SECOND_PHASE).sin() * 0.5 + 0.5).powi(6) * 0.5;
    (hb1, hb2)
}

#[inline]
pub fn pulse_scale(time: f32) -> f32 {
    let (hb1, hb2) = heartbeat(time);
    1.0 + (hb1 + hb2) * MESH_PULSE_SCALE
}

#[inline]
pub fn target_scale(time: f32, progress: f32) -> f32 {
    MESH_BASE_SCALE * (1.0 + progress * MESH_SCROLL_SCALE) * pulse_scale(time)
}

/// Target `(x, y)` rotation in radians.
#[inline]
pub fn target_rotation(time: f32, pointer: Vec2) -> (f32, f32) {
    let x = (time * ROTATION_X_WOBBLE_FREQ).sin() * ROTATION_X_WOBBLE_AMP + pointer.y * ROTATION_X_POINTER;
    let y = time * ROTATION_Y_SPEED + pointer.x * ROTATION_Y_POINTER;
    (x, y)
}

/// Values actually uploaded for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UniformSnapshot {
    pub time: f32,
    pub glitch_intensity: f32,
    pub scroll_progress: f32,
    pub scroll_speed: f32,
    pub mouse: Vec2,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub scale: f32,
}

impl UniformSnapshot {
    pub fn mesh_rotation(&self) -> Quat {
        Quat::from_euler(glam::EulerRot::XYZ, self.rotation_x, self.rotation_y, 0.0)
    }
}

#[derive(Clone, Debug)]
pub struct UniformState {
    time: f32,
    mouse: Vec2,
    glitch_intensity: Smoothed,
    scroll_progress: Smoothed,
    scroll_speed: Smoothed,
    rotation_x: Smoothed,
    rotation_y: Smoothed,
    scale: Smoothed,
}

impl UniformState {
    pub fn new(rates: &SmoothingRates) -> Self {
        Self {
            time: 0.0,
            mouse: Vec2::ZERO,
            glitch_intensity: Smoothed::new(0.0, rates.glitch_intensity),
            scroll_progress: Smoothed::new(0.0, rates.scroll_progress),
            scroll_speed: Smoothed::new(0.0, rates.scroll_speed),
            rotation_x: Smoothed::new(0.0, rates.mesh_rotation),
            rotation_y: Smoothed::new(0.0, rates.mesh_rotation),
            scale: Smoothed::new(MESH_BASE_SCALE, rates.mesh_scale),
        }
    }

    /// Uniform update followed by the mesh transform update for one tick.
    pub fn update(&mut self, time: f32, signals: &SignalState) -> UniformSnapshot {
        self.time = time;
        self.mouse = signals.pointer.as_vec2();
        self.glitch_intensity
            .step(if signals.glitching { 1.0 } else { 0.0 });
        self.scroll_progress.step(signals.scroll.progress);
        self.scroll_speed.step(signals.scroll.speed);

        let (rx, ry) = target_rotation(time, self.mouse);
        self.rotation_x.step(rx);
        self.rotation_y.step(ry);
        // Transform scale follows the raw progress; the shader sees the heavy one.
        self.scale.step(target_scale(time, signals.scroll.progress));

        self.snapshot()
    }

    pub fn snapshot(&self) -> UniformSnapshot {
        UniformSnapshot {
            time: self.time,
            glitch_intensity: self.glitch_intensity.value(),
            scroll_progress: self.scroll_progress.value(),
            scroll_speed: self.scroll_speed.value(),
            mouse: self.mouse,
            rotation_x: self.rotation_x.value(),
            rotation_y: self.rotation_y.value(),
            scale: self.scale.value(),
        }
    }
}

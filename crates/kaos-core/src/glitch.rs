//! Timed glitch pulses.
//!
//! The controller is a two-state machine driven by explicit timestamps rather
//! than host timers, so every deadline lives inside the state it belongs to.
//! A scheduled quick-clear is stored on the activation that created it; once
//! that activation ends the deadline is gone with it and cannot cut a later
//! activation short.

use rand::rngs::StdRng;
use rand::Rng;

/// Source of uniform draws in [0, 1).
pub trait UnitRandom {
    fn next_unit(&mut self) -> f32;
}

impl UnitRandom for StdRng {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        self.gen::<f32>()
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl UnitRandom for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v.clamp(0.0, 1.0 - f32::EPSILON)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GlitchPhase {
    Idle,
    Active {
        expiry_ms: f64,
        /// Earlier deadline set by the automatic supervisor.
        quick_clear_ms: Option<f64>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlitchTiming {
    pub timeout_ms: f64,
    pub auto_threshold: f32,
    pub auto_min_ms: f64,
    pub auto_span_ms: f64,
}

#[derive(Clone, Debug)]
pub struct GlitchController {
    phase: GlitchPhase,
    timing: GlitchTiming,
    activations: u64,
}

impl GlitchController {
    pub fn new(timing: GlitchTiming) -> Self {
        Self {
            phase: GlitchPhase::Idle,
            timing,
            activations: 0,
        }
    }

    #[inline]
    pub fn phase(&self) -> GlitchPhase {
        self.phase
    }

    #[inline]
    pub fn is_glitching(&self) -> bool {
        matches!(self.phase, GlitchPhase::Active { .. })
    }

    /// Number of `Idle -> Active` transitions so far.
    pub fn activations(&self) -> u64 {
        self.activations
    }

    /// Start a glitch. Returns `false` (and changes nothing) when one is
    /// already running or `now_ms` is not a finite time.
    pub fn trigger(&mut self, now_ms: f64) -> bool {
        if self.is_glitching() || !now_ms.is_finite() {
            return false;
        }
        self.phase = GlitchPhase::Active {
            expiry_ms: now_ms + self.timing.timeout_ms,
            quick_clear_ms: None,
        };
        self.activations += 1;
        log::debug!("[glitch] active until {:.0} ms", now_ms + self.timing.timeout_ms);
        true
    }

    /// End the current glitch, if any. Returns whether anything changed.
    pub fn clear(&mut self) -> bool {
        if !self.is_glitching() {
            return false;
        }
        self.phase = GlitchPhase::Idle;
        log::debug!("[glitch] cleared");
        true
    }

    /// Apply whichever deadline has passed. Returns `true` on the call that
    /// performs the `Active -> Idle` transition.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let GlitchPhase::Active {
            expiry_ms,
            quick_clear_ms,
        } = self.phase
        else {
            return false;
        };
        let deadline = quick_clear_ms.map_or(expiry_ms, |q| q.min(expiry_ms));
        if now_ms >= deadline {
            self.phase = GlitchPhase::Idle;
            log::debug!("[glitch] expired at {:.0} ms", now_ms);
            return true;
        }
        false
    }

    /// One step of the spontaneous-glitch supervisor. Only ever fires while
    /// idle; a fired glitch carries its own short clear deadline in
    /// `[auto_min_ms, auto_min_ms + auto_span_ms)`. Callers poll first so a
    /// due expiry is observed before a new draw.
    pub fn supervise(&mut self, now_ms: f64, rng: &mut dyn UnitRandom) -> bool {
        if self.is_glitching() || !now_ms.is_finite() {
            return false;
        }
        if rng.next_unit() <= self.timing.auto_threshold {
            return false;
        }
        let hold_ms = self.timing.auto_min_ms + rng.next_unit() as f64 * self.timing.auto_span_ms;
        self.trigger(now_ms);
        if let GlitchPhase::Active { quick_clear_ms, .. } = &mut self.phase {
            *quick_clear_ms = Some(now_ms + hold_ms);
        }
        true
    }

    /// Time remaining until the glitch ends on its own, if active.
    pub fn remaining_ms(&self, now_ms: f64) -> Option<f64> {
        match self.phase {
            GlitchPhase::Idle => None,
            GlitchPhase::Active {
                expiry_ms,
                quick_clear_ms,
            } => {
                let deadline = quick_clear_ms.map_or(expiry_ms, |q| q.min(expiry_ms));
                Some((deadline - now_ms).max(0.0))
            }
        }
    }
}

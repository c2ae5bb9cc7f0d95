use crate::constants::*;
use crate::signals::ScrollSignal;
use crate::smoothing::Smoothed;

/// Coarse band of the readout, used to pick its color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChaosTier {
    Calm,
    Agitated,
    Critical,
}

impl ChaosTier {
    pub fn css_class(&self) -> &'static str {
        match self {
            ChaosTier::Calm => "chaos-calm",
            ChaosTier::Agitated => "chaos-agitated",
            ChaosTier::Critical => "chaos-critical",
        }
    }
}

/// On-screen "chaos level" percentage. Read-only consumer of scroll state;
/// nothing in the render path depends on it.
#[derive(Clone, Debug)]
pub struct ChaosLevel {
    level: Smoothed,
}

#[inline]
pub fn chaos_target(scroll: &ScrollSignal) -> f32 {
    (CHAOS_BASE + scroll.progress * CHAOS_PROGRESS_WEIGHT + scroll.speed * CHAOS_SPEED_WEIGHT)
        .clamp(0.0, 100.0)
}

impl ChaosLevel {
    pub fn new(rate: f32) -> Self {
        Self {
            level: Smoothed::new(CHAOS_INITIAL, rate),
        }
    }

    pub fn tick(&mut self, scroll: &ScrollSignal) -> f32 {
        self.level.step(chaos_target(scroll))
    }

    #[inline]
    pub fn level(&self) -> f32 {
        self.level.value()
    }

    pub fn display(&self) -> u8 {
        self.level.value().round().clamp(0.0, 100.0) as u8
    }

    pub fn tier(&self) -> ChaosTier {
        let l = self.level.value();
        if l < CHAOS_TIER_AGITATED {
            ChaosTier::Calm
        } else if l < CHAOS_TIER_CRITICAL {
            ChaosTier::Agitated
        } else {
            ChaosTier::Critical
        }
    }
}

//! The single owned frame loop clock.
//!
//! Hosts call [`AnimationClock::subscribe`] once when they start their
//! display-refresh loop and hand the returned token to the loop callback. A
//! cancelled or replaced subscription makes every older token stale, so a
//! callback that fires late after teardown or re-subscription does nothing.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the first tick, never decreasing.
    pub elapsed_sec: f32,
    /// Seconds since the previous tick of this subscription.
    pub dt_sec: f32,
    pub frame: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopToken(u64);

#[derive(Debug, Default)]
pub struct AnimationClock {
    elapsed_sec: f64,
    last_ms: Option<f64>,
    frame: u64,
    generation: u64,
    running: bool,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the loop. Invalidates any earlier token.
    pub fn subscribe(&mut self) -> LoopToken {
        self.generation += 1;
        self.running = true;
        self.last_ms = None;
        LoopToken(self.generation)
    }

    /// Stop the loop. Returns `true` only for the call that actually stopped it.
    pub fn cancel(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.generation += 1;
        true
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn is_current(&self, token: LoopToken) -> bool {
        self.running && token.0 == self.generation
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Advance using a host timestamp in milliseconds. Returns `None` for a
    /// stale token. Timestamps that go backwards contribute zero time.
    pub fn tick(&mut self, token: LoopToken, now_ms: f64) -> Option<FrameTime> {
        if !self.is_current(token) {
            return None;
        }
        let dt_sec = match self.last_ms {
            Some(last) if now_ms.is_finite() => ((now_ms - last) / 1000.0).max(0.0),
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(self.last_ms.map_or(now_ms, |last| last.max(now_ms)));
        }
        self.elapsed_sec += dt_sec;
        let frame = self.frame;
        self.frame += 1;
        Some(FrameTime {
            elapsed_sec: self.elapsed_sec as f32,
            dt_sec: dt_sec as f32,
            frame,
        })
    }
}

/// A scalar that eases toward a target by a fixed fraction every step.
///
/// `value += (target - value) * rate` with `rate` in (0, 1]. For a held target
/// the distance shrinks by `(1 - rate)` per step, so the approach is monotonic
/// and never overshoots. A rate of exactly 1 snaps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothed {
    value: f32,
    rate: f32,
}

impl Smoothed {
    pub fn new(initial: f32, rate: f32) -> Self {
        Self {
            value: initial,
            rate: rate.clamp(f32::MIN_POSITIVE, 1.0),
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Advance one step toward `target` and return the new value.
    #[inline]
    pub fn step(&mut self, target: f32) -> f32 {
        if target.is_finite() {
            self.value += (target - self.value) * self.rate;
        }
        self.value
    }
}


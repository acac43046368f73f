use crate::animation::ease::Ease;

/// One low-pass step of `current` toward `target`.
///
/// Equivalent to restarting a `duration`-long eased tween from `current` every tick and sampling
/// it `dt` seconds later. Non-positive durations snap straight to the target.
pub fn interpolate(current: f64, target: f64, dt: f64, duration: f64, ease: Ease) -> f64 {
    if duration <= 0.0 || !dt.is_finite() {
        return target;
    }
    let k = ease.apply((dt / duration).clamp(0.0, 1.0));
    current + (target - current) * k
}

/// A time-based tween from `from` to `to` over `duration` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: f64,
    elapsed: f64,
    ease: Ease,
}

impl Tween {
    /// Create a tween that has not advanced yet.
    pub fn new(from: f64, to: f64, duration: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            ease,
        }
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }

    /// Normalized progress in `[0, 1]` before easing.
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Current eased value.
    pub fn value(&self) -> f64 {
        self.from + (self.to - self.from) * self.ease.apply(self.progress())
    }

    /// `true` once the full duration has elapsed.
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Total duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

/// Infinitely repeating ping-pong tween between `from` and `to`.
///
/// Each half-cycle lasts `period` seconds; odd half-cycles run the eased curve backwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YoyoTween {
    from: f64,
    to: f64,
    period: f64,
    elapsed: f64,
    ease: Ease,
}

impl YoyoTween {
    /// Create a yoyo tween starting at `from`.
    pub fn new(from: f64, to: f64, period: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            period: period.max(f64::EPSILON),
            elapsed: 0.0,
            ease,
        }
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            // Keep `elapsed` bounded to one full cycle to avoid precision loss on long runs.
            self.elapsed = (self.elapsed + dt) % (2.0 * self.period);
        }
    }

    /// Current eased value.
    pub fn value(&self) -> f64 {
        let cycle = (self.elapsed / self.period).floor();
        let local = (self.elapsed / self.period) - cycle;
        let eased = if (cycle as u64).is_multiple_of(2) {
            self.ease.apply(local)
        } else {
            self.ease.apply(1.0 - local)
        };
        self.from + (self.to - self.from) * eased
    }

    /// Half-cycle length in seconds.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Change the half-cycle length, keeping the current position within the cycle.
    pub fn set_period(&mut self, period: f64) {
        let period = period.max(f64::EPSILON);
        self.elapsed *= period / self.period;
        self.period = period;
    }

    /// Change the easing curve.
    pub fn set_ease(&mut self, ease: Ease) {
        self.ease = ease;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;

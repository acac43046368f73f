use crate::animation::ease::Ease;
use crate::animation::tween::Tween;
use crate::foundation::math::{Rng64, dist};

/// One expanding, fading ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Raindrop {
    pub x: f64,
    pub y: f64,
    pub max_radius: f64,
    tween: Tween,
}

impl Raindrop {
    fn new(x: f64, y: f64, max_radius: f64, duration: f64, ease: Ease) -> Self {
        Self {
            x,
            y,
            max_radius,
            tween: Tween::new(0.0, 1.0, duration, ease),
        }
    }

    /// Current ring radius, `0 -> max_radius` over the drop's lifetime.
    pub fn radius(&self) -> f64 {
        self.max_radius * self.tween.value()
    }

    /// Current ring opacity, `1 -> 0` over the drop's lifetime.
    pub fn alpha(&self) -> f64 {
        1.0 - self.tween.value()
    }

    /// Lifetime in seconds.
    pub fn duration(&self) -> f64 {
        self.tween.duration()
    }

    fn is_finished(&self) -> bool {
        self.tween.is_finished()
    }
}

/// Live raindrops for the `rain` pattern.
#[derive(Clone, Debug)]
pub struct RainField {
    rng: Rng64,
    drops: Vec<Raindrop>,
}

impl RainField {
    /// Create an empty field drawing randomness from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng64::new(seed),
            drops: Vec::new(),
        }
    }

    /// Roll for one new drop on a `width x height` canvas.
    ///
    /// Spawn probability per call is `0.01 * frequency * speed / 3`. The drop's ease falls back to
    /// ease-out quadratic when `ease` is [`Ease::None`]. Returns `true` when a drop was spawned.
    pub fn maybe_spawn(
        &mut self,
        width: f64,
        height: f64,
        frequency: f64,
        speed: f64,
        ease: Ease,
    ) -> bool {
        let p = 0.01 * frequency * (speed / 3.0);
        if self.rng.next_f64_01() >= p {
            return false;
        }
        let x = self.rng.next_f64_01() * width;
        let y = self.rng.next_f64_01() * height;
        let max_radius = 100.0 + self.rng.next_f64_01() * 200.0;
        let duration = 2.0 + self.rng.next_f64_01();
        self.drops.push(Raindrop::new(
            x,
            y,
            max_radius,
            duration,
            ease.or(Ease::OutQuad),
        ));
        tracing::debug!(x, y, max_radius, duration, live = self.drops.len(), "raindrop spawned");
        true
    }

    /// Advance every drop by `dt` seconds and drop the finished ones.
    pub fn advance(&mut self, dt: f64) {
        if self.drops.is_empty() {
            return;
        }
        let before = self.drops.len();
        for drop in &mut self.drops {
            drop.tween.advance(dt);
        }
        self.drops.retain(|d| !d.is_finished());
        let removed = before - self.drops.len();
        if removed > 0 {
            tracing::debug!(removed, live = self.drops.len(), "raindrops finished");
        }
    }

    /// Remove every live drop.
    pub fn clear(&mut self) {
        self.drops.clear();
    }

    /// Live drops.
    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    /// Number of live drops.
    pub fn len(&self) -> usize {
        self.drops.len()
    }

    /// `true` when no drop is live.
    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Summed ring intensity at `(x, y)` for amplitude `amp`.
    pub fn contribution(&self, x: f64, y: f64, amp: f64) -> f64 {
        let half = (40.0 + 60.0 * amp) / 2.0;
        self.drops
            .iter()
            .map(|drop| {
                let off = (dist(x, y, drop.x, drop.y) - drop.radius()).abs();
                if off < half {
                    (1.0 - off / half) * drop.alpha() * amp * 3.0
                } else {
                    0.0
                }
            })
            .sum()
    }

    #[cfg(test)]
    pub(crate) fn push_drop(&mut self, x: f64, y: f64, max_radius: f64, duration: f64, ease: Ease) {
        self.drops.push(Raindrop::new(x, y, max_radius, duration, ease));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/particles.rs"]
mod tests;

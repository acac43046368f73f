use crate::animation::ease::Ease;
use crate::animation::tween::{YoyoTween, interpolate};
use crate::field::waveform::Pattern;
use crate::foundation::core::{Canvas, Point};
use crate::scene::state::{AnimationConfig, AutoPan};

/// Time constant of the parameter low-pass, in seconds.
pub const SMOOTHING_SECS: f64 = 0.5;

/// Time step per tick when no timing capability is available.
pub const FIXED_TIME_STEP: f64 = 0.005;

/// How animation time and parameters evolve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimingMode {
    /// Wall-clock driven: parameters eased toward their targets, time scaled by speed.
    #[default]
    Smoothed,
    /// Constant time step, raw parameters, no tweens (no breathing, no raindrops).
    Fixed,
}

/// Bounds and speed of one auto-pan axis, as smoothed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanBounds {
    pub min: f64,
    pub max: f64,
    pub speed: f64,
}

impl From<AutoPan> for PanBounds {
    fn from(p: AutoPan) -> Self {
        Self {
            min: p.min,
            max: p.max,
            speed: p.speed,
        }
    }
}

/// Low-pass mirror of the numeric animation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothedParams {
    pub amplitude: f64,
    pub frequency: f64,
    pub speed: f64,
    pub spread: f64,
    pub rotation: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub auto_pan_x: PanBounds,
    pub auto_pan_y: PanBounds,
}

impl SmoothedParams {
    /// Raw values of `anim`, unsmoothed.
    pub fn from_config(anim: &AnimationConfig) -> Self {
        Self {
            amplitude: anim.amplitude,
            frequency: anim.frequency,
            speed: anim.speed,
            spread: anim.spread,
            rotation: anim.rotation,
            center_x: anim.center_x,
            center_y: anim.center_y,
            auto_pan_x: anim.auto_pan_x.into(),
            auto_pan_y: anim.auto_pan_y.into(),
        }
    }

    fn ease_toward(&mut self, anim: &AnimationConfig, dt: f64) {
        let step =
            |cur: f64, target: f64| interpolate(cur, target, dt, SMOOTHING_SECS, Ease::OutQuad);
        let pan = |cur: PanBounds, target: AutoPan| PanBounds {
            min: step(cur.min, target.min),
            max: step(cur.max, target.max),
            speed: step(cur.speed, target.speed),
        };

        self.amplitude = step(self.amplitude, anim.amplitude);
        self.frequency = step(self.frequency, anim.frequency);
        self.speed = step(self.speed, anim.speed);
        self.spread = step(self.spread, anim.spread);
        self.rotation = step(self.rotation, anim.rotation);
        self.auto_pan_x = pan(self.auto_pan_x, anim.auto_pan_x);
        self.auto_pan_y = pan(self.auto_pan_y, anim.auto_pan_y);
        // Auto-panned axes are driven by the oscillator, not tweened.
        if !anim.auto_pan_x.enabled {
            self.center_x = step(self.center_x, anim.center_x);
        }
        if !anim.auto_pan_y.enabled {
            self.center_y = step(self.center_y, anim.center_y);
        }
    }
}

impl Default for SmoothedParams {
    fn default() -> Self {
        Self::from_config(&AnimationConfig::default())
    }
}

/// Auto-panned center fraction at `time`.
///
/// Oscillates `min -> max` as `0.5 + 0.5 * sin(4 * speed * time + phase)`.
pub fn auto_pan_center(time: f64, bounds: PanBounds, phase: f64) -> f64 {
    let osc = 0.5 + 0.5 * (time * 4.0 * bounds.speed + phase).sin();
    bounds.min + osc * (bounds.max - bounds.min)
}

/// Breath oscillator half-period for a smoothed `speed`.
pub fn breath_period(speed: f64) -> f64 {
    let speed = if speed > 0.0 && speed.is_finite() {
        speed
    } else {
        1.0
    };
    (5.0 / speed).max(0.2)
}

/// Renderer-internal animation state: elapsed time, smoothed parameters and the breath cycle.
#[derive(Clone, Debug)]
pub struct Smoother {
    mode: TimingMode,
    params: SmoothedParams,
    primed: bool,
    time: f64,
    breath: Option<YoyoTween>,
}

impl Smoother {
    /// Fresh state at time zero.
    pub fn new(mode: TimingMode) -> Self {
        Self {
            mode,
            params: SmoothedParams::default(),
            primed: false,
            time: 0.0,
            breath: None,
        }
    }

    /// Snap the smoothed parameters to `anim` if nothing has been smoothed yet.
    ///
    /// Keeps the first frames of a session from gliding in from the built-in defaults.
    pub fn prime(&mut self, anim: &AnimationConfig) {
        if !self.primed {
            self.params = SmoothedParams::from_config(anim);
            self.primed = true;
        }
    }

    /// Advance by `dt` seconds toward the targets in `anim`.
    ///
    /// Does nothing while animation is disabled.
    pub fn advance(&mut self, anim: &AnimationConfig, dt: f64) {
        if !anim.enabled {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.prime(anim);

        match self.mode {
            TimingMode::Smoothed => {
                self.params.ease_toward(anim, dt);
                self.time += self.params.speed / 1000.0;
            }
            TimingMode::Fixed => {
                self.params = SmoothedParams::from_config(anim);
                self.time += FIXED_TIME_STEP;
            }
        }

        if anim.auto_pan_x.enabled {
            self.params.center_x = auto_pan_center(self.time, self.params.auto_pan_x, 0.0);
        }
        if anim.auto_pan_y.enabled {
            let phase = if anim.auto_pan_x.enabled {
                std::f64::consts::FRAC_PI_2
            } else {
                0.0
            };
            self.params.center_y = auto_pan_center(self.time, self.params.auto_pan_y, phase);
        }

        self.advance_breath(anim, dt);
    }

    fn advance_breath(&mut self, anim: &AnimationConfig, dt: f64) {
        if anim.pattern != Pattern::Breathe || self.mode == TimingMode::Fixed {
            self.breath = None;
            return;
        }
        let period = breath_period(self.params.speed);
        let ease = anim.ease.or(Ease::InOutSine);
        let breath = self
            .breath
            .get_or_insert_with(|| YoyoTween::new(0.0, 1.0, period, ease));
        if (breath.period() - period).abs() > 1e-9 {
            breath.set_period(period);
        }
        breath.set_ease(ease);
        breath.advance(dt);
    }

    /// Timing mode this smoother was created with.
    pub fn mode(&self) -> TimingMode {
        self.mode
    }

    /// Elapsed animation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Current smoothed parameters.
    pub fn params(&self) -> &SmoothedParams {
        &self.params
    }

    /// Breath oscillator value in `[0, 1]`; 0 when not breathing.
    pub fn breath_phase(&self) -> f64 {
        self.breath.map_or(0.0, |b| b.value())
    }

    /// Field center in pixels for `canvas`.
    pub fn center_px(&self, canvas: Canvas) -> Point {
        Point::new(
            canvas.w() * self.params.center_x,
            canvas.h() * self.params.center_y,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/smoother.rs"]
mod tests;

use crate::field::noise::Perlin2;
use crate::field::particles::RainField;
use crate::foundation::core::Point;
use crate::foundation::math::dist;

/// Named modulation functions applied to the halftone field over time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Concentric waves around the center.
    Ripple,
    /// Same waveform as [`Pattern::Ripple`], kept as a separate identifier.
    #[default]
    Radial,
    /// Plane waves travelling along the rotation direction.
    Ocean,
    /// Drifting noise.
    Flow,
    /// Two ripple sources whose waves add.
    DualReverb,
    /// Two ripple sources, strongest wave wins.
    DualRipple,
    /// Uniform pulse driven by the breath oscillator.
    Breathe,
    /// Horizontal curtains bent by vertical flow.
    Aurora,
    /// Columns falling at noise-derived speeds.
    Matrix,
    /// Expanding raindrop rings.
    Rain,
    /// No modulation.
    None,
}

impl Pattern {
    /// Every pattern, in catalog order.
    pub const ALL: [Pattern; 11] = [
        Self::Ripple,
        Self::Radial,
        Self::Ocean,
        Self::Flow,
        Self::DualReverb,
        Self::DualRipple,
        Self::Breathe,
        Self::Aurora,
        Self::Matrix,
        Self::Rain,
        Self::None,
    ];

    /// Parse a pattern identifier (`"dual-reverb"`, `"rain"`, ...). Unknown identifiers yield `None`.
    pub fn parse(id: &str) -> Option<Self> {
        let p = match id.trim().to_ascii_lowercase().as_str() {
            "ripple" => Self::Ripple,
            "radial" => Self::Radial,
            "ocean" => Self::Ocean,
            "flow" => Self::Flow,
            "dual-reverb" => Self::DualReverb,
            "dual-ripple" => Self::DualRipple,
            "breathe" => Self::Breathe,
            "aurora" => Self::Aurora,
            "matrix" => Self::Matrix,
            "rain" => Self::Rain,
            "none" => Self::None,
            _ => return None,
        };
        Some(p)
    }

    /// Canonical identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::Ripple => "ripple",
            Self::Radial => "radial",
            Self::Ocean => "ocean",
            Self::Flow => "flow",
            Self::DualReverb => "dual-reverb",
            Self::DualRipple => "dual-ripple",
            Self::Breathe => "breathe",
            Self::Aurora => "aurora",
            Self::Matrix => "matrix",
            Self::Rain => "rain",
            Self::None => "none",
        }
    }
}

/// Inputs shared by every waveform for one frame.
#[derive(Clone, Copy, Debug)]
pub struct WaveContext<'a> {
    pub width: f64,
    pub height: f64,
    pub cell_size: f64,
    /// Elapsed animation time (before the `2x` waveform scaling).
    pub time: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub spread: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Field center in pixels.
    pub center: Point,
    pub breath_phase: f64,
    pub noise: &'a Perlin2,
    pub rain: &'a RainField,
}

/// Evaluate `pattern` at lattice point `(x, y)`.
pub fn modulation(pattern: Pattern, ctx: &WaveContext<'_>, x: f64, y: f64) -> f64 {
    let t = ctx.time * 2.0;
    let amp = ctx.amplitude;
    let freq = ctx.frequency;

    match pattern {
        Pattern::Ripple | Pattern::Radial => {
            let d = dist(x, y, ctx.center.x, ctx.center.y) * 0.01 * freq;
            (d - t * 5.0).sin() * amp
        }
        Pattern::Ocean => {
            let rot = ctx.rotation.to_radians();
            let proj = x * rot.cos() + y * rot.sin();
            (proj * 0.005 * freq - t * 3.0).sin() * amp
        }
        Pattern::Flow => ctx.noise.sample(x * 0.002 * freq, y * 0.002 * freq + t) * amp,
        Pattern::DualReverb => {
            let (w1, w2) = dual_waves(ctx, x, y, t * 4.0);
            (w1 + w2) * amp
        }
        Pattern::DualRipple => {
            let (w1, w2) = dual_waves(ctx, x, y, t * 5.0);
            w1.max(w2) * amp
        }
        Pattern::Breathe => (ctx.breath_phase - 0.5) * 2.0 * amp,
        Pattern::Aurora => {
            let flow = (y * 0.005 * freq + t).sin() + (y * 0.01 * freq - t * 0.5).sin();
            (x * 0.005 * freq + flow * 2.0).sin() * amp
        }
        Pattern::Matrix => {
            let col = (x / (ctx.cell_size * 4.0)).floor();
            let col_speed = (ctx.noise.sample(col, 0.0) + 2.0) * 2.0;
            (y * 0.01 * freq + t * col_speed).sin() * amp
        }
        Pattern::Rain => ctx.rain.contribution(x, y, amp),
        Pattern::None => 0.0,
    }
}

/// Sine waves from the two dual-pattern sources, both shifted by `phase`.
fn dual_waves(ctx: &WaveContext<'_>, x: f64, y: f64, phase: f64) -> (f64, f64) {
    let offset = ctx.width * 0.5 * ctx.spread;
    let cx1 = ctx.width * 0.5 - offset;
    let cx2 = ctx.width * 0.5 + offset;
    let cy = ctx.center.y;
    let d1 = dist(x, y, cx1, cy) * 0.01 * ctx.frequency;
    let d2 = dist(x, y, cx2, cy) * 0.01 * ctx.frequency;
    ((d1 - phase).sin(), (d2 - phase).sin())
}

#[cfg(test)]
#[path = "../../tests/unit/field/waveform.rs"]
mod tests;

//! Layered frame composition: background, halftone, dark overlay, border.

use crate::animation::smoother::Smoother;
use crate::field::noise::Perlin2;
use crate::field::particles::RainField;
use crate::field::sampler::{Dot, FieldParams, sample_field};
use crate::field::waveform::{Pattern, WaveContext, modulation};
use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::foundation::error::DotwaveResult;
use crate::foundation::math::dist;
use crate::render::blend::BlendMode;
use crate::render::surface::Surface;
use crate::scene::state::{
    AnimationConfig, Background, BorderConfig, ColorStop, DarkOverlayConfig, GradientKind,
    HalftoneConfig, ParameterState,
};

/// Engine-owned state a frame is drawn from.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FieldInputs<'a> {
    pub smoother: &'a Smoother,
    pub noise: &'a Perlin2,
    pub rain: &'a RainField,
}

impl FieldInputs<'_> {
    /// Sample the halftone dots for `canvas`, modulated by `pattern`.
    pub(crate) fn dots(&self, canvas: Canvas, halftone: &HalftoneConfig, pattern: Pattern) -> Vec<Dot> {
        let center = self.smoother.center_px(canvas);
        let params = FieldParams {
            width: canvas.w(),
            height: canvas.h(),
            density: halftone.density,
            min_size: halftone.min_size,
            max_size: halftone.max_size,
            size_mode: halftone.size_mode,
            opacity: halftone.opacity,
            allow_overlap: halftone.allow_overlap,
            center,
        };
        let smoothed = self.smoother.params();
        let ctx = WaveContext {
            width: params.width,
            height: params.height,
            cell_size: params.cell_size(),
            time: self.smoother.time(),
            amplitude: smoothed.amplitude,
            frequency: smoothed.frequency,
            spread: smoothed.spread,
            rotation: smoothed.rotation,
            center,
            breath_phase: self.smoother.breath_phase(),
            noise: self.noise,
            rain: self.rain,
        };
        sample_field(&params, self.noise, |x, y| modulation(pattern, &ctx, x, y))
    }
}

/// Waveform that modulates the dots; a disabled animation leaves the field unmodulated.
pub(crate) fn field_pattern(animation: &AnimationConfig) -> Pattern {
    if animation.enabled {
        animation.pattern
    } else {
        Pattern::None
    }
}

/// Clear `surface` and draw every enabled layer of `state` onto it.
pub(crate) fn compose(
    surface: &mut Surface,
    state: &ParameterState,
    inputs: FieldInputs<'_>,
) -> DotwaveResult<()> {
    let canvas = surface.canvas();
    surface.clear();

    draw_background(surface, &state.background)?;

    if state.halftone.enabled {
        let dots = inputs.dots(canvas, &state.halftone, field_pattern(&state.animation));
        draw_halftone(surface, &dots, state.halftone.blend)?;
    }
    if state.dark_overlay.enabled {
        draw_dark_overlay(surface, &state.dark_overlay)?;
    }
    if state.border.enabled {
        draw_border(surface, &state.border)?;
    }
    Ok(())
}

fn draw_background(surface: &mut Surface, background: &Background) -> DotwaveResult<()> {
    let canvas = surface.canvas();
    match background {
        Background::Flat { color } => surface.draw_layer(BlendMode::Normal, 1.0, |p| {
            p.fill_rect(Rect::new(0.0, 0.0, canvas.w(), canvas.h()), *color);
        }),
        Background::Gradient { kind, stops } => {
            let Some(ramp) = GradientRamp::new(*kind, stops) else {
                return Ok(());
            };
            let geometry = GradientGeometry::new(*kind, canvas);
            surface.shade_layer(BlendMode::Normal, 1.0, |x, y| ramp.sample(geometry.offset(x, y)))
        }
    }
}

fn draw_halftone(surface: &mut Surface, dots: &[Dot], blend: BlendMode) -> DotwaveResult<()> {
    surface.draw_layer(blend, 1.0, |p| {
        for dot in dots {
            let a = (dot.alpha * 255.0).round() as u8;
            p.fill_circle(
                Point::new(dot.x, dot.y),
                dot.radius,
                Rgba8 {
                    r: dot.gray,
                    g: dot.gray,
                    b: dot.gray,
                    a,
                },
            );
        }
    })
}

fn draw_dark_overlay(surface: &mut Surface, config: &DarkOverlayConfig) -> DotwaveResult<()> {
    let canvas = surface.canvas();
    let edges = config.active_edges();
    let intensity = config.intensity.clamp(0.0, 1.0);
    let fade_v = canvas.h() * config.fade_height;
    let fade_h = canvas.w() * config.fade_height;
    let (w, h) = (canvas.w(), canvas.h());

    // Each edge ramps black from `intensity` at the edge to 0 at `fade` pixels inward.
    let ramp = |d: f64, fade: f64| {
        if fade > 0.0 && d < fade {
            intensity * (1.0 - d / fade)
        } else {
            0.0
        }
    };

    surface.shade_layer(config.blend, 1.0, |x, y| {
        let mut clear = 1.0;
        if edges.top {
            clear *= 1.0 - ramp(y, fade_v);
        }
        if edges.bottom {
            clear *= 1.0 - ramp(h - y, fade_v);
        }
        if edges.left {
            clear *= 1.0 - ramp(x, fade_h);
        }
        if edges.right {
            clear *= 1.0 - ramp(w - x, fade_h);
        }
        let a = ((1.0 - clear) * 255.0).round().clamp(0.0, 255.0) as u8;
        [0, 0, 0, a]
    })
}

fn draw_border(surface: &mut Surface, config: &BorderConfig) -> DotwaveResult<()> {
    let t = config.thickness;
    if !(t > 0.0) {
        return Ok(());
    }
    let canvas = surface.canvas();
    let inset = t / 2.0;
    let rect = Rect::new(inset, inset, canvas.w() - inset, canvas.h() - inset);
    surface.draw_layer(config.blend, config.opacity, |p| {
        p.stroke_rect(rect, t, config.color);
    })
}

/// Maps a pixel center to a gradient offset for one gradient geometry.
#[derive(Clone, Copy, Debug)]
enum GradientGeometry {
    Vertical { h: f64 },
    Radial { center: Point, radius: f64 },
    Conic { center: Point },
    Diagonal { w: f64, h: f64 },
}

impl GradientGeometry {
    fn new(kind: GradientKind, canvas: Canvas) -> Self {
        let (w, h) = (canvas.w(), canvas.h());
        let center = Point::new(w / 2.0, h / 2.0);
        match kind {
            GradientKind::Linear | GradientKind::Reflected => Self::Vertical { h },
            GradientKind::Radial => Self::Radial {
                center,
                radius: w.max(h) * 0.6,
            },
            GradientKind::Conic => Self::Conic { center },
            GradientKind::Diagonal => Self::Diagonal { w, h },
        }
    }

    fn offset(self, x: f64, y: f64) -> f64 {
        match self {
            Self::Vertical { h } => y / h,
            Self::Radial { center, radius } => dist(x, y, center.x, center.y) / radius,
            Self::Conic { center } => {
                // Start pointing up and sweep clockwise (y grows downward).
                let a = (y - center.y).atan2(x - center.x) + std::f64::consts::FRAC_PI_2;
                a.rem_euclid(std::f64::consts::TAU) / std::f64::consts::TAU
            }
            Self::Diagonal { w, h } => (x * w + y * h) / (w * w + h * h),
        }
    }
}

/// Sorted color stops with pad extension at both ends.
#[derive(Clone, Debug)]
pub(crate) struct GradientRamp {
    /// `(offset in [0, 1], straight RGBA in [0, 255])`.
    stops: Vec<(f64, [f64; 4])>,
}

impl GradientRamp {
    /// Build the ramp for `kind`. Returns `None` without stops.
    pub(crate) fn new(kind: GradientKind, stops: &[ColorStop]) -> Option<Self> {
        if stops.is_empty() {
            return None;
        }
        let channels = |c: Rgba8| [c.r, c.g, c.b, c.a].map(f64::from);
        let pos = |s: &ColorStop| {
            if s.position.is_finite() {
                s.position.clamp(0.0, 100.0)
            } else {
                0.0
            }
        };

        let mut out: Vec<(f64, [f64; 4])> = match kind {
            GradientKind::Reflected => {
                let mut sorted: Vec<&ColorStop> = stops.iter().collect();
                sorted.sort_by(|a, b| pos(a).total_cmp(&pos(b)));
                let upper = sorted
                    .iter()
                    .map(|s| (0.5 - pos(s) / 200.0, channels(s.color)));
                let lower = sorted
                    .iter()
                    .map(|s| (0.5 + pos(s) / 200.0, channels(s.color)));
                upper.chain(lower).collect()
            }
            _ => stops
                .iter()
                .map(|s| (pos(s) / 100.0, channels(s.color)))
                .collect(),
        };
        // Stable: stops sharing an offset keep insertion order.
        out.sort_by(|a, b| a.0.total_cmp(&b.0));
        Some(Self { stops: out })
    }

    /// Premultiplied RGBA8 at offset `t`.
    pub(crate) fn sample(&self, t: f64) -> [u8; 4] {
        let straight = self.straight_at(t);
        let [r, g, b, a] = straight.map(|c| c.round().clamp(0.0, 255.0) as u8);
        Rgba8 { r, g, b, a }.to_premul().to_array()
    }

    fn straight_at(&self, t: f64) -> [f64; 4] {
        let t = if t.is_finite() { t } else { 0.0 };
        let next = self.stops.partition_point(|(o, _)| *o <= t);
        match (next.checked_sub(1).map(|i| self.stops[i]), self.stops.get(next)) {
            (None, Some((_, c))) => *c,
            (Some((_, c)), None) => c,
            (Some((o0, c0)), Some((o1, c1))) => {
                let span = o1 - o0;
                let k = if span > 0.0 { (t - o0) / span } else { 1.0 };
                std::array::from_fn(|i| c0[i] + (c1[i] - c0[i]) * k)
            }
            (None, None) => [0.0; 4],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;

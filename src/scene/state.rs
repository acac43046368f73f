use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::ease::Ease;
use crate::field::sampler::SizeMode;
use crate::field::waveform::Pattern;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{DotwaveError, DotwaveResult};
use crate::render::blend::BlendMode;
use crate::scene::color::{ColorDef, hex_rgba8};
use crate::scene::model::{
    AnimationDef, BorderDef, ColorStopDef, DarkOverlayDef, DimensionDef, GradientDef, HalftoneDef,
    ParameterStateDef,
};
use crate::scene::presets;

/// Gradient geometry for the background layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GradientKind {
    /// Vertical, top to bottom.
    #[default]
    Linear,
    /// Centered, radius `0.6 * max(w, h)`.
    Radial,
    /// Sweep around the center starting straight up, clockwise.
    Conic,
    /// Vertical and mirrored around the horizontal midline.
    Reflected,
    /// Corner to corner, `(0,0)` to `(w,h)`.
    Diagonal,
}

impl GradientKind {
    /// Parse a gradient type. Unknown names map to [`GradientKind::Diagonal`].
    pub fn parse(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "linear" => Self::Linear,
            "radial" => Self::Radial,
            "angle" | "conic" => Self::Conic,
            "reflected" => Self::Reflected,
            _ => Self::Diagonal,
        }
    }
}

/// One gradient stop; `position` is a percentage in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub color: Rgba8,
    pub position: f64,
}

impl ColorStop {
    /// Stop at `position` percent.
    pub fn new(color: Rgba8, position: f64) -> Self {
        Self { color, position }
    }
}

/// Background layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    Flat { color: Rgba8 },
    Gradient { kind: GradientKind, stops: Vec<ColorStop> },
}

/// Sinusoidal auto-pan of one center axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoPan {
    pub enabled: bool,
    pub min: f64,
    pub max: f64,
    pub speed: f64,
}

impl Default for AutoPan {
    fn default() -> Self {
        Self {
            enabled: false,
            min: 0.0,
            max: 1.0,
            speed: 1.0,
        }
    }
}

/// Animation parameters; the numeric fields are smoothed by the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
    pub enabled: bool,
    pub pattern: Pattern,
    pub speed: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub spread: f64,
    /// Degrees.
    pub rotation: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub auto_pan_x: AutoPan,
    pub auto_pan_y: AutoPan,
    pub ease: Ease,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pattern: Pattern::Radial,
            speed: 3.0,
            amplitude: 0.3,
            frequency: 1.0,
            spread: 0.5,
            rotation: 0.0,
            center_x: 0.5,
            center_y: 0.5,
            auto_pan_x: AutoPan::default(),
            auto_pan_y: AutoPan::default(),
            ease: Ease::None,
        }
    }
}

/// Halftone layer parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalftoneConfig {
    pub enabled: bool,
    pub density: u32,
    pub min_size: f64,
    /// `None` derives the maximum from the cell size.
    pub max_size: Option<f64>,
    pub size_mode: SizeMode,
    pub opacity: f64,
    pub blend: BlendMode,
    pub allow_overlap: bool,
}

impl Default for HalftoneConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            density: 100,
            min_size: 2.0,
            max_size: Some(15.0),
            size_mode: SizeMode::Radial,
            opacity: 0.9,
            blend: BlendMode::Overlay,
            allow_overlap: false,
        }
    }
}

/// Which canvas edges get a dark fade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayEdges {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

/// Dark edge-fade overlay parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DarkOverlayConfig {
    pub enabled: bool,
    pub intensity: f64,
    /// Fade extent as a fraction of the faded axis.
    pub fade_height: f64,
    pub blend: BlendMode,
    /// `None` is the legacy configuration: top edge only.
    pub edges: Option<OverlayEdges>,
}

impl DarkOverlayConfig {
    /// Edges that are actually drawn.
    pub fn active_edges(&self) -> OverlayEdges {
        self.edges.unwrap_or(OverlayEdges {
            top: true,
            ..OverlayEdges::default()
        })
    }
}

impl Default for DarkOverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            intensity: 0.85,
            fade_height: 0.45,
            blend: BlendMode::SoftLight,
            edges: Some(OverlayEdges {
                top: true,
                ..OverlayEdges::default()
            }),
        }
    }
}

/// Border ring parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderConfig {
    pub enabled: bool,
    pub thickness: f64,
    pub color: Rgba8,
    pub blend: BlendMode,
    pub opacity: f64,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            thickness: 40.0,
            color: hex_rgba8(presets::MOLTEN_ORANGE),
            blend: BlendMode::Normal,
            opacity: 1.0,
        }
    }
}

/// Complete, normalized parameter state driving one render.
///
/// Owned by the caller and passed by reference into every engine call.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterState {
    pub canvas: Canvas,
    pub background: Background,
    pub animation: AnimationConfig,
    pub halftone: HalftoneConfig,
    pub dark_overlay: DarkOverlayConfig,
    pub border: BorderConfig,
}

impl Default for ParameterState {
    fn default() -> Self {
        Self {
            canvas: default_canvas(),
            background: Background::Gradient {
                kind: GradientKind::Linear,
                stops: default_gradient_stops(),
            },
            animation: AnimationConfig::default(),
            halftone: HalftoneConfig::default(),
            dark_overlay: DarkOverlayConfig::default(),
            border: BorderConfig::default(),
        }
    }
}

fn default_canvas() -> Canvas {
    presets::dimension("landscape4K")
        .map(|d| d.canvas())
        .unwrap_or(Canvas {
            width: 3840,
            height: 2160,
        })
}

fn default_gradient_stops() -> Vec<ColorStop> {
    presets::GRADIENT_PRESETS[0].stops()
}

fn default_flat_color() -> Rgba8 {
    hex_rgba8(presets::MARITIME_TEAL)
}

impl ParameterState {
    /// Parse a parameter state from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> DotwaveResult<Self> {
        let def: ParameterStateDef = serde_json::from_reader(r)
            .map_err(|e| DotwaveError::validation(format!("parse parameter state JSON: {e}")))?;
        Ok(Self::from_def(def))
    }

    /// Parse a parameter state from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> DotwaveResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            DotwaveError::validation(format!(
                "open parameter state JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse a parameter state from a JSON string.
    pub fn from_json_str(s: &str) -> DotwaveResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Normalize a boundary object, substituting defaults for every missing or invalid field.
    pub(crate) fn from_def(def: ParameterStateDef) -> Self {
        let d = Self::default();
        let mut state = Self {
            canvas: canvas_from_def(def.dimension.as_ref(), d.canvas),
            background: background_from_def(
                def.background_mode.as_deref(),
                def.flat_color,
                def.gradient.as_ref(),
            ),
            animation: def
                .animation
                .as_ref()
                .map_or(d.animation, |a| animation_from_def(a, d.animation)),
            halftone: def
                .halftone1
                .as_ref()
                .map_or(d.halftone, |h| halftone_from_def(h, d.halftone)),
            dark_overlay: def
                .dark_overlay
                .as_ref()
                .map_or(d.dark_overlay, |o| dark_overlay_from_def(o, d.dark_overlay)),
            border: def
                .border
                .as_ref()
                .map_or(d.border, |b| border_from_def(b, d.border)),
        };
        // Keep cells at least one pixel wide.
        if state.halftone.density > state.canvas.width {
            tracing::debug!(
                target: "dotwave::config",
                density = state.halftone.density,
                width = state.canvas.width,
                "density exceeds canvas width, clamping"
            );
            state.halftone.density = state.canvas.width;
        }
        state
    }
}

fn canvas_from_def(def: Option<&DimensionDef>, fallback: Canvas) -> Canvas {
    let Some(def) = def else {
        return fallback;
    };
    let base = match def.preset.as_deref() {
        Some(name) => presets::dimension(name).map_or(fallback, |p| p.canvas()),
        None => fallback,
    };
    let edge = |v: Option<f64>, default: u32| -> u32 {
        match v {
            Some(v) if v.is_finite() => v.round().max(1.0).min(f64::from(u32::MAX)) as u32,
            Some(_) => default,
            None => default,
        }
    };
    let width = edge(def.width, base.width);
    let height = edge(def.height, base.height);
    let canvas = Canvas::clamped(width, height);
    if canvas.width != width || canvas.height != height {
        tracing::warn!(
            requested_width = width,
            requested_height = height,
            width = canvas.width,
            height = canvas.height,
            "canvas size clamped"
        );
    }
    canvas
}

fn color_or(c: Option<ColorDef>, default: Rgba8, field: &str) -> Rgba8 {
    match c {
        Some(c) => c.to_rgba8(),
        None => {
            tracing::debug!(target: "dotwave::config", field, "using default color");
            default
        }
    }
}

fn background_from_def(
    mode: Option<&str>,
    flat_color: Option<ColorDef>,
    gradient: Option<&GradientDef>,
) -> Background {
    let flat = mode.is_some_and(|m| m.trim().eq_ignore_ascii_case("flat"));
    if flat {
        return Background::Flat {
            color: color_or(flat_color, default_flat_color(), "flatColor"),
        };
    }

    let kind = gradient
        .and_then(|g| g.kind.as_deref())
        .map_or(GradientKind::Linear, GradientKind::parse);
    let stops = gradient
        .and_then(|g| g.colors.as_deref())
        .map_or_else(default_gradient_stops, stops_from_def);
    Background::Gradient { kind, stops }
}

fn stops_from_def(defs: &[ColorStopDef]) -> Vec<ColorStop> {
    defs.iter()
        .filter_map(|s| {
            let Some(color) = s.color else {
                tracing::debug!(target: "dotwave::config", "dropping gradient stop without a color");
                return None;
            };
            let position = s.position.filter(|p| p.is_finite()).unwrap_or(0.0);
            Some(ColorStop::new(color.to_rgba8(), position))
        })
        .collect()
}

fn num(v: Option<f64>, default: f64) -> f64 {
    v.filter(|v| v.is_finite()).unwrap_or(default)
}

fn frac(v: Option<f64>, default: f64) -> f64 {
    num(v, default).clamp(0.0, 1.0)
}

fn auto_pan(
    enabled: Option<bool>,
    min: Option<f64>,
    max: Option<f64>,
    speed: Option<f64>,
    d: AutoPan,
) -> AutoPan {
    AutoPan {
        enabled: enabled.unwrap_or(d.enabled),
        min: frac(min, d.min),
        max: frac(max, d.max),
        speed: num(speed, d.speed),
    }
}

fn animation_from_def(def: &AnimationDef, d: AnimationConfig) -> AnimationConfig {
    let pattern = match def.pattern.as_deref() {
        Some(id) => Pattern::parse(id).unwrap_or_else(|| {
            tracing::debug!(target: "dotwave::config", pattern = id, "unknown pattern, using none");
            Pattern::None
        }),
        None => d.pattern,
    };
    let ease = match def.ease.as_deref() {
        Some(id) => Ease::parse(id).unwrap_or_else(|| {
            tracing::debug!(target: "dotwave::config", ease = id, "unknown ease, using none");
            Ease::None
        }),
        None => d.ease,
    };

    AnimationConfig {
        enabled: def.enabled.unwrap_or(d.enabled),
        pattern,
        speed: num(def.speed, d.speed).max(0.0),
        amplitude: num(def.amplitude, d.amplitude),
        frequency: num(def.frequency, d.frequency),
        spread: frac(def.spread, d.spread),
        rotation: num(def.rotation, d.rotation),
        center_x: frac(def.center_x, d.center_x),
        center_y: frac(def.center_y, d.center_y),
        auto_pan_x: auto_pan(
            def.auto_pan_x,
            def.auto_pan_x_min,
            def.auto_pan_x_max,
            def.auto_pan_x_speed,
            d.auto_pan_x,
        ),
        auto_pan_y: auto_pan(
            def.auto_pan_y,
            def.auto_pan_y_min,
            def.auto_pan_y_max,
            def.auto_pan_y_speed,
            d.auto_pan_y,
        ),
        ease,
    }
}

fn blend_or(id: Option<&str>, default: BlendMode) -> BlendMode {
    match id {
        Some(id) => BlendMode::parse(id).unwrap_or_else(|| {
            tracing::debug!(target: "dotwave::config", blend = id, "unknown blend mode, using normal");
            BlendMode::Normal
        }),
        None => default,
    }
}

fn halftone_from_def(def: &HalftoneDef, d: HalftoneConfig) -> HalftoneConfig {
    let density = match def.density {
        Some(v) if v.is_finite() && v.round() >= 1.0 => v.round().min(f64::from(u32::MAX)) as u32,
        Some(_) => 30,
        None => d.density,
    };
    let mut min_size = num(def.min_size, d.min_size).max(0.0);
    let mut max_size = match def.max_size {
        Some(v) if v.is_finite() && v > 0.0 => Some(v),
        Some(_) => None,
        None => d.max_size,
    };
    if let Some(max) = max_size
        && min_size > max
    {
        max_size = Some(min_size);
        min_size = max;
    }
    let size_mode = match def.size_mode.as_deref() {
        Some(id) => SizeMode::parse(id).unwrap_or_else(|| {
            tracing::debug!(target: "dotwave::config", size_mode = id, "unknown size mode, using uniform");
            SizeMode::Uniform
        }),
        None => d.size_mode,
    };

    HalftoneConfig {
        enabled: def.enabled.unwrap_or(d.enabled),
        density,
        min_size,
        max_size,
        size_mode,
        opacity: frac(def.opacity, d.opacity),
        blend: blend_or(def.blend_mode.as_deref(), d.blend),
        allow_overlap: def.allow_overlap.unwrap_or(d.allow_overlap),
    }
}

fn dark_overlay_from_def(def: &DarkOverlayDef, d: DarkOverlayConfig) -> DarkOverlayConfig {
    let any_edge =
        def.top.is_some() || def.bottom.is_some() || def.left.is_some() || def.right.is_some();
    let edges = any_edge.then(|| OverlayEdges {
        top: def.top.unwrap_or(true),
        bottom: def.bottom.unwrap_or(false),
        left: def.left.unwrap_or(false),
        right: def.right.unwrap_or(false),
    });

    DarkOverlayConfig {
        enabled: def.enabled.unwrap_or(d.enabled),
        intensity: frac(def.intensity, d.intensity),
        fade_height: frac(def.fade_height, d.fade_height),
        blend: blend_or(def.blend_mode.as_deref(), d.blend),
        edges,
    }
}

fn border_from_def(def: &BorderDef, d: BorderConfig) -> BorderConfig {
    BorderConfig {
        enabled: def.enabled.unwrap_or(d.enabled),
        thickness: num(def.thickness, d.thickness).max(0.0),
        color: color_or(def.color, d.color, "border.color"),
        blend: blend_or(def.blend_mode.as_deref(), d.blend),
        opacity: frac(def.opacity, d.opacity),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/state.rs"]
mod tests;

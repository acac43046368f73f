//! Built-in palettes, canvas sizes, gradients and animation settings.

use crate::animation::ease::Ease;
use crate::field::waveform::Pattern;
use crate::foundation::core::Canvas;
use crate::scene::color::hex_rgba8;
use crate::scene::state::{AnimationConfig, Background, ColorStop, GradientKind, ParameterState};

pub(crate) const MARITIME_TEAL: &str = "#025467";
pub(crate) const MIDNIGHT_BLUE: &str = "#001341";
pub(crate) const OCEAN_BLUE: &str = "#03488D";
pub(crate) const SWISS_CRIMSON: &str = "#AA2424";
pub(crate) const MOLTEN_ORANGE: &str = "#C95627";
pub(crate) const DEPTH_ORANGE: &str = "#843602";
pub(crate) const MIDNIGHT_CRIMSON: &str = "#350707";
pub(crate) const DEPTH_TEAL: &str = "#003041";

/// Named brand colors as `(group, name, hex)`.
pub const BRAND_COLORS: &[(&str, &str, &str)] = &[
    ("primary", "maritimeTeal", MARITIME_TEAL),
    ("primary", "oceanBlue", OCEAN_BLUE),
    ("primary", "lightTeal", "#00AFD8"),
    ("primary", "skyBlue", "#4BB4FF"),
    ("primary", "lightBlue", "#0586E3"),
    ("primary", "depthBlue", "#01246D"),
    ("primary", "midnightBlue", MIDNIGHT_BLUE),
    ("warm", "swissCrimson", SWISS_CRIMSON),
    ("warm", "moltenOrange", MOLTEN_ORANGE),
    ("warm", "sunshine", "#FFBA08"),
    ("warm", "brightRed", "#FD0F16"),
    ("warm", "depthOrange", DEPTH_ORANGE),
    ("warm", "burntOrange", "#4B1A00"),
    ("warm", "depthCrimson", "#681213"),
    ("warm", "midnightCrimson", MIDNIGHT_CRIMSON),
    ("dark", "depthTeal", DEPTH_TEAL),
    ("dark", "twilightTeal", "#014F58"),
    ("dark", "black", "#000000"),
    ("neutral", "white", "#FFFFFF"),
];

/// Look up a brand color hex string by name.
pub fn brand_color(name: &str) -> Option<&'static str> {
    BRAND_COLORS
        .iter()
        .find(|(_, n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, _, hex)| *hex)
}

/// Canvas size preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimensionPreset {
    pub id: &'static str,
    pub width: u32,
    pub height: u32,
    pub label: &'static str,
}

impl DimensionPreset {
    /// Canvas of this preset.
    pub fn canvas(&self) -> Canvas {
        Canvas::clamped(self.width, self.height)
    }

    /// Switch `state` to this size, scaling halftone sizes and border thickness with the width.
    pub fn apply(&self, state: &mut ParameterState) {
        let old_width = state.canvas.w();
        state.canvas = self.canvas();
        let k = state.canvas.w() / old_width;

        let h = &mut state.halftone;
        h.density = (f64::from(h.density) * k).round().max(1.0) as u32;
        h.min_size = (h.min_size * k).round();
        h.max_size = h.max_size.map(|m| (m * k).round());
        state.border.thickness = (state.border.thickness * k).round();
    }
}

/// Social-media and print canvas sizes.
pub const DIMENSIONS: &[DimensionPreset] = &[
    DimensionPreset {
        id: "square",
        width: 1080,
        height: 1080,
        label: "Instagram Square (1080x1080)",
    },
    DimensionPreset {
        id: "squareLarge",
        width: 1920,
        height: 1920,
        label: "Instagram Square Large (1920x1920)",
    },
    DimensionPreset {
        id: "portrait",
        width: 1080,
        height: 1350,
        label: "Instagram Portrait (1080x1350)",
    },
    DimensionPreset {
        id: "story",
        width: 1080,
        height: 1920,
        label: "Instagram Story/Reel (1080x1920)",
    },
    DimensionPreset {
        id: "fbSquare",
        width: 1200,
        height: 1200,
        label: "Facebook Square (1200x1200)",
    },
    DimensionPreset {
        id: "squareHD",
        width: 1280,
        height: 1280,
        label: "Square HD (1280x1280)",
    },
    DimensionPreset {
        id: "square2K",
        width: 2048,
        height: 2048,
        label: "Square 2K (2048x2048)",
    },
    DimensionPreset {
        id: "squareStd",
        width: 1024,
        height: 1024,
        label: "Square Standard (1024x1024)",
    },
    DimensionPreset {
        id: "landscape4K",
        width: 3840,
        height: 2160,
        label: "4K Landscape (3840x2160)",
    },
    DimensionPreset {
        id: "portrait4K",
        width: 2160,
        height: 3840,
        label: "4K Portrait (2160x3840)",
    },
];

/// Look up a canvas preset by id (case-insensitive).
pub fn dimension(id: &str) -> Option<&'static DimensionPreset> {
    DIMENSIONS.iter().find(|d| d.id.eq_ignore_ascii_case(id))
}

/// Named two-stop background gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientPreset {
    pub name: &'static str,
    /// `(hex, position percent)` pairs.
    pub stops: &'static [(&'static str, f64)],
}

impl GradientPreset {
    /// Stops as colors.
    pub fn stops(&self) -> Vec<ColorStop> {
        self.stops
            .iter()
            .map(|(hex, pos)| ColorStop::new(hex_rgba8(hex), *pos))
            .collect()
    }

    /// Use this gradient as the background; the border takes the first stop's color.
    ///
    /// A gradient background keeps its geometry, a flat one becomes a linear gradient.
    pub fn apply(&self, state: &mut ParameterState) {
        let kind = match &state.background {
            Background::Gradient { kind, .. } => *kind,
            Background::Flat { .. } => GradientKind::Linear,
        };
        let stops = self.stops();
        if let Some(first) = stops.first() {
            state.border.color = first.color;
        }
        state.background = Background::Gradient { kind, stops };
    }
}

/// Built-in gradients; the first one is the default background.
pub const GRADIENT_PRESETS: &[GradientPreset] = &[
    GradientPreset {
        name: "Midnight Depth",
        stops: &[(MIDNIGHT_BLUE, 0.0), (DEPTH_TEAL, 100.0)],
    },
    GradientPreset {
        name: "Crimson Gradient",
        stops: &[(SWISS_CRIMSON, 0.0), (MIDNIGHT_CRIMSON, 100.0)],
    },
    GradientPreset {
        name: "Orange Gradient",
        stops: &[(MOLTEN_ORANGE, 0.0), (DEPTH_ORANGE, 100.0)],
    },
    GradientPreset {
        name: "Teal Gradient",
        stops: &[(MARITIME_TEAL, 0.0), (DEPTH_TEAL, 100.0)],
    },
    GradientPreset {
        name: "Blue Gradient",
        stops: &[(OCEAN_BLUE, 0.0), (MIDNIGHT_BLUE, 100.0)],
    },
];

/// Look up a gradient preset by name, ignoring case, spaces and dashes.
pub fn gradient_preset(name: &str) -> Option<&'static GradientPreset> {
    let key = lookup_key(name);
    GRADIENT_PRESETS.iter().find(|g| lookup_key(g.name) == key)
}

/// Named animation settings.
///
/// Applying a preset overwrites the animation fields it lists. Auto-pan bounds are only touched
/// when the preset carries its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationPreset {
    pub name: &'static str,
    pub pattern: Pattern,
    pub speed: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub spread: f64,
    pub rotation: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub auto_pan_x: bool,
    /// `(min, max, speed)`.
    pub auto_pan_x_range: Option<(f64, f64, f64)>,
    pub auto_pan_y: bool,
    pub ease: Ease,
}

impl AnimationPreset {
    /// Overwrite the listed fields of `anim`.
    pub fn apply(&self, anim: &mut AnimationConfig) {
        anim.pattern = self.pattern;
        anim.speed = self.speed;
        anim.amplitude = self.amplitude;
        anim.frequency = self.frequency;
        anim.spread = self.spread;
        anim.rotation = self.rotation;
        anim.center_x = self.center_x;
        anim.center_y = self.center_y;
        anim.auto_pan_x.enabled = self.auto_pan_x;
        if let Some((min, max, speed)) = self.auto_pan_x_range {
            anim.auto_pan_x.min = min;
            anim.auto_pan_x.max = max;
            anim.auto_pan_x.speed = speed;
        }
        anim.auto_pan_y.enabled = self.auto_pan_y;
        anim.ease = self.ease;
    }
}

const fn anim_preset(
    name: &'static str,
    pattern: Pattern,
    speed: f64,
    amplitude: f64,
    frequency: f64,
    spread: f64,
    ease: Ease,
) -> AnimationPreset {
    AnimationPreset {
        name,
        pattern,
        speed,
        amplitude,
        frequency,
        spread,
        rotation: 0.0,
        center_x: 0.5,
        center_y: 0.5,
        auto_pan_x: false,
        auto_pan_x_range: None,
        auto_pan_y: false,
        ease,
    }
}

/// Built-in animation presets.
pub const ANIMATION_PRESETS: &[AnimationPreset] = &[
    anim_preset("Calm Ripple", Pattern::Ripple, 2.0, 0.2, 1.0, 0.5, Ease::None),
    AnimationPreset {
        rotation: 45.0,
        auto_pan_x: true,
        auto_pan_x_range: Some((0.2, 0.8, 0.8)),
        ..anim_preset(
            "Stormy Seas",
            Pattern::Ocean,
            4.0,
            0.6,
            1.5,
            0.5,
            Ease::InOutCubic,
        )
    },
    anim_preset(
        "Twin Tides",
        Pattern::DualReverb,
        2.5,
        0.35,
        1.2,
        0.6,
        Ease::None,
    ),
    anim_preset("Cosmic Flow", Pattern::Flow, 1.5, 0.4, 0.8, 0.5, Ease::InOutSine),
    anim_preset("Rainstorm", Pattern::Rain, 4.0, 0.4, 3.0, 0.5, Ease::OutCubic),
];

/// Look up an animation preset by name, ignoring case, spaces and dashes.
pub fn animation_preset(name: &str) -> Option<&'static AnimationPreset> {
    let key = lookup_key(name);
    ANIMATION_PRESETS.iter().find(|p| lookup_key(p.name) == key)
}

fn lookup_key(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/presets.rs"]
mod tests;

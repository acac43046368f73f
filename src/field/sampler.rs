use crate::field::noise::Perlin2;
use crate::foundation::core::Point;
use crate::foundation::math::{dist, smoothstep01};

/// How the unmodulated base intensity varies across the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SizeMode {
    /// Largest dots at the center, falling off toward the farthest corner.
    #[default]
    Radial,
    /// Smooth noise.
    Noise,
    /// Flat 0.5 everywhere.
    Uniform,
    /// Vertical ramp, large at the top.
    Linear,
}

impl SizeMode {
    /// Parse a size-mode identifier. Unknown identifiers yield `None`.
    pub fn parse(id: &str) -> Option<Self> {
        let m = match id.trim().to_ascii_lowercase().as_str() {
            "radial" => Self::Radial,
            "noise" => Self::Noise,
            "uniform" => Self::Uniform,
            "linear" => Self::Linear,
            _ => return None,
        };
        Some(m)
    }

    /// Canonical identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::Radial => "radial",
            Self::Noise => "noise",
            Self::Uniform => "uniform",
            Self::Linear => "linear",
        }
    }
}

/// One halftone sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Smoothstepped brightness, `floor(255 * s)`.
    pub gray: u8,
    /// Fill opacity in `[0, 1]`.
    pub alpha: f64,
}

/// Lattice geometry and sizing for one halftone pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    pub width: f64,
    pub height: f64,
    pub density: u32,
    pub min_size: f64,
    /// `None` derives the maximum from the cell size.
    pub max_size: Option<f64>,
    pub size_mode: SizeMode,
    pub opacity: f64,
    pub allow_overlap: bool,
    /// Field center in pixels.
    pub center: Point,
}

impl FieldParams {
    /// Lattice spacing in pixels, never below one pixel.
    pub fn cell_size(&self) -> f64 {
        let columns = f64::from(self.density.max(1)).min(self.width.max(1.0));
        self.width / columns
    }

    /// Largest radius a dot may take.
    pub fn effective_max(&self) -> f64 {
        let cell = self.cell_size();
        let max = self.max_size.unwrap_or(cell / 2.0 * 1.4);
        if self.allow_overlap {
            max
        } else {
            max.min(cell / 2.0 * 0.9)
        }
    }

    /// Distance from the center to the farthest canvas corner.
    fn max_corner_dist(&self) -> f64 {
        let c = self.center;
        [
            (0.0, 0.0),
            (self.width, 0.0),
            (0.0, self.height),
            (self.width, self.height),
        ]
        .into_iter()
        .map(|(x, y)| dist(c.x, c.y, x, y))
        .fold(0.0, f64::max)
    }
}

/// Number of lattice steps covering `extent` plus one cell of bleed.
fn lattice_steps(extent: f64, cell: f64) -> usize {
    ((extent + cell) / cell + 1e-9).floor().max(0.0) as usize
}

/// Sample the halftone lattice.
///
/// Points are spaced `cell_size` apart on both axes from 0 up to and including
/// `extent + cell_size`. `modulate(x, y)` supplies the waveform offset added to the base
/// intensity before clamping.
pub fn sample_field<F>(params: &FieldParams, noise: &Perlin2, modulate: F) -> Vec<Dot>
where
    F: Fn(f64, f64) -> f64,
{
    let cell = params.cell_size();
    if !(cell.is_finite() && cell > 0.0) {
        return Vec::new();
    }
    let nx = lattice_steps(params.width, cell);
    let ny = lattice_steps(params.height, cell);
    let max_dist = params.max_corner_dist();
    let eff_max = params.effective_max();
    let min = params.min_size;
    let alpha = params.opacity.clamp(0.0, 1.0);

    let Some(count) = (nx + 1).checked_mul(ny + 1) else {
        return Vec::new();
    };
    let mut dots = Vec::with_capacity(count);
    for ix in 0..=nx {
        let x = ix as f64 * cell;
        for iy in 0..=ny {
            let y = iy as f64 * cell;

            let base = match params.size_mode {
                SizeMode::Radial => {
                    let d = dist(x, y, params.center.x, params.center.y);
                    let r = if max_dist > 0.0 {
                        (d / max_dist).min(1.0)
                    } else {
                        0.0
                    };
                    0.1 + 0.9 * (1.0 - r).powf(1.5)
                }
                SizeMode::Noise => (noise.sample(x * 0.002, y * 0.002) + 1.0) / 2.0,
                SizeMode::Uniform => 0.5,
                SizeMode::Linear => 1.0 - y / params.height,
            };

            let m = modulate(x, y);
            let m = if m.is_finite() { m } else { 0.0 };
            let target = (base + m).clamp(0.0, 1.0);
            let radius = (min + target * (eff_max - min)).clamp(0.0, eff_max.max(0.0));
            let gray = (smoothstep01(target) * 255.0).floor() as u8;

            dots.push(Dot {
                x,
                y,
                radius,
                gray,
                alpha,
            });
        }
    }
    dots
}

#[cfg(test)]
#[path = "../../tests/unit/field/sampler.rs"]
mod tests;

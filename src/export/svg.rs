//! Static SVG document for the current frame, and SVG rasterization.
//!
//! The document mirrors the raster layers but is not pixel-identical: only ripple/radial
//! modulation is carried over and the background falls back to linear or radial gradients.

use crate::field::waveform::Pattern;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{DotwaveError, DotwaveResult};
use crate::render::backend::FrameRGBA;
use crate::render::compositor::{FieldInputs, field_pattern};
use crate::scene::state::{
    Background, BorderConfig, ColorStop, DarkOverlayConfig, GradientKind, HalftoneConfig,
    ParameterState,
};

/// Circles at or below this radius are left out of the document.
const MIN_CIRCLE_RADIUS: f64 = 0.5;

/// Largest edge accepted when rasterizing an SVG document.
const MAX_RASTER_EDGE: u32 = 16_384;

/// Build the SVG document for `state` drawn at `canvas` size.
pub(crate) fn document(state: &ParameterState, canvas: Canvas, inputs: FieldInputs<'_>) -> String {
    let (w, h) = (canvas.w(), canvas.h());
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        canvas.width, canvas.height, canvas.width, canvas.height
    );

    push_background(&mut svg, &state.background);
    if state.halftone.enabled {
        push_halftone(&mut svg, state, canvas, inputs);
    }
    if state.dark_overlay.enabled {
        push_dark_overlay(&mut svg, &state.dark_overlay);
    }
    if state.border.enabled {
        push_border(&mut svg, &state.border, w, h);
    }

    svg.push_str("</svg>");
    svg
}

fn push_background(svg: &mut String, background: &Background) {
    match background {
        Background::Flat { color } => {
            svg.push_str(&format!(
                r#"<rect width="100%" height="100%" fill="{}"{}/>"#,
                color.to_hex_rgb(),
                opacity_attr("fill-opacity", *color)
            ));
        }
        Background::Gradient { kind, stops } => {
            if stops.is_empty() {
                return;
            }
            let mut sorted: Vec<ColorStop> = stops.clone();
            sorted.sort_by(|a, b| clamp_pos(a.position).total_cmp(&clamp_pos(b.position)));
            let stop_tags: String = sorted
                .iter()
                .map(|s| {
                    format!(
                        r#"<stop offset="{}%" stop-color="{}"{}/>"#,
                        num(clamp_pos(s.position)),
                        s.color.to_hex_rgb(),
                        opacity_attr("stop-opacity", s.color)
                    )
                })
                .collect();

            let def = match kind {
                GradientKind::Radial => format!(
                    r#"<radialGradient id="bgGrad" cx="50%" cy="50%" r="50%" fx="50%" fy="50%">{stop_tags}</radialGradient>"#
                ),
                _ => format!(
                    r#"<linearGradient id="bgGrad" x1="0%" y1="0%" x2="0%" y2="100%">{stop_tags}</linearGradient>"#
                ),
            };
            svg.push_str(&format!("<defs>{def}</defs>"));
            svg.push_str(r#"<rect width="100%" height="100%" fill="url(#bgGrad)"/>"#);
        }
    }
}

fn push_halftone(svg: &mut String, state: &ParameterState, canvas: Canvas, inputs: FieldInputs<'_>) {
    let halftone: &HalftoneConfig = &state.halftone;
    let pattern = match field_pattern(&state.animation) {
        p @ (Pattern::Ripple | Pattern::Radial) => p,
        _ => Pattern::None,
    };

    svg.push_str(&format!(
        r#"<g style="mix-blend-mode: {}; opacity: {}">"#,
        halftone.blend.css_name(),
        num(halftone.opacity.clamp(0.0, 1.0))
    ));
    for dot in inputs
        .dots(canvas, halftone, pattern)
        .into_iter()
        .filter(|d| d.radius > MIN_CIRCLE_RADIUS)
    {
        svg.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="rgb({g},{g},{g})"/>"#,
            num(dot.x),
            num(dot.y),
            num(dot.radius),
            g = dot.gray
        ));
    }
    svg.push_str("</g>");
}

fn push_dark_overlay(svg: &mut String, config: &DarkOverlayConfig) {
    let intensity = num(config.intensity.clamp(0.0, 1.0));
    let fade = num(config.fade_height.clamp(0.0, 1.0) * 100.0);
    let rest = num((1.0 - config.fade_height.clamp(0.0, 1.0)) * 100.0);
    let edges = config.active_edges();

    svg.push_str(&format!(
        r#"<g style="mix-blend-mode: {}">"#,
        config.blend.css_name()
    ));
    svg.push_str("<defs>");
    for (id, x1, y1, x2, y2) in [
        ("gradTop", 0, 0, 0, 1),
        ("gradBottom", 0, 1, 0, 0),
        ("gradLeft", 0, 0, 1, 0),
        ("gradRight", 1, 0, 0, 0),
    ] {
        svg.push_str(&format!(
            r#"<linearGradient id="{id}" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}"><stop offset="0%" stop-color="black" stop-opacity="{intensity}"/><stop offset="100%" stop-color="black" stop-opacity="0"/></linearGradient>"#
        ));
    }
    svg.push_str("</defs>");

    if edges.top {
        svg.push_str(&format!(
            r#"<rect width="100%" height="{fade}%" fill="url(#gradTop)"/>"#
        ));
    }
    if edges.bottom {
        svg.push_str(&format!(
            r#"<rect y="{rest}%" width="100%" height="{fade}%" fill="url(#gradBottom)"/>"#
        ));
    }
    if edges.left {
        svg.push_str(&format!(
            r#"<rect width="{fade}%" height="100%" fill="url(#gradLeft)"/>"#
        ));
    }
    if edges.right {
        svg.push_str(&format!(
            r#"<rect x="{rest}%" width="{fade}%" height="100%" fill="url(#gradRight)"/>"#
        ));
    }
    svg.push_str("</g>");
}

fn push_border(svg: &mut String, config: &BorderConfig, w: f64, h: f64) {
    let t = config.thickness;
    if !(t > 0.0) {
        return;
    }
    let opacity = config.opacity.clamp(0.0, 1.0) * config.color.alpha_f64();
    svg.push_str(&format!(
        r#"<rect x="{inset}" y="{inset}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}" stroke-opacity="{}" style="mix-blend-mode: {}"/>"#,
        num((w - t).max(0.0)),
        num((h - t).max(0.0)),
        config.color.to_hex_rgb(),
        num(t),
        num(opacity),
        config.blend.css_name(),
        inset = num(t / 2.0),
    ));
}

fn clamp_pos(p: f64) -> f64 {
    if p.is_finite() { p.clamp(0.0, 100.0) } else { 0.0 }
}

fn opacity_attr(name: &str, color: Rgba8) -> String {
    if color.a == 255 {
        String::new()
    } else {
        format!(r#" {name}="{}""#, num(color.alpha_f64()))
    }
}

/// Compact decimal: integers without a fraction, others with at most 3 decimals.
fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Rasterize an SVG document at its intrinsic size into premultiplied RGBA8.
pub fn rasterize_svg(svg: &str) -> DotwaveResult<FrameRGBA> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts)
        .map_err(|e| DotwaveError::validation(format!("parse svg: {e}")))?;

    fn to_px(v: f32) -> DotwaveResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(DotwaveError::validation("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }
    let size = tree.size();
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;
    if width > MAX_RASTER_EDGE || height > MAX_RASTER_EDGE {
        return Err(DotwaveError::validation(format!(
            "svg raster size too large: {width}x{height} (max {MAX_RASTER_EDGE}x{MAX_RASTER_EDGE})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| DotwaveError::render("failed to allocate svg pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    Ok(FrameRGBA {
        width,
        height,
        data: pixmap.take(),
        premultiplied: true,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/svg.rs"]
mod tests;

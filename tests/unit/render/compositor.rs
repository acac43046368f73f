use super::*;
use crate::animation::smoother::TimingMode;
use crate::field::sampler::SizeMode;
use crate::scene::state::{OverlayEdges, ParameterState};

const BLACK: Rgba8 = Rgba8::rgb(0, 0, 0);
const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);

fn bw_stops() -> Vec<ColorStop> {
    vec![ColorStop::new(BLACK, 0.0), ColorStop::new(WHITE, 100.0)]
}

fn bare_state(w: u32, h: u32, background: Background) -> ParameterState {
    let mut s = ParameterState::default();
    s.canvas = Canvas::clamped(w, h);
    s.background = background;
    s.animation.enabled = false;
    s.halftone.enabled = false;
    s.dark_overlay.enabled = false;
    s.border.enabled = false;
    s
}

fn compose_state(state: &ParameterState) -> Surface {
    let mut surface = Surface::new(state.canvas);
    let smoother = Smoother::new(TimingMode::Smoothed);
    let noise = Perlin2::new(7);
    let rain = RainField::new(7);
    let inputs = FieldInputs {
        smoother: &smoother,
        noise: &noise,
        rain: &rain,
    };
    compose(&mut surface, state, inputs).unwrap();
    surface
}

fn px(s: &Surface, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * s.canvas().width + x) * 4) as usize;
    let b = s.frame_bytes();
    [b[i], b[i + 1], b[i + 2], b[i + 3]]
}

#[test]
fn ramp_interpolates_and_pads() {
    let ramp = GradientRamp::new(
        GradientKind::Linear,
        &[ColorStop::new(BLACK, 20.0), ColorStop::new(WHITE, 80.0)],
    )
    .unwrap();
    assert_eq!(ramp.sample(0.0), [0, 0, 0, 255]);
    assert_eq!(ramp.sample(0.1), [0, 0, 0, 255]);
    assert_eq!(ramp.sample(0.5), [128, 128, 128, 255]);
    assert_eq!(ramp.sample(0.95), [255, 255, 255, 255]);
    assert_eq!(ramp.sample(f64::NAN), [0, 0, 0, 255]);
}

#[test]
fn ramp_sorts_unsorted_stops() {
    let ramp = GradientRamp::new(
        GradientKind::Linear,
        &[ColorStop::new(WHITE, 100.0), ColorStop::new(BLACK, 0.0)],
    )
    .unwrap();
    assert_eq!(ramp.sample(0.0), [0, 0, 0, 255]);
    assert_eq!(ramp.sample(1.0), [255, 255, 255, 255]);
}

#[test]
fn ramp_clamps_positions() {
    let ramp = GradientRamp::new(
        GradientKind::Linear,
        &[ColorStop::new(BLACK, -50.0), ColorStop::new(WHITE, 400.0)],
    )
    .unwrap();
    assert_eq!(ramp.sample(0.0), [0, 0, 0, 255]);
    assert_eq!(ramp.sample(1.0), [255, 255, 255, 255]);
}

#[test]
fn ramp_single_and_empty() {
    assert!(GradientRamp::new(GradientKind::Radial, &[]).is_none());
    let ramp = GradientRamp::new(GradientKind::Radial, &[ColorStop::new(WHITE, 40.0)]).unwrap();
    assert_eq!(ramp.sample(0.0), [255, 255, 255, 255]);
    assert_eq!(ramp.sample(1.0), [255, 255, 255, 255]);
}

#[test]
fn reflected_ramp_is_mirrored() {
    let ramp = GradientRamp::new(GradientKind::Reflected, &bw_stops()).unwrap();
    assert_eq!(ramp.sample(0.5), [0, 0, 0, 255]);
    assert_eq!(ramp.sample(0.0), [255, 255, 255, 255]);
    assert_eq!(ramp.sample(1.0), [255, 255, 255, 255]);
    for t in [0.1, 0.2, 0.25, 0.4] {
        assert_eq!(ramp.sample(t), ramp.sample(1.0 - t), "t={t}");
    }
}

#[test]
fn conic_starts_up_and_runs_clockwise() {
    let g = GradientGeometry::new(GradientKind::Conic, Canvas::clamped(100, 100));
    let up = g.offset(50.0, 0.0);
    let right = g.offset(100.0, 50.0);
    let down = g.offset(50.0, 100.0);
    let left = g.offset(0.0, 50.0);
    assert!(up.abs() < 1e-12 || (1.0 - up).abs() < 1e-12);
    assert!((right - 0.25).abs() < 1e-12);
    assert!((down - 0.5).abs() < 1e-12);
    assert!((left - 0.75).abs() < 1e-12);
}

#[test]
fn diagonal_and_radial_offsets() {
    let c = Canvas::clamped(200, 100);
    let d = GradientGeometry::new(GradientKind::Diagonal, c);
    assert_eq!(d.offset(0.0, 0.0), 0.0);
    assert!((d.offset(200.0, 100.0) - 1.0).abs() < 1e-12);

    let r = GradientGeometry::new(GradientKind::Radial, c);
    assert_eq!(r.offset(100.0, 50.0), 0.0);
    assert!((r.offset(220.0, 50.0) - 1.0).abs() < 1e-12);
}

#[test]
fn flat_background_fills_every_pixel() {
    let color = Rgba8::rgb(2, 84, 103);
    let state = bare_state(13, 7, Background::Flat { color });
    let s = compose_state(&state);
    assert!(
        s.frame_bytes()
            .chunks_exact(4)
            .all(|p| p == [2, 84, 103, 255])
    );
}

#[test]
fn linear_gradient_runs_top_to_bottom() {
    let state = bare_state(
        4,
        256,
        Background::Gradient {
            kind: GradientKind::Linear,
            stops: bw_stops(),
        },
    );
    let s = compose_state(&state);
    assert!(px(&s, 0, 0)[0] <= 1);
    assert!(px(&s, 3, 255)[0] >= 254);
    assert!(px(&s, 2, 64)[0] < px(&s, 2, 192)[0]);
}

#[test]
fn empty_gradient_leaves_transparent_frame() {
    let state = bare_state(
        5,
        5,
        Background::Gradient {
            kind: GradientKind::Linear,
            stops: Vec::new(),
        },
    );
    let s = compose_state(&state);
    assert!(s.frame_bytes().iter().all(|&b| b == 0));
}

#[test]
fn top_overlay_darkens_only_the_top() {
    let mut state = bare_state(20, 100, Background::Flat { color: WHITE });
    state.dark_overlay = DarkOverlayConfig {
        enabled: true,
        intensity: 1.0,
        fade_height: 0.5,
        blend: BlendMode::Normal,
        edges: None,
    };
    let s = compose_state(&state);
    assert!(px(&s, 10, 0)[0] < 10);
    assert!(px(&s, 10, 25)[0] > 100 && px(&s, 10, 25)[0] < 160);
    assert_eq!(px(&s, 10, 60), [255, 255, 255, 255]);
    assert_eq!(px(&s, 10, 99), [255, 255, 255, 255]);
}

#[test]
fn overlay_edges_combine() {
    let mut state = bare_state(100, 100, Background::Flat { color: WHITE });
    state.dark_overlay = DarkOverlayConfig {
        enabled: true,
        intensity: 0.5,
        fade_height: 0.3,
        blend: BlendMode::Normal,
        edges: Some(OverlayEdges {
            top: false,
            bottom: true,
            left: false,
            right: true,
        }),
    };
    let s = compose_state(&state);
    assert_eq!(px(&s, 50, 0), [255, 255, 255, 255]);
    assert_eq!(px(&s, 0, 50), [255, 255, 255, 255]);
    let bottom = px(&s, 50, 99)[0];
    let corner = px(&s, 99, 99)[0];
    assert!(bottom < 255);
    assert!(corner < bottom);
}

#[test]
fn zero_fade_draws_no_overlay() {
    let mut state = bare_state(10, 10, Background::Flat { color: WHITE });
    state.dark_overlay.enabled = true;
    state.dark_overlay.fade_height = 0.0;
    state.dark_overlay.blend = BlendMode::Normal;
    let s = compose_state(&state);
    assert!(s.frame_bytes().iter().all(|&b| b == 255));
}

#[test]
fn border_ring_is_inset_by_half_thickness() {
    let mut state = bare_state(60, 40, Background::Flat { color: BLACK });
    state.border = BorderConfig {
        enabled: true,
        thickness: 6.0,
        color: WHITE,
        blend: BlendMode::Normal,
        opacity: 1.0,
    };
    let s = compose_state(&state);
    assert_eq!(px(&s, 0, 0), [255, 255, 255, 255]);
    assert_eq!(px(&s, 3, 20), [255, 255, 255, 255]);
    assert_eq!(px(&s, 59, 39), [255, 255, 255, 255]);
    assert_eq!(px(&s, 30, 20), [0, 0, 0, 255]);
    assert_eq!(px(&s, 7, 20), [0, 0, 0, 255]);
}

#[test]
fn border_opacity_blends_with_background() {
    let mut state = bare_state(20, 20, Background::Flat { color: BLACK });
    state.border = BorderConfig {
        enabled: true,
        thickness: 4.0,
        color: WHITE,
        blend: BlendMode::Normal,
        opacity: 0.5,
    };
    let s = compose_state(&state);
    let v = px(&s, 1, 10)[0];
    assert!((126..=129).contains(&v), "{v}");
}

#[test]
fn uniform_dots_share_one_radius() {
    let smoother = Smoother::new(TimingMode::Smoothed);
    let noise = Perlin2::new(1);
    let rain = RainField::new(1);
    let inputs = FieldInputs {
        smoother: &smoother,
        noise: &noise,
        rain: &rain,
    };
    let halftone = HalftoneConfig {
        size_mode: SizeMode::Uniform,
        ..HalftoneConfig::default()
    };
    let canvas = Canvas::clamped(2000, 300);
    let dots = inputs.dots(canvas, &halftone, Pattern::None);
    assert!(!dots.is_empty());

    let cell = 2000.0 / 100.0;
    let eff_max = 15.0_f64.min(cell / 2.0 * 0.9);
    let expected = 2.0 + 0.5 * (eff_max - 2.0);
    for d in &dots {
        assert!((d.radius - expected).abs() < 1e-9);
    }
}

#[test]
fn disabled_animation_drops_the_pattern() {
    let mut state = ParameterState::default();
    assert_eq!(field_pattern(&state.animation), Pattern::Radial);
    state.animation.enabled = false;
    assert_eq!(field_pattern(&state.animation), Pattern::None);
}

#[test]
fn disabled_radial_composes_like_no_pattern() {
    let mut radial = bare_state(90, 60, Background::Flat { color: BLACK });
    radial.halftone.enabled = true;
    radial.halftone.density = 9;
    radial.animation.pattern = Pattern::Radial;
    let mut plain = radial.clone();
    plain.animation.pattern = Pattern::None;
    assert_eq!(compose_state(&radial).frame_bytes(), compose_state(&plain).frame_bytes());
}

#[test]
fn halftone_layer_changes_pixels() {
    let mut state = bare_state(120, 80, Background::Flat { color: BLACK });
    state.halftone = HalftoneConfig {
        enabled: true,
        density: 6,
        min_size: 2.0,
        max_size: Some(12.0),
        size_mode: SizeMode::Uniform,
        opacity: 1.0,
        blend: BlendMode::Normal,
        allow_overlap: false,
    };
    let s = compose_state(&state);
    // Lattice point (20, 20) carries a gray dot; cell midpoints stay background.
    let at_dot = px(&s, 20, 20);
    assert_eq!(at_dot[0], at_dot[1]);
    assert!(at_dot[0] > 0);
    assert_eq!(px(&s, 30, 30), [0, 0, 0, 255]);
}

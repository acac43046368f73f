use super::*;
use std::f64::consts::PI;

fn ctx<'a>(noise: &'a Perlin2, rain: &'a RainField) -> WaveContext<'a> {
    WaveContext {
        width: 1000.0,
        height: 500.0,
        cell_size: 10.0,
        time: 0.0,
        amplitude: 0.3,
        frequency: 1.0,
        spread: 0.5,
        rotation: 0.0,
        center: Point::new(500.0, 250.0),
        breath_phase: 0.0,
        noise,
        rain,
    }
}

#[test]
fn parses_all_identifiers() {
    for p in Pattern::ALL {
        assert_eq!(Pattern::parse(p.id()), Some(p));
    }
    assert_eq!(Pattern::parse("DUAL-RIPPLE"), Some(Pattern::DualRipple));
    assert_eq!(Pattern::parse("glitch"), None);
}

#[test]
fn none_is_zero_everywhere() {
    let noise = Perlin2::new(1);
    let rain = RainField::new(1);
    let c = ctx(&noise, &rain);
    for (x, y) in [(0.0, 0.0), (123.0, 456.0), (999.0, 1.0)] {
        assert_eq!(modulation(Pattern::None, &c, x, y), 0.0);
    }
}

#[test]
fn ripple_and_radial_agree() {
    let noise = Perlin2::new(1);
    let rain = RainField::new(1);
    let mut c = ctx(&noise, &rain);
    c.time = 0.37;
    for (x, y) in [(10.0, 20.0), (500.0, 250.0), (800.0, 90.0)] {
        assert_eq!(
            modulation(Pattern::Ripple, &c, x, y),
            modulation(Pattern::Radial, &c, x, y)
        );
    }
}

#[test]
fn ripple_matches_closed_form() {
    let noise = Perlin2::new(1);
    let rain = RainField::new(1);
    let mut c = ctx(&noise, &rain);
    c.time = 0.1;
    let (x, y) = (600.0, 250.0);
    let expected = (100.0_f64 * 0.01 - 0.2 * 5.0).sin() * 0.3;
    assert!((modulation(Pattern::Ripple, &c, x, y) - expected).abs() < 1e-12);
}

#[test]
fn ocean_follows_rotation() {
    let noise = Perlin2::new(1);
    let rain = RainField::new(1);
    let mut c = ctx(&noise, &rain);
    c.rotation = 90.0;
    // Rotated 90 degrees the wave only depends on y.
    let a = modulation(Pattern::Ocean, &c, 0.0, 100.0);
    let b = modulation(Pattern::Ocean, &c, 700.0, 100.0);
    assert!((a - b).abs() < 1e-9);
    let expected = (100.0 * 0.005_f64).sin() * 0.3;
    assert!((a - expected).abs() < 1e-9);
}

#[test]
fn breathe_maps_phase_to_signed_pulse() {
    let noise = Perlin2::new(1);
    let rain = RainField::new(1);
    let mut c = ctx(&noise, &rain);
    c.breath_phase = 0.0;
    assert!((modulation(Pattern::Breathe, &c, 1.0, 1.0) + 0.3).abs() < 1e-12);
    c.breath_phase = 1.0;
    assert!((modulation(Pattern::Breathe, &c, 1.0, 1.0) - 0.3).abs() < 1e-12);
    c.breath_phase = 0.5;
    assert_eq!(modulation(Pattern::Breathe, &c, 1.0, 1.0), 0.0);
}

#[test]
fn dual_reverb_sums_and_dual_ripple_takes_max() {
    let noise = Perlin2::new(1);
    let rain = RainField::new(1);
    let c = ctx(&noise, &rain);
    // Sources at x = 250 and x = 750 on y = 250.
    let (x, y) = (250.0, 250.0);
    let w1 = 0.0_f64.sin();
    let w2 = (500.0 * 0.01_f64).sin();
    let reverb = modulation(Pattern::DualReverb, &c, x, y);
    let ripple = modulation(Pattern::DualRipple, &c, x, y);
    assert!((reverb - (w1 + w2) * 0.3).abs() < 1e-12);
    assert!((ripple - w1.max(w2) * 0.3).abs() < 1e-12);
}

#[test]
fn matrix_columns_share_a_speed() {
    let noise = Perlin2::new(4);
    let rain = RainField::new(1);
    let mut c = ctx(&noise, &rain);
    c.time = 0.8;
    // Columns are 4 cells (40 px) wide.
    let a = modulation(Pattern::Matrix, &c, 41.0, 300.0);
    let b = modulation(Pattern::Matrix, &c, 79.0, 300.0);
    assert_eq!(a, b);
}

#[test]
fn every_pattern_is_bounded_by_amplitude_scale() {
    let noise = Perlin2::new(8);
    let rain = RainField::new(1);
    let mut c = ctx(&noise, &rain);
    c.time = 1.234;
    c.breath_phase = 0.7;
    for p in Pattern::ALL {
        for i in 0..50 {
            let x = i as f64 * 21.0;
            let y = i as f64 * 9.0;
            let v = modulation(p, &c, x, y);
            assert!(v.is_finite());
            // Dual reverb can reach twice the amplitude, noise slightly more than one.
            assert!(v.abs() <= 2.0 * 0.3 + 1e-9, "{p:?} -> {v}");
        }
    }
}

#[test]
fn ripple_is_periodic_in_time() {
    let noise = Perlin2::new(1);
    let rain = RainField::new(1);
    let mut a = ctx(&noise, &rain);
    let mut b = ctx(&noise, &rain);
    a.time = 0.25;
    // t = 2 * time and the phase is 5t, so a period in time is 2π / 10.
    b.time = 0.25 + 2.0 * PI / 10.0;
    let va = modulation(Pattern::Ripple, &a, 321.0, 42.0);
    let vb = modulation(Pattern::Ripple, &b, 321.0, 42.0);
    assert!((va - vb).abs() < 1e-9);
}

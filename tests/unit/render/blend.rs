use super::*;

fn px(rgba: [u8; 4]) -> Vec<u8> {
    rgba.to_vec()
}

#[test]
fn parses_css_names_case_insensitively() {
    assert_eq!(BlendMode::parse("soft-light"), Some(BlendMode::SoftLight));
    assert_eq!(BlendMode::parse("Color-Dodge"), Some(BlendMode::ColorDodge));
    assert_eq!(BlendMode::parse("source-over"), Some(BlendMode::Normal));
    assert_eq!(BlendMode::parse("luminosity"), None);
}

#[test]
fn css_name_parses_back() {
    for mode in BlendMode::ALL {
        assert_eq!(BlendMode::parse(mode.css_name()), Some(mode));
    }
}

#[test]
fn normal_opaque_source_replaces_destination() {
    let mut dst = px([10, 20, 30, 255]);
    composite_over_rgba8_premul(&mut dst, &px([200, 100, 50, 255]), 1.0, BlendMode::Normal)
        .unwrap();
    assert_eq!(dst, px([200, 100, 50, 255]));
}

#[test]
fn zero_opacity_is_a_no_op_for_every_mode() {
    for mode in BlendMode::ALL {
        let mut dst = px([10, 20, 30, 255]);
        composite_over_rgba8_premul(&mut dst, &px([200, 100, 50, 255]), 0.0, mode).unwrap();
        assert_eq!(dst, px([10, 20, 30, 255]), "{mode:?}");
    }
}

#[test]
fn transparent_source_is_a_no_op_for_every_mode() {
    for mode in BlendMode::ALL {
        let mut dst = px([10, 20, 30, 255]);
        composite_over_rgba8_premul(&mut dst, &px([0, 0, 0, 0]), 1.0, mode).unwrap();
        assert_eq!(dst, px([10, 20, 30, 255]), "{mode:?}");
    }
}

#[test]
fn multiply_by_white_keeps_destination() {
    let mut dst = px([120, 60, 30, 255]);
    composite_over_rgba8_premul(&mut dst, &px([255, 255, 255, 255]), 1.0, BlendMode::Multiply)
        .unwrap();
    assert_eq!(dst, px([120, 60, 30, 255]));
}

#[test]
fn screen_with_black_keeps_destination() {
    let mut dst = px([120, 60, 30, 255]);
    composite_over_rgba8_premul(&mut dst, &px([0, 0, 0, 255]), 1.0, BlendMode::Screen).unwrap();
    assert_eq!(dst, px([120, 60, 30, 255]));
}

#[test]
fn soft_light_black_darkens_and_white_lightens() {
    let base = [128, 128, 128, 255];

    let mut dark = px(base);
    composite_over_rgba8_premul(&mut dark, &px([0, 0, 0, 255]), 1.0, BlendMode::SoftLight)
        .unwrap();
    assert!(dark[0] < 128);

    let mut light = px(base);
    composite_over_rgba8_premul(&mut light, &px([255, 255, 255, 255]), 1.0, BlendMode::SoftLight)
        .unwrap();
    assert!(light[0] > 128);
}

#[test]
fn difference_of_equal_colors_is_black() {
    let mut dst = px([90, 90, 90, 255]);
    composite_over_rgba8_premul(&mut dst, &px([90, 90, 90, 255]), 1.0, BlendMode::Difference)
        .unwrap();
    assert_eq!(dst, px([0, 0, 0, 255]));
}

#[test]
fn blend_over_transparent_destination_shows_source() {
    let mut dst = px([0, 0, 0, 0]);
    composite_over_rgba8_premul(&mut dst, &px([100, 50, 25, 255]), 1.0, BlendMode::Overlay)
        .unwrap();
    assert_eq!(dst, px([100, 50, 25, 255]));
}

#[test]
fn rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(composite_over_rgba8_premul(&mut dst, &[0u8; 4], 1.0, BlendMode::Normal).is_err());
}

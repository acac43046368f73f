use super::*;

#[test]
fn endpoints_are_fixed_for_all_curves() {
    let all = [
        Ease::None,
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::InQuint,
        Ease::OutQuint,
        Ease::InOutQuint,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
    ];
    for e in all {
        assert!(e.apply(0.0).abs() < 1e-12, "{e:?} at 0");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-12, "{e:?} at 1");
    }
}

#[test]
fn progress_is_clamped() {
    assert_eq!(Ease::OutQuad.apply(-3.0), 0.0);
    assert_eq!(Ease::OutQuad.apply(7.0), 1.0);
}

#[test]
fn out_quad_matches_closed_form() {
    let t = 0.3;
    assert!((Ease::OutQuad.apply(t) - t * (2.0 - t)).abs() < 1e-12);
}

#[test]
fn in_out_is_symmetric_around_midpoint() {
    for e in [Ease::InOutQuad, Ease::InOutCubic, Ease::InOutSine] {
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
        let a = e.apply(0.2);
        let b = e.apply(0.8);
        assert!((a + b - 1.0).abs() < 1e-12, "{e:?}");
    }
}

#[test]
fn parses_power_and_sine_identifiers() {
    assert_eq!(Ease::parse("power2.out"), Some(Ease::OutCubic));
    assert_eq!(Ease::parse("power1.inOut"), Some(Ease::InOutQuad));
    assert_eq!(Ease::parse("sine.inOut"), Some(Ease::InOutSine));
    assert_eq!(Ease::parse("power4.in"), Some(Ease::InQuint));
    assert_eq!(Ease::parse("power3"), Some(Ease::OutQuart));
    assert_eq!(Ease::parse("none"), Some(Ease::None));
    assert_eq!(Ease::parse("linear"), Some(Ease::Linear));
}

#[test]
fn rejects_unknown_identifiers() {
    assert_eq!(Ease::parse("elastic.out"), None);
    assert_eq!(Ease::parse("power2.sideways"), None);
    assert_eq!(Ease::parse(""), None);
}

#[test]
fn or_substitutes_only_for_none() {
    assert_eq!(Ease::None.or(Ease::OutQuad), Ease::OutQuad);
    assert_eq!(Ease::InSine.or(Ease::OutQuad), Ease::InSine);
}

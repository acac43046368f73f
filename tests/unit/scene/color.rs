use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: ColorDef = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, ColorDef::rgba(1.0, 0.0, 0.0, 1.0));

    let c: ColorDef = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);
}

#[test]
fn parses_short_hex() {
    let c = ColorDef::parse_hex("#fa0").unwrap().to_rgba8();
    assert_eq!(c, Rgba8::rgb(255, 170, 0));
}

#[test]
fn parses_rgba_object_and_array() {
    let c: ColorDef = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 1.0));

    let c: ColorDef = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 0.9));
}

#[test]
fn rejects_malformed_hex() {
    assert!(serde_json::from_value::<ColorDef>(json!("#12345")).is_err());
    assert!(serde_json::from_value::<ColorDef>(json!("#zzzzzz")).is_err());
    assert!(serde_json::from_value::<ColorDef>(json!([1.0])).is_err());
}

#[test]
fn serializes_as_hex() {
    let c = ColorDef::from_rgba8(Rgba8::rgb(0x02, 0x54, 0x67));
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#025467"));

    let translucent = ColorDef::from_rgba8(Rgba8 {
        r: 255,
        g: 0,
        b: 0,
        a: 128,
    });
    assert_eq!(serde_json::to_value(translucent).unwrap(), json!("#ff000080"));
}

#[test]
fn palette_literal_fallback_is_black() {
    assert_eq!(hex_rgba8("#FFBA08"), Rgba8::rgb(0xFF, 0xBA, 0x08));
    assert_eq!(hex_rgba8("nope"), Rgba8::rgb(0, 0, 0));
}

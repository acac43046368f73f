use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DotwaveError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(DotwaveError::render("x").to_string().contains("render error:"));
    assert!(DotwaveError::encode("x").to_string().contains("encode error:"));
    assert!(
        DotwaveError::export_unavailable("svg")
            .to_string()
            .contains("export unavailable:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DotwaveError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

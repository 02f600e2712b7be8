use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FrameloomError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(FrameloomError::scene("x").to_string().contains("scene error:"));
    assert!(
        FrameloomError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        FrameloomError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        FrameloomError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FrameloomError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

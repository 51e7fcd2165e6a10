use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SceneError::unknown_type("x")
            .to_string()
            .contains("unknown element type:")
    );
    assert!(
        SceneError::duplicate_id("x")
            .to_string()
            .contains("duplicate element id:")
    );
    assert!(
        SceneError::not_found("x")
            .to_string()
            .contains("element not found:")
    );
    assert!(
        SceneError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SceneError::render("x").to_string().contains("render error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SceneError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn not_found_predicate_matches_only_not_found() {
    assert!(SceneError::not_found("e1").is_not_found());
    assert!(!SceneError::duplicate_id("e1").is_not_found());
}

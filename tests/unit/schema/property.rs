use super::*;

#[test]
fn names_roundtrip_for_every_key() {
    for key in PropertyKey::ALL {
        assert_eq!(PropertyKey::from_name(key.name()), Some(key));
    }
    assert_eq!(PropertyKey::from_name("offsetx"), None);
    assert_eq!(PropertyKey::from_name("colour"), None);
}

#[test]
fn value_kinds_follow_schema() {
    assert_eq!(PropertyKey::Visible.value_kind(), ValueKind::Bool);
    assert_eq!(PropertyKey::ZIndex.value_kind(), ValueKind::Int);
    assert_eq!(PropertyKey::Rotation.value_kind(), ValueKind::Number);
    assert!(PropertyKey::Width.is_content());
    assert!(!PropertyKey::AnchorX.is_content());
}

use super::*;

#[test]
fn type_keys_roundtrip() {
    for kind in ElementKind::ALL {
        assert_eq!(ElementKind::from_key(kind.key()).unwrap(), kind);
        assert_eq!(kind.to_string(), kind.key());
    }
}

#[test]
fn unknown_type_key_is_reported() {
    let err = ElementKind::from_key("waveform").unwrap_err();
    assert!(matches!(err, SceneError::UnknownType(ref k) if k == "waveform"));
    assert!(ElementKind::from_key("Track").is_err());
}

#[test]
fn only_bound_kinds_create_bound_instances() {
    for kind in ElementKind::ALL {
        let instance = kind.create("x");
        assert_eq!(instance.as_bound().is_some(), kind.supports_bindings());
        assert_eq!(instance.element().kind(), kind);
        assert_eq!(instance.element().id(), "x");
    }
}

#[test]
fn default_content_is_visible() {
    for kind in ElementKind::ALL {
        let size = kind.default_content().size;
        assert!(size.width > 0.0 && size.height > 0.0, "{kind}");
    }
    assert!(ElementKind::Track.requires_visible_content());
    assert!(!ElementKind::BoundLayer.requires_visible_content());
}

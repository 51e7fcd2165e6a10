use super::*;
use serde_json::json;

fn builder() -> SceneBuilder {
    SceneBuilder::new(SceneOpts::default())
}

#[test]
fn add_registers_with_defaults() {
    let mut b = builder();
    let h = b.add_element("track", "t1", None).unwrap();
    assert_eq!(b.len(), 1);
    assert_eq!(b.handle("t1"), Some(h));
    assert_eq!(b.id_of(h), Some("t1"));
    assert_eq!(b.kind_of("t1").unwrap(), ElementKind::Track);

    let cfg = b.get_element_config("t1").unwrap();
    assert_eq!(cfg.get_f64(PropertyKey::Width), Some(1200.0));
    assert_eq!(cfg.get_bool(PropertyKey::Visible), Some(true));
}

#[test]
fn add_applies_initial_config() {
    let mut b = builder();
    b.add_element("layer", "bg", Some(&json!({"offsetX": 12, "zIndex": -1})))
        .unwrap();
    let props = *b.element("bg").unwrap().element().props();
    assert_eq!(props.offset_x, 12.0);
    assert_eq!(props.z_index, -1);
}

#[test]
fn add_failures_register_nothing() {
    let mut b = builder();
    b.add_element("track", "t1", None).unwrap();

    assert!(matches!(
        b.add_element("track", "t1", None),
        Err(SceneError::DuplicateId(_))
    ));
    assert!(matches!(
        b.add_element("nope", "t2", None),
        Err(SceneError::UnknownType(_))
    ));
    assert!(matches!(
        b.add_element("track", "t3", Some(&json!({"opacity": 3}))),
        Err(SceneError::Validation(_))
    ));
    assert!(matches!(
        b.add_element("track", "  ", None),
        Err(SceneError::Validation(_))
    ));
    assert_eq!(b.ids(), vec!["t1"]);
}

#[test]
fn update_changes_exactly_the_given_keys() {
    let mut b = builder();
    b.add_element("pianoRoll", "roll", None).unwrap();
    let before = b.get_element_config("roll").unwrap();

    b.update_element_config(
        "roll",
        &json!({"visible": false, "zIndex": 5, "offsetX": 100}),
    )
    .unwrap();

    let after = b.get_element_config("roll").unwrap();
    assert_eq!(
        before.changed_keys(&after),
        vec![PropertyKey::Visible, PropertyKey::ZIndex, PropertyKey::OffsetX]
    );
    let props = b.element("roll").unwrap().element().props();
    assert!(!props.visible);
    assert_eq!(props.z_index, 5);
}

#[test]
fn rejected_update_leaves_element_untouched() {
    let mut b = builder();
    b.add_element("track", "t", None).unwrap();
    let before = b.get_element_config("t").unwrap();

    let err = b
        .update_element_config("t", &json!({"offsetX": 50, "anchorX": 2.0}))
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("validation error: element 't' (track)"), "{msg}");
    assert!(msg.contains("$.anchorX"));

    assert_eq!(b.get_element_config("t").unwrap(), before);
    assert_eq!(b.element("t").unwrap().element().props().offset_x, 0.0);
}

#[test]
fn missing_ids_are_not_found() {
    let mut b = builder();
    assert!(b.update_element_config("ghost", &json!({})).unwrap_err().is_not_found());
    assert!(b.get_element_config("ghost").unwrap_err().is_not_found());
    assert!(b.remove_element("ghost").unwrap_err().is_not_found());
}

#[test]
fn returned_config_is_a_copy() {
    let mut b = builder();
    b.add_element("layer", "l", None).unwrap();
    let mut cfg = b.get_element_config("l").unwrap();
    cfg.set(PropertyKey::OffsetX, Scalar::Number(999.0));
    assert_eq!(
        b.get_element_config("l").unwrap().get_f64(PropertyKey::OffsetX),
        Some(0.0)
    );
}

#[test]
fn remove_then_lookup_fails_and_id_is_reusable() {
    let mut b = builder();
    let old = b.add_element("layer", "l", None).unwrap();
    b.remove_element("l").unwrap();
    assert!(!b.contains("l"));
    assert!(b.get_element_config("l").unwrap_err().is_not_found());

    let new = b.add_element("track", "l", None).unwrap();
    assert_ne!(old, new);
    assert_eq!(b.id_of(old), None);
    assert_eq!(b.kind_of("l").unwrap(), ElementKind::Track);
}

#[test]
fn lenient_builder_drops_unknown_keys() {
    let mut b = SceneBuilder::new(SceneOpts {
        strict_keys: false,
        ..SceneOpts::default()
    });
    b.add_element("layer", "l", Some(&json!({"color": "red", "offsetY": 4})))
        .unwrap();
    assert_eq!(
        b.get_element_config("l").unwrap().get_f64(PropertyKey::OffsetY),
        Some(4.0)
    );

    let mut strict = builder();
    assert!(strict.add_element("layer", "l", Some(&json!({"color": "red"}))).is_err());
}

#[test]
fn attach_rejects_self_and_cycles() {
    let mut b = builder();
    for id in ["a", "b", "c"] {
        b.add_element("layer", id, None).unwrap();
    }
    b.attach("b", "a").unwrap();
    b.attach("c", "b").unwrap();
    assert_eq!(b.parent_of("c").unwrap(), Some("b"));
    assert_eq!(b.children_of("a").unwrap(), vec!["b"]);

    assert!(matches!(b.attach("a", "a"), Err(SceneError::Validation(_))));
    assert!(matches!(b.attach("a", "c"), Err(SceneError::Validation(_))));

    b.attach("c", "a").unwrap();
    assert_eq!(b.children_of("a").unwrap(), vec!["b", "c"]);
    assert!(b.children_of("b").unwrap().is_empty());

    b.detach("c").unwrap();
    assert_eq!(b.parent_of("c").unwrap(), None);
    b.detach("c").unwrap();
}

#[test]
fn removing_a_parent_reroots_children() {
    let mut b = builder();
    for id in ["p", "k1", "k2"] {
        b.add_element("layer", id, None).unwrap();
    }
    b.attach("k1", "p").unwrap();
    b.attach("k2", "p").unwrap();
    b.remove_element("p").unwrap();
    assert_eq!(b.parent_of("k1").unwrap(), None);
    assert_eq!(b.parent_of("k2").unwrap(), None);
    assert_eq!(b.ids(), vec!["k1", "k2"]);
}

#[test]
fn literal_update_unbinds_a_bound_key() {
    let mut b = builder();
    b.add_element(
        "boundLayer",
        "overlay",
        Some(&json!({"opacity": {"bind": "velocity", "default": 0.5}})),
    )
    .unwrap();
    let cfg = b.get_element_config("overlay").unwrap();
    assert_eq!(
        cfg.binding(PropertyKey::Opacity).map(|b| b.data_key.as_str()),
        Some("velocity")
    );

    b.update_element_config("overlay", &json!({"opacity": 0.8})).unwrap();
    let instance = b.element("overlay").unwrap();
    assert!(instance.as_bound().unwrap().binding(PropertyKey::Opacity).is_none());
    assert_eq!(instance.element().props().opacity, 0.8);
}

#[test]
fn deliver_to_removed_handle_is_discarded() {
    let mut b = builder();
    let h = b
        .add_element(
            "boundTimeUnitPianoRoll",
            "roll",
            Some(&json!({"offsetX": {"bind": "scroll", "default": 0}})),
        )
        .unwrap();
    assert!(b.deliver_binding(h, "scroll", 64.0));
    assert_eq!(b.element("roll").unwrap().element().props().offset_x, 64.0);

    b.remove_element("roll").unwrap();
    assert!(!b.deliver_binding(h, "scroll", 10.0));

    let stat = b.add_element("track", "t", None).unwrap();
    assert!(!b.deliver_binding(stat, "scroll", 10.0));
}

#[test]
fn element_bounds_are_anchor_aware() {
    let mut b = builder();
    b.add_element(
        "layer",
        "l",
        Some(&json!({
            "width": 100, "height": 50,
            "anchorX": 0.5, "anchorY": 0.5,
            "offsetX": 200, "offsetY": 200
        })),
    )
    .unwrap();
    assert_eq!(
        b.element_bounds("l").unwrap(),
        Some(Rect::new(150.0, 175.0, 250.0, 225.0))
    );
}

#[test]
fn builders_are_independent() {
    let mut a = builder();
    let mut c = builder();
    a.add_element("layer", "same", None).unwrap();
    c.add_element("layer", "same", None).unwrap();
    a.remove_element("same").unwrap();
    assert!(c.contains("same"));
}

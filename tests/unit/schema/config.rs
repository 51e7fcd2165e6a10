use super::*;

#[test]
fn defaults_cover_every_key() {
    let cfg = ElementConfig::defaults(Size::new(100.0, 50.0));
    assert_eq!(cfg.len(), PropertyKey::ALL.len());
    assert_eq!(cfg.get_bool(PropertyKey::Visible), Some(true));
    assert_eq!(cfg.get_i64(PropertyKey::ZIndex), Some(0));
    assert_eq!(cfg.get_f64(PropertyKey::ScaleX), Some(1.0));
    assert_eq!(cfg.get_f64(PropertyKey::Opacity), Some(1.0));
    assert_eq!(cfg.get_f64(PropertyKey::Width), Some(100.0));
    assert_eq!(cfg.get_f64(PropertyKey::Height), Some(50.0));
    assert_eq!(cfg.get_f64(PropertyKey::AnchorX), Some(0.0));
}

#[test]
fn merge_keeps_unspecified_keys() {
    let before = ElementConfig::defaults(Size::new(10.0, 10.0));
    let mut after = before.clone();
    after.merge([
        (PropertyKey::OffsetX, ConfigValue::Literal(Scalar::Number(5.0))),
        (PropertyKey::Visible, ConfigValue::Literal(Scalar::Bool(false))),
    ]);
    assert_eq!(
        before.changed_keys(&after),
        vec![PropertyKey::Visible, PropertyKey::OffsetX]
    );
    assert_eq!(after.get_f64(PropertyKey::ScaleY), Some(1.0));
}

#[test]
fn bound_values_have_no_literal() {
    let mut cfg = ElementConfig::defaults(Size::new(10.0, 10.0));
    cfg.set(
        PropertyKey::Opacity,
        ConfigValue::Bound(Binding {
            data_key: "velocity".to_owned(),
            default: Scalar::Number(0.5),
        }),
    );
    assert_eq!(cfg.get_f64(PropertyKey::Opacity), None);
    assert_eq!(
        cfg.binding(PropertyKey::Opacity).map(|b| b.data_key.as_str()),
        Some("velocity")
    );
}

#[test]
fn json_uses_camel_case_names() {
    let cfg = ElementConfig::defaults(Size::new(10.0, 20.0));
    let v = cfg.to_json();
    assert_eq!(v["zIndex"], serde_json::json!(0));
    assert_eq!(v["visible"], serde_json::json!(true));
    assert_eq!(v["height"], serde_json::json!(20.0));

    let via_serde = serde_json::to_value(&cfg).unwrap();
    assert_eq!(via_serde, v);
}

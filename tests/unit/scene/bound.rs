use super::*;
use crate::data::provider::{NoData, TimelineData};
use crate::foundation::core::{Rgba8Premul, Size};
use crate::registry::kind::ElementKind;
use crate::scene::content::ElementContent;

fn bound_layer() -> BoundSceneElement {
    BoundSceneElement::new(SceneElement::new(
        "overlay",
        ElementKind::BoundLayer,
        ElementContent::new(Size::new(100.0, 100.0), Rgba8Premul::transparent()),
    ))
}

fn opacity_binding(default: f64) -> Binding {
    Binding {
        data_key: "velocity".to_owned(),
        default: Scalar::Number(default),
    }
}

#[test]
fn bind_applies_default_immediately() {
    let mut b = bound_layer();
    b.bind(PropertyKey::Opacity, opacity_binding(0.25));
    assert_eq!(b.element().props().opacity, 0.25);
    assert_eq!(b.bound_keys().collect::<Vec<_>>(), vec![PropertyKey::Opacity]);
    assert!(!b.is_stale(PropertyKey::Opacity));
}

#[test]
fn resolves_fresh_values() {
    let mut b = bound_layer();
    b.bind(PropertyKey::Opacity, opacity_binding(0.25));
    let mut data = TimelineData::new();
    data.insert("velocity", TimeCursor(0), 0.5);
    data.insert("velocity", TimeCursor(100), 0.75);

    assert!(b.resolve(&data, TimeCursor(50)).is_empty());
    assert_eq!(b.element().props().opacity, 0.5);
    assert!(b.resolve(&data, TimeCursor(120)).is_empty());
    assert_eq!(b.element().props().opacity, 0.75);
    assert_eq!(b.last_resolved(PropertyKey::Opacity), Some(Scalar::Number(0.75)));
}

#[test]
fn missing_data_falls_back_to_default_then_last() {
    let mut b = bound_layer();
    b.bind(PropertyKey::Opacity, opacity_binding(0.25));

    let stale = b.resolve(&NoData, TimeCursor(0));
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].fallback, Scalar::Number(0.25));
    assert_eq!(stale[0].element, "overlay");
    assert!(b.is_stale(PropertyKey::Opacity));

    let mut data = TimelineData::new();
    data.insert("velocity", TimeCursor(10), 0.9);
    assert!(b.resolve(&data, TimeCursor(10)).is_empty());

    let stale = b.resolve(&NoData, TimeCursor(20));
    assert_eq!(stale[0].fallback, Scalar::Number(0.9));
    assert_eq!(b.element().props().opacity, 0.9);
}

#[test]
fn out_of_range_data_is_treated_as_absent() {
    let mut b = bound_layer();
    b.bind(PropertyKey::Opacity, opacity_binding(0.5));
    let provider = |_: &str, _: TimeCursor| Some(Scalar::Number(7.0));
    let stale = b.resolve(&provider, TimeCursor(0));
    assert_eq!(stale.len(), 1);
    assert_eq!(b.element().props().opacity, 0.5);
}

#[test]
fn rebinding_same_key_keeps_cached_value() {
    let mut b = bound_layer();
    b.bind(PropertyKey::Opacity, opacity_binding(0.1));
    assert!(b.deliver("velocity", Scalar::Number(0.6)));
    b.bind(PropertyKey::Opacity, opacity_binding(0.2));
    assert_eq!(b.element().props().opacity, 0.6);

    b.bind(
        PropertyKey::Opacity,
        Binding {
            data_key: "pressure".to_owned(),
            default: Scalar::Number(0.3),
        },
    );
    assert_eq!(b.element().props().opacity, 0.3);
    assert_eq!(b.last_resolved(PropertyKey::Opacity), None);
}

#[test]
fn deliver_routes_by_data_key() {
    let mut b = bound_layer();
    b.bind(
        PropertyKey::OffsetX,
        Binding {
            data_key: "pos".to_owned(),
            default: Scalar::Number(0.0),
        },
    );
    b.bind(
        PropertyKey::OffsetY,
        Binding {
            data_key: "pos".to_owned(),
            default: Scalar::Number(0.0),
        },
    );

    assert!(!b.deliver("other", Scalar::Number(1.0)));
    assert!(b.deliver("pos", Scalar::Int(40)));
    assert_eq!(b.element().props().offset_x, 40.0);
    assert_eq!(b.element().props().offset_y, 40.0);
    assert!(!b.deliver("pos", Scalar::Bool(true)));
}

#[test]
fn unbind_keeps_current_value() {
    let mut b = bound_layer();
    b.bind(PropertyKey::Opacity, opacity_binding(0.4));
    b.unbind(PropertyKey::Opacity);
    assert!(b.binding(PropertyKey::Opacity).is_none());
    assert!(b.resolve(&NoData, TimeCursor(0)).is_empty());
    assert_eq!(b.element().props().opacity, 0.4);
}

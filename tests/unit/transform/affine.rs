use super::*;
use crate::foundation::core::Point;

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn zero_anchor_matches_plain_trs() {
    let a = anchored(Vec2::new(5.0, 7.0), 0.3, Vec2::new(2.0, 0.5), Vec2::ZERO);
    let b = Affine::translate((5.0, 7.0))
        * Affine::rotate(0.3)
        * Affine::scale_non_uniform(2.0, 0.5);
    let p = Point::new(3.0, -4.0);
    assert!(close(a * p, b * p));
}

#[test]
fn anchor_point_is_fixed_under_rotation_and_scale() {
    let anchor = Vec2::new(50.0, 25.0);
    let translate = Vec2::new(150.0, 175.0);
    for rot in [0.0, 0.5, 1.0, std::f64::consts::PI] {
        let a = anchored(translate, rot, Vec2::new(3.0, 0.25), anchor);
        assert!(close(a * anchor.to_point(), Point::new(200.0, 200.0)));
    }
}

#[test]
fn compose_applies_parent_last() {
    let parent = Affine::translate((10.0, 0.0));
    let local = Affine::scale(2.0);
    let p = compose(parent, local) * Point::new(1.0, 1.0);
    assert!(close(p, Point::new(12.0, 2.0)));
}

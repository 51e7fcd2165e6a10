//! Anchor-relative affine helpers.

use crate::foundation::core::{Affine, Vec2};

/// Build the local transform `T(translate) * T(anchor) * R(rot) * S(scale) * T(-anchor)`.
///
/// With `anchor == (0, 0)` this is rotation and scale about the local origin.
#[inline]
pub fn anchored(translate: Vec2, rotation_rad: f64, scale: Vec2, anchor: Vec2) -> Affine {
    Affine::translate(translate)
        * Affine::translate(anchor)
        * Affine::rotate(rotation_rad)
        * Affine::scale_non_uniform(scale.x, scale.y)
        * Affine::translate(-anchor)
}

/// World transform of a child: `parent * local`.
#[inline]
pub fn compose(parent: Affine, local: Affine) -> Affine {
    parent * local
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;

use crate::foundation::core::{Point, Rect, Rgba8Premul, Size};

/// Drawable content of an element: a box in local coordinates with a placeholder fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementContent {
    /// Top-left of the content box in local (untransformed) coordinates.
    pub origin: Point,
    /// Content box size in local pixels.
    pub size: Size,
    /// Placeholder fill color.
    pub fill: Rgba8Premul,
}

impl ElementContent {
    /// Content box at the local origin.
    pub fn new(size: Size, fill: Rgba8Premul) -> Self {
        Self {
            origin: Point::ORIGIN,
            size,
            fill,
        }
    }

    /// Untransformed content bounds.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

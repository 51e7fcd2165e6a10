use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::render::surface::DrawSurface;
use crate::scene::content::ElementContent;
use crate::transform::affine::anchored;
use std::cell::Cell;

/// Node owning a local affine transform, an anchor pivot, optional content, and children.
///
/// The local transform is, in order: translate to `(x, y)`, translate to the anchor,
/// rotate, scale, translate back by the anchor. Children live in this node's untransformed
/// local space. With a zero anchor, rotation and scale happen about the node origin.
#[derive(Clone, Debug)]
pub struct TransformNode {
    x: f64,
    y: f64,
    rotation: f64,
    scale_x: f64,
    scale_y: f64,
    opacity: f64,
    anchor_offset: Vec2,
    content: Option<ElementContent>,
    children: Vec<TransformNode>,
    // Outer `None` means "not computed yet".
    bounds_cache: Cell<Option<Option<Rect>>>,
}

impl Default for TransformNode {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformNode {
    /// Identity node with no content and no children.
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            opacity: 1.0,
            anchor_offset: Vec2::ZERO,
            content: None,
            children: Vec::new(),
            bounds_cache: Cell::new(None),
        }
    }

    /// Identity node drawing `content`.
    pub fn with_content(content: ElementContent) -> Self {
        let mut node = Self::new();
        node.content = Some(content);
        node
    }

    fn invalidate(&self) {
        self.bounds_cache.set(None);
    }

    /// Translation applied before the anchor pivot.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Set the translation.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.invalidate();
    }

    /// Rotation in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Set the rotation about the anchor, in radians.
    pub fn set_rotation(&mut self, radians: f64) {
        self.rotation = radians;
        self.invalidate();
    }

    /// Non-uniform scale.
    pub fn scale(&self) -> Vec2 {
        Vec2::new(self.scale_x, self.scale_y)
    }

    /// Set the scale about the anchor.
    pub fn set_scale(&mut self, sx: f64, sy: f64) {
        self.scale_x = sx;
        self.scale_y = sy;
        self.invalidate();
    }

    /// Group opacity.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Set the group opacity; bounds are unaffected.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    /// Pivot in local untransformed coordinates.
    pub fn anchor_offset(&self) -> Vec2 {
        self.anchor_offset
    }

    /// Set the pivot, in local untransformed coordinates, for rotation and scale.
    pub fn set_anchor_offset(&mut self, ax: f64, ay: f64) {
        self.anchor_offset = Vec2::new(ax, ay);
        self.invalidate();
    }

    /// Own drawable content.
    pub fn content(&self) -> Option<&ElementContent> {
        self.content.as_ref()
    }

    /// Replace own content.
    pub fn set_content(&mut self, content: Option<ElementContent>) {
        self.content = content;
        self.invalidate();
    }

    /// Children in paint order.
    pub fn children(&self) -> &[TransformNode] {
        &self.children
    }

    /// Append a child; it paints after existing children.
    pub fn push_child(&mut self, child: TransformNode) {
        self.children.push(child);
        self.invalidate();
    }

    /// Mutable access to a child; this node's cached bounds are dropped.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut TransformNode> {
        self.invalidate();
        self.children.get_mut(index)
    }

    /// Drop every child.
    pub fn clear_children(&mut self) {
        self.children.clear();
        self.invalidate();
    }

    /// The five-step local transform as a single matrix (local -> parent).
    pub fn local_affine(&self) -> Affine {
        anchored(
            Vec2::new(self.x, self.y),
            self.rotation,
            self.scale(),
            self.anchor_offset,
        )
    }

    /// Union of own content and children bounds, in this node's untransformed space.
    pub fn local_bounds(&self) -> Option<Rect> {
        let own = self.content.as_ref().map(ElementContent::bounds);
        self.children
            .iter()
            .filter_map(TransformNode::bounds)
            .fold(own, |acc, r| Some(acc.map_or(r, |a| a.union(r))))
    }

    /// Anchor-aware AABB in parent space; `None` for a node with nothing to draw.
    pub fn bounds(&self) -> Option<Rect> {
        if let Some(cached) = self.bounds_cache.get() {
            return cached;
        }
        let b = self
            .local_bounds()
            .map(|r| self.local_affine().transform_rect_bbox(r));
        self.bounds_cache.set(Some(b));
        b
    }

    /// Paint this node and its subtree.
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        let a = self.anchor_offset;

        surface.save();
        surface.translate(self.x, self.y);
        surface.translate(a.x, a.y);
        surface.rotate(self.rotation);
        surface.scale(self.scale_x, self.scale_y);
        surface.translate(-a.x, -a.y);

        let layered = self.opacity < 1.0;
        if layered {
            surface.push_opacity(self.opacity as f32);
        }

        if let Some(content) = &self.content {
            surface.fill_rect(content.bounds(), content.fill);
        }
        for child in &self.children {
            child.render(surface);
        }

        if layered {
            surface.pop_opacity();
        }
        surface.restore();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/node.rs"]
mod tests;

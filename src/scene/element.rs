use crate::foundation::core::{Point, Rect};
use crate::registry::kind::ElementKind;
use crate::scene::content::ElementContent;
use crate::scene::node::TransformNode;
use crate::schema::property::PropertyKey;
use crate::schema::value::Scalar;

/// Semantic transform properties of an element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementProps {
    /// Where the anchor point lands in parent space.
    pub offset_x: f64,
    /// Vertical anchor position in parent space.
    pub offset_y: f64,
    /// Horizontal scale about the anchor.
    pub scale_x: f64,
    /// Vertical scale about the anchor.
    pub scale_y: f64,
    /// Radians, about the anchor point.
    pub rotation: f64,
    /// Fractional anchor within the content box, in `[0, 1]`.
    pub anchor_x: f64,
    /// Vertical anchor fraction.
    pub anchor_y: f64,
    /// Element opacity in `[0, 1]`.
    pub opacity: f64,
    /// Invisible elements are not painted, nor are their children.
    pub visible: bool,
    /// Paint order among siblings; higher paints later.
    pub z_index: i32,
}

impl Default for ElementProps {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            anchor_x: 0.0,
            anchor_y: 0.0,
            opacity: 1.0,
            visible: true,
            z_index: 0,
        }
    }
}

/// An element of the scene: semantic properties plus the [`TransformNode`] derived
/// from them.
///
/// The node is re-derived lazily: property changes mark the element dirty and the next
/// [`SceneElement::sync`] rebuilds position and anchor from the current content bounds.
#[derive(Clone, Debug)]
pub struct SceneElement {
    id: String,
    kind: ElementKind,
    props: ElementProps,
    content: ElementContent,
    node: TransformNode,
    dirty: bool,
}

impl SceneElement {
    pub(crate) fn new(id: &str, kind: ElementKind, content: ElementContent) -> Self {
        let mut element = Self {
            id: id.to_owned(),
            kind,
            props: ElementProps::default(),
            content,
            node: TransformNode::with_content(content),
            dirty: true,
        };
        element.sync();
        element
    }

    /// Registry id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Kind the element was created as.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Current semantic properties.
    pub fn props(&self) -> &ElementProps {
        &self.props
    }

    /// Current content box.
    pub fn content(&self) -> &ElementContent {
        &self.content
    }

    /// Return `true` when the node is out of date with the properties.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force the next [`SceneElement::sync`] to re-derive the node.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Untransformed bounds of the element's own content.
    pub fn content_bounds(&self) -> Rect {
        self.content.bounds()
    }

    /// Anchor position in local content coordinates.
    pub fn anchor_pixel(&self) -> Point {
        let b = self.content_bounds();
        Point::new(
            b.x0 + b.width() * self.props.anchor_x,
            b.y0 + b.height() * self.props.anchor_y,
        )
    }

    /// Container position that puts the anchor exactly at `(offset_x, offset_y)`.
    pub fn container_position(&self) -> Point {
        let anchor = self.anchor_pixel();
        Point::new(
            self.props.offset_x - anchor.x,
            self.props.offset_y - anchor.y,
        )
    }

    /// Apply one already-validated property value and mark the element dirty.
    pub(crate) fn apply(&mut self, key: PropertyKey, value: Scalar) {
        let p = &mut self.props;
        match (key, value) {
            (PropertyKey::Visible, Scalar::Bool(v)) => p.visible = v,
            (PropertyKey::ZIndex, Scalar::Int(v)) => {
                p.z_index = i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX });
            }
            (key, value) => {
                let Some(v) = value.as_f64() else {
                    tracing::debug!(element = %self.id, %key, "ignoring non-numeric value");
                    return;
                };
                match key {
                    PropertyKey::OffsetX => p.offset_x = v,
                    PropertyKey::OffsetY => p.offset_y = v,
                    PropertyKey::ScaleX => p.scale_x = v,
                    PropertyKey::ScaleY => p.scale_y = v,
                    PropertyKey::Rotation => p.rotation = v,
                    PropertyKey::AnchorX => p.anchor_x = v.clamp(0.0, 1.0),
                    PropertyKey::AnchorY => p.anchor_y = v.clamp(0.0, 1.0),
                    PropertyKey::Opacity => p.opacity = v,
                    PropertyKey::Width => self.content.size.width = v,
                    PropertyKey::Height => self.content.size.height = v,
                    PropertyKey::Visible | PropertyKey::ZIndex => {
                        tracing::debug!(element = %self.id, %key, "ignoring mistyped value");
                        return;
                    }
                }
            }
        }
        self.dirty = true;
    }

    /// Re-derive the transform node when dirty and return it.
    pub fn sync(&mut self) -> &TransformNode {
        if self.dirty {
            let anchor = self.anchor_pixel();
            let container = self.container_position();
            self.node.set_content(Some(self.content));
            self.node.set_position(container.x, container.y);
            self.node.set_anchor_offset(anchor.x, anchor.y);
            self.node.set_rotation(self.props.rotation);
            self.node.set_scale(self.props.scale_x, self.props.scale_y);
            self.node.set_opacity(self.props.opacity);
            self.dirty = false;
        }
        &self.node
    }

    /// Node as of the last [`SceneElement::sync`].
    pub fn node(&self) -> &TransformNode {
        &self.node
    }

    /// Anchor-aware bounds in parent space.
    pub fn bounds(&mut self) -> Option<Rect> {
        self.sync().bounds()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/element.rs"]
mod tests;

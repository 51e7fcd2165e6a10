use crate::foundation::core::{Affine, Rect, TimeCursor};
use crate::render::surface::DrawSurface;
use crate::scene::bound::StaleBinding;
use crate::scene::node::TransformNode;

/// One element as placed in a frame.
#[derive(Clone, Debug)]
pub struct PlannedElement {
    /// Element id.
    pub id: String,
    /// Paint order key among siblings.
    pub z_index: i32,
    /// Nesting depth; roots are `0`.
    pub depth: usize,
    /// Local content space -> surface space.
    pub world_transform: Affine,
    /// The element's own content box in surface space.
    pub world_bounds: Rect,
    /// Product of the element's and its ancestors' opacity.
    pub opacity: f64,
}

/// An element left out of a frame because its geometry could not be computed.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedElement {
    /// Id of the skipped element.
    pub id: String,
    /// Why its geometry was rejected.
    pub reason: String,
    /// Elements left out with it: the element plus all of its descendants.
    pub subtree_len: usize,
}

/// Per-frame counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Elements painted (including nested ones).
    pub painted: usize,
    /// Elements not painted because they or an ancestor are invisible.
    pub hidden: usize,
    /// Elements skipped for malformed geometry, descendants included.
    pub skipped: usize,
    /// Bound properties that fell back this frame.
    pub stale_bindings: usize,
}

/// Owned snapshot of a scene taken at frame start.
///
/// Painting reads only the plan, so builder mutations made after
/// [`crate::SceneBuilder::prepare_frame`] show up in the next frame.
#[derive(Clone, Debug)]
pub struct FramePlan {
    pub(crate) cursor: TimeCursor,
    pub(crate) roots: Vec<TransformNode>,
    pub(crate) elements: Vec<PlannedElement>,
    pub(crate) skipped: Vec<SkippedElement>,
    pub(crate) stale: Vec<StaleBinding>,
    pub(crate) hidden: usize,
}

impl FramePlan {
    pub(crate) fn new(cursor: TimeCursor) -> Self {
        Self {
            cursor,
            roots: Vec::new(),
            elements: Vec::new(),
            skipped: Vec::new(),
            stale: Vec::new(),
            hidden: 0,
        }
    }

    /// Cursor the plan was prepared at.
    pub fn cursor(&self) -> TimeCursor {
        self.cursor
    }

    /// Composed root nodes in paint order.
    pub fn roots(&self) -> &[TransformNode] {
        &self.roots
    }

    /// Painted elements in paint order (parents before their children).
    pub fn elements(&self) -> &[PlannedElement] {
        &self.elements
    }

    /// Planned entry for `id`, if it was painted.
    pub fn element(&self, id: &str) -> Option<&PlannedElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Ids in the order they paint.
    pub fn paint_order(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|e| e.id.as_str())
    }

    /// Elements left out for malformed geometry.
    pub fn skipped(&self) -> &[SkippedElement] {
        &self.skipped
    }

    /// Bindings that fell back while preparing this frame.
    pub fn stale_bindings(&self) -> &[StaleBinding] {
        &self.stale
    }

    /// Union of all root bounds in surface space.
    pub fn bounds(&self) -> Option<Rect> {
        self.roots
            .iter()
            .filter_map(TransformNode::bounds)
            .reduce(|a, b| a.union(b))
    }

    /// Counters for this frame.
    pub fn stats(&self) -> FrameStats {
        FrameStats {
            painted: self.elements.len(),
            hidden: self.hidden,
            skipped: self.skipped.iter().map(|s| s.subtree_len).sum(),
            stale_bindings: self.stale.len(),
        }
    }

    /// Paint every root onto `surface`.
    pub fn paint(&self, surface: &mut dyn DrawSurface) -> FrameStats {
        for root in &self.roots {
            root.render(surface);
        }
        self.stats()
    }
}

use crate::foundation::core::{Rgba8Premul, Size};
use crate::foundation::error::{SceneError, SceneResult};
use crate::scene::bound::BoundSceneElement;
use crate::scene::content::ElementContent;
use crate::scene::element::SceneElement;
use std::fmt;

/// Closed set of element types the builder can construct.
///
/// Each variant carries its factory ([`ElementKind::create`]) and the per-type parts of
/// its field validator ([`ElementKind::supports_bindings`],
/// [`ElementKind::requires_visible_content`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    /// Horizontal lane hosting clips.
    Track,
    /// Piano roll laid out in pixels.
    PianoRoll,
    /// Piano roll laid out in host time units.
    TimeUnitPianoRoll,
    /// Time-unit piano roll whose properties may be bound to timeline data.
    BoundTimeUnitPianoRoll,
    /// Decorative layer (backgrounds, overlays).
    Layer,
    /// Layer whose properties may be bound to timeline data.
    BoundLayer,
}

impl ElementKind {
    /// Every kind, in declaration order.
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Track,
        ElementKind::PianoRoll,
        ElementKind::TimeUnitPianoRoll,
        ElementKind::BoundTimeUnitPianoRoll,
        ElementKind::Layer,
        ElementKind::BoundLayer,
    ];

    /// Type key used at the host boundary.
    pub fn key(self) -> &'static str {
        match self {
            ElementKind::Track => "track",
            ElementKind::PianoRoll => "pianoRoll",
            ElementKind::TimeUnitPianoRoll => "timeUnitPianoRoll",
            ElementKind::BoundTimeUnitPianoRoll => "boundTimeUnitPianoRoll",
            ElementKind::Layer => "layer",
            ElementKind::BoundLayer => "boundLayer",
        }
    }

    /// Resolve a host type key, failing with [`SceneError::UnknownType`].
    pub fn from_key(key: &str) -> SceneResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.key() == key)
            .ok_or_else(|| SceneError::unknown_type(key))
    }

    /// Return `true` for kinds whose properties may be bound to data.
    pub fn supports_bindings(self) -> bool {
        matches!(
            self,
            ElementKind::BoundTimeUnitPianoRoll | ElementKind::BoundLayer
        )
    }

    /// Tracks and piano rolls need a non-empty content box; layers may collapse to zero.
    pub fn requires_visible_content(self) -> bool {
        !matches!(self, ElementKind::Layer | ElementKind::BoundLayer)
    }

    fn default_content(self) -> ElementContent {
        match self {
            ElementKind::Track => ElementContent::new(
                Size::new(1200.0, 80.0),
                Rgba8Premul::from_straight_rgba(48, 52, 64, 255),
            ),
            ElementKind::PianoRoll
            | ElementKind::TimeUnitPianoRoll
            | ElementKind::BoundTimeUnitPianoRoll => ElementContent::new(
                Size::new(1200.0, 240.0),
                Rgba8Premul::from_straight_rgba(30, 34, 44, 255),
            ),
            ElementKind::Layer | ElementKind::BoundLayer => ElementContent::new(
                Size::new(100.0, 100.0),
                Rgba8Premul::from_straight_rgba(255, 255, 255, 255),
            ),
        }
    }

    /// Construct a fresh instance with default content and properties.
    pub(crate) fn create(self, id: &str) -> ElementInstance {
        let element = SceneElement::new(id, self, self.default_content());
        if self.supports_bindings() {
            ElementInstance::Bound(BoundSceneElement::new(element))
        } else {
            ElementInstance::Static(element)
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Live element owned by a registry entry.
#[derive(Clone, Debug)]
pub enum ElementInstance {
    /// Element with literal properties only.
    Static(SceneElement),
    /// Element that may carry data bindings.
    Bound(BoundSceneElement),
}

impl ElementInstance {
    /// Underlying scene element.
    pub fn element(&self) -> &SceneElement {
        match self {
            ElementInstance::Static(e) => e,
            ElementInstance::Bound(b) => b.element(),
        }
    }

    /// Mutable access to the underlying scene element.
    pub fn element_mut(&mut self) -> &mut SceneElement {
        match self {
            ElementInstance::Static(e) => e,
            ElementInstance::Bound(b) => b.element_mut(),
        }
    }

    /// Bound view, when the instance supports bindings.
    pub fn as_bound(&self) -> Option<&BoundSceneElement> {
        match self {
            ElementInstance::Bound(b) => Some(b),
            ElementInstance::Static(_) => None,
        }
    }

    pub(crate) fn as_bound_mut(&mut self) -> Option<&mut BoundSceneElement> {
        match self {
            ElementInstance::Bound(b) => Some(b),
            ElementInstance::Static(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/kind.rs"]
mod tests;

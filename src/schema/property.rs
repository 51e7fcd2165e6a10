use std::fmt;

/// Value type accepted by a [`PropertyKey`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// JSON boolean.
    Bool,
    /// JSON integer (or integral number).
    Int,
    /// Finite JSON number.
    Number,
}

/// Closed set of configurable element properties.
///
/// Config objects use the camelCase names returned by [`PropertyKey::name`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKey {
    /// `visible`: boolean.
    Visible,
    /// `zIndex`: 32-bit integer.
    ZIndex,
    /// `offsetX`: anchor x in parent space.
    OffsetX,
    /// `offsetY`: anchor y in parent space.
    OffsetY,
    /// `scaleX`.
    ScaleX,
    /// `scaleY`.
    ScaleY,
    /// Radians, applied about the anchor point.
    Rotation,
    /// `anchorX`: fraction in `[0, 1]`.
    AnchorX,
    /// `anchorY`: fraction in `[0, 1]`.
    AnchorY,
    /// `opacity`: in `[0, 1]`.
    Opacity,
    /// Content box width in local pixels.
    Width,
    /// Content box height in local pixels.
    Height,
}

impl PropertyKey {
    /// Every key, in declaration order.
    pub const ALL: [PropertyKey; 12] = [
        PropertyKey::Visible,
        PropertyKey::ZIndex,
        PropertyKey::OffsetX,
        PropertyKey::OffsetY,
        PropertyKey::ScaleX,
        PropertyKey::ScaleY,
        PropertyKey::Rotation,
        PropertyKey::AnchorX,
        PropertyKey::AnchorY,
        PropertyKey::Opacity,
        PropertyKey::Width,
        PropertyKey::Height,
    ];

    /// Name used in JSON config objects.
    pub fn name(self) -> &'static str {
        match self {
            PropertyKey::Visible => "visible",
            PropertyKey::ZIndex => "zIndex",
            PropertyKey::OffsetX => "offsetX",
            PropertyKey::OffsetY => "offsetY",
            PropertyKey::ScaleX => "scaleX",
            PropertyKey::ScaleY => "scaleY",
            PropertyKey::Rotation => "rotation",
            PropertyKey::AnchorX => "anchorX",
            PropertyKey::AnchorY => "anchorY",
            PropertyKey::Opacity => "opacity",
            PropertyKey::Width => "width",
            PropertyKey::Height => "height",
        }
    }

    /// Look a key up by its config name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Value type the key accepts.
    pub fn value_kind(self) -> ValueKind {
        match self {
            PropertyKey::Visible => ValueKind::Bool,
            PropertyKey::ZIndex => ValueKind::Int,
            _ => ValueKind::Number,
        }
    }

    /// Return `true` for keys that change the element's content box.
    pub fn is_content(self) -> bool {
        matches!(self, PropertyKey::Width | PropertyKey::Height)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/property.rs"]
mod tests;

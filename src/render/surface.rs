use crate::foundation::core::{Rect, Rgba8Premul};

/// A 2D drawing surface with a current transform and opacity stack.
///
/// Transform calls post-multiply the current transform (canvas semantics): after
/// `translate(10, 0); rotate(r)` a point is rotated first and translated second.
/// [`crate::TransformNode::render`] issues these calls in a fixed order and brackets
/// them with [`DrawSurface::save`]/[`DrawSurface::restore`].
pub trait DrawSurface {
    /// Push the current transform so it can be restored later.
    fn save(&mut self);

    /// Pop back to the transform active at the matching [`DrawSurface::save`].
    fn restore(&mut self);

    /// Translate by `(dx, dy)`.
    fn translate(&mut self, dx: f64, dy: f64);

    /// Rotate by `radians` about the current origin.
    fn rotate(&mut self, radians: f64);

    /// Scale non-uniformly about the current origin.
    fn scale(&mut self, sx: f64, sy: f64);

    /// Start a group whose contents are composited with `opacity` in `[0, 1]`.
    fn push_opacity(&mut self, opacity: f32);

    /// Close the group opened by the matching [`DrawSurface::push_opacity`].
    fn pop_opacity(&mut self);

    /// Fill `rect`, given in current local coordinates.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul);
}

/// Rendered pixels as RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Return the RGBA8 pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Backend-agnostic surface settings.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct RenderSettings {
    /// If set, surfaces clear to this straight-alpha RGBA8 color before drawing.
    #[serde(default)]
    pub clear_rgba: Option<[u8; 4]>,
}

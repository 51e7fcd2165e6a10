use crate::foundation::core::{Affine, Rect, Rgba8Premul};
use crate::render::surface::DrawSurface;

/// One call issued against a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// See [`DrawSurface::save`].
    Save,
    /// See [`DrawSurface::restore`].
    Restore,
    /// See [`DrawSurface::translate`].
    Translate(f64, f64),
    /// See [`DrawSurface::rotate`].
    Rotate(f64),
    /// See [`DrawSurface::scale`].
    Scale(f64, f64),
    /// See [`DrawSurface::push_opacity`].
    PushOpacity(f32),
    /// See [`DrawSurface::pop_opacity`].
    PopOpacity,
    /// See [`DrawSurface::fill_rect`].
    FillRect(Rect, Rgba8Premul),
}

/// A fill as it lands on the surface.
#[derive(Clone, Debug)]
pub struct RecordedFill {
    /// Rect in the local coordinates it was issued in.
    pub rect: Rect,
    /// Premultiplied fill color.
    pub color: Rgba8Premul,
    /// Surface transform active at the fill (local -> surface).
    pub transform: Affine,
    /// Product of every open opacity group.
    pub opacity: f32,
}

impl RecordedFill {
    /// Axis-aligned bounds of the fill in surface space.
    pub fn surface_bounds(&self) -> Rect {
        self.transform.transform_rect_bbox(self.rect)
    }
}

/// Surface that records every call and tracks the resulting transform.
///
/// Used to inspect draw order and world-space placement without rasterizing.
#[derive(Debug)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    fills: Vec<RecordedFill>,
    current: Affine,
    saved: Vec<Affine>,
    opacity: Vec<f32>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    /// Create an empty recording at the identity transform.
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            fills: Vec::new(),
            current: Affine::IDENTITY,
            saved: Vec::new(),
            opacity: Vec::new(),
        }
    }

    /// Every call issued so far, in order.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Fills issued so far, in paint order.
    pub fn fills(&self) -> &[RecordedFill] {
        &self.fills
    }

    /// Transform currently active on the surface.
    pub fn current_transform(&self) -> Affine {
        self.current
    }

    /// Return `true` when every `save` has a matching `restore` and every opacity group is closed.
    pub fn is_balanced(&self) -> bool {
        self.saved.is_empty() && self.opacity.is_empty()
    }

    /// Forget every recorded call and reset the transform.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn effective_opacity(&self) -> f32 {
        self.opacity.iter().product()
    }
}

impl DrawSurface for RecordingSurface {
    fn save(&mut self) {
        self.ops.push(SurfaceOp::Save);
        self.saved.push(self.current);
    }

    fn restore(&mut self) {
        self.ops.push(SurfaceOp::Restore);
        // Unbalanced restores keep the current transform.
        if let Some(t) = self.saved.pop() {
            self.current = t;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.ops.push(SurfaceOp::Translate(dx, dy));
        self.current = self.current * Affine::translate((dx, dy));
    }

    fn rotate(&mut self, radians: f64) {
        self.ops.push(SurfaceOp::Rotate(radians));
        self.current = self.current * Affine::rotate(radians);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.ops.push(SurfaceOp::Scale(sx, sy));
        self.current = self.current * Affine::scale_non_uniform(sx, sy);
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.ops.push(SurfaceOp::PushOpacity(opacity));
        self.opacity.push(opacity);
    }

    fn pop_opacity(&mut self) {
        self.ops.push(SurfaceOp::PopOpacity);
        self.opacity.pop();
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) {
        self.ops.push(SurfaceOp::FillRect(rect, color));
        self.fills.push(RecordedFill {
            rect,
            color,
            transform: self.current,
            opacity: self.effective_opacity(),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;

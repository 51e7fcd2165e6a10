use crate::foundation::core::{Affine, Rect, Rgba8Premul};
use crate::foundation::error::{SceneError, SceneResult};
use crate::render::surface::{DrawSurface, FrameRGBA, RenderSettings};

/// CPU raster surface backed by `vello_cpu`.
///
/// Calls accumulate into a `vello_cpu::RenderContext`; [`CpuSurface::finish`] rasterizes
/// them into a premultiplied RGBA8 frame.
pub struct CpuSurface {
    width: u16,
    height: u16,
    settings: RenderSettings,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    current: Affine,
    saved: Vec<Affine>,
    open_layers: usize,
}

impl CpuSurface {
    /// Create a surface; dimensions must be in `1..=u16::MAX`.
    pub fn new(width: u32, height: u32, settings: RenderSettings) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::render("surface width/height must be > 0"));
        }
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| SceneError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| SceneError::render("surface height exceeds u16"))?;

        let mut surface = Self {
            width: width_u16,
            height: height_u16,
            settings,
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
            current: Affine::IDENTITY,
            saved: Vec::new(),
            open_layers: 0,
        };
        // The background goes in as the first fill so every later draw composites over it.
        if let Some([r, g, b, a]) = surface.settings.clear_rgba {
            let full = Rect::new(0.0, 0.0, f64::from(width_u16), f64::from(height_u16));
            surface.fill_rect(full, Rgba8Premul::from_straight_rgba(r, g, b, a));
        }
        Ok(surface)
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Rasterize everything drawn so far and read back the frame.
    pub fn finish(mut self) -> FrameRGBA {
        while self.open_layers > 0 {
            self.ctx.pop_layer();
            self.open_layers -= 1;
        }

        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);

        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);

        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

impl DrawSurface for CpuSurface {
    fn save(&mut self) {
        self.saved.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.current = t;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.current = self.current * Affine::translate((dx, dy));
    }

    fn rotate(&mut self, radians: f64) {
        self.current = self.current * Affine::rotate(radians);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.current = self.current * Affine::scale_non_uniform(sx, sy);
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.ctx.push_opacity_layer(opacity.clamp(0.0, 1.0));
        self.open_layers += 1;
    }

    fn pop_opacity(&mut self) {
        if self.open_layers > 0 {
            self.ctx.pop_layer();
            self.open_layers -= 1;
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(self.current));
        let [r, g, b, a] = unpremul_rgba8(color);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }
}

// Paint colors are straight alpha.
fn unpremul_rgba8(c: Rgba8Premul) -> [u8; 4] {
    if c.a == 0 {
        return [0, 0, 0, 0];
    }
    let a = u16::from(c.a);
    let un = |v: u8| -> u8 { ((u16::from(v) * 255 + a / 2) / a).min(255) as u8 };
    [un(c.r), un(c.g), un(c.b), c.a]
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

use kurbo::Shape;
use rayon::prelude::*;

use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::foundation::error::DotwaveResult;
use crate::render::blend::{BlendMode, composite_over_rgba8_premul};

/// Rows per rayon task for shaded fills.
const SHADE_ROWS_PER_TASK: usize = 16;

/// Blend-mode-aware software drawing surface.
///
/// Every draw goes into a transparent scratch layer first; the layer is then composited onto the
/// frame with its own blend mode and opacity, so blend state never leaks between layers.
pub(crate) struct Surface {
    canvas: Canvas,
    frame: vello_cpu::Pixmap,
    layer: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("canvas", &self.canvas)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Allocate a transparent surface; edges are clamped into `1..=Canvas::MAX_EDGE`.
    pub(crate) fn new(canvas: Canvas) -> Self {
        let canvas = Canvas::clamped(canvas.width, canvas.height);
        let w = u16::try_from(canvas.width).unwrap_or(u16::MAX);
        let h = u16::try_from(canvas.height).unwrap_or(u16::MAX);
        Self {
            canvas,
            frame: vello_cpu::Pixmap::new(w, h),
            layer: vello_cpu::Pixmap::new(w, h),
            ctx: None,
        }
    }

    pub(crate) fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Clear the frame to transparent.
    pub(crate) fn clear(&mut self) {
        self.frame.data_as_u8_slice_mut().fill(0);
    }

    /// Premultiplied RGBA8 bytes of the frame.
    pub(crate) fn frame_bytes(&self) -> &[u8] {
        self.frame.data_as_u8_slice()
    }

    /// Draw vector content into a fresh layer and composite it onto the frame.
    pub(crate) fn draw_layer<F>(&mut self, blend: BlendMode, opacity: f64, draw: F) -> DotwaveResult<()>
    where
        F: FnOnce(&mut LayerPainter<'_>),
    {
        let w = self.frame.width();
        let h = self.frame.height();
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        draw(&mut LayerPainter { ctx: &mut ctx });

        ctx.flush();
        self.layer.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(&mut self.layer);
        self.ctx = Some(ctx);

        self.composite_layer(blend, opacity)
    }

    /// Fill a layer per pixel and composite it onto the frame.
    ///
    /// `shade(x, y)` receives pixel-center coordinates and returns a premultiplied RGBA8 value.
    /// Rows are shaded in parallel; the result does not depend on scheduling.
    pub(crate) fn shade_layer<F>(&mut self, blend: BlendMode, opacity: f64, shade: F) -> DotwaveResult<()>
    where
        F: Fn(f64, f64) -> [u8; 4] + Sync,
    {
        let row_bytes = (self.canvas.width as usize) * 4;
        if row_bytes == 0 {
            return Ok(());
        }
        self.layer
            .data_as_u8_slice_mut()
            .par_chunks_mut(row_bytes * SHADE_ROWS_PER_TASK)
            .enumerate()
            .for_each(|(chunk_i, rows)| {
                for (row_i, row) in rows.chunks_exact_mut(row_bytes).enumerate() {
                    let y = (chunk_i * SHADE_ROWS_PER_TASK + row_i) as f64 + 0.5;
                    for (x, px) in row.chunks_exact_mut(4).enumerate() {
                        px.copy_from_slice(&shade(x as f64 + 0.5, y));
                    }
                }
            });

        self.composite_layer(blend, opacity)
    }

    fn composite_layer(&mut self, blend: BlendMode, opacity: f64) -> DotwaveResult<()> {
        composite_over_rgba8_premul(
            self.frame.data_as_u8_slice_mut(),
            self.layer.data_as_u8_slice(),
            opacity.clamp(0.0, 1.0) as f32,
            blend,
        )
    }
}

/// Vector drawing operations available inside [`Surface::draw_layer`].
pub(crate) struct LayerPainter<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
}

impl LayerPainter<'_> {
    fn set_color(&mut self, color: Rgba8) {
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    pub(crate) fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.set_color(color);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    /// Anti-aliased filled circle. Non-positive radii draw nothing.
    pub(crate) fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        if !(radius > 0.0) {
            return;
        }
        self.set_color(color);
        let circle = kurbo::Circle::new(center, radius);
        let mut p = vello_cpu::kurbo::BezPath::new();
        for el in circle.path_elements(0.1) {
            p.push(el);
        }
        self.ctx.fill_path(&p);
    }

    /// Stroke `rect` with a centered line of `width`, square corners.
    pub(crate) fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba8) {
        if !(width > 0.0) {
            return;
        }
        let half = width / 2.0;
        let outer = rect.inflate(half, half);
        let inner = rect.inflate(-half, -half);
        if inner.width() <= 0.0 || inner.height() <= 0.0 {
            self.fill_rect(outer, color);
            return;
        }

        // Outer contour clockwise, inner counter-clockwise: the nonzero rule leaves a hole.
        let mut p = vello_cpu::kurbo::BezPath::new();
        p.move_to((outer.x0, outer.y0));
        p.line_to((outer.x1, outer.y0));
        p.line_to((outer.x1, outer.y1));
        p.line_to((outer.x0, outer.y1));
        p.close_path();
        p.move_to((inner.x0, inner.y0));
        p.line_to((inner.x0, inner.y1));
        p.line_to((inner.x1, inner.y1));
        p.line_to((inner.x1, inner.y0));
        p.close_path();

        self.set_color(color);
        self.ctx.fill_path(&p);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;

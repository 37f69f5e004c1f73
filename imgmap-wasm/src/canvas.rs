use std::f64::consts::PI;

use imgmap::{Paint, Point, Size, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// [`Surface`] over a 2D canvas context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<CanvasSurface, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(CanvasSurface { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn apply(&self, paint: &Paint<'_>) {
        self.ctx.set_fill_style_str(paint.fill);
        self.ctx.set_stroke_style_str(paint.stroke);
        self.ctx.set_line_width(paint.line_width);
    }

    fn finish_path(&self) {
        self.ctx.close_path();
        self.ctx.stroke();
        self.ctx.fill();
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        Size::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn resize(&mut self, size: Size) {
        self.canvas.set_width(size.width.max(0.0).round() as u32);
        self.canvas.set_height(size.height.max(0.0).round() as u32);
    }

    fn clear(&mut self) {
        let Size { width, height } = self.size();
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint<'_>) {
        self.apply(paint);
        self.ctx.stroke_rect(x, y, w, h);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, paint: &Paint<'_>) {
        self.apply(paint);
        self.ctx.begin_path();
        // Negative radius throws in the browser; nothing to draw then.
        if self.ctx.arc(cx, cy, r, 0.0, 2.0 * PI).is_err() {
            return;
        }
        self.finish_path();
    }

    fn polygon(&mut self, points: &[Point], paint: &Paint<'_>) {
        let Some((first, rest)) = points.split_first() else { return };
        self.apply(paint);
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.finish_path();
    }
}

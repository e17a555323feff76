//! `Surface2D` over a browser `<canvas>` 2D context.

use std::f64::consts::TAU;

use glam::Vec2;
use shock_engine::{Rgba, StrokeStyle, Surface2D, SurfaceSize};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// A canvas element and its 2D context.
///
/// Drawing calls that can fail in the browser keep the first failure; the
/// runner collects it after the frame with [`take_fault`](Self::take_fault).
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: SurfaceSize,
    opacity: f32,
    fault: Option<JsValue>,
}

impl CanvasSurface {
    /// Look up `<canvas id="...">` and take its 2D context.
    pub fn from_id(document: &Document, id: &str) -> Result<Self, JsValue> {
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", id)))?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d canvas context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let size = SurfaceSize::new(canvas.width() as f32, canvas.height() as f32);
        Ok(Self {
            canvas,
            ctx,
            size,
            opacity: 1.0,
            fault: None,
        })
    }

    /// The first drawing failure since the last call, if any.
    pub fn take_fault(&mut self) -> Result<(), JsValue> {
        match self.fault.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn note(&mut self, result: Result<(), JsValue>) {
        if let Err(err) = result {
            self.fault.get_or_insert(err);
        }
    }

    fn apply_stroke(&self, style: &StrokeStyle) {
        self.ctx.set_stroke_style_str(&style.color.to_css());
        self.ctx.set_line_width(style.line_width as f64);
        match style.glow {
            Some(glow) => {
                self.ctx.set_shadow_blur(glow.blur as f64);
                self.ctx.set_shadow_color(&glow.color.to_css());
            }
            None => self.ctx.set_shadow_blur(0.0),
        }
    }
}

impl Surface2D for CanvasSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.size = SurfaceSize::new(width, height);
        // Setting the backing store size also clears the canvas.
        self.canvas.set_width(self.size.width() as u32);
        self.canvas.set_height(self.size.height() as u32);
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.width() as f64, self.size.height() as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ctx.set_shadow_blur(0.0);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        let arc = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
        self.note(arc);
        self.ctx.fill();
    }

    fn stroke_polyline(&mut self, points: &[Vec2], style: &StrokeStyle) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.apply_stroke(style);
        self.ctx.stroke();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, style: &StrokeStyle) {
        self.ctx.begin_path();
        let arc = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
        self.note(arc);
        self.apply_stroke(style);
        self.ctx.stroke();
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
        let result = self
            .canvas
            .style()
            .set_property("opacity", &self.opacity.to_string());
        self.note(result);
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }
}

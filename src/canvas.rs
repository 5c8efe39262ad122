//! Canvas 2D surface and `setInterval` scheduler for the browser build.

use std::f64::consts::PI;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, TouchEvent, Window};

use crate::model::{Color, ContactPoint, TouchId};
use crate::render::Surface;
use crate::state::TickScheduler;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pixel_ratio: f64,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, pixel_ratio: f64) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            pixel_ratio,
        })
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
    }

    fn fill_all(&mut self, color: Color) {
        self.ctx.set_fill_style_str(color.css());
        self.ctx.fill_rect(0.0, 0.0, self.width(), self.height());
    }

    fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(color.css());
        self.ctx.arc(x, y, radius, 0.0, 2.0 * PI).ok();
        self.ctx.fill();
    }

    fn stroke_arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start: f64,
        end: f64,
        line_width: f64,
        color: Color,
    ) {
        self.ctx.begin_path();
        self.ctx.set_line_width(line_width);
        self.ctx.set_stroke_style_str(color.css());
        self.ctx.arc(x, y, radius, start, end).ok();
        self.ctx.stroke();
    }
}

/// Repeating `setInterval` driving one callback.
pub struct IntervalScheduler {
    window: Window,
    callback: Closure<dyn FnMut()>,
}

impl IntervalScheduler {
    pub fn new(window: Window, callback: Closure<dyn FnMut()>) -> Self {
        Self { window, callback }
    }
}

impl TickScheduler for IntervalScheduler {
    type Handle = i32;

    fn schedule(&mut self, period_ms: i32) -> Option<i32> {
        self.window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                self.callback.as_ref().unchecked_ref(),
                period_ms,
            )
            .ok()
    }

    fn cancel(&mut self, handle: i32) {
        self.window.clear_interval_with_handle(handle);
    }
}

/// Changed touches of `event` in canvas coordinates.
pub fn changed_points(event: &TouchEvent, canvas: &HtmlCanvasElement) -> Vec<ContactPoint> {
    let rect = canvas.get_bounding_client_rect();
    let list = event.changed_touches();
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| ContactPoint {
            id: t.identifier(),
            x: t.client_x() as f64 - rect.left(),
            y: t.client_y() as f64 - rect.top(),
        })
        .collect()
}

pub fn changed_ids(event: &TouchEvent) -> Vec<TouchId> {
    let list = event.changed_touches();
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| t.identifier())
        .collect()
}

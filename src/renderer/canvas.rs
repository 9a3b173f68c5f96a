//! Canvas 2D backend

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Surface, TextStyle};
use crate::sim::{Extent, Rect};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprite: HtmlImageElement,
}

impl CanvasSurface {
    /// Wrap a canvas and start loading the player sprite
    pub fn new(canvas: HtmlCanvasElement, sprite_path: &str) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let sprite = HtmlImageElement::new()?;
        {
            let path = sprite_path.to_string();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                log::warn!("Failed to load sprite '{}', player will be invisible", path);
            });
            sprite.set_onerror(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }
        sprite.set_src(sprite_path);

        Ok(Self {
            canvas,
            ctx,
            sprite,
        })
    }

    /// Set the backing store size in pixels
    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl Surface for CanvasSurface {
    fn extent(&self) -> Extent {
        Extent::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        let Extent { width, height } = self.extent();
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            rect.x() as f64,
            rect.y() as f64,
            rect.width() as f64,
            rect.height() as f64,
        );
    }

    fn draw_sprite(&mut self, rect: Rect) {
        // Broken or pending images have no natural size
        if !self.sprite.complete() || self.sprite.natural_width() == 0 {
            return;
        }
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &self.sprite,
            rect.x() as f64,
            rect.y() as f64,
            rect.width() as f64,
            rect.height() as f64,
        );
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.ctx.set_font(style.font);
        self.ctx.set_text_align(style.align.as_str());
        self.ctx.set_fill_style_str(style.color);
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}

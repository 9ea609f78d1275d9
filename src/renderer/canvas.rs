//! Canvas2D painter (WASM only)

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::quad::{Quad, SHAPE_CIRCLE, SHAPE_ROUNDED, colors};
use super::scene::{Hud, Overlay, Scene};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

fn css(color: [f32; 4]) -> String {
    format!(
        "rgba({},{},{},{:.3})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        color[3].clamp(0.0, 1.0)
    )
}

/// Paints scenes onto a `<canvas>`
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        log::info!("Canvas ready ({}x{})", CANVAS_WIDTH, CANVAS_HEIGHT);
        Ok(Self { ctx })
    }

    pub fn paint(&self, scene: &Scene) -> Result<(), JsValue> {
        let (w, h) = (f64::from(CANVAS_WIDTH), f64::from(CANVAS_HEIGHT));
        self.ctx.set_fill_style_str("#000");
        self.ctx.fill_rect(0.0, 0.0, w, h);

        self.ctx.save();
        self.ctx
            .translate(f64::from(scene.offset.x), f64::from(scene.offset.y))?;
        for quad in &scene.quads {
            self.quad(quad)?;
        }
        self.ctx.restore();

        self.hud(&scene.hud)?;
        if let Some(overlay) = scene.overlay {
            self.overlay(overlay, w, h)?;
        }
        Ok(())
    }

    fn quad(&self, q: &Quad) -> Result<(), JsValue> {
        let [x, y] = q.position.map(f64::from);
        let [w, h] = q.size.map(f64::from);
        self.ctx.set_fill_style_str(&css(q.color));
        match q.shape {
            SHAPE_CIRCLE => {
                self.ctx.begin_path();
                self.ctx.arc(x, y, w.min(h) / 2.0, 0.0, TAU)?;
                self.ctx.fill();
            }
            SHAPE_ROUNDED => {
                let (l, t) = (x - w / 2.0, y - h / 2.0);
                let r = w.min(h) * 0.25;
                self.ctx.begin_path();
                self.ctx.move_to(l + r, t);
                self.ctx.arc_to(l + w, t, l + w, t + h, r)?;
                self.ctx.arc_to(l + w, t + h, l, t + h, r)?;
                self.ctx.arc_to(l, t + h, l, t, r)?;
                self.ctx.arc_to(l, t, l + w, t, r)?;
                self.ctx.close_path();
                self.ctx.fill();
            }
            _ => self.ctx.fill_rect(x - w / 2.0, y - h / 2.0, w, h),
        }
        Ok(())
    }

    fn hud(&self, hud: &Hud) -> Result<(), JsValue> {
        self.ctx.set_font("bold 14px monospace");
        self.ctx.set_text_align("left");
        self.ctx.set_fill_style_str("rgba(255,255,255,0.85)");
        self.ctx
            .fill_text(&format!("SCORE {}  LEN {}", hud.score, hud.length), 8.0, 18.0)?;

        self.ctx.set_text_align("right");
        let right = f64::from(CANVAS_WIDTH) - 8.0;
        self.ctx.fill_text(&format!("BEST {}", hud.best), right, 18.0)?;
        if let Some(combo) = hud.combo {
            self.ctx.set_fill_style_str(&css(colors::GOLDEN));
            self.ctx
                .fill_text(&format!("COMBO {} x{}", combo, hud.multiplier), right, 36.0)?;
        }
        Ok(())
    }

    fn overlay(&self, overlay: Overlay, w: f64, h: f64) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(&css(colors::OVERLAY));
        self.ctx.fill_rect(0.0, 0.0, w, h);
        self.ctx.set_text_align("center");
        self.ctx.set_fill_style_str("#fff");

        let (cx, cy) = (w / 2.0, h / 2.0);
        match overlay {
            Overlay::Title => {
                self.ctx.set_font("bold 32px monospace");
                self.ctx.fill_text("NEON SNAKE", cx, cy - 10.0)?;
                self.ctx.set_font("14px monospace");
                self.ctx.fill_text("Arrows / WASD / swipe to start", cx, cy + 20.0)?;
            }
            Overlay::Paused => {
                self.ctx.set_font("bold 28px monospace");
                self.ctx.fill_text("PAUSED", cx, cy)?;
                self.ctx.set_font("14px monospace");
                self.ctx.fill_text("Space or tap to resume", cx, cy + 26.0)?;
            }
            Overlay::GameOver {
                score,
                best,
                new_best,
            } => {
                self.ctx.set_font("bold 28px monospace");
                self.ctx.fill_text("GAME OVER", cx, cy - 24.0)?;
                self.ctx.set_font("16px monospace");
                self.ctx
                    .fill_text(&format!("Score {}   Best {}", score, best), cx, cy + 4.0)?;
                if new_best {
                    self.ctx.set_fill_style_str(&css(colors::GOLDEN));
                    self.ctx.fill_text("NEW BEST!", cx, cy + 28.0)?;
                    self.ctx.set_fill_style_str("#fff");
                }
                self.ctx.set_font("14px monospace");
                self.ctx.fill_text("Space or tap to restart", cx, cy + 52.0)?;
            }
        }
        Ok(())
    }
}

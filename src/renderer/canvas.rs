//! 2D canvas view (web only)

use std::f64::consts::TAU;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::View;
use crate::sim::{Actor, ActorKind, World};

const CANVAS_ID: &str = "game";
const BACKGROUND: &str = "black";
const SCORE_FONT: &str = "16px monospace";

/// Draws each cell as a `scaling`-pixel square on a canvas it owns
pub struct CanvasView {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    scaling: u32,
}

impl CanvasView {
    /// Create the canvas and append it to the document body
    pub fn new(scaling: u32) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_id(CANVAS_ID);
        body.append_child(&canvas)?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        Ok(Self {
            canvas,
            ctx,
            scaling,
        })
    }
}

impl View for CanvasView {
    fn display(&mut self, world: &World) {
        let s = self.scaling as f64;
        self.canvas.set_width(world.width() as u32 * self.scaling);
        self.canvas.set_height(world.height() as u32 * self.scaling);

        let ctx = &self.ctx;
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );

        for actor in world.actors() {
            ctx.set_fill_style_str(actor.color().as_css());
            for part in actor.parts() {
                let (x, y) = (part.x as f64 * s, part.y as f64 * s);
                if actor.kind() == ActorKind::Ball {
                    let r = s / 2.0;
                    ctx.begin_path();
                    let _ = ctx.arc(x + r, y + r, r, 0.0, TAU);
                    ctx.fill();
                } else {
                    ctx.fill_rect(x, y, s, s);
                }
            }
        }

        let score = world.score();
        ctx.set_fill_style_str("white");
        ctx.set_font(SCORE_FONT);
        ctx.set_text_align("center");
        let _ = ctx.fill_text(
            &format!("{} : {}", score.left, score.right),
            self.canvas.width() as f64 / 2.0,
            s * 3.0,
        );
    }

    fn dispose(&mut self) {
        self.canvas.remove();
        log::debug!("Canvas removed");
    }
}

/// Wire3D Web - wireframe renderer on an HTML canvas
///
/// JavaScript owns the timer: call `tick()` every `tick_ms()` milliseconds
/// and clear the interval once `tick()` returns false or after `stop()`.
use std::fmt::Display;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wire3d_core::{LineStore, Rgb, Scene, SceneConfig, SolidKind};

const LINE_WIDTH: f64 = 2.0;

fn to_js(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebApp {
    scene: Scene,
    lines: LineStore,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

#[wasm_bindgen]
impl WebApp {
    /// Attach to the canvas with id `canvas_id`, using its current size
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebApp, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element '{canvas_id}'")))?
            .dyn_into::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let scene = Scene::new(SceneConfig {
            width: canvas.width(),
            height: canvas.height(),
            ..SceneConfig::default()
        })
        .map_err(to_js)?;

        Ok(WebApp {
            scene,
            lines: LineStore::new(),
            canvas,
            context,
        })
    }

    /// Resize the canvas backing store and the projection
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.scene.resize(width, height).map_err(to_js)?;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        Ok(())
    }

    pub fn set_slider_x(&mut self, position: f64) {
        self.scene.set_slider_x(position);
    }

    pub fn set_slider_y(&mut self, position: f64) {
        self.scene.set_slider_y(position);
    }

    /// Show the solid named `name`, e.g. `"icosahedron"`
    pub fn select(&mut self, name: &str) -> Result<(), JsValue> {
        let kind: SolidKind = name.parse().map_err(to_js)?;
        self.scene.select(kind, &mut self.lines);
        Ok(())
    }

    pub fn tick_ms(&self) -> u32 {
        self.scene.tick_duration().as_millis() as u32
    }

    /// Compute and paint one frame; false once stopped
    pub fn tick(&mut self) -> Result<bool, JsValue> {
        if !self.scene.tick(&mut self.lines).map_err(to_js)? {
            return Ok(false);
        }
        self.paint();
        Ok(true)
    }

    pub fn stop(&mut self) {
        self.scene.stop();
    }

    fn paint(&self) {
        let ctx = &self.context;
        let viewport = self.scene.viewport();
        ctx.set_fill_style(&JsValue::from_str(&Rgb::WHITE.to_string()));
        ctx.fill_rect(0.0, 0.0, viewport.width() as f64, viewport.height() as f64);
        ctx.set_line_width(LINE_WIDTH);

        for line in self.lines.lines() {
            ctx.begin_path();
            ctx.set_stroke_style(&JsValue::from_str(&line.color.to_string()));
            ctx.move_to(line.from[0], line.from[1]);
            ctx.line_to(line.to[0], line.to[1]);
            ctx.stroke();
        }
    }
}

// Browser-only checks (wasm-pack test --headless --firefox).
#![cfg(target_arch = "wasm32")]

use prize_wheel::wheel::render::WheelRenderer;
use prize_wheel::{WHEEL_SECTIONS, Wheel};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

wasm_bindgen_test_configure!(run_in_browser);

fn renderer() -> WheelRenderer {
    let doc = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = doc.create_element("canvas").unwrap().dyn_into().unwrap();
    canvas.set_width(300);
    canvas.set_height(300);
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d").unwrap().unwrap().dyn_into().unwrap();
    WheelRenderer::new(canvas, ctx)
}

#[wasm_bindgen_test]
fn draws_resting_and_rotated_wheel() {
    let wheel = Wheel::new(WHEEL_SECTIONS).unwrap();
    let r = renderer();
    r.draw_wheel(&wheel).unwrap();
    r.draw_rotated_wheel(&wheel, 1.234).unwrap();
}

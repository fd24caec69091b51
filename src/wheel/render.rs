//! Canvas drawing for the wheel. Pure 2D output; no state beyond the context.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Wheel;

/// Gap between the wheel rim and the canvas edge.
const RIM_INSET: f64 = 5.0;
const LABEL_INSET: f64 = 10.0;
const LABEL_FONT: &str = "16px Arial";

/// Start / end angle (radians) of wedge `index` on an unrotated wheel.
pub fn section_arc(index: usize, sections: usize) -> (f64, f64) {
    let n = sections.max(1) as f64;
    (index as f64 * TAU / n, (index + 1) as f64 * TAU / n)
}

pub struct WheelRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WheelRenderer {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    fn center(&self) -> (f64, f64) {
        (
            self.canvas.width() as f64 / 2.0,
            self.canvas.height() as f64 / 2.0,
        )
    }

    /// Draws every wedge with its label, unrotated.
    pub fn draw_wheel(&self, wheel: &Wheel) -> Result<(), JsValue> {
        let (cx, cy) = self.center();
        let radius = (cx.min(cy) - RIM_INSET).max(0.0);
        let n = wheel.len();

        for (i, section) in wheel.sections().iter().enumerate() {
            let (start, end) = section_arc(i, n);

            self.ctx.begin_path();
            self.ctx.move_to(cx, cy);
            self.ctx.arc(cx, cy, radius, start, end)?;
            self.ctx.close_path();
            self.ctx.set_fill_style_str(section.color);
            self.ctx.fill();
            self.ctx.stroke();

            // Label reads outward along the wedge bisector, right-aligned at the rim.
            self.ctx.save();
            self.ctx.translate(cx, cy)?;
            self.ctx.rotate(start + (end - start) / 2.0)?;
            self.ctx.set_text_align("right");
            self.ctx.set_fill_style_str("white");
            self.ctx.set_font(LABEL_FONT);
            self.ctx.fill_text(section.label, radius - LABEL_INSET, 10.0)?;
            self.ctx.restore();
        }
        Ok(())
    }

    /// Clears the canvas and draws the wheel turned by `angle` about its center.
    pub fn draw_rotated_wheel(&self, wheel: &Wheel, angle: f64) -> Result<(), JsValue> {
        let (cx, cy) = self.center();
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        self.ctx.save();
        let drawn = self
            .ctx
            .translate(cx, cy)
            .and_then(|_| self.ctx.rotate(angle))
            .and_then(|_| self.ctx.translate(-cx, -cy))
            .and_then(|_| self.draw_wheel(wheel));
        self.ctx.restore();
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::resolve_outcome;

    #[test]
    fn test_section_arcs_tile_the_circle() {
        let n = 8;
        let mut prev_end = 0.0;
        for i in 0..n {
            let (start, end) = section_arc(i, n);
            assert!((start - prev_end).abs() < 1e-12);
            assert!((end - start - TAU / 8.0).abs() < 1e-12);
            prev_end = end;
        }
        assert!((prev_end - TAU).abs() < 1e-12);
    }

    // Index of the unrotated wedge that sits under the pointer (angle 0) once
    // the wheel is turned by `angle`.
    fn wedge_under_pointer(angle: f64, n: usize) -> usize {
        let at = (-angle).rem_euclid(TAU);
        (0..n)
            .find(|&i| {
                let (start, end) = section_arc(i, n);
                start <= at && at < end
            })
            .unwrap_or(n - 1)
    }

    #[test]
    fn test_drawn_wedge_under_pointer_matches_resolved_outcome() {
        for n in [2, 4, 6, 8] {
            let samples = 16 * n;
            for j in 0..samples {
                // Sample one full turn, half a step away from wedge edges, three turns in.
                let angle = 3.0 * TAU + (j as f64 + 0.5) * TAU / samples as f64;
                assert_eq!(
                    wedge_under_pointer(angle, n),
                    resolve_outcome(angle, n),
                    "n={} angle={}",
                    n,
                    angle
                );
            }
        }
    }
}

//! Gate + engine wiring, independent of the DOM.
//!
//! The browser shell forwards button clicks to [`SpinController::trigger`] and
//! animation frames to [`SpinController::frame`]; everything visible goes
//! through a [`Surface`], which tests replace with a recorder.

use crate::gate::{EligibilityGate, Rejection, StaffId};
use crate::storage::KeyValueStore;
use crate::wheel::{EngineFrame, SpinRng, Wheel, WheelEngine};

/// The page elements the controller writes to.
pub trait Surface {
    fn show_message(&mut self, text: &str);
    fn set_trigger_enabled(&mut self, enabled: bool);
    fn clear_input(&mut self);
    fn render(&mut self, wheel: &Wheel, angle: f64);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A spin is already running; the gate was not consulted.
    Ignored,
    Rejected(Rejection),
    Started(StaffId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Nothing to animate; the frame loop should stop.
    Idle,
    Continue,
    Stopped(&'static str),
}

pub fn welcome_message(id: &StaffId) -> String {
    format!("Good luck, {}!", id)
}

pub fn result_message(label: &str) -> String {
    format!("The wheel stopped at {}!", label)
}

pub struct SpinController<S: KeyValueStore, R: SpinRng> {
    gate: EligibilityGate<S>,
    engine: WheelEngine,
    rng: R,
}

impl<S: KeyValueStore, R: SpinRng> SpinController<S, R> {
    pub fn new(gate: EligibilityGate<S>, engine: WheelEngine, rng: R) -> Self {
        Self { gate, engine, rng }
    }

    pub fn gate(&self) -> &EligibilityGate<S> {
        &self.gate
    }

    pub fn engine(&self) -> &WheelEngine {
        &self.engine
    }

    pub fn is_spinning(&self) -> bool {
        self.engine.is_spinning()
    }

    /// Draws the wheel at its resting angle.
    pub fn redraw(&self, surface: &mut impl Surface) {
        surface.render(self.engine.wheel(), self.engine.current_angle());
    }

    pub fn trigger(&mut self, raw: &str, surface: &mut impl Surface) -> TriggerOutcome {
        if self.engine.is_spinning() {
            return TriggerOutcome::Ignored;
        }
        let id = match self.gate.submit(raw) {
            Ok(id) => id,
            Err(rejection) => {
                surface.show_message(&rejection.to_string());
                return TriggerOutcome::Rejected(rejection);
            }
        };
        surface.clear_input();
        surface.show_message(&welcome_message(&id));
        if self.engine.spin(&mut self.rng).is_some() {
            surface.set_trigger_enabled(false);
        }
        TriggerOutcome::Started(id)
    }

    pub fn frame(&mut self, frame_time: f64, surface: &mut impl Surface) -> FrameStatus {
        match self.engine.advance(frame_time) {
            EngineFrame::Idle => FrameStatus::Idle,
            EngineFrame::Rotating { angle } => {
                surface.render(self.engine.wheel(), angle);
                FrameStatus::Continue
            }
            EngineFrame::Stopped { angle, index } => {
                surface.render(self.engine.wheel(), angle);
                let label = self
                    .engine
                    .wheel()
                    .section(index)
                    .map(|s| s.label)
                    .unwrap_or_default();
                log::info!("wheel stopped at section {} ({})", index, label);
                surface.show_message(&result_message(label));
                surface.set_trigger_enabled(true);
                FrameStatus::Stopped(label)
            }
        }
    }
}

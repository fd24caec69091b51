//! Wheel geometry and the spin state machine.
//!
//! Sections are laid out from angle 0 in equal wedges; wedge `i` covers
//! `[i * 2π/N, (i + 1) * 2π/N)` before rotation. The engine drives one
//! [`SpinTask`] at a time and resolves the winning section exactly once, from
//! the final angle, when the task completes:
//!
//! ```text
//! idle --spin()--> spinning --advance(t >= duration)--> idle (+ outcome)
//! ```

use std::f64::consts::TAU;

use thiserror::Error;

pub mod render;
pub mod spin;

pub use spin::{
    EntropyRng, SPIN_DURATION_MS, SPIN_RANGE, SpinFrame, SpinRng, SpinTask, draw_spin_count,
    ease_out_cubic, total_rotation,
};

/// One labelled, coloured wedge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WheelError {
    #[error("a wheel needs at least two sections, got {0}")]
    TooFewSections(usize),
    #[error("sections must alternate between two prizes, got an odd count ({0})")]
    OddSections(usize),
    #[error("{labels} section labels but {colors} colors")]
    ColorMismatch { labels: usize, colors: usize },
}

#[derive(Clone, Debug)]
pub struct Wheel {
    sections: Vec<Section>,
}

impl Wheel {
    /// Requires an even number of sections, at least two.
    pub fn new(sections: &[Section]) -> Result<Self, WheelError> {
        if sections.len() < 2 {
            return Err(WheelError::TooFewSections(sections.len()));
        }
        if sections.len() % 2 != 0 {
            return Err(WheelError::OddSections(sections.len()));
        }
        Ok(Self {
            sections: sections.to_vec(),
        })
    }

    /// Builds a wheel from parallel label / colour lists.
    pub fn from_parts(
        labels: &[&'static str],
        colors: &[&'static str],
    ) -> Result<Self, WheelError> {
        if labels.len() != colors.len() {
            return Err(WheelError::ColorMismatch {
                labels: labels.len(),
                colors: colors.len(),
            });
        }
        let sections: Vec<Section> = labels
            .iter()
            .zip(colors)
            .map(|(&label, &color)| Section { label, color })
            .collect();
        Self::new(&sections)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn angle_per_section(&self) -> f64 {
        TAU / self.sections.len() as f64
    }
}

/// Index of the section under the fixed pointer after rotating by `angle`.
///
/// The wheel turns clockwise while wedges are numbered counter-clockwise from
/// the pointer, so forward progress is reflected: `N - 1 - raw`.
pub fn resolve_outcome(angle: f64, sections: usize) -> usize {
    let n = sections.max(1);
    let per_section = TAU / n as f64;
    let raw = ((angle.rem_euclid(TAU) / per_section).floor() as usize).min(n - 1);
    (n - 1 - raw + n) % n
}

/// What a single `advance` call produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EngineFrame {
    /// No spin in progress.
    Idle,
    Rotating { angle: f64 },
    /// The spin just finished; reported once per spin.
    Stopped { angle: f64, index: usize },
}

#[derive(Clone, Debug)]
enum SpinState {
    Idle,
    Spinning(SpinTask),
}

pub struct WheelEngine {
    wheel: Wheel,
    current_angle: f64,
    duration_ms: f64,
    state: SpinState,
}

impl WheelEngine {
    pub fn new(wheel: Wheel) -> Self {
        Self::with_duration(wheel, SPIN_DURATION_MS)
    }

    pub fn with_duration(wheel: Wheel, duration_ms: f64) -> Self {
        Self {
            wheel,
            current_angle: 0.0,
            duration_ms,
            state: SpinState::Idle,
        }
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn current_angle(&self) -> f64 {
        self.current_angle
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.state, SpinState::Spinning(_))
    }

    /// Starts a spin and returns its total rotation. Ignored while spinning.
    pub fn spin(&mut self, rng: &mut impl SpinRng) -> Option<f64> {
        if self.is_spinning() {
            return None;
        }
        let count = draw_spin_count(rng);
        let total = total_rotation(count, self.wheel.len());
        log::debug!("spin: {} rotations, total {:.4} rad", count, total);
        self.state = SpinState::Spinning(SpinTask::new(total, self.duration_ms));
        Some(total)
    }

    /// Feeds one frame timestamp (ms) into the running spin.
    pub fn advance(&mut self, frame_time: f64) -> EngineFrame {
        let SpinState::Spinning(task) = &mut self.state else {
            return EngineFrame::Idle;
        };
        let frame = task.tick(frame_time);
        self.current_angle = frame.angle;
        if !frame.done {
            return EngineFrame::Rotating { angle: frame.angle };
        }
        self.state = SpinState::Idle;
        let index = resolve_outcome(self.current_angle, self.wheel.len());
        EngineFrame::Stopped {
            angle: self.current_angle,
            index,
        }
    }
}

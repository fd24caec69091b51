//! Browser bootstrap: binds the controller to the host page.
//!
//! The page supplies four elements (see [`HostIds`]). A click on the spin
//! button submits the input box; an accepted submit starts a frame loop that
//! keeps exactly one `requestAnimationFrame` callback pending until the wheel
//! stops.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
    HtmlInputElement, window,
};

use crate::controller::{FrameStatus, SpinController, Surface, TriggerOutcome};
use crate::gate::EligibilityGate;
use crate::storage::{AnyStore, LocalStore, MemoryStore};
use crate::wheel::render::WheelRenderer;
use crate::wheel::{EntropyRng, Wheel, WheelEngine};
use crate::{ALLOWED_STAFF_IDS, WHEEL_SECTIONS};

/// Element ids the host page must provide.
pub struct HostIds {
    pub input: &'static str,
    pub message: &'static str,
    pub button: &'static str,
    pub canvas: &'static str,
}

pub const HOST_IDS: HostIds = HostIds {
    input: "StaffIDInput",
    message: "message",
    button: "spinButton",
    canvas: "wheelCanvas",
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("missing element #{0}")]
    MissingElement(&'static str),
    #[error("element #{0} has the wrong type")]
    WrongElement(&'static str),
    #[error("canvas has no 2d context")]
    NoContext,
    #[error(transparent)]
    Wheel(#[from] crate::wheel::WheelError),
}

impl From<AppError> for JsValue {
    fn from(e: AppError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// DOM-backed [`Surface`].
struct DomSurface {
    input: HtmlInputElement,
    message: HtmlElement,
    button: HtmlButtonElement,
    renderer: WheelRenderer,
}

impl Surface for DomSurface {
    fn show_message(&mut self, text: &str) {
        self.message.set_inner_text(text);
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.button.set_disabled(!enabled);
    }

    fn clear_input(&mut self) {
        self.input.set_value("");
    }

    fn render(&mut self, wheel: &Wheel, angle: f64) {
        if let Err(e) = self.renderer.draw_rotated_wheel(wheel, angle) {
            log::warn!("wheel draw failed: {:?}", e);
        }
    }
}

struct WheelApp {
    controller: SpinController<AnyStore, EntropyRng>,
    surface: DomSurface,
}

thread_local! {
    static APP_STATE: RefCell<Option<WheelApp>> = const { RefCell::new(None) };
}

fn element<T: JsCast>(doc: &Document, id: &'static str) -> Result<T, AppError> {
    doc.get_element_by_id(id)
        .ok_or(AppError::MissingElement(id))?
        .dyn_into::<T>()
        .map_err(|_| AppError::WrongElement(id))
}

fn open_store() -> AnyStore {
    match LocalStore::open() {
        Ok(store) => AnyStore::Local(store),
        Err(e) => {
            log::warn!("{}; used StaffIDs will not survive a reload", e);
            AnyStore::Memory(MemoryStore::new())
        }
    }
}

fn build_app(doc: &Document) -> Result<WheelApp, AppError> {
    let canvas: HtmlCanvasElement = element(doc, HOST_IDS.canvas)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into().ok())
        .ok_or(AppError::NoContext)?;
    let surface = DomSurface {
        input: element(doc, HOST_IDS.input)?,
        message: element(doc, HOST_IDS.message)?,
        button: element(doc, HOST_IDS.button)?,
        renderer: WheelRenderer::new(canvas, ctx),
    };

    let gate = EligibilityGate::new(ALLOWED_STAFF_IDS, open_store());
    log::debug!("allowed StaffIDs: {:?}", gate.allow_list());
    let engine = WheelEngine::new(Wheel::new(WHEEL_SECTIONS)?);
    let controller = SpinController::new(gate, engine, EntropyRng::new());
    Ok(WheelApp {
        controller,
        surface,
    })
}

/// Mounts the wheel on the host page: draws it and wires the spin button.
#[wasm_bindgen]
pub fn start_wheel() -> Result<(), JsValue> {
    let doc = window()
        .ok_or(AppError::NoWindow)?
        .document()
        .ok_or(AppError::NoDocument)?;

    let mut app = build_app(&doc)?;
    app.controller.redraw(&mut app.surface);
    let button = app.surface.button.clone();
    APP_STATE.with(|cell| cell.replace(Some(app)));

    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        let started = APP_STATE.with(|cell| {
            let mut state = cell.borrow_mut();
            let Some(app) = state.as_mut() else {
                return false;
            };
            let raw = app.surface.input.value();
            matches!(
                app.controller.trigger(&raw, &mut app.surface),
                TriggerOutcome::Started(_)
            )
        });
        if started {
            start_spin_loop();
        }
    }) as Box<dyn FnMut(_)>);
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(callback: &FrameCallback) {
    let Some(w) = window() else {
        return;
    };
    if let Some(cb) = callback.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

// Each frame schedules at most one successor; once the controller stops
// reporting `Continue` the closure drops itself and the loop ends.
fn start_spin_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let status = APP_STATE.with(|cell| {
            cell.borrow_mut()
                .as_mut()
                .map(|app| app.controller.frame(ts, &mut app.surface))
                .unwrap_or(FrameStatus::Idle)
        });
        if status == FrameStatus::Continue {
            request_frame(&f);
        } else {
            let _ = f.borrow_mut().take();
        }
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

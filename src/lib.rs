//! Prize wheel core crate.
//!
//! A canvas wheel that hands out one of two prizes to each allowed StaffID,
//! once. The eligibility rules live in [`gate`], the spin/outcome machinery in
//! [`wheel`], and [`controller`] ties them together behind a small surface
//! trait so the whole flow runs natively in tests. [`app`] mounts it on the
//! host page via `start_wheel()`.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod controller;
pub mod gate;
pub mod storage;
pub mod wheel;

pub use controller::{FrameStatus, SpinController, Surface, TriggerOutcome};
pub use gate::{EligibilityGate, Rejection, StaffId, UsedSet};
pub use storage::{KeyValueStore, MemoryStore, STORAGE_KEY, StorageError};
pub use wheel::{EngineFrame, Section, Wheel, WheelEngine, WheelError, resolve_outcome};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_log")]
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
}

// -----------------------------------------------------------------------------
// Fixed datasets
// StaffIDs are stored uppercase; input is uppercased before lookup.
// -----------------------------------------------------------------------------

pub const ALLOWED_STAFF_IDS: &[&str] = &["ALICE", "BOB", "CHARLIE", "DIANA", "EVE", "FRANK"];

pub const CARD_HOLDER: &str = "Card Holder";
pub const STICKERS: &str = "Stickers";

const CARD_HOLDER_COLOR: &str = "#FCAA67";
const STICKERS_COLOR: &str = "#B0413E";

pub const WHEEL_SECTIONS: &[Section] = &[
    Section { label: CARD_HOLDER, color: CARD_HOLDER_COLOR },
    Section { label: STICKERS, color: STICKERS_COLOR },
    Section { label: CARD_HOLDER, color: CARD_HOLDER_COLOR },
    Section { label: STICKERS, color: STICKERS_COLOR },
    Section { label: CARD_HOLDER, color: CARD_HOLDER_COLOR },
    Section { label: STICKERS, color: STICKERS_COLOR },
    Section { label: CARD_HOLDER, color: CARD_HOLDER_COLOR },
    Section { label: STICKERS, color: STICKERS_COLOR },
];

// Invariants of the compiled-in datasets (allow list + wheel sections).
// Native-friendly; no wasm/browser APIs.

use std::collections::HashSet;

use prize_wheel::{ALLOWED_STAFF_IDS, CARD_HOLDER, STICKERS, StaffId, WHEEL_SECTIONS, Wheel};

#[test]
fn allowed_ids_are_unique_and_already_normalized() {
    let mut seen = HashSet::new();
    for id in ALLOWED_STAFF_IDS {
        assert!(seen.insert(*id), "duplicate StaffID '{}'", id);
        let normalized = StaffId::normalize(id).expect("allowed id must not be blank");
        assert_eq!(normalized.as_str(), *id, "StaffID '{}' is not stored uppercase/trimmed", id);
    }
    assert_eq!(ALLOWED_STAFF_IDS.len(), 6);
}

#[test]
fn wheel_sections_alternate_between_two_prizes() {
    assert!(WHEEL_SECTIONS.len() >= 2);
    assert_eq!(WHEEL_SECTIONS.len() % 2, 0, "section count must be even");
    for (i, s) in WHEEL_SECTIONS.iter().enumerate() {
        let expected = if i % 2 == 0 { CARD_HOLDER } else { STICKERS };
        assert_eq!(s.label, expected, "section {} out of pattern", i);
        assert!(s.color.starts_with('#') && s.color.len() == 7, "bad color '{}'", s.color);
    }
}

#[test]
fn wheel_builds_from_dataset() {
    let wheel = Wheel::new(WHEEL_SECTIONS).unwrap();
    assert_eq!(wheel.len(), 8);
    assert!((wheel.angle_per_section() - std::f64::consts::TAU / 8.0).abs() < 1e-12);
}

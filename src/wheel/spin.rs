//! Spin timing: randomness for the rotation count, the cubic ease-out curve and
//! a one-shot timed task driven by frame timestamps.

use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use rand::rngs::{OsRng, SmallRng};
use rand::{Rng, SeedableRng};

/// Fixed length of every spin.
pub const SPIN_DURATION_MS: f64 = 5000.0;
/// Whole extra rotations a spin may add.
pub const SPIN_RANGE: RangeInclusive<u32> = 5..=14;

const FALLBACK_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Source of uniform samples in `[0, 1)`. Tests inject fixed sequences.
pub trait SpinRng {
    fn next_f64(&mut self) -> f64;
}

/// `SmallRng` seeded from OS / browser entropy (`getrandom`, crypto API in
/// the browser). If the entropy source fails the wheel still spins, on a fixed
/// seed.
pub struct EntropyRng {
    inner: SmallRng,
}

impl EntropyRng {
    pub fn new() -> Self {
        let inner = SmallRng::from_rng(OsRng).unwrap_or_else(|e| {
            log::warn!("entropy unavailable ({}), using fixed seed", e);
            SmallRng::seed_from_u64(FALLBACK_SEED)
        });
        Self { inner }
    }

    /// Deterministic stream for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinRng for EntropyRng {
    fn next_f64(&mut self) -> f64 {
        self.inner.gen_range(0.0..1.0)
    }
}

/// `floor(r * 10) + 5`, kept inside [`SPIN_RANGE`] even for a sample of 1.0.
pub fn draw_spin_count(rng: &mut impl SpinRng) -> u32 {
    let span = (SPIN_RANGE.end() - SPIN_RANGE.start() + 1) as f64;
    let r = rng.next_f64().clamp(0.0, 1.0);
    let count = (r * span).floor() as u32 + SPIN_RANGE.start();
    count.min(*SPIN_RANGE.end())
}

/// Full rotations plus half a section, so the stop angle sits mid-wedge.
pub fn total_rotation(spin_count: u32, sections: usize) -> f64 {
    let per_section = TAU / sections as f64;
    spin_count as f64 * TAU + per_section / 2.0
}

/// `1 - (1 - p)^3` with `p` clamped to `[0, 1]` so the last frame cannot
/// overshoot the target angle.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinFrame {
    pub angle: f64,
    pub done: bool,
}

/// One spin in flight. The first `tick` fixes the zero reference; the tick at
/// or after `duration_ms` reports `done` and lands exactly on `total_rotation`.
#[derive(Clone, Debug)]
pub struct SpinTask {
    total_rotation: f64,
    duration_ms: f64,
    start_ms: Option<f64>,
    finished: bool,
}

impl SpinTask {
    pub fn new(total_rotation: f64, duration_ms: f64) -> Self {
        Self {
            total_rotation,
            duration_ms,
            start_ms: None,
            finished: false,
        }
    }

    pub fn total_rotation(&self) -> f64 {
        self.total_rotation
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn tick(&mut self, now: f64) -> SpinFrame {
        if self.finished {
            return SpinFrame {
                angle: self.total_rotation,
                done: true,
            };
        }
        let start = *self.start_ms.get_or_insert(now);
        let elapsed = now - start;
        let progress = if self.duration_ms > 0.0 {
            elapsed / self.duration_ms
        } else {
            1.0
        };
        let angle = ease_out_cubic(progress) * self.total_rotation;
        self.finished = elapsed >= self.duration_ms;
        SpinFrame {
            angle,
            done: self.finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<f64>, usize);

    impl SpinRng for Fixed {
        fn next_f64(&mut self) -> f64 {
            let v = self.0[self.1 % self.0.len()];
            self.1 += 1;
            v
        }
    }

    #[test]
    fn test_ease_out_cubic_endpoints_and_clamp() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
        assert_eq!(ease_out_cubic(1.3), 1.0);
        assert_eq!(ease_out_cubic(-0.2), 0.0);
    }

    #[test]
    fn test_ease_out_is_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = ease_out_cubic(i as f64 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_draw_spin_count_edges() {
        let mut rng = Fixed(vec![0.0, 0.0999, 0.1, 0.999_999, 1.0], 0);
        let counts: Vec<u32> = (0..5).map(|_| draw_spin_count(&mut rng)).collect();
        assert_eq!(counts, vec![5, 5, 6, 14, 14]);
    }

    #[test]
    fn test_entropy_draws_stay_in_range_and_hit_both_ends() {
        let mut rng = EntropyRng::new();
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..10_000 {
            let n = draw_spin_count(&mut rng);
            assert!(SPIN_RANGE.contains(&n), "spin count {} out of range", n);
            seen_min |= n == 5;
            seen_max |= n == 14;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_seeded_rng_is_reproducible_and_in_unit_interval() {
        let mut a = EntropyRng::seeded(42);
        let mut b = EntropyRng::seeded(42);
        for _ in 0..1000 {
            let v = a.next_f64();
            assert!((0.0..1.0).contains(&v));
            assert_eq!(v, b.next_f64());
        }
        let counts: Vec<u32> = (0..20).map(|_| draw_spin_count(&mut a)).collect();
        assert!(counts.iter().all(|n| SPIN_RANGE.contains(n)));
    }

    #[test]
    fn test_total_rotation_adds_half_section() {
        let r = total_rotation(5, 8);
        assert!((r - (5.0 * TAU + TAU / 16.0)).abs() < 1e-9);
    }

    #[test]
    fn test_spin_task_first_tick_is_zero_reference() {
        let mut task = SpinTask::new(10.0, 1000.0);
        assert_eq!(task.total_rotation(), 10.0);
        let f0 = task.tick(12_345.0);
        assert_eq!(f0, SpinFrame { angle: 0.0, done: false });
        let f1 = task.tick(12_845.0);
        assert!((f1.angle - 8.75).abs() < 1e-9);
        assert!(!f1.done);
    }

    #[test]
    fn test_spin_task_overshoot_frame_is_clamped() {
        let mut task = SpinTask::new(10.0, 1000.0);
        task.tick(0.0);
        task.tick(990.0);
        let last = task.tick(1016.0);
        assert!(last.done);
        assert_eq!(last.angle, 10.0);
        assert!(task.is_finished());
        // Further ticks keep reporting the final angle.
        assert_eq!(task.tick(5000.0).angle, 10.0);
    }

    #[test]
    fn test_spin_task_done_exactly_at_duration() {
        let mut task = SpinTask::new(3.0, 1000.0);
        task.tick(100.0);
        assert!(!task.tick(1099.0).done);
        assert!(task.tick(1100.0).done);
    }
}

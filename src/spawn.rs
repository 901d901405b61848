//! Randomness for particle spawning.
//!
//! The engine owns one [`SpawnContext`] and lends it to every emitter during
//! the emission pass, and to the simulation pass for `Chaotic` jitter. All
//! random draws in the crate go through it, so seeding it makes a whole run
//! reproducible.

use crate::visuals::Color;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// RNG wrapper with the spawn helpers emitters need.
///
/// ```ignore
/// let mut ctx = SpawnContext::seeded(7);
/// let offset = ctx.offset_in_square(10.0);   // jitter around an emitter
/// let color = ctx.random_color();            // random RGB, opaque
/// ```
#[derive(Debug, Clone)]
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Context seeded from the system clock: different each program run.
    pub fn from_entropy() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(seed)
    }

    /// Deterministic context.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeded if `seed` is set, clock-seeded otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Uniform value in `[-half_width, half_width]`.
    #[inline]
    pub fn symmetric(&mut self, half_width: f32) -> f32 {
        let h = half_width.abs();
        if h == 0.0 || !h.is_finite() {
            return 0.0;
        }
        self.rng.gen_range(-h..=h)
    }

    /// Uniform integer in the inclusive range.
    #[inline]
    pub fn random_u64(&mut self, range: RangeInclusive<u64>) -> u64 {
        self.rng.gen_range(range)
    }

    /// Random offset with both axes uniform in `[-radius, radius]`.
    pub fn offset_in_square(&mut self, radius: f32) -> Vec2 {
        Vec2::new(self.symmetric(radius), self.symmetric(radius))
    }

    /// Per-tick jitter for `Chaotic` particles.
    pub fn jitter(&mut self, amount: f32) -> Vec2 {
        self.offset_in_square(amount)
    }

    /// Opaque color with each channel uniform in `[0, 255]`.
    pub fn random_color(&mut self) -> Color {
        Color::rgb(self.rng.gen(), self.rng.gen(), self.rng.gen())
    }
}

impl Default for SpawnContext {
    fn default() -> Self {
        Self::from_entropy()
    }
}

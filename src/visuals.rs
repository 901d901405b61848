//! Particle colors.
//!
//! Colors are 8-bit RGBA, matching what sprite batchers upload. [`Color`] is
//! `Pod`, so it can sit directly inside a [`SpriteInstance`](crate::render::SpriteInstance).
//!
//! Color interpolation and scale oscillation are both pure functions of the
//! time elapsed since a particle was created; nothing here accumulates state.

use bytemuck::{Pod, Zeroable};
use std::f32::consts::TAU;

/// An 8-bit RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Default raindrop tint.
    pub const RAIN: Color = Color::rgb(120, 160, 230);
    /// Warm orange used by ember presets.
    pub const EMBER: Color = Color::rgb(255, 140, 30);
    /// Pale yellow used by spark presets.
    pub const SPARK: Color = Color::rgb(255, 240, 150);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Linear interpolation toward `other`. `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| -> u8 {
            (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
        };
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Fade from a particle's base color to `target` over `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorInterpolation {
    pub target: Color,
    pub duration_ms: u64,
}

impl ColorInterpolation {
    pub fn new(target: Color, duration_ms: u64) -> Self {
        Self { target, duration_ms }
    }

    /// Color `elapsed_ms` after creation, starting from `base`.
    pub fn sample(&self, base: Color, elapsed_ms: u64) -> Color {
        if self.duration_ms == 0 {
            return self.target;
        }
        base.lerp(self.target, elapsed_ms as f32 / self.duration_ms as f32)
    }
}

/// Smooth scale pulsing between `min` and `max`.
///
/// One full cycle (min → max → min) takes `period_ms`. The curve is a
/// raised cosine, so the pulse starts at `min` with zero slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleOscillation {
    min: f32,
    max: f32,
    period_ms: u64,
}

impl ScaleOscillation {
    /// Bounds are swapped if given in the wrong order.
    pub fn new(min: f32, max: f32, period_ms: u64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self { min, max, period_ms }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Scale `elapsed_ms` after creation. Always within `[min, max]`.
    pub fn sample(&self, elapsed_ms: u64) -> f32 {
        if self.period_ms == 0 {
            return self.min;
        }
        let phase = (elapsed_ms % self.period_ms) as f32 / self.period_ms as f32;
        let t = 0.5 - 0.5 * (phase * TAU).cos();
        (self.min + (self.max - self.min) * t).clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::rgb(0, 100, 200);
        let b = Color::rgb(200, 100, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgb(100, 100, 100));
    }

    #[test]
    fn test_lerp_clamps() {
        let a = Color::WHITE;
        let b = Color::BLACK;
        assert_eq!(a.lerp(b, 4.0), b);
        assert_eq!(a.lerp(b, -1.0), a);
        assert_eq!(a.lerp(b, f32::NAN), a);
    }

    #[test]
    fn test_color_is_four_bytes() {
        assert_eq!(std::mem::size_of::<Color>(), 4);
        let color = Color::rgba(1, 2, 3, 4);
        let bytes = bytemuck::bytes_of(&color);
        assert_eq!(bytes, &[1, 2, 3, 4]);
    }

    #[test]
    fn test_interpolation_finishes_at_target() {
        let fade = ColorInterpolation::new(Color::BLACK, 1000);
        assert_eq!(fade.sample(Color::WHITE, 0), Color::WHITE);
        assert_eq!(fade.sample(Color::WHITE, 1000), Color::BLACK);
        assert_eq!(fade.sample(Color::WHITE, 5000), Color::BLACK);
    }

    #[test]
    fn test_oscillation_envelope() {
        let osc = ScaleOscillation::new(0.5, 1.5, 1000);
        assert!((osc.sample(0) - 0.5).abs() < 1e-5);
        assert!((osc.sample(500) - 1.5).abs() < 1e-5);
        for t in (0..5000).step_by(37) {
            let s = osc.sample(t);
            assert!((0.5..=1.5).contains(&s), "scale {} out of range at {}", s, t);
        }
    }

    #[test]
    fn test_oscillation_swaps_bounds() {
        let osc = ScaleOscillation::new(2.0, 1.0, 100);
        assert_eq!(osc.min(), 1.0);
        assert_eq!(osc.max(), 2.0);
    }

    #[test]
    fn test_zero_period_holds_min() {
        let osc = ScaleOscillation::new(0.25, 4.0, 0);
        assert_eq!(osc.sample(12345), 0.25);
    }
}

//! Particle emitters.
//!
//! An [`Emitter`] is a production policy bound to a position. Each tick the
//! engine calls [`Emitter::update`]; when the emitter is armed and its rate
//! interval has passed it bursts `burst_size` particles into the engine's list.
//!
//! # Gating
//!
//! A burst fires only when `automatic || emit` and at least `rate_ms` have
//! passed since the previous burst. A fresh emitter may burst on its first
//! update. [`Emitter::stop`] clears both flags, so a stopped emitter stays
//! quiet until it is explicitly re-armed.
//!
//! # Cadence
//!
//! With the default [`Cadence::Archetype`], the rate is re-rolled after every
//! burst depending on the archetype:
//!
//! | Archetype | Next `rate_ms` | Spawn offset of particle `i` |
//! |-----------|----------------|------------------------------|
//! | Raindrop | 300–600 | x in ±radius, y = `i * 3` |
//! | Shapes | 1–2 | both axes in ±radius |
//! | Unknown | unchanged | both axes in ±radius |
//!
//! [`Cadence::Fixed`] keeps whatever rate was configured.
//!
//! # Example
//!
//! ```ignore
//! let drizzle = Emitter::new(Vec2::new(400.0, 0.0), ParticleKind::Raindrop, now_ms)
//!     .with_burst_size(5)
//!     .with_area_radius(40.0)
//!     .with_automatic(true);
//! ```

use crate::particle::{Particle, ParticleKind, TrajectoryKind};
use crate::spawn::SpawnContext;
use crate::visuals::{Color, ColorInterpolation, ScaleOscillation};
use glam::Vec2;
use log::trace;

/// Smallest accepted spawn radius.
pub const MIN_AREA_RADIUS: f32 = 1.0;
/// Largest accepted spawn radius.
pub const MAX_AREA_RADIUS: f32 = 300.0;
/// Largest accepted burst size.
pub const MAX_BURST_SIZE: u32 = 10_000;

/// Vertical spacing between consecutive raindrops of one burst.
const RAIN_STREAK_STEP: f32 = 3.0;
const RAIN_RATE_MS: std::ops::RangeInclusive<u64> = 300..=600;
const SHAPE_RATE_MS: std::ops::RangeInclusive<u64> = 1..=2;
const FADE_DURATION_MS: std::ops::RangeInclusive<u64> = 1000..=2000;

/// Clamp a spawn radius into `[1, 300]`. NaN becomes the minimum.
pub fn clamp_area_radius(radius: f32) -> f32 {
    if radius.is_nan() {
        MIN_AREA_RADIUS
    } else {
        radius.clamp(MIN_AREA_RADIUS, MAX_AREA_RADIUS)
    }
}

/// How `rate_ms` evolves after each burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cadence {
    /// Re-roll the rate from the archetype's range.
    #[default]
    Archetype,
    /// Keep the configured rate.
    Fixed,
}

/// Particle production policy. See the [module docs](self).
#[derive(Debug, Clone)]
pub struct Emitter {
    position: Vec2,
    kind: ParticleKind,
    trajectory: TrajectoryKind,
    area_radius: f32,
    burst_size: u32,
    rate_ms: u64,
    cadence: Cadence,
    particle_lifetime_ms: u64,
    automatic: bool,
    emit: bool,
    random_color: bool,
    base_color: Color,
    interpolate_color: bool,
    secondary_color: Option<Color>,
    speed: f32,
    acceleration: f32,
    direction_angle: f32,
    scale: f32,
    scale_oscillation: Option<ScaleOscillation>,
    rotation_amount: f32,
    max_travel_distance: Option<f32>,
    created_ms: u64,
    last_burst_ms: Option<u64>,
    duration_ms: Option<u64>,
    bursts: u64,
}

impl Emitter {
    /// Create an emitter with the archetype's defaults. It starts disarmed.
    pub fn new(position: Vec2, kind: ParticleKind, now_ms: u64) -> Self {
        let (trajectory, rate_ms, lifetime_ms, color, speed, radius) = match kind {
            ParticleKind::Raindrop => (TrajectoryKind::Fall, 450, 1500, Color::RAIN, 4.0, 10.0),
            ParticleKind::Unknown => (TrajectoryKind::Static, 100, 1000, Color::WHITE, 0.0, 1.0),
            _ => (TrajectoryKind::Rise, 1, 1000, Color::WHITE, 1.0, 5.0),
        };
        Self {
            position,
            kind,
            trajectory,
            area_radius: radius,
            burst_size: 1,
            rate_ms,
            cadence: Cadence::Archetype,
            particle_lifetime_ms: lifetime_ms,
            automatic: false,
            emit: false,
            random_color: false,
            base_color: color,
            interpolate_color: false,
            secondary_color: None,
            speed,
            acceleration: 0.0,
            direction_angle: 0.0,
            scale: 1.0,
            scale_oscillation: None,
            rotation_amount: 0.0,
            max_travel_distance: None,
            created_ms: now_ms,
            last_burst_ms: None,
            duration_ms: None,
            bursts: 0,
        }
    }

    // =========================================================================
    // SIMULATION
    // =========================================================================

    /// True if a burst would fire at `now_ms`.
    pub fn ready(&self, now_ms: u64) -> bool {
        if !(self.automatic || self.emit) {
            return false;
        }
        match self.last_burst_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.rate_ms,
            None => true,
        }
    }

    /// Burst into `sink` if armed and due. Returns the number of particles added.
    pub fn update(&mut self, now_ms: u64, spawn: &mut SpawnContext, sink: &mut Vec<Particle>) -> usize {
        if !self.ready(now_ms) {
            return 0;
        }

        let count = self.burst_size as usize;
        sink.reserve(count);
        for i in 0..self.burst_size {
            let offset = match self.kind {
                ParticleKind::Raindrop => Vec2::new(
                    spawn.symmetric(self.area_radius),
                    i as f32 * RAIN_STREAK_STEP,
                ),
                _ => spawn.offset_in_square(self.area_radius),
            };
            let particle = self.generate_particle(
                spawn,
                now_ms,
                self.position + offset,
                self.particle_lifetime_ms,
                self.acceleration,
                self.direction_angle,
                self.rotation_amount,
            );
            sink.push(particle);
        }

        self.last_burst_ms = Some(now_ms);
        self.bursts += 1;
        if self.cadence == Cadence::Archetype {
            match self.kind {
                ParticleKind::Raindrop => self.rate_ms = spawn.random_u64(RAIN_RATE_MS),
                kind if kind.is_shape() => self.rate_ms = spawn.random_u64(SHAPE_RATE_MS),
                _ => {}
            }
        }

        trace!(
            "{:?} emitter at ({:.1}, {:.1}) burst {} particles, next in {} ms",
            self.kind, self.position.x, self.position.y, count, self.rate_ms
        );
        count
    }

    /// Stamp out one particle from this emitter's configuration.
    ///
    /// The particle is returned, not inserted anywhere.
    #[allow(clippy::too_many_arguments)]
    pub fn generate_particle(
        &self,
        spawn: &mut SpawnContext,
        now_ms: u64,
        origin: Vec2,
        lifetime_ms: u64,
        acceleration: f32,
        direction_angle: f32,
        angular_momentum: f32,
    ) -> Particle {
        let color = if self.random_color {
            spawn.random_color()
        } else {
            self.base_color
        };

        let mut particle = Particle::new(self.kind, self.trajectory, origin, now_ms, lifetime_ms)
            .with_color(color)
            .with_speed(self.speed)
            .with_acceleration(acceleration)
            .with_direction(direction_angle)
            .with_angular_momentum(angular_momentum)
            .with_scale(self.scale);

        if self.interpolate_color {
            let target = self.secondary_color.unwrap_or(Color::BLACK);
            let duration = spawn.random_u64(FADE_DURATION_MS);
            particle = particle.with_color_interpolation(ColorInterpolation::new(target, duration));
        }
        if let Some(osc) = self.scale_oscillation {
            particle = particle.with_scale_oscillation(osc);
        }
        if let Some(max) = self.max_travel_distance {
            particle = particle.with_max_travel_distance(max);
        }
        particle
    }

    /// True iff the emitter has a finite duration and it has run out.
    pub fn terminated(&self, now_ms: u64) -> bool {
        match self.duration_ms {
            Some(duration) => now_ms > self.created_ms.saturating_add(duration),
            None => false,
        }
    }

    // =========================================================================
    // CONTROL
    // =========================================================================

    /// Arm a manual emission. Stays armed until [`stop`](Self::stop).
    pub fn trigger(&mut self) {
        self.emit = true;
    }

    /// Disarm: clears the manual trigger and automatic mode.
    pub fn stop(&mut self) {
        self.emit = false;
        self.automatic = false;
    }

    pub fn set_automatic(&mut self, automatic: bool) {
        self.automatic = automatic;
    }

    /// Move by `delta` (host object moved).
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    // =========================================================================
    // TUNABLES - affect subsequent bursts only
    // =========================================================================

    pub fn set_kind(&mut self, kind: ParticleKind) {
        self.kind = kind;
    }

    pub fn set_trajectory(&mut self, trajectory: TrajectoryKind) {
        self.trajectory = trajectory;
    }

    pub fn set_color(&mut self, color: Color) {
        self.base_color = color;
    }

    pub fn set_random_color(&mut self, random: bool) {
        self.random_color = random;
    }

    /// Enable fading toward `secondary` (black when `None`).
    pub fn set_color_interpolation(&mut self, enabled: bool, secondary: Option<Color>) {
        self.interpolate_color = enabled;
        self.secondary_color = secondary;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn set_acceleration(&mut self, acceleration: f32) {
        self.acceleration = acceleration;
    }

    pub fn set_direction(&mut self, angle: f32) {
        self.direction_angle = angle;
    }

    /// Set the spawn radius, clamped into `[1, 300]`.
    pub fn set_area_radius(&mut self, radius: f32) {
        self.area_radius = clamp_area_radius(radius);
    }

    /// Set particles per burst, capped at [`MAX_BURST_SIZE`].
    pub fn set_burst_size(&mut self, size: u32) {
        self.burst_size = size.min(MAX_BURST_SIZE);
    }

    pub fn set_rotation_amount(&mut self, amount: f32) {
        self.rotation_amount = amount;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn set_scale_oscillation(&mut self, oscillation: Option<ScaleOscillation>) {
        self.scale_oscillation = oscillation;
    }

    pub fn set_rate_ms(&mut self, rate_ms: u64) {
        self.rate_ms = rate_ms;
    }

    pub fn set_cadence(&mut self, cadence: Cadence) {
        self.cadence = cadence;
    }

    pub fn set_particle_lifetime_ms(&mut self, lifetime_ms: u64) {
        self.particle_lifetime_ms = lifetime_ms;
    }

    pub fn set_max_travel_distance(&mut self, distance: Option<f32>) {
        self.max_travel_distance = distance;
    }

    /// `None` makes the emitter eternal.
    pub fn set_duration_ms(&mut self, duration_ms: Option<u64>) {
        self.duration_ms = duration_ms;
    }

    // =========================================================================
    // BUILDER METHODS
    // =========================================================================

    pub fn with_trajectory(mut self, trajectory: TrajectoryKind) -> Self {
        self.set_trajectory(trajectory);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.set_color(color);
        self
    }

    pub fn with_random_color(mut self) -> Self {
        self.random_color = true;
        self
    }

    pub fn with_color_interpolation(mut self, secondary: Option<Color>) -> Self {
        self.set_color_interpolation(true, secondary);
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_acceleration(mut self, acceleration: f32) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_direction(mut self, angle: f32) -> Self {
        self.direction_angle = angle;
        self
    }

    pub fn with_area_radius(mut self, radius: f32) -> Self {
        self.set_area_radius(radius);
        self
    }

    pub fn with_burst_size(mut self, size: u32) -> Self {
        self.set_burst_size(size);
        self
    }

    pub fn with_rate_ms(mut self, rate_ms: u64) -> Self {
        self.rate_ms = rate_ms;
        self
    }

    pub fn with_cadence(mut self, cadence: Cadence) -> Self {
        self.cadence = cadence;
        self
    }

    pub fn with_particle_lifetime_ms(mut self, lifetime_ms: u64) -> Self {
        self.particle_lifetime_ms = lifetime_ms;
        self
    }

    pub fn with_rotation_amount(mut self, amount: f32) -> Self {
        self.rotation_amount = amount;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_scale_oscillation(mut self, oscillation: ScaleOscillation) -> Self {
        self.scale_oscillation = Some(oscillation);
        self
    }

    pub fn with_max_travel_distance(mut self, distance: f32) -> Self {
        self.max_travel_distance = Some(distance);
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_automatic(mut self, automatic: bool) -> Self {
        self.automatic = automatic;
        self
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn trajectory(&self) -> TrajectoryKind {
        self.trajectory
    }

    pub fn area_radius(&self) -> f32 {
        self.area_radius
    }

    pub fn burst_size(&self) -> u32 {
        self.burst_size
    }

    pub fn rate_ms(&self) -> u64 {
        self.rate_ms
    }

    pub fn particle_lifetime_ms(&self) -> u64 {
        self.particle_lifetime_ms
    }

    pub fn is_automatic(&self) -> bool {
        self.automatic
    }

    pub fn is_emitting(&self) -> bool {
        self.emit
    }

    pub fn color(&self) -> Color {
        self.base_color
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn created_ms(&self) -> u64 {
        self.created_ms
    }

    pub fn last_burst_ms(&self) -> Option<u64> {
        self.last_burst_ms
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.duration_ms
    }

    /// Bursts fired so far.
    pub fn bursts(&self) -> u64 {
        self.bursts
    }
}

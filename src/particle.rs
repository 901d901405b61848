//! The particle entity.
//!
//! A [`Particle`] is passive data. Its archetype ([`ParticleKind`]) and motion
//! rule ([`TrajectoryKind`]) are fixed at creation; everything else is mutated
//! in place by the engine's simulation pass until the sweep removes it.
//!
//! # Kinds
//!
//! Both kind enums carry an `Unknown` variant. Raw ids that don't decode to a
//! known kind (for example from a replayed stream written by a newer build)
//! become `Unknown`, which the engine treats as "no motion" / "no sprite".

use crate::visuals::{Color, ColorInterpolation, ScaleOscillation};
use glam::Vec2;

/// Visual archetype of a particle. Selects the sprite and the emitter cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParticleKind {
    Raindrop,
    Star,
    Circle,
    Square,
    HollowSquare,
    Triangle,
    X,
    #[default]
    Unknown,
}

impl ParticleKind {
    /// Every archetype that has a sprite, in draw order.
    pub const DRAWABLE: [ParticleKind; 7] = [
        ParticleKind::Raindrop,
        ParticleKind::Star,
        ParticleKind::Circle,
        ParticleKind::Square,
        ParticleKind::HollowSquare,
        ParticleKind::Triangle,
        ParticleKind::X,
    ];

    /// Decode a raw archetype id. Unrecognized ids become `Unknown`.
    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => ParticleKind::Raindrop,
            1 => ParticleKind::Star,
            2 => ParticleKind::Circle,
            3 => ParticleKind::Square,
            4 => ParticleKind::HollowSquare,
            5 => ParticleKind::Triangle,
            6 => ParticleKind::X,
            _ => ParticleKind::Unknown,
        }
    }

    /// Raw archetype id. `Unknown` encodes as `u32::MAX`.
    pub fn as_u32(self) -> u32 {
        match self {
            ParticleKind::Raindrop => 0,
            ParticleKind::Star => 1,
            ParticleKind::Circle => 2,
            ParticleKind::Square => 3,
            ParticleKind::HollowSquare => 4,
            ParticleKind::Triangle => 5,
            ParticleKind::X => 6,
            ParticleKind::Unknown => u32::MAX,
        }
    }

    /// Geometric shape archetypes (everything drawable except raindrops).
    pub fn is_shape(self) -> bool {
        !matches!(self, ParticleKind::Raindrop | ParticleKind::Unknown)
    }
}

/// Motion rule applied to a particle every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrajectoryKind {
    /// Fast horizontal line, time-scaled.
    LaserLine,
    /// Random jitter on both axes, once per tick.
    Chaotic,
    /// Moves down by its own speed every tick.
    Fall,
    /// Moves up by its own speed every tick.
    Rise,
    /// Reserved, no motion.
    Weightlessness,
    /// Time-scaled horizontal motion plus accumulated vertical speed.
    BallisticCurve,
    #[default]
    Static,
    /// Reserved, no motion.
    UpwardFountain,
    /// Reserved, no motion.
    HomingMissile,
    Unknown,
}

impl TrajectoryKind {
    /// Decode a raw trajectory id. Unrecognized ids become `Unknown`.
    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => TrajectoryKind::LaserLine,
            1 => TrajectoryKind::Chaotic,
            2 => TrajectoryKind::Fall,
            3 => TrajectoryKind::Rise,
            4 => TrajectoryKind::Weightlessness,
            5 => TrajectoryKind::BallisticCurve,
            6 => TrajectoryKind::Static,
            7 => TrajectoryKind::UpwardFountain,
            8 => TrajectoryKind::HomingMissile,
            _ => TrajectoryKind::Unknown,
        }
    }

    /// Raw trajectory id. `Unknown` encodes as `u32::MAX`.
    pub fn as_u32(self) -> u32 {
        match self {
            TrajectoryKind::LaserLine => 0,
            TrajectoryKind::Chaotic => 1,
            TrajectoryKind::Fall => 2,
            TrajectoryKind::Rise => 3,
            TrajectoryKind::Weightlessness => 4,
            TrajectoryKind::BallisticCurve => 5,
            TrajectoryKind::Static => 6,
            TrajectoryKind::UpwardFountain => 7,
            TrajectoryKind::HomingMissile => 8,
            TrajectoryKind::Unknown => u32::MAX,
        }
    }
}

/// One live simulated sprite.
///
/// Fields are public so drivers and renderers can read them freely; the
/// engine is the only thing that mutates particles it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub trajectory: TrajectoryKind,

    /// Current position in world pixels.
    pub position: Vec2,
    /// Where the particle spawned; used by `max_travel_distance`.
    pub origin: Vec2,
    /// Vertical speed in pixels per tick.
    pub speed: f32,
    /// Added to `speed` every tick by trajectories that accelerate.
    pub acceleration: f32,
    /// Heading in radians; its cosine signs horizontal motion.
    pub direction_angle: f32,
    /// Sprite rotation in radians.
    pub rotation: f32,
    /// Rotation rate in radians per second.
    pub angular_momentum: f32,

    pub base_color: Color,
    /// Color as of the last simulation pass.
    pub color: Color,
    pub color_interpolation: Option<ColorInterpolation>,
    pub scale: f32,
    pub scale_oscillation: Option<ScaleOscillation>,

    pub created_ms: u64,
    pub lifetime_ms: u64,
    pub last_update_ms: u64,
    pub max_travel_distance: Option<f32>,
    pub delete_requested: bool,
}

impl Particle {
    /// Create a particle at `position` born at `now_ms`.
    ///
    /// A zero lifetime is raised to 1 ms so every particle lives at least
    /// until the first sweep after its birth tick.
    pub fn new(
        kind: ParticleKind,
        trajectory: TrajectoryKind,
        position: Vec2,
        now_ms: u64,
        lifetime_ms: u64,
    ) -> Self {
        Self {
            kind,
            trajectory,
            position,
            origin: position,
            speed: 0.0,
            acceleration: 0.0,
            direction_angle: 0.0,
            rotation: 0.0,
            angular_momentum: 0.0,
            base_color: Color::WHITE,
            color: Color::WHITE,
            color_interpolation: None,
            scale: 1.0,
            scale_oscillation: None,
            created_ms: now_ms,
            lifetime_ms: lifetime_ms.max(1),
            last_update_ms: now_ms,
            max_travel_distance: None,
            delete_requested: false,
        }
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

    pub fn with_angular_momentum(mut self, momentum: f32) -> Self {
        self.angular_momentum = momentum;
        self
    }

    /// Set the base (and current) color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.base_color = color;
        self.color = color;
        self
    }

    pub fn with_color_interpolation(mut self, fade: ColorInterpolation) -> Self {
        self.color_interpolation = Some(fade);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Enable dynamic scale. `scale` immediately takes the oscillation's value
    /// at the particle's birth.
    pub fn with_scale_oscillation(mut self, oscillation: ScaleOscillation) -> Self {
        self.scale_oscillation = Some(oscillation);
        self.scale = oscillation.sample(0);
        self
    }

    pub fn with_max_travel_distance(mut self, distance: f32) -> Self {
        self.max_travel_distance = Some(distance);
        self
    }

    /// Time since creation, saturating at zero for clocks behind `created_ms`.
    #[inline]
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_ms)
    }

    /// True once `created_ms + lifetime_ms <= now_ms`.
    #[inline]
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.created_ms.saturating_add(self.lifetime_ms) <= now_ms
    }

    /// True if the next sweep at `now_ms` removes this particle.
    #[inline]
    pub fn should_remove(&self, now_ms: u64) -> bool {
        self.delete_requested || self.is_expired(now_ms)
    }

    /// Scale at `now_ms`. A pure function of elapsed time when dynamic scale
    /// is enabled, the stored scale otherwise.
    pub fn scale_at(&self, now_ms: u64) -> f32 {
        match self.scale_oscillation {
            Some(osc) => osc.sample(self.age_ms(now_ms)),
            None => self.scale,
        }
    }

    /// Color at `now_ms`, following the interpolation if one is set.
    pub fn color_at(&self, now_ms: u64) -> Color {
        match self.color_interpolation {
            Some(fade) => fade.sample(self.base_color, self.age_ms(now_ms)),
            None => self.base_color,
        }
    }

    /// Distance from the spawn origin.
    pub fn travelled(&self) -> f32 {
        self.position.distance(self.origin)
    }

    /// True when a travel limit is set and has been exceeded.
    pub fn exceeded_travel(&self) -> bool {
        self.max_travel_distance
            .is_some_and(|max| self.travelled() > max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(now: u64, lifetime: u64) -> Particle {
        Particle::new(ParticleKind::Circle, TrajectoryKind::Static, Vec2::ZERO, now, lifetime)
    }

    #[test]
    fn test_kind_ids_round_trip() {
        for kind in ParticleKind::DRAWABLE {
            assert_eq!(ParticleKind::from_u32(kind.as_u32()), kind);
        }
        for id in 0..9 {
            assert_eq!(TrajectoryKind::from_u32(id).as_u32(), id);
        }
    }

    #[test]
    fn test_unknown_ids() {
        assert_eq!(ParticleKind::from_u32(42), ParticleKind::Unknown);
        assert_eq!(TrajectoryKind::from_u32(99), TrajectoryKind::Unknown);
        assert!(!ParticleKind::DRAWABLE.contains(&ParticleKind::Unknown));
    }

    #[test]
    fn test_is_shape() {
        assert!(!ParticleKind::Raindrop.is_shape());
        assert!(!ParticleKind::Unknown.is_shape());
        assert!(ParticleKind::Star.is_shape());
        assert!(ParticleKind::X.is_shape());
    }

    #[test]
    fn test_zero_lifetime_is_raised() {
        assert_eq!(dot(0, 0).lifetime_ms, 1);
    }

    #[test]
    fn test_expiry_boundary() {
        let p = dot(100, 50);
        assert!(!p.is_expired(149));
        assert!(p.is_expired(150));
        assert!(p.should_remove(150));
    }

    #[test]
    fn test_delete_flag_forces_removal() {
        let mut p = dot(0, 10_000);
        assert!(!p.should_remove(1));
        p.delete_requested = true;
        assert!(p.should_remove(1));
    }

    #[test]
    fn test_scale_at_is_pure() {
        let p = dot(1000, 10_000).with_scale_oscillation(ScaleOscillation::new(0.5, 2.0, 800));
        let a = p.scale_at(1337);
        let b = p.scale_at(1337);
        assert_eq!(a, b);
        assert_eq!(p.scale, 0.5);
    }

    #[test]
    fn test_static_scale_without_oscillation() {
        let p = dot(0, 100).with_scale(3.0);
        assert_eq!(p.scale_at(50), 3.0);
    }

    #[test]
    fn test_color_at_follows_fade() {
        let p = dot(0, 5000)
            .with_color(Color::WHITE)
            .with_color_interpolation(ColorInterpolation::new(Color::BLACK, 1000));
        assert_eq!(p.color_at(0), Color::WHITE);
        assert_eq!(p.color_at(1000), Color::BLACK);
    }

    #[test]
    fn test_travel_limit() {
        let mut p = dot(0, 100).with_max_travel_distance(10.0);
        p.position = Vec2::new(6.0, 8.0);
        assert!(!p.exceeded_travel());
        p.position = Vec2::new(6.0, 9.0);
        assert!(p.exceeded_travel());
    }
}

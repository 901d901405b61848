//! Objects that create particles.
//!
//! Anything in the world that causes particles (a rain cloud, a weapon muzzle,
//! a lava vent) implements [`ParticleSource`]: it owns a list of emitters and
//! can be registered with the [`ParticleEngine`](crate::ParticleEngine). The
//! engine drives the emitters; the source decides which emitters exist.
//!
//! Sources are shared between the world and the engine as [`SharedSource`].
//! The engine only holds the handle while the source is registered.
//!
//! # Presets
//!
//! ```ignore
//! let cloud = shared(Cloud::rain(Vec2::new(640.0, 32.0), now_ms));
//! engine.register(cloud.clone());
//!
//! // The cloud drifts; its emitters follow.
//! cloud.borrow_mut().move_by(Vec2::new(1.5, 0.0));
//! ```

use crate::emitter::Emitter;
use crate::particle::{ParticleKind, TrajectoryKind};
use crate::visuals::{Color, ScaleOscillation};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

/// Capability of owning emitters.
///
/// Only the two accessors are required; the rest have default
/// implementations over [`emitters_mut`](Self::emitters_mut).
pub trait ParticleSource {
    /// The emitters this object owns.
    fn emitters(&self) -> &[Emitter];

    /// Mutable access to the emitter list.
    fn emitters_mut(&mut self) -> &mut Vec<Emitter>;

    /// Take ownership of a new emitter.
    fn add_emitter(&mut self, emitter: Emitter) {
        self.emitters_mut().push(emitter);
    }

    /// Move every emitter by `delta`.
    fn shift_emitters(&mut self, delta: Vec2) {
        for emitter in self.emitters_mut() {
            emitter.translate(delta);
        }
    }

    /// Arm a manual burst on every emitter.
    fn emit_all(&mut self) {
        for emitter in self.emitters_mut() {
            emitter.trigger();
        }
    }

    /// Disarm every emitter.
    fn stop_all(&mut self) {
        for emitter in self.emitters_mut() {
            emitter.stop();
        }
    }

    /// Drop emitters whose duration has run out. Returns how many were dropped.
    ///
    /// The engine never calls this; owners decide when to prune.
    fn prune_terminated(&mut self, now_ms: u64) -> usize {
        let emitters = self.emitters_mut();
        let before = emitters.len();
        emitters.retain(|e| !e.terminated(now_ms));
        before - emitters.len()
    }
}

/// A source shared between its owner and the engine registry.
pub type SharedSource = Rc<RefCell<dyn ParticleSource>>;

/// Wrap a source for registration.
///
/// The returned handle coerces to [`SharedSource`] when passed to
/// [`ParticleEngine::register`](crate::ParticleEngine::register).
pub fn shared<S: ParticleSource + 'static>(source: S) -> Rc<RefCell<S>> {
    Rc::new(RefCell::new(source))
}

// =============================================================================
// CLOUD
// =============================================================================

/// A weather cloud. Rains while it has automatic raindrop emitters.
#[derive(Debug, Clone, Default)]
pub struct Cloud {
    position: Vec2,
    emitters: Vec<Emitter>,
}

impl Cloud {
    /// A cloud with no emitters.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            emitters: Vec::new(),
        }
    }

    /// Drizzle preset: one automatic raindrop emitter under the cloud.
    pub fn rain(position: Vec2, now_ms: u64) -> Self {
        let mut cloud = Self::new(position);
        cloud.add_emitter(
            Emitter::new(position, ParticleKind::Raindrop, now_ms)
                .with_burst_size(5)
                .with_area_radius(40.0)
                .with_particle_lifetime_ms(1500)
                .with_speed(4.0)
                .with_automatic(true),
        );
        cloud
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Drift the cloud; its emitters follow.
    pub fn move_by(&mut self, delta: Vec2) {
        self.position += delta;
        self.shift_emitters(delta);
    }
}

impl ParticleSource for Cloud {
    fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    fn emitters_mut(&mut self) -> &mut Vec<Emitter> {
        &mut self.emitters
    }
}

// =============================================================================
// WEAPON MUZZLE
// =============================================================================

/// A weapon muzzle. Emits only when fired.
#[derive(Debug, Clone, Default)]
pub struct WeaponMuzzle {
    position: Vec2,
    facing: f32,
    emitters: Vec<Emitter>,
}

impl WeaponMuzzle {
    /// A muzzle with no emitters, facing `facing` radians.
    pub fn new(position: Vec2, facing: f32) -> Self {
        Self {
            position,
            facing,
            emitters: Vec::new(),
        }
    }

    /// Laser preset: a spark burst that flies out along the facing.
    pub fn sparks(position: Vec2, facing: f32, now_ms: u64) -> Self {
        let mut muzzle = Self::new(position, facing);
        muzzle.add_emitter(
            Emitter::new(position, ParticleKind::Star, now_ms)
                .with_trajectory(TrajectoryKind::LaserLine)
                .with_direction(facing)
                .with_burst_size(8)
                .with_area_radius(2.0)
                .with_particle_lifetime_ms(400)
                .with_color(Color::SPARK)
                .with_color_interpolation(Some(Color::EMBER))
                .with_rotation_amount(6.0)
                .with_max_travel_distance(600.0),
        );
        muzzle
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// Pull the trigger: every emitter bursts on the next tick.
    pub fn fire(&mut self) {
        self.emit_all();
    }

    /// Release the trigger.
    pub fn cease(&mut self) {
        self.stop_all();
    }

    /// Follow the weapon holder.
    pub fn move_to(&mut self, position: Vec2) {
        let delta = position - self.position;
        self.position = position;
        self.shift_emitters(delta);
    }
}

impl ParticleSource for WeaponMuzzle {
    fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    fn emitters_mut(&mut self) -> &mut Vec<Emitter> {
        &mut self.emitters
    }
}

// =============================================================================
// HAZARD
// =============================================================================

/// An environmental hazard such as a lava vent.
#[derive(Debug, Clone, Default)]
pub struct Hazard {
    position: Vec2,
    emitters: Vec<Emitter>,
}

impl Hazard {
    /// A hazard with no emitters.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            emitters: Vec::new(),
        }
    }

    /// Ember preset: pulsing circles that rise and cool to black.
    ///
    /// `duration_ms` bounds how long the vent erupts (`None` = forever).
    pub fn embers(position: Vec2, now_ms: u64, duration_ms: Option<u64>) -> Self {
        let mut hazard = Self::new(position);
        let mut emitter = Emitter::new(position, ParticleKind::Circle, now_ms)
            .with_trajectory(TrajectoryKind::Rise)
            .with_burst_size(2)
            .with_area_radius(12.0)
            .with_particle_lifetime_ms(1200)
            .with_speed(1.5)
            .with_color(Color::EMBER)
            .with_color_interpolation(None)
            .with_scale_oscillation(ScaleOscillation::new(0.6, 1.4, 500))
            .with_automatic(true);
        emitter.set_duration_ms(duration_ms);
        hazard.add_emitter(emitter);
        hazard
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }
}

impl ParticleSource for Hazard {
    fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    fn emitters_mut(&mut self) -> &mut Vec<Emitter> {
        &mut self.emitters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_rain_preset() {
        let cloud = Cloud::rain(Vec2::new(10.0, 20.0), 0);
        assert_eq!(cloud.emitters().len(), 1);
        let e = &cloud.emitters()[0];
        assert_eq!(e.kind(), ParticleKind::Raindrop);
        assert!(e.is_automatic());
    }

    #[test]
    fn test_cloud_move_shifts_emitters() {
        let mut cloud = Cloud::rain(Vec2::new(10.0, 20.0), 0);
        cloud.move_by(Vec2::new(5.0, -2.0));
        assert_eq!(cloud.position(), Vec2::new(15.0, 18.0));
        assert_eq!(cloud.emitters()[0].position(), Vec2::new(15.0, 18.0));
    }

    #[test]
    fn test_muzzle_fire_and_cease() {
        let mut muzzle = WeaponMuzzle::sparks(Vec2::ZERO, 0.0, 0);
        assert!(!muzzle.emitters()[0].ready(0));
        muzzle.fire();
        assert!(muzzle.emitters()[0].ready(0));
        muzzle.cease();
        assert!(!muzzle.emitters()[0].ready(0));
    }

    #[test]
    fn test_muzzle_move_to() {
        let mut muzzle = WeaponMuzzle::sparks(Vec2::new(1.0, 1.0), 0.0, 0);
        muzzle.move_to(Vec2::new(4.0, 5.0));
        assert_eq!(muzzle.emitters()[0].position(), Vec2::new(4.0, 5.0));
    }

    #[test]
    fn test_prune_terminated() {
        let mut hazard = Hazard::embers(Vec2::ZERO, 0, Some(1000));
        hazard.add_emitter(Emitter::new(Vec2::ZERO, ParticleKind::X, 0));
        assert_eq!(hazard.prune_terminated(1000), 0);
        assert_eq!(hazard.prune_terminated(1001), 1);
        assert_eq!(hazard.emitters().len(), 1);
        assert_eq!(hazard.emitters()[0].kind(), ParticleKind::X);
    }

    #[test]
    fn test_add_emitter_default_impl() {
        let mut cloud = Cloud::new(Vec2::ZERO);
        cloud.add_emitter(Emitter::new(Vec2::ZERO, ParticleKind::Star, 0));
        cloud.add_emitter(Emitter::new(Vec2::ZERO, ParticleKind::Circle, 0));
        assert_eq!(cloud.emitters().len(), 2);
    }
}

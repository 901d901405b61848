//! The particle engine.
//!
//! [`ParticleEngine`] owns every live particle and the registry of
//! [`ParticleSource`]s. Call [`tick`](ParticleEngine::tick) once per frame,
//! then [`draw`](ParticleEngine::draw):
//!
//! ```ignore
//! let mut engine = ParticleEngine::new(EngineConfig::default());
//! let cloud = shared(Cloud::rain(Vec2::new(320.0, 0.0), 0));
//! engine.register(cloud.clone());
//!
//! loop {
//!     let now_ms = clock.advance();
//!     engine.tick(now_ms, &world);
//!     engine.draw(&camera, &mut renderer);
//! }
//! ```
//!
//! # Tick Phases
//!
//! 1. **Emission** - every emitter of every registered source may burst.
//!    New particles are appended to the engine's list.
//! 2. **Simulation** - each particle, in list order: tile collision, dynamic
//!    scale and color, trajectory integration, raindrop wind drift, rotation.
//! 3. **Sweep** - reverse-index pass removing flagged and expired particles.
//!
//! A particle spawned during a tick is simulated and swept in that same tick.
//! Nothing in a tick returns an error or panics on particle data: unknown
//! kinds are skipped, missing textures skip that archetype.

use crate::config::EngineConfig;
use crate::emitter::Emitter;
use crate::particle::{Particle, ParticleKind, TrajectoryKind};
use crate::render::{SpriteBatch, SpriteInstance, SpriteRenderer};
use crate::source::{ParticleSource, SharedSource};
use crate::spawn::SpawnContext;
use crate::world::{is_solid, Viewport, World};
use glam::Vec2;
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;

/// Counters describing the engine after the last tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Live particles.
    pub particles: usize,
    /// Registered sources.
    pub sources: usize,
    /// Particles created by the last emission pass.
    pub spawned: usize,
    /// Particles removed by the last sweep.
    pub culled: usize,
    /// Ticks run since construction or the last [`clear`](ParticleEngine::clear).
    pub ticks: u64,
}

/// Owner and driver of all particles. See the [module docs](self).
pub struct ParticleEngine {
    config: EngineConfig,
    particles: Vec<Particle>,
    sources: Vec<SharedSource>,
    spawn: SpawnContext,
    batch: SpriteBatch,
    now_ms: u64,
    stats: EngineStats,
}

impl ParticleEngine {
    /// Create an engine with room for `config.initial_capacity` particles.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            particles: Vec::with_capacity(config.initial_capacity),
            sources: Vec::new(),
            spawn: SpawnContext::new(config.seed),
            batch: SpriteBatch::default(),
            now_ms: 0,
            stats: EngineStats::default(),
            config,
        }
    }

    // =========================================================================
    // REGISTRY
    // =========================================================================

    /// Register a source. Returns `false` if it was already registered.
    pub fn register(&mut self, source: SharedSource) -> bool {
        if self.is_registered(&source) {
            return false;
        }
        self.sources.push(source);
        true
    }

    /// Unregister a source. Returns `false` if it wasn't registered.
    ///
    /// Particles the source already emitted keep living out their lifetime.
    pub fn unregister<S: ParticleSource + ?Sized>(&mut self, source: &Rc<RefCell<S>>) -> bool {
        let target = Rc::as_ptr(source).cast::<()>();
        let before = self.sources.len();
        self.sources.retain(|s| Rc::as_ptr(s).cast::<()>() != target);
        self.sources.len() != before
    }

    /// Same as [`unregister`](Self::unregister).
    pub fn delete_emitter_owner<S: ParticleSource + ?Sized>(&mut self, source: &Rc<RefCell<S>>) -> bool {
        self.unregister(source)
    }

    /// True if this exact source handle is registered.
    pub fn is_registered<S: ParticleSource + ?Sized>(&self, source: &Rc<RefCell<S>>) -> bool {
        let target = Rc::as_ptr(source).cast::<()>();
        self.sources.iter().any(|s| Rc::as_ptr(s).cast::<()>() == target)
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Create an emitter for a source, stamped with the engine's current time.
    ///
    /// The caller hands it to its source with
    /// [`ParticleSource::add_emitter`].
    pub fn create_emitter(&self, position: Vec2, kind: ParticleKind) -> Emitter {
        Emitter::new(position, kind, self.now_ms)
    }

    // =========================================================================
    // PARTICLES
    // =========================================================================

    /// Live particles, in no particular order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Adopt a particle created elsewhere, e.g. from a replayed stream.
    pub fn insert(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Drop every particle and every registered source.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.sources.clear();
        self.stats = EngineStats::default();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Time of the last tick.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    // =========================================================================
    // TICK
    // =========================================================================

    /// Advance the simulation to `now_ms`: emission, simulation, sweep.
    pub fn tick<W: World + ?Sized>(&mut self, now_ms: u64, world: &W) {
        let spawned = self.run_emission(now_ms);
        self.run_simulation(now_ms, world);
        let culled = self.run_sweep(now_ms);

        self.stats = EngineStats {
            particles: self.particles.len(),
            sources: self.sources.len(),
            spawned,
            culled,
            ticks: self.stats.ticks + 1,
        };
    }

    /// Emission pass on its own. Returns the number of particles created.
    pub fn run_emission(&mut self, now_ms: u64) -> usize {
        self.now_ms = now_ms;
        let mut spawned = 0;
        for source in &self.sources {
            let Ok(mut source) = source.try_borrow_mut() else {
                warn!("particle source is borrowed elsewhere, skipping its emitters this tick");
                continue;
            };
            for emitter in source.emitters_mut().iter_mut() {
                spawned += emitter.update(now_ms, &mut self.spawn, &mut self.particles);
            }
        }
        spawned
    }

    /// Simulation pass on its own: collision, scale, color, motion, rotation.
    pub fn run_simulation<W: World + ?Sized>(&mut self, now_ms: u64, world: &W) {
        let wind = world.wind_speed();
        for particle in &mut self.particles {
            step_particle(particle, now_ms, world, wind, &self.config, &mut self.spawn);
        }
    }

    /// Sweep pass on its own. Returns the number of particles removed.
    ///
    /// Walks the list backwards so `swap_remove` only ever pulls in particles
    /// that were already checked.
    pub fn run_sweep(&mut self, now_ms: u64) -> usize {
        let mut culled = 0;
        for i in (0..self.particles.len()).rev() {
            if self.particles[i].should_remove(now_ms) {
                self.particles.swap_remove(i);
                culled += 1;
            }
        }
        culled
    }

    // =========================================================================
    // DRAW
    // =========================================================================

    /// Submit visible particles to `renderer`, one batch per archetype.
    ///
    /// Particles flagged for deletion and particles outside the viewport are
    /// skipped but stay in the simulation. Returns the number of sprites
    /// submitted.
    pub fn draw<V, R>(&mut self, view: &V, renderer: &mut R) -> usize
    where
        V: Viewport + ?Sized,
        R: SpriteRenderer + ?Sized,
    {
        let camera = view.camera_offset();
        let mut drawn = 0;

        for kind in ParticleKind::DRAWABLE {
            let Some(texture) = renderer.texture_for(kind) else {
                debug!("no texture for {:?}, skipping this frame", kind);
                continue;
            };

            self.batch.clear();
            for particle in self.particles.iter().filter(|p| p.kind == kind) {
                if particle.delete_requested {
                    continue;
                }
                let screen = particle.position - camera;
                if !view.is_visible(screen) {
                    continue;
                }
                self.batch.push(SpriteInstance::from_particle(particle, screen, &texture));
            }

            if !self.batch.is_empty() {
                drawn += self.batch.len();
                renderer.submit(texture, self.batch.instances());
            }
        }
        drawn
    }
}

impl Default for ParticleEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for ParticleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleEngine")
            .field("particles", &self.particles.len())
            .field("sources", &self.sources.len())
            .field("now_ms", &self.now_ms)
            .field("config", &self.config)
            .finish()
    }
}

/// One particle's simulation step.
fn step_particle<W: World + ?Sized>(
    particle: &mut Particle,
    now_ms: u64,
    world: &W,
    wind: f32,
    config: &EngineConfig,
    spawn: &mut SpawnContext,
) {
    if particle.delete_requested {
        return;
    }

    let cell = world.position_to_cell(particle.position);
    if let Some(tile) = world.tile_id_at(cell) {
        if is_solid(tile, config.open_tile_id) {
            particle.delete_requested = true;
            return;
        }
    }

    if particle.scale_oscillation.is_some() {
        particle.scale = particle.scale_at(now_ms);
    }
    if particle.color_interpolation.is_some() {
        particle.color = particle.color_at(now_ms);
    }

    let elapsed = now_ms.saturating_sub(particle.last_update_ms) as f32;
    // Only the left/right sign of the direction matters; vertical counts as right.
    let heading = if particle.direction_angle.cos() < -f32::EPSILON { -1.0 } else { 1.0 };

    match particle.trajectory {
        TrajectoryKind::LaserLine => {
            particle.position.x += config.laser_speed * elapsed * heading;
        }
        // Per tick, not per millisecond: faster frame rates jitter more.
        TrajectoryKind::Chaotic => {
            particle.position += spawn.jitter(config.chaotic_jitter);
        }
        TrajectoryKind::Fall => {
            particle.position.y += particle.speed;
        }
        TrajectoryKind::Rise => {
            particle.position.y -= particle.speed;
        }
        TrajectoryKind::BallisticCurve => {
            particle.speed += particle.acceleration;
            particle.position.x += config.ballistic_speed * elapsed * heading;
            particle.position.y += particle.speed;
        }
        TrajectoryKind::Static
        | TrajectoryKind::Weightlessness
        | TrajectoryKind::UpwardFountain
        | TrajectoryKind::HomingMissile
        | TrajectoryKind::Unknown => {}
    }

    if particle.kind == ParticleKind::Raindrop {
        particle.position.x += wind * config.wind_scale * elapsed;
    }

    particle.rotation += particle.angular_momentum * elapsed / 1000.0;

    if particle.exceeded_travel() {
        particle.delete_requested = true;
    }

    particle.last_update_ms = now_ms;
}

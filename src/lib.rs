//! # tilefx - particle effects for 2D tile worlds
//!
//! A CPU particle engine built for tens of thousands of sprites per frame
//! (target: 14k particles at 60 fps). Particles live in one flat list and are
//! dispatched on their kind each tick; there is no per-particle allocation and
//! no particle-to-particle interaction.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tilefx::prelude::*;
//!
//! let mut engine = ParticleEngine::new(EngineConfig::default());
//! let mut world = TileGrid::new(200, 120, 16.0);
//! world.fill_from_row(100, 1); // solid ground
//!
//! let cloud = shared(Cloud::rain(Vec2::new(640.0, 40.0), 0));
//! engine.register(cloud.clone());
//!
//! let mut clock = SimClock::fixed(16);
//! let camera = Camera::new(Vec2::ZERO, Vec2::new(1280.0, 720.0));
//! let mut renderer = RecordingRenderer::new(TextureRegistry::placeholder(8));
//!
//! for _ in 0..600 {
//!     let now_ms = clock.advance();
//!     engine.tick(now_ms, &world);
//!     engine.draw(&camera, &mut renderer);
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Sources and Emitters
//!
//! Anything that makes particles implements [`ParticleSource`]: it owns a list
//! of [`Emitter`]s and is registered with the engine. Ready-made sources are
//! [`Cloud`], [`WeaponMuzzle`] and [`Hazard`].
//!
//! ### Particles
//!
//! A [`Particle`] has an archetype ([`ParticleKind`], which picks its sprite)
//! and a motion rule ([`TrajectoryKind`]). The engine owns every particle from
//! the moment an emitter creates it until the sweep removes it.
//!
//! ### World and Rendering
//!
//! The engine reads the world through [`World`] (tile collision, wind) and
//! draws through [`SpriteRenderer`], one batch per archetype.
//!
//! ## Trajectories
//!
//! | Kind | Motion |
//! |------|--------|
//! | [`TrajectoryKind::LaserLine`] | horizontal, `laser_speed` px/ms |
//! | [`TrajectoryKind::Chaotic`] | random jitter, per tick |
//! | [`TrajectoryKind::Fall`] / [`TrajectoryKind::Rise`] | own speed, per tick |
//! | [`TrajectoryKind::BallisticCurve`] | horizontal px/ms + accelerating fall |
//! | [`TrajectoryKind::Static`] | none |
//! | `Weightlessness`, `UpwardFountain`, `HomingMissile` | reserved, none |

pub mod config;
mod emitter;
mod engine;
pub mod error;
pub mod grid;
mod particle;
pub mod render;
mod source;
pub mod spawn;
pub mod textures;
pub mod time;
pub mod visuals;
pub mod world;

pub use config::EngineConfig;
pub use emitter::{clamp_area_radius, Cadence, Emitter, MAX_AREA_RADIUS, MAX_BURST_SIZE, MIN_AREA_RADIUS};
pub use engine::{EngineStats, ParticleEngine};
pub use error::ConfigError;
pub use glam::{IVec2, Vec2};
pub use grid::TileGrid;
pub use particle::{Particle, ParticleKind, TrajectoryKind};
pub use render::{RecordingRenderer, SpriteBatch, SpriteInstance, SpriteRenderer};
pub use source::{shared, Cloud, Hazard, ParticleSource, SharedSource, WeaponMuzzle};
pub use spawn::SpawnContext;
pub use textures::{TextureHandle, TextureRegistry};
pub use time::SimClock;
pub use visuals::{Color, ColorInterpolation, ScaleOscillation};
pub use world::{is_solid, Camera, Viewport, World, AIR_TILE};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use tilefx::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::emitter::{Cadence, Emitter};
    pub use crate::engine::ParticleEngine;
    pub use crate::grid::TileGrid;
    pub use crate::particle::{Particle, ParticleKind, TrajectoryKind};
    pub use crate::render::{RecordingRenderer, SpriteInstance, SpriteRenderer};
    pub use crate::source::{shared, Cloud, Hazard, ParticleSource, WeaponMuzzle};
    pub use crate::textures::{TextureHandle, TextureRegistry};
    pub use crate::time::SimClock;
    pub use crate::visuals::{Color, ScaleOscillation};
    pub use crate::world::{Camera, Viewport, World};
    pub use crate::{IVec2, Vec2};
}

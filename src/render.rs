//! Draw submission.
//!
//! The engine does not render. During `draw` it groups visible particles by
//! archetype into a [`SpriteBatch`] and hands each batch to a
//! [`SpriteRenderer`] together with that archetype's texture, so a backend
//! binds each texture at most once per frame.
//!
//! [`SpriteInstance`] is `#[repr(C)]` and `Pod`: a backend can upload a whole
//! batch with [`SpriteBatch::as_bytes`] as a per-instance vertex buffer.
//!
//! # Instance Layout
//!
//! | Offset | Field | Type |
//! |--------|-------|------|
//! | 0 | `position` | `vec2<f32>` (screen space) |
//! | 8 | `origin` | `vec2<f32>` (texture pixels) |
//! | 16 | `scale` | `f32` |
//! | 20 | `rotation` | `f32` (radians) |
//! | 24 | `color` | `[u8; 4]` RGBA |

use crate::particle::{Particle, ParticleKind};
use crate::textures::{TextureHandle, TextureRegistry};
use crate::visuals::Color;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One sprite to draw.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: Vec2,
    pub origin: Vec2,
    pub scale: f32,
    pub rotation: f32,
    pub color: Color,
}

impl SpriteInstance {
    /// Instance for `particle` drawn at `screen_position`.
    pub fn from_particle(particle: &Particle, screen_position: Vec2, texture: &TextureHandle) -> Self {
        Self {
            position: screen_position,
            origin: texture.origin(),
            scale: particle.scale,
            rotation: particle.rotation,
            color: particle.color,
        }
    }
}

/// Reusable per-archetype instance buffer.
#[derive(Debug, Clone, Default)]
pub struct SpriteBatch {
    instances: Vec<SpriteInstance>,
}

impl SpriteBatch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    /// Empty the batch, keeping its allocation.
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: SpriteInstance) {
        self.instances.push(instance);
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[SpriteInstance] {
        &self.instances
    }

    /// Raw bytes of the batch for buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

/// Rendering backend as seen by the engine.
pub trait SpriteRenderer {
    /// Texture for an archetype. `None` skips the archetype this frame.
    fn texture_for(&self, kind: ParticleKind) -> Option<TextureHandle>;

    /// Draw one archetype's visible particles with a single texture binding.
    fn submit(&mut self, texture: TextureHandle, sprites: &[SpriteInstance]);
}

/// Renderer that records submissions instead of drawing them.
///
/// Useful for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub textures: TextureRegistry,
    /// `(texture id, sprite count)` per submission, in order.
    pub submissions: Vec<(u32, usize)>,
    pub sprites: Vec<SpriteInstance>,
}

impl RecordingRenderer {
    pub fn new(textures: TextureRegistry) -> Self {
        Self {
            textures,
            submissions: Vec::new(),
            sprites: Vec::new(),
        }
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.submissions.clear();
        self.sprites.clear();
    }

    /// Total sprites submitted since the last reset.
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }
}

impl SpriteRenderer for RecordingRenderer {
    fn texture_for(&self, kind: ParticleKind) -> Option<TextureHandle> {
        self.textures.get(kind)
    }

    fn submit(&mut self, texture: TextureHandle, sprites: &[SpriteInstance]) {
        self.submissions.push((texture.id, sprites.len()));
        self.sprites.extend_from_slice(sprites);
    }
}

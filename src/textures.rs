//! Archetype → texture lookup.
//!
//! The backend loads textures however it likes and registers one handle per
//! archetype here. An archetype without a registered texture is simply not
//! drawn; the simulation keeps running.
//!
//! ```ignore
//! let mut textures = TextureRegistry::new();
//! textures.insert(ParticleKind::Raindrop, TextureHandle::new(3, 2, 8));
//! textures.insert(ParticleKind::Star, TextureHandle::new(4, 9, 9));
//! ```

use crate::particle::ParticleKind;
use glam::Vec2;
use std::collections::HashMap;

/// Opaque backend texture id plus the sprite's pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

impl TextureHandle {
    pub fn new(id: u32, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Rotation/scale origin: the sprite's center in texture pixels.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }
}

/// Registry of archetype textures.
#[derive(Debug, Clone, Default)]
pub struct TextureRegistry {
    textures: HashMap<ParticleKind, TextureHandle>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the texture for an archetype.
    ///
    /// `Unknown` is never drawn, so registering it is ignored.
    pub fn insert(&mut self, kind: ParticleKind, handle: TextureHandle) -> Option<TextureHandle> {
        if kind == ParticleKind::Unknown {
            return None;
        }
        self.textures.insert(kind, handle)
    }

    /// Remove an archetype's texture.
    pub fn remove(&mut self, kind: ParticleKind) -> Option<TextureHandle> {
        self.textures.remove(&kind)
    }

    /// Texture for an archetype, if one is loaded.
    pub fn get(&self, kind: ParticleKind) -> Option<TextureHandle> {
        self.textures.get(&kind).copied()
    }

    /// Number of registered archetypes.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Registry with a placeholder handle for every drawable archetype.
    ///
    /// Ids follow [`ParticleKind::as_u32`]; every sprite is `size x size`.
    pub fn placeholder(size: u32) -> Self {
        let mut registry = Self::new();
        for kind in ParticleKind::DRAWABLE {
            registry.insert(kind, TextureHandle::new(kind.as_u32(), size, size));
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut reg = TextureRegistry::new();
        assert!(reg.get(ParticleKind::Star).is_none());
        reg.insert(ParticleKind::Star, TextureHandle::new(1, 8, 8));
        assert_eq!(reg.get(ParticleKind::Star).unwrap().id, 1);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_unknown_is_never_registered() {
        let mut reg = TextureRegistry::new();
        reg.insert(ParticleKind::Unknown, TextureHandle::new(1, 8, 8));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_placeholder_covers_drawable() {
        let reg = TextureRegistry::placeholder(4);
        assert_eq!(reg.len(), ParticleKind::DRAWABLE.len());
        assert_eq!(reg.get(ParticleKind::X).unwrap().origin(), Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_remove() {
        let mut reg = TextureRegistry::placeholder(4);
        assert!(reg.remove(ParticleKind::Raindrop).is_some());
        assert!(reg.get(ParticleKind::Raindrop).is_none());
    }
}

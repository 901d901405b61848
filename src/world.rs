//! What the engine needs from the surrounding game.
//!
//! The engine never owns the world. It reads it through [`World`] during
//! `tick` (collision and wind) and through [`Viewport`] during `draw`
//! (camera culling). [`TileGrid`](crate::grid::TileGrid) and [`Camera`] are
//! ready-made implementations.

use glam::{IVec2, Vec2};

/// The air tile. Never solid.
pub const AIR_TILE: u32 = 0;

/// Read-only world queries used by the simulation pass.
pub trait World {
    /// Grid cell containing a world position.
    fn position_to_cell(&self, position: Vec2) -> IVec2;

    /// Tile id at a cell, or `None` outside the grid.
    fn tile_id_at(&self, cell: IVec2) -> Option<u32>;

    /// Current ambient wind. Only raindrops drift with it.
    fn wind_speed(&self) -> f32 {
        0.0
    }
}

/// True if particles collide with `tile_id`.
///
/// Air and the configured open sentinel are passable; everything else is solid.
#[inline]
pub fn is_solid(tile_id: u32, open_tile_id: u32) -> bool {
    tile_id != AIR_TILE && tile_id != open_tile_id
}

/// Camera queries used by the draw pass.
pub trait Viewport {
    /// World position of the screen's top-left corner.
    fn camera_offset(&self) -> Vec2;

    /// True if a screen-space position should be drawn.
    fn is_visible(&self, screen_position: Vec2) -> bool;
}

/// Axis-aligned camera over the world.
///
/// Positions within `margin` pixels outside the screen still count as
/// visible so large sprites don't pop at the edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
    pub size: Vec2,
    pub margin: f32,
}

impl Camera {
    pub fn new(offset: Vec2, size: Vec2) -> Self {
        Self {
            offset,
            size,
            margin: 16.0,
        }
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }
}

impl Viewport for Camera {
    fn camera_offset(&self) -> Vec2 {
        self.offset
    }

    fn is_visible(&self, screen_position: Vec2) -> bool {
        let m = self.margin;
        screen_position.x >= -m
            && screen_position.y >= -m
            && screen_position.x <= self.size.x + m
            && screen_position.y <= self.size.y + m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_solid() {
        assert!(!is_solid(AIR_TILE, 255));
        assert!(!is_solid(255, 255));
        assert!(is_solid(1, 255));
        assert!(is_solid(254, 255));
    }

    #[test]
    fn test_camera_visibility() {
        let cam = Camera::new(Vec2::new(100.0, 100.0), Vec2::new(800.0, 600.0)).with_margin(0.0);
        assert_eq!(cam.camera_offset(), Vec2::new(100.0, 100.0));
        assert!(cam.is_visible(Vec2::new(0.0, 0.0)));
        assert!(cam.is_visible(Vec2::new(800.0, 600.0)));
        assert!(!cam.is_visible(Vec2::new(-1.0, 10.0)));
        assert!(!cam.is_visible(Vec2::new(10.0, 601.0)));
    }

    #[test]
    fn test_camera_margin() {
        let cam = Camera::new(Vec2::ZERO, Vec2::new(100.0, 100.0)).with_margin(10.0);
        assert!(cam.is_visible(Vec2::new(-10.0, 105.0)));
        assert!(!cam.is_visible(Vec2::new(-10.5, 50.0)));
    }
}

//! Flat tile grid.
//!
//! A row-major grid of tile ids with a fixed cell size in world pixels.
//! Cell `(0, 0)` covers world positions `[0, cell_size)` on both axes; cells
//! outside `[0, width) x [0, height)` report no tile.
//!
//! Games with their own world representation implement [`World`] directly;
//! this grid backs the stress driver, benchmarks and tests.

use crate::world::{World, AIR_TILE};
use glam::{IVec2, Vec2};

/// Row-major tile storage implementing [`World`].
#[derive(Clone, Debug)]
pub struct TileGrid {
    /// Size of each cell in world pixels.
    cell_size: f32,
    width: u32,
    height: u32,
    tiles: Vec<u32>,
    wind: f32,
}

impl TileGrid {
    /// An all-air grid of `width x height` cells.
    ///
    /// Cell sizes below one pixel are raised to one.
    pub fn new(width: u32, height: u32, cell_size: f32) -> Self {
        Self {
            cell_size: if cell_size.is_finite() { cell_size.max(1.0) } else { 1.0 },
            width,
            height,
            tiles: vec![AIR_TILE; width as usize * height as usize],
            wind: 0.0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Total number of cells.
    pub fn total_cells(&self) -> usize {
        self.tiles.len()
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        if cell.x < 0 || cell.y < 0 || cell.x >= self.width as i32 || cell.y >= self.height as i32 {
            return None;
        }
        Some(cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Set a tile. Out-of-range cells are ignored. Returns whether it was set.
    pub fn set_tile(&mut self, cell: IVec2, tile_id: u32) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.tiles[i] = tile_id;
                true
            }
            None => false,
        }
    }

    /// Fill every row from `row` to the bottom with `tile_id`.
    pub fn fill_from_row(&mut self, row: u32, tile_id: u32) {
        let start = (row.min(self.height) as usize) * self.width as usize;
        self.tiles[start..].fill(tile_id);
    }

    /// Set the ambient wind reported to the engine.
    pub fn set_wind(&mut self, wind: f32) {
        self.wind = wind;
    }

    /// World-space center of a cell.
    pub fn cell_center(&self, cell: IVec2) -> Vec2 {
        (cell.as_vec2() + Vec2::splat(0.5)) * self.cell_size
    }
}

impl World for TileGrid {
    fn position_to_cell(&self, position: Vec2) -> IVec2 {
        (position / self.cell_size).floor().as_ivec2()
    }

    fn tile_id_at(&self, cell: IVec2) -> Option<u32> {
        self.index(cell).map(|i| self.tiles[i])
    }

    fn wind_speed(&self) -> f32 {
        self.wind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_to_cell() {
        let grid = TileGrid::new(10, 10, 16.0);
        assert_eq!(grid.position_to_cell(Vec2::new(0.0, 0.0)), IVec2::new(0, 0));
        assert_eq!(grid.position_to_cell(Vec2::new(15.9, 16.0)), IVec2::new(0, 1));
        assert_eq!(grid.position_to_cell(Vec2::new(-0.1, 40.0)), IVec2::new(-1, 2));
    }

    #[test]
    fn test_out_of_range_is_none() {
        let grid = TileGrid::new(4, 3, 8.0);
        assert_eq!(grid.tile_id_at(IVec2::new(0, 0)), Some(AIR_TILE));
        assert_eq!(grid.tile_id_at(IVec2::new(4, 0)), None);
        assert_eq!(grid.tile_id_at(IVec2::new(0, 3)), None);
        assert_eq!(grid.tile_id_at(IVec2::new(-1, 1)), None);
    }

    #[test]
    fn test_set_and_fill() {
        let mut grid = TileGrid::new(4, 4, 8.0);
        assert!(grid.set_tile(IVec2::new(1, 1), 7));
        assert!(!grid.set_tile(IVec2::new(9, 9), 7));
        assert_eq!(grid.tile_id_at(IVec2::new(1, 1)), Some(7));

        grid.fill_from_row(3, 2);
        assert_eq!(grid.tile_id_at(IVec2::new(0, 3)), Some(2));
        assert_eq!(grid.tile_id_at(IVec2::new(0, 2)), Some(AIR_TILE));

        // Past the bottom: no-op.
        grid.fill_from_row(10, 5);
        assert_eq!(grid.tile_id_at(IVec2::new(3, 3)), Some(2));
    }

    #[test]
    fn test_cell_center() {
        let grid = TileGrid::new(4, 4, 10.0);
        assert_eq!(grid.cell_center(IVec2::new(1, 2)), Vec2::new(15.0, 25.0));
    }

    #[test]
    fn test_wind() {
        let mut grid = TileGrid::new(1, 1, 1.0);
        assert_eq!(grid.wind_speed(), 0.0);
        grid.set_wind(-2.0);
        assert_eq!(grid.wind_speed(), -2.0);
    }
}

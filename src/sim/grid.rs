//! Board geometry
//!
//! Discrete `(lane, column)` cells mapped onto world space:
//! - x runs across the lane, centred on the middle of the board
//! - y runs along the direction of travel (lane 0 at y = 0)
//! - every model dimension is multiplied by `zoom`

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::WRAP_MARGIN_CELLS;

/// A discrete board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub lane: u32,
    pub column: u32,
}

impl GridPos {
    pub const fn new(lane: u32, column: u32) -> Self {
        Self { lane, column }
    }
}

/// Fixed-width board geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Columns per lane
    pub columns: u32,
    /// Cell width before zoom
    pub position_width: f32,
    /// World scale
    pub zoom: f32,
}

impl Grid {
    /// World size of one cell
    #[inline]
    pub fn cell(&self) -> f32 {
        self.position_width * self.zoom
    }

    /// Board width before zoom
    #[inline]
    pub fn board_width(&self) -> f32 {
        self.position_width * self.columns as f32
    }

    /// Half the board width in world units
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.board_width() * self.zoom / 2.0
    }

    /// Column the player starts in
    pub fn center_column(&self) -> u32 {
        self.columns / 2
    }

    /// World x of a column centre
    pub fn column_x(&self, column: u32) -> f32 {
        (column as f32 * self.position_width + self.position_width / 2.0) * self.zoom
            - self.half_width()
    }

    /// World y of a lane
    pub fn lane_y(&self, lane: u32) -> f32 {
        lane as f32 * self.cell()
    }

    /// World position of a cell centre
    pub fn world_position(&self, pos: GridPos) -> Vec2 {
        Vec2::new(self.column_x(pos.column), self.lane_y(pos.lane))
    }

    /// Number of coarse slots when each slot spans `span` columns
    pub fn slot_count(&self, span: u32) -> u32 {
        self.columns.div_ceil(span.max(1))
    }

    /// World x of a coarse slot's anchor
    pub fn slot_x(&self, slot: u32, span: u32) -> f32 {
        (slot as f32 * self.position_width * span as f32 + self.position_width / 2.0) * self.zoom
            - self.half_width()
    }

    /// Distance past the board edge where traffic wraps around
    pub fn wrap_extent(&self) -> f32 {
        self.half_width() + WRAP_MARGIN_CELLS * self.cell()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_grid() -> Grid {
        Grid {
            columns: 17,
            position_width: 42.0,
            zoom: 2.0,
        }
    }

    #[test]
    fn test_center_column_is_origin() {
        let grid = default_grid();
        assert_eq!(grid.center_column(), 8);
        assert!(grid.column_x(grid.center_column()).abs() < 1e-4);
    }

    #[test]
    fn test_columns_are_one_cell_apart() {
        let grid = default_grid();
        assert_eq!(grid.cell(), 84.0);
        for c in 0..grid.columns - 1 {
            let gap = grid.column_x(c + 1) - grid.column_x(c);
            assert!((gap - grid.cell()).abs() < 1e-3);
        }
        // Board is symmetric
        assert!((grid.column_x(0) + grid.column_x(16)).abs() < 1e-3);
    }

    #[test]
    fn test_slot_counts_match_spawn_ranges() {
        let grid = default_grid();
        // floor(random * 17 / 2) spans 0..=8, floor(random * 17 / 3) spans 0..=5
        assert_eq!(grid.slot_count(2), 9);
        assert_eq!(grid.slot_count(3), 6);
        assert_eq!(grid.slot_count(1), 17);
    }

    #[test]
    fn test_slot_x_and_wrap_extent() {
        let grid = default_grid();
        assert!((grid.slot_x(0, 2) - grid.column_x(0)).abs() < 1e-3);
        assert!((grid.slot_x(1, 2) - grid.column_x(2)).abs() < 1e-3);
        assert!((grid.slot_x(1, 3) - grid.column_x(3)).abs() < 1e-3);
        // 714 + 2 * 84
        assert!((grid.wrap_extent() - 882.0).abs() < 1e-3);
    }

    #[test]
    fn test_world_position() {
        let grid = default_grid();
        let p = grid.world_position(GridPos::new(3, 8));
        assert!(p.x.abs() < 1e-4);
        assert!((p.y - 252.0).abs() < 1e-4);
    }
}

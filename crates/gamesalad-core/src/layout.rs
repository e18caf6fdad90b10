//! Board geometry and hit-testing.
//!
//! Hosts describe where the 16 cells sit on their surface (terminal columns,
//! canvas pixels) and use [`BoardLayout::hit_test`] to turn a raw pointer
//! location into a cell. Each cell's interactive hitbox can be inset from its
//! slot so that diagonal drags do not clip the neighbouring cells.

use crate::topology::{Position, GRID_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a layout from bad geometry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("board geometry contains a non-finite value")]
    NonFinite,
    #[error("cells must have a positive size, got {width}x{height}")]
    EmptyCell { width: f64, height: f64 },
    #[error("hitbox inset {inset} leaves no interactive area in a {width}x{height} cell")]
    InsetTooLarge { inset: f64, width: f64, height: f64 },
}

/// Raw, unvalidated board geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardGeometry {
    /// Left edge of the board
    pub origin_x: f64,
    /// Top edge of the board
    pub origin_y: f64,
    /// Horizontal distance between cell origins
    pub cell_width: f64,
    /// Vertical distance between cell origins
    pub cell_height: f64,
    /// Margin inside each cell that does not count as a hit
    pub hitbox_inset: f64,
}

impl BoardGeometry {
    pub fn new(origin_x: f64, origin_y: f64, cell_width: f64, cell_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            cell_width,
            cell_height,
            hitbox_inset: 0.0,
        }
    }

    pub fn with_hitbox_inset(mut self, inset: f64) -> Self {
        self.hitbox_inset = inset;
        self
    }
}

/// Validated board geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    geometry: BoardGeometry,
}

impl BoardLayout {
    pub fn new(geometry: BoardGeometry) -> Result<Self, LayoutError> {
        let BoardGeometry {
            origin_x,
            origin_y,
            cell_width,
            cell_height,
            hitbox_inset,
        } = geometry;

        if ![origin_x, origin_y, cell_width, cell_height, hitbox_inset]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(LayoutError::NonFinite);
        }
        if cell_width <= 0.0 || cell_height <= 0.0 {
            return Err(LayoutError::EmptyCell {
                width: cell_width,
                height: cell_height,
            });
        }
        if hitbox_inset < 0.0 || hitbox_inset * 2.0 >= cell_width.min(cell_height) {
            return Err(LayoutError::InsetTooLarge {
                inset: hitbox_inset,
                width: cell_width,
                height: cell_height,
            });
        }

        Ok(Self { geometry })
    }

    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }

    /// Total board width
    pub fn width(&self) -> f64 {
        self.geometry.cell_width * GRID_SIZE as f64
    }

    /// Total board height
    pub fn height(&self) -> f64 {
        self.geometry.cell_height * GRID_SIZE as f64
    }

    /// Top-left corner of a cell slot
    pub fn cell_origin(&self, pos: Position) -> (f64, f64) {
        (
            self.geometry.origin_x + pos.col() as f64 * self.geometry.cell_width,
            self.geometry.origin_y + pos.row() as f64 * self.geometry.cell_height,
        )
    }

    /// Center of a cell slot
    pub fn cell_center(&self, pos: Position) -> (f64, f64) {
        let (x, y) = self.cell_origin(pos);
        (
            x + self.geometry.cell_width / 2.0,
            y + self.geometry.cell_height / 2.0,
        )
    }

    /// Resolve a point to the cell whose hitbox contains it
    pub fn hit_test(&self, x: f64, y: f64) -> Option<Position> {
        let g = &self.geometry;
        let rel_x = x - g.origin_x;
        let rel_y = y - g.origin_y;
        if !(rel_x >= 0.0 && rel_y >= 0.0) {
            return None;
        }

        let col = (rel_x / g.cell_width).floor() as usize;
        let row = (rel_y / g.cell_height).floor() as usize;
        let pos = Position::from_coords(row, col)?;

        let in_x = rel_x - col as f64 * g.cell_width;
        let in_y = rel_y - row as f64 * g.cell_height;
        let inside = in_x >= g.hitbox_inset
            && in_x < g.cell_width - g.hitbox_inset
            && in_y >= g.hitbox_inset
            && in_y < g.cell_height - g.hitbox_inset;

        inside.then_some(pos)
    }
}

//! # Cells
//!
//! A cell is the unit square spanned by four adjacent grid samples.
//! Corners and sides are fixed enumerations backed by lookup tables.

use glam::DVec3;

use crate::error::EmbossResult;
use crate::grid::ElevationGrid;
use crate::scale::ScaleModel;

/// A corner of a cell, named in image space (north = smaller row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    NW,
    NE,
    SW,
    SE,
}

impl Corner {
    /// All corners in table order.
    pub const ALL: [Corner; 4] = [Corner::NW, Corner::NE, Corner::SW, Corner::SE];

    const OFFSETS: [(usize, usize); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];

    /// Position of this corner in [`Corner::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// `(col, row)` offset of the corner sample from the cell origin.
    #[inline]
    pub fn offset(self) -> (usize, usize) {
        Self::OFFSETS[self.index()]
    }
}

/// A side of a cell and the direction of the neighbouring cell across it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in table order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    const OFFSETS: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

    const SIDES: [[Corner; 2]; 4] = [
        [Corner::NW, Corner::NE],
        [Corner::NE, Corner::SE],
        [Corner::SW, Corner::SE],
        [Corner::NW, Corner::SW],
    ];

    /// Cell-space step towards the neighbour.
    #[inline]
    pub fn offset(self) -> (i64, i64) {
        Self::OFFSETS[self as usize]
    }

    /// The two corners lying on this side of a cell.
    #[inline]
    pub fn corners(self) -> [Corner; 2] {
        Self::SIDES[self as usize]
    }
}

/// A cell addressed by its north-west sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub cx: usize,
    pub cy: usize,
}

impl Cell {
    /// Creates a cell at `(cx, cy)`.
    pub fn new(cx: usize, cy: usize) -> Self {
        Self { cx, cy }
    }

    /// Grid `(col, row)` of one of the cell's corner samples.
    #[inline]
    pub fn corner_position(&self, corner: Corner) -> (usize, usize) {
        let (ox, oy) = corner.offset();
        (self.cx + ox, self.cy + oy)
    }

    /// Signed cell-space coordinate of the neighbour in `direction`.
    ///
    /// May lie outside the cell grid; callers decide what that means.
    #[inline]
    pub fn neighbor(&self, direction: Direction) -> (i64, i64) {
        let (ox, oy) = direction.offset();
        (self.cx as i64 + ox, self.cy as i64 + oy)
    }

    /// Raw corner elevations, indexed by [`Corner::index`].
    pub fn elevations(&self, grid: &ElevationGrid) -> EmbossResult<[u16; 4]> {
        let mut out = [0u16; 4];
        for corner in Corner::ALL {
            let (col, row) = self.corner_position(corner);
            out[corner.index()] = grid.get(col, row)?;
        }
        Ok(out)
    }

    /// World-space corner vertices, indexed by [`Corner::index`].
    pub fn vertices(&self, grid: &ElevationGrid, scale: &ScaleModel) -> EmbossResult<[DVec3; 4]> {
        let elevations = self.elevations(grid)?;
        Ok(Corner::ALL.map(|corner| {
            let (col, row) = self.corner_position(corner);
            scale.to_world(
                col as f64,
                row as f64,
                f64::from(elevations[corner.index()]),
            )
        }))
    }
}

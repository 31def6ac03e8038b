//! # Meshing Domain
//!
//! Decides which cells take part in meshing. The full rectangle of cells is
//! the default; the circular domain restricts output to a disk centred on
//! the cell grid and zeroes the samples outside it.
//!
//! All distances here are measured in cell space, where the grid of cells is
//! `(width - 1) x (height - 1)` and a cell is addressed by its north-west
//! sample.

use glam::DVec2;
use tracing::debug;

use crate::cell::Cell;
use crate::error::{EmbossError, EmbossResult};
use crate::grid::ElevationGrid;

/// Disk-shaped working area in cell space.
///
/// # Example
///
/// ```rust
/// use emboss_mesh::{CircularDomain, ElevationGrid};
///
/// let grid = ElevationGrid::new(11, 11, vec![100; 121]).unwrap();
/// let domain = CircularDomain::for_grid(&grid, 2.0).unwrap();
/// assert_eq!(domain.radius(), 5.0);
/// assert!(domain.contains(5.0, 5.0));
/// assert!(!domain.contains(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularDomain {
    centroid: DVec2,
    radius: f64,
    edge_buffer: f64,
}

impl CircularDomain {
    /// Builds the disk for a grid: centred on the cell grid, with a radius
    /// equal to the larger half-extent.
    ///
    /// Fails with [`EmbossError::DegenerateInput`] if `edge_buffer` is
    /// negative or not finite.
    pub fn for_grid(grid: &ElevationGrid, edge_buffer: f64) -> EmbossResult<Self> {
        if !(edge_buffer.is_finite() && edge_buffer >= 0.0) {
            return Err(EmbossError::degenerate(format!(
                "edge buffer must be a non-negative number: {edge_buffer}"
            )));
        }

        let centroid = DVec2::new(
            grid.cell_width() as f64 / 2.0,
            grid.cell_height() as f64 / 2.0,
        );

        Ok(Self {
            centroid,
            radius: centroid.max_element(),
            edge_buffer,
        })
    }

    /// Cell-space centre of the disk.
    #[inline]
    pub fn centroid(&self) -> DVec2 {
        self.centroid
    }

    /// Radius used for the cell inclusion test.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance inside the radius beyond which samples are zeroed.
    #[inline]
    pub fn edge_buffer(&self) -> f64 {
        self.edge_buffer
    }

    /// Euclidean distance from a cell-space point to the centroid.
    #[inline]
    pub fn distance(&self, x: f64, y: f64) -> f64 {
        DVec2::new(x, y).distance(self.centroid)
    }

    /// Disk test on a cell-space coordinate (inclusive).
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.distance(x, y) <= self.radius
    }

    /// True if the sample at `(col, row)` survives the crop.
    #[inline]
    pub fn keeps_sample(&self, col: usize, row: usize) -> bool {
        self.distance(col as f64, row as f64) <= self.radius - self.edge_buffer
    }

    /// Zeroes every sample farther than `radius - edge_buffer` from the
    /// centroid. Returns the number of samples that were cleared.
    pub fn apply(&self, grid: &mut ElevationGrid) -> EmbossResult<usize> {
        let mut cleared = 0;
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                if !self.keeps_sample(col, row) {
                    grid.set(col, row, 0)?;
                    cleared += 1;
                }
            }
        }

        debug!(
            cleared,
            radius = self.radius,
            edge_buffer = self.edge_buffer,
            "Applied circular crop"
        );
        Ok(cleared)
    }
}

/// The set of cells that produce triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    /// Every cell of the grid.
    Rectangle { cell_width: usize, cell_height: usize },
    /// Cells of the grid whose coordinate lies inside the disk.
    Circle {
        cell_width: usize,
        cell_height: usize,
        disk: CircularDomain,
    },
}

impl Domain {
    /// All cells of `grid`.
    pub fn rectangle(grid: &ElevationGrid) -> Self {
        Self::Rectangle {
            cell_width: grid.cell_width(),
            cell_height: grid.cell_height(),
        }
    }

    /// Cells of `grid` inside `disk`.
    pub fn circle(grid: &ElevationGrid, disk: CircularDomain) -> Self {
        Self::Circle {
            cell_width: grid.cell_width(),
            cell_height: grid.cell_height(),
            disk,
        }
    }

    /// Cell grid dimensions.
    pub fn cell_dimensions(&self) -> (usize, usize) {
        match *self {
            Self::Rectangle {
                cell_width,
                cell_height,
            }
            | Self::Circle {
                cell_width,
                cell_height,
                ..
            } => (cell_width, cell_height),
        }
    }

    /// Cell-space centre of the domain.
    pub fn centroid(&self) -> DVec2 {
        match self {
            Self::Rectangle {
                cell_width,
                cell_height,
            } => DVec2::new(*cell_width as f64 / 2.0, *cell_height as f64 / 2.0),
            Self::Circle { disk, .. } => disk.centroid(),
        }
    }

    /// True if the cell at signed coordinate `(cx, cy)` lies in the cell
    /// grid and passes the domain test.
    pub fn includes(&self, cx: i64, cy: i64) -> bool {
        let (cell_width, cell_height) = self.cell_dimensions();
        if cx < 0 || cy < 0 || cx as usize >= cell_width || cy as usize >= cell_height {
            return false;
        }
        match self {
            Self::Rectangle { .. } => true,
            Self::Circle { disk, .. } => disk.contains(cx as f64, cy as f64),
        }
    }

    /// Convenience wrapper of [`Domain::includes`] for a [`Cell`].
    #[inline]
    pub fn includes_cell(&self, cell: Cell) -> bool {
        self.includes(cell.cx as i64, cell.cy as i64)
    }

    /// Iterates included cells column by column, top to bottom within a
    /// column. The iterator can be recreated any number of times.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + Clone + '_ {
        let (cell_width, cell_height) = self.cell_dimensions();
        (0..cell_width)
            .flat_map(move |cx| (0..cell_height).map(move |cy| Cell::new(cx, cy)))
            .filter(move |cell| self.includes_cell(*cell))
    }

    /// Number of included cells.
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }
}

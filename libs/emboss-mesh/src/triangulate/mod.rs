//! # Cell Triangulation
//!
//! Splits every included cell into two triangles along its flatter
//! diagonal.
//!
//! ```text
//!   NW ---- NE        NW ---- NE
//!    | \     |         |     / |
//!    |   \   |         |   /   |
//!    |     \ |         | /     |
//!   SW ---- SE        SW ---- SE
//!     NW-SE             NE-SW
//! ```
//!
//! The diagonal whose end points differ least in elevation is drawn, which
//! keeps ridges and valleys from being cut across. Ties go to NW-SE, so flat
//! regions tessellate uniformly.

#[cfg(test)]
mod tests;

use glam::DVec3;
use rayon::prelude::*;
use tracing::debug;

use crate::cell::{Cell, Corner};
use crate::domain::Domain;
use crate::error::EmbossResult;
use crate::grid::ElevationGrid;
use crate::mesh::{Mesh, Triangle};
use crate::scale::ScaleModel;

/// Which diagonal a cell is split along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    /// North-west to south-east.
    NwSe,
    /// North-east to south-west.
    NeSw,
}

impl Diagonal {
    /// Picks the diagonal with the smaller elevation change.
    ///
    /// `elevations` is indexed by [`Corner::index`].
    pub fn select(elevations: &[u16; 4]) -> Self {
        let delta_nw_se = elevations[Corner::NW.index()].abs_diff(elevations[Corner::SE.index()]);
        let delta_ne_sw = elevations[Corner::NE.index()].abs_diff(elevations[Corner::SW.index()]);

        if delta_nw_se <= delta_ne_sw {
            Self::NwSe
        } else {
            Self::NeSw
        }
    }

    /// Splits the four corner vertices into two triangles.
    ///
    /// Vertex order inside each triangle is fixed and defines the winding.
    pub fn split(self, vertices: &[DVec3; 4]) -> [Triangle; 2] {
        let nw = vertices[Corner::NW.index()];
        let ne = vertices[Corner::NE.index()];
        let sw = vertices[Corner::SW.index()];
        let se = vertices[Corner::SE.index()];

        match self {
            Self::NwSe => [Triangle::new(nw, ne, se), Triangle::new(se, sw, nw)],
            Self::NeSw => [Triangle::new(sw, nw, ne), Triangle::new(ne, se, sw)],
        }
    }
}

/// Triangulates the cells of a grid that fall inside a domain.
///
/// Every accessor recomputes from the grid, so iterators can be restarted
/// and the triangle count taken before the triangles are streamed.
///
/// # Example
///
/// ```rust
/// use emboss_mesh::{Domain, ElevationGrid, ScaleMode, ScaleModel, Triangulator};
///
/// let grid = ElevationGrid::new(3, 3, vec![0, 1, 2, 1, 2, 3, 2, 3, 4]).unwrap();
/// let scale = ScaleModel::new(3, 3, 4, 30.0, 4.0, ScaleMode::Uniform).unwrap();
/// let triangulator = Triangulator::new(&grid, scale, Domain::rectangle(&grid));
///
/// assert_eq!(triangulator.triangle_count(), 8);
/// assert_eq!(triangulator.triangulate().unwrap().triangle_count(), 8);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Triangulator<'a> {
    grid: &'a ElevationGrid,
    scale: ScaleModel,
    domain: Domain,
}

impl<'a> Triangulator<'a> {
    /// Creates a triangulator over `grid`.
    pub fn new(grid: &'a ElevationGrid, scale: ScaleModel, domain: Domain) -> Self {
        Self {
            grid,
            scale,
            domain,
        }
    }

    /// The scale applied to every vertex.
    #[inline]
    pub fn scale(&self) -> &ScaleModel {
        &self.scale
    }

    /// The domain selecting the cells.
    #[inline]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The grid being triangulated.
    #[inline]
    pub fn grid(&self) -> &'a ElevationGrid {
        self.grid
    }

    /// Included cells in output order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + Clone + '_ {
        self.domain.cells()
    }

    /// Number of triangles the triangulator will emit.
    pub fn triangle_count(&self) -> usize {
        2 * self.domain.cell_count()
    }

    /// The diagonal chosen for `cell`.
    pub fn diagonal(&self, cell: Cell) -> EmbossResult<Diagonal> {
        Ok(Diagonal::select(&cell.elevations(self.grid)?))
    }

    /// The two triangles of a single cell.
    pub fn cell_triangles(&self, cell: Cell) -> EmbossResult<[Triangle; 2]> {
        let elevations = cell.elevations(self.grid)?;
        let vertices = cell.vertices(self.grid, &self.scale)?;
        Ok(Diagonal::select(&elevations).split(&vertices))
    }

    /// Lazily yields each included cell's triangles in output order.
    pub fn triangles(&self) -> impl Iterator<Item = EmbossResult<[Triangle; 2]>> + Clone + '_ {
        self.cells().map(move |cell| self.cell_triangles(cell))
    }

    /// Collects every triangle into a [`Mesh`] on the current thread.
    pub fn triangulate(&self) -> EmbossResult<Mesh> {
        let mut mesh = Mesh::with_capacity(self.triangle_count());
        for pair in self.triangles() {
            for triangle in pair? {
                mesh.add_triangle(triangle);
            }
        }

        debug!(triangles = mesh.triangle_count(), "Triangulated grid");
        Ok(mesh)
    }

    /// Same output as [`Triangulator::triangulate`], computed on the rayon
    /// thread pool. Cells are collected in order into a pre-sized buffer.
    pub fn triangulate_parallel(&self) -> EmbossResult<Mesh> {
        let cells: Vec<Cell> = self.cells().collect();
        let pairs = cells
            .par_iter()
            .map(|&cell| self.cell_triangles(cell))
            .collect::<EmbossResult<Vec<[Triangle; 2]>>>()?;

        let mesh: Mesh = pairs.into_iter().flatten().collect();
        debug!(
            triangles = mesh.triangle_count(),
            threads = rayon::current_num_threads(),
            "Triangulated grid in parallel"
        );
        Ok(mesh)
    }
}

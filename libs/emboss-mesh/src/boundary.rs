//! # Boundary Trace
//!
//! Collects the world-space points on the outer edge of the meshed region,
//! ordered by angle around the domain centroid. Used for rim finishing of a
//! cropped plate; the points never go into the mesh itself.

use std::collections::HashSet;

use glam::{DVec2, DVec3};
use tracing::debug;

use crate::cell::Direction;
use crate::error::EmbossResult;
use crate::triangulate::Triangulator;

/// A point on the boundary with its polar coordinates around the centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPoint {
    pub position: DVec3,
    /// Distance from the centroid in the world XY plane.
    pub radius: f64,
    /// Angle from +X in the world XY plane, in `(-PI, PI]`.
    pub angle: f64,
}

/// Deduplicated boundary points sorted by `(angle, radius)`.
///
/// # Example
///
/// ```rust
/// use emboss_mesh::{BoundaryTrace, Domain, ElevationGrid, ScaleMode, ScaleModel, Triangulator};
///
/// let grid = ElevationGrid::new(3, 3, vec![1; 9]).unwrap();
/// let scale = ScaleModel::new(3, 3, 1, 3.0, 1.0, ScaleMode::Uniform).unwrap();
/// let triangulator = Triangulator::new(&grid, scale, Domain::rectangle(&grid));
///
/// let trace = BoundaryTrace::extract(&triangulator).unwrap();
/// // every sample except the centre one
/// assert_eq!(trace.len(), 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryTrace {
    points: Vec<BoundaryPoint>,
}

impl BoundaryTrace {
    /// Walks the included cells and keeps the corners on every side that
    /// faces a cell outside the domain.
    pub fn extract(triangulator: &Triangulator<'_>) -> EmbossResult<Self> {
        let domain = triangulator.domain();
        let grid = triangulator.grid();
        let scale = triangulator.scale();

        let mut seen = HashSet::new();
        let mut positions = Vec::new();
        for cell in triangulator.cells() {
            let mut open_sides = Direction::ALL
                .into_iter()
                .filter(|&direction| {
                    let (nx, ny) = cell.neighbor(direction);
                    !domain.includes(nx, ny)
                })
                .peekable();
            if open_sides.peek().is_none() {
                continue;
            }

            let vertices = cell.vertices(grid, scale)?;
            for direction in open_sides {
                for corner in direction.corners() {
                    let position = vertices[corner.index()];
                    if seen.insert(position.to_array().map(f64::to_bits)) {
                        positions.push(position);
                    }
                }
            }
        }

        let centroid = domain.centroid();
        let center = scale.to_world(centroid.x, centroid.y, 0.0).truncate();
        let mut points: Vec<BoundaryPoint> = positions
            .into_iter()
            .map(|position| polar(position, center))
            .collect();
        points.sort_by(|a, b| {
            a.angle
                .total_cmp(&b.angle)
                .then(a.radius.total_cmp(&b.radius))
        });

        debug!(points = points.len(), "Extracted boundary trace");
        Ok(Self { points })
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the trace holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in angular order.
    #[inline]
    pub fn points(&self) -> &[BoundaryPoint] {
        &self.points
    }

    /// Iterates the points; may be called any number of times.
    pub fn iter(&self) -> std::slice::Iter<'_, BoundaryPoint> {
        self.points.iter()
    }

    /// World positions in angular order.
    pub fn positions(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.points.iter().map(|p| p.position)
    }
}

impl<'a> IntoIterator for &'a BoundaryTrace {
    type Item = &'a BoundaryPoint;
    type IntoIter = std::slice::Iter<'a, BoundaryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl IntoIterator for BoundaryTrace {
    type Item = BoundaryPoint;
    type IntoIter = std::vec::IntoIter<BoundaryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

fn polar(position: DVec3, center: DVec2) -> BoundaryPoint {
    let offset = position.truncate() - center;
    BoundaryPoint {
        position,
        radius: offset.length(),
        angle: offset.y.atan2(offset.x),
    }
}

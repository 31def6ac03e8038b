//! # Mesh Data Structure
//!
//! Triangle soup produced by the triangulator. Each triangle owns its three
//! vertices in a fixed winding order, which is exactly what binary STL
//! stores.

use std::io::Write;

use glam::DVec3;

use crate::error::EmbossResult;
use crate::stl::StlWriter;

/// A triangle whose vertex order fixes its winding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [DVec3; 3],
}

impl Triangle {
    /// Creates a triangle from three vertices in winding order.
    #[inline]
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Unit face normal, or zero for a degenerate triangle.
    pub fn normal(&self) -> DVec3 {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(v2 - v0).normalize_or_zero()
    }

    /// Triangle area.
    pub fn area(&self) -> f64 {
        let [v0, v1, v2] = self.vertices;
        0.5 * (v1 - v0).cross(v2 - v0).length()
    }

    /// True if the triangle holds `vertex` (exact comparison).
    #[inline]
    pub fn contains(&self, vertex: DVec3) -> bool {
        self.vertices.contains(&vertex)
    }
}

/// An ordered sequence of triangles.
///
/// All geometry uses f64; the STL writer narrows to f32 on output.
///
/// # Example
///
/// ```rust
/// use emboss_mesh::{Mesh, Triangle};
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_triangle(Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y));
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Appends a triangle.
    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let mut vertices = self.triangles.iter().flat_map(|t| t.vertices);
        let Some(first) = vertices.next() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        vertices.fold((first, first), |(min, max), v| (min.min(v), max.max(v)))
    }

    /// Validates the mesh for output.
    ///
    /// Checks that every coordinate is finite and survives narrowing to f32.
    pub fn validate(&self) -> bool {
        self.triangles
            .iter()
            .flat_map(|t| t.vertices)
            .all(|v| v.is_finite() && v.as_vec3().is_finite())
    }

    /// Writes the mesh as binary STL.
    pub fn write_stl<W: Write>(&self, writer: W) -> EmbossResult<()> {
        let mut stl = StlWriter::new(writer, self.triangles.len())?;
        for triangle in &self.triangles {
            stl.write_triangle(triangle)?;
        }
        stl.finish()?;
        Ok(())
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Triangle>> for Mesh {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_new() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_triangle_normal_ccw_points_up() {
        let tri = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y);
        assert_eq!(tri.normal(), DVec3::Z);
        assert_eq!(tri.area(), 0.5);
    }

    #[test]
    fn test_degenerate_triangle_normal_is_zero() {
        let tri = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::X * 2.0);
        assert_eq!(tri.normal(), DVec3::ZERO);
    }

    #[test]
    fn test_mesh_bounding_box() {
        let mesh: Mesh = vec![
            Triangle::new(DVec3::new(-1.0, -2.0, -3.0), DVec3::X, DVec3::Y),
            Triangle::new(DVec3::ZERO, DVec3::new(4.0, 5.0, 6.0), DVec3::Z),
        ]
        .into();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_empty_bounding_box() {
        assert_eq!(Mesh::new().bounding_box(), (DVec3::ZERO, DVec3::ZERO));
    }

    #[test]
    fn test_mesh_validate() {
        let mut mesh = Mesh::new();
        mesh.add_triangle(Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y));
        assert!(mesh.validate());

        mesh.add_triangle(Triangle::new(DVec3::splat(f64::NAN), DVec3::X, DVec3::Y));
        assert!(!mesh.validate());
    }

    #[test]
    fn test_mesh_write_stl_size() {
        let mesh: Mesh = (0..3)
            .map(|i| Triangle::new(DVec3::splat(i as f64), DVec3::X, DVec3::Y))
            .collect();
        let mut buffer = Vec::new();
        mesh.write_stl(&mut buffer).unwrap();
        assert_eq!(buffer.len(), config::constants::stl_file_size(3));
    }
}

//! # Conversion Pipeline
//!
//! Ties the stages together for one image:
//!
//! ```text
//! ElevationGrid → circular crop (optional) → ScaleModel → Triangulator → STL
//!                                                     ↘ BoundaryTrace
//! ```
//!
//! The converter owns its grid. The crop runs exactly once, in
//! [`Converter::new`], before the depth scale is derived.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use config::constants::{DEFAULT_EDGE_BUFFER, DEFAULT_TARGET_DEPTH_MM, DEFAULT_TARGET_WIDTH_MM};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::boundary::BoundaryTrace;
use crate::domain::{CircularDomain, Domain};
use crate::error::EmbossResult;
use crate::grid::ElevationGrid;
use crate::mesh::Mesh;
use crate::scale::{ScaleMode, ScaleModel};
use crate::stl::StlWriter;
use crate::triangulate::Triangulator;

/// Which maximum elevation the depth scale is derived from when cropping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthScalePolicy {
    /// Maximum of the samples left after the crop. The tallest retained
    /// point always reaches the target depth.
    #[default]
    RetainedSamples,
    /// Maximum of the uncropped image, so emboss depth does not depend on
    /// whether the crop is enabled.
    SourceImage,
}

/// Parameters for one conversion.
///
/// Missing fields take their defaults when deserialized.
///
/// # Example
///
/// ```rust
/// use emboss_mesh::ConversionParams;
///
/// let params = ConversionParams {
///     target_width_mm: 120.0,
///     circular_crop: false,
///     ..Default::default()
/// };
/// assert_eq!(params.target_depth_mm, 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionParams {
    /// Physical width of the output along X
    pub target_width_mm: f64,
    /// Height of the tallest sample along Z
    pub target_depth_mm: f64,
    /// Restrict the mesh to a disk
    pub circular_crop: bool,
    /// Cells trimmed inside the disk radius when cropping
    pub edge_buffer: f64,
    /// In-plane Y scale
    pub scale_mode: ScaleMode,
    /// Source of the maximum elevation for the depth scale
    pub depth_policy: DepthScalePolicy,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            target_width_mm: DEFAULT_TARGET_WIDTH_MM,
            target_depth_mm: DEFAULT_TARGET_DEPTH_MM,
            circular_crop: true,
            edge_buffer: DEFAULT_EDGE_BUFFER,
            scale_mode: ScaleMode::Uniform,
            depth_policy: DepthScalePolicy::RetainedSamples,
        }
    }
}

/// A prepared conversion: cropped grid, scale and domain.
///
/// # Example
///
/// ```rust
/// use emboss_mesh::{ConversionParams, Converter, ElevationGrid};
///
/// let grid = ElevationGrid::from_fn(10, 10, |col, row| (col + row) as u16).unwrap();
/// let params = ConversionParams { circular_crop: false, ..Default::default() };
/// let converter = Converter::new(grid, params).unwrap();
///
/// let mut stl = Vec::new();
/// converter.write_stl(&mut stl).unwrap();
/// assert_eq!(converter.triangle_count(), 162);
/// assert_eq!(stl.len(), 84 + 162 * 50);
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    grid: ElevationGrid,
    params: ConversionParams,
    scale: ScaleModel,
    domain: Domain,
}

impl Converter {
    /// Applies the crop (if enabled) and derives the scale.
    ///
    /// # Errors
    ///
    /// [`crate::EmbossError::DegenerateInput`] if the chosen maximum
    /// elevation is zero, the edge buffer is invalid, or the target
    /// dimensions are not positive.
    pub fn new(mut grid: ElevationGrid, params: ConversionParams) -> EmbossResult<Self> {
        let source_max = grid.max_elevation();

        let domain = if params.circular_crop {
            let disk = CircularDomain::for_grid(&grid, params.edge_buffer)?;
            disk.apply(&mut grid)?;
            Domain::circle(&grid, disk)
        } else {
            Domain::rectangle(&grid)
        };

        let max_elevation = match params.depth_policy {
            DepthScalePolicy::RetainedSamples => grid.max_elevation(),
            DepthScalePolicy::SourceImage => source_max,
        };
        debug!(source_max, max_elevation, policy = ?params.depth_policy, "Depth scale maximum");

        let scale = ScaleModel::new(
            grid.width(),
            grid.height(),
            max_elevation,
            params.target_width_mm,
            params.target_depth_mm,
            params.scale_mode,
        )?;

        info!(
            width = grid.width(),
            height = grid.height(),
            circular_crop = params.circular_crop,
            dx = scale.dx(),
            dy = scale.dy(),
            dz = scale.dz(),
            "Prepared heightfield conversion"
        );

        Ok(Self {
            grid,
            params,
            scale,
            domain,
        })
    }

    /// The grid after cropping.
    #[inline]
    pub fn grid(&self) -> &ElevationGrid {
        &self.grid
    }

    #[inline]
    pub fn params(&self) -> &ConversionParams {
        &self.params
    }

    #[inline]
    pub fn scale(&self) -> &ScaleModel {
        &self.scale
    }

    #[inline]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Triangulator over the cropped grid.
    pub fn triangulator(&self) -> Triangulator<'_> {
        Triangulator::new(&self.grid, self.scale, self.domain)
    }

    /// Number of triangles the mesh will hold.
    pub fn triangle_count(&self) -> usize {
        self.triangulator().triangle_count()
    }

    /// Builds the whole mesh in memory.
    pub fn to_mesh(&self) -> EmbossResult<Mesh> {
        self.triangulator().triangulate()
    }

    /// Builds the whole mesh in memory on the rayon thread pool.
    pub fn to_mesh_parallel(&self) -> EmbossResult<Mesh> {
        self.triangulator().triangulate_parallel()
    }

    /// Boundary points of the meshed region in angular order.
    pub fn boundary(&self) -> EmbossResult<BoundaryTrace> {
        BoundaryTrace::extract(&self.triangulator())
    }

    /// Streams the mesh as binary STL without holding it in memory.
    ///
    /// Counts the triangles first, writes the header, then writes one cell's
    /// triangles at a time. Returns the writer after flushing.
    pub fn write_stl<W: Write>(&self, writer: W) -> EmbossResult<W> {
        let triangulator = self.triangulator();
        let mut stl = StlWriter::new(writer, triangulator.triangle_count())?;
        for pair in triangulator.triangles() {
            for triangle in &pair? {
                stl.write_triangle(triangle)?;
            }
        }

        debug!(triangles = stl.written(), "Wrote STL records");
        stl.finish()
    }

    /// Writes the mesh to `path`. Returns the number of triangles written.
    ///
    /// A failed write may leave a truncated file behind.
    pub fn save_stl<P: AsRef<Path>>(&self, path: P) -> EmbossResult<usize> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_stl(BufWriter::new(file))?;

        let triangles = self.triangle_count();
        info!(path = %path.display(), triangles, "Saved STL");
        Ok(triangles)
    }
}

/// Converts a grid to a mesh in one call.
pub fn convert(grid: ElevationGrid, params: &ConversionParams) -> EmbossResult<Mesh> {
    Converter::new(grid, params.clone())?.to_mesh()
}

//! # Scale Model
//!
//! Maps grid indices and intensity units to physical millimetres.

use config::constants::MIN_GRID_DIMENSION;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{EmbossError, EmbossResult};

/// How the in-plane Y scale relates to the X scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// Square pixels: `dy = dx`.
    #[default]
    Uniform,
    /// `dy = dx * height / width`.
    AspectCorrected,
}

/// Physical scale factors for one grid.
///
/// # Example
///
/// ```rust
/// use emboss_mesh::{ScaleMode, ScaleModel};
///
/// let scale = ScaleModel::new(100, 80, 255, 1000.0, 50.0, ScaleMode::Uniform).unwrap();
/// assert_eq!(scale.dx(), 10.0);
/// assert_eq!(scale.dy(), 10.0);
/// assert_eq!(scale.dz(), 50.0 / 255.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleModel {
    dx: f64,
    dy: f64,
    dz: f64,
    grid_height: usize,
}

impl ScaleModel {
    /// Derives scale factors from the grid shape and the target size.
    ///
    /// # Errors
    ///
    /// [`EmbossError::DegenerateInput`] when either grid dimension is below
    /// two, `max_elevation` is zero, or a target dimension is not a positive
    /// finite number.
    pub fn new(
        grid_width: usize,
        grid_height: usize,
        max_elevation: u16,
        target_width_mm: f64,
        target_depth_mm: f64,
        mode: ScaleMode,
    ) -> EmbossResult<Self> {
        if grid_width < MIN_GRID_DIMENSION || grid_height < MIN_GRID_DIMENSION {
            return Err(EmbossError::degenerate(format!(
                "grid must be at least {MIN_GRID_DIMENSION}x{MIN_GRID_DIMENSION}, got {grid_width}x{grid_height}"
            )));
        }
        if max_elevation == 0 {
            return Err(EmbossError::degenerate(
                "maximum elevation is zero, depth scale is undefined",
            ));
        }
        if !(target_width_mm.is_finite() && target_width_mm > 0.0) {
            return Err(EmbossError::degenerate(format!(
                "target width must be positive: {target_width_mm}"
            )));
        }
        if !(target_depth_mm.is_finite() && target_depth_mm > 0.0) {
            return Err(EmbossError::degenerate(format!(
                "target depth must be positive: {target_depth_mm}"
            )));
        }

        let dx = target_width_mm / grid_width as f64;
        let dy = match mode {
            ScaleMode::Uniform => dx,
            ScaleMode::AspectCorrected => dx * grid_height as f64 / grid_width as f64,
        };
        let dz = target_depth_mm / f64::from(max_elevation);

        Ok(Self {
            dx,
            dy,
            dz,
            grid_height,
        })
    }

    /// Millimetres per grid column.
    #[inline]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Millimetres per grid row.
    #[inline]
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Millimetres per intensity unit.
    #[inline]
    pub fn dz(&self) -> f64 {
        self.dz
    }

    /// Maps a grid position and elevation to a world vertex.
    ///
    /// Y is flipped so image rows running down become world Y running up.
    #[inline]
    pub fn to_world(&self, col: f64, row: f64, elevation: f64) -> DVec3 {
        DVec3::new(
            col * self.dx,
            (self.grid_height as f64 - row) * self.dy,
            elevation * self.dz,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scale_reference_values() {
        let scale = ScaleModel::new(100, 100, 255, 1000.0, 50.0, ScaleMode::Uniform).unwrap();
        assert_eq!(scale.dx(), 10.0);
        assert_eq!(scale.dy(), 10.0);
        assert_eq!(scale.dz(), 50.0 / 255.0);
    }

    #[test]
    fn test_scale_aspect_corrected() {
        let scale =
            ScaleModel::new(100, 50, 255, 1000.0, 50.0, ScaleMode::AspectCorrected).unwrap();
        assert_eq!(scale.dx(), 10.0);
        assert_relative_eq!(scale.dy(), 5.0);
    }

    #[test]
    fn test_scale_flat_grid_rejected() {
        let result = ScaleModel::new(10, 10, 0, 1000.0, 50.0, ScaleMode::Uniform);
        assert!(matches!(result, Err(EmbossError::DegenerateInput { .. })));
    }

    #[test]
    fn test_scale_small_grid_rejected() {
        assert!(ScaleModel::new(1, 10, 255, 1000.0, 50.0, ScaleMode::Uniform).is_err());
        assert!(ScaleModel::new(10, 1, 255, 1000.0, 50.0, ScaleMode::Uniform).is_err());
    }

    #[test]
    fn test_scale_bad_targets_rejected() {
        assert!(ScaleModel::new(10, 10, 255, 0.0, 50.0, ScaleMode::Uniform).is_err());
        assert!(ScaleModel::new(10, 10, 255, 1000.0, -1.0, ScaleMode::Uniform).is_err());
        assert!(ScaleModel::new(10, 10, 255, f64::NAN, 50.0, ScaleMode::Uniform).is_err());
    }

    #[test]
    fn test_to_world_flips_y() {
        let scale = ScaleModel::new(10, 10, 100, 100.0, 10.0, ScaleMode::Uniform).unwrap();
        let top_left = scale.to_world(0.0, 0.0, 0.0);
        let bottom_right = scale.to_world(9.0, 9.0, 100.0);
        assert_eq!(top_left, DVec3::new(0.0, 100.0, 0.0));
        assert_relative_eq!(bottom_right.x, 90.0);
        assert_relative_eq!(bottom_right.y, 10.0);
        assert_relative_eq!(bottom_right.z, 10.0);
    }
}

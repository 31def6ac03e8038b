//! # Elevation Grid
//!
//! Owned 2D grid of elevation samples read from a grayscale image.
//! Samples are row-major, indexed by `(col, row)` with rows running
//! top-down in image space.

use config::constants::MIN_GRID_DIMENSION;

use crate::error::{EmbossError, EmbossResult};

/// A heightfield of non-negative integer samples.
///
/// Both dimensions are at least two so the grid holds one full cell.
///
/// # Example
///
/// ```rust
/// use emboss_mesh::ElevationGrid;
///
/// let grid = ElevationGrid::new(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
/// assert_eq!(grid.get(2, 1).unwrap(), 5);
/// assert_eq!(grid.cell_width(), 2);
/// assert_eq!(grid.cell_height(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevationGrid {
    width: usize,
    height: usize,
    samples: Vec<u16>,
}

impl ElevationGrid {
    /// Creates a grid from row-major samples.
    ///
    /// Fails with [`EmbossError::DegenerateInput`] if either dimension is
    /// below two or the sample count does not match `width * height`.
    pub fn new(width: usize, height: usize, samples: Vec<u16>) -> EmbossResult<Self> {
        if width < MIN_GRID_DIMENSION || height < MIN_GRID_DIMENSION {
            return Err(EmbossError::degenerate(format!(
                "grid must be at least {MIN_GRID_DIMENSION}x{MIN_GRID_DIMENSION}, got {width}x{height}"
            )));
        }

        let expected = width.checked_mul(height).ok_or_else(|| {
            EmbossError::degenerate(format!("grid dimensions overflow: {width}x{height}"))
        })?;
        if samples.len() != expected {
            return Err(EmbossError::degenerate(format!(
                "expected {expected} samples for {width}x{height} grid, got {}",
                samples.len()
            )));
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Creates a grid by evaluating `f(col, row)` for every sample.
    ///
    /// # Example
    ///
    /// ```rust
    /// use emboss_mesh::ElevationGrid;
    ///
    /// let ramp = ElevationGrid::from_fn(4, 4, |col, _row| col as u16).unwrap();
    /// assert_eq!(ramp.max_elevation(), 3);
    /// ```
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> EmbossResult<Self>
    where
        F: FnMut(usize, usize) -> u16,
    {
        let mut samples = Vec::with_capacity(width.saturating_mul(height));
        for row in 0..height {
            for col in 0..width {
                samples.push(f(col, row));
            }
        }
        Self::new(width, height, samples)
    }

    /// Number of samples per row.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells per row (`width - 1`).
    #[inline]
    pub fn cell_width(&self) -> usize {
        self.width - 1
    }

    /// Number of cell rows (`height - 1`).
    #[inline]
    pub fn cell_height(&self) -> usize {
        self.height - 1
    }

    /// Total number of cells in the grid.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cell_width() * self.cell_height()
    }

    /// Returns the sample at `(col, row)`.
    ///
    /// Lookups are never padded or clamped: anything outside the allocated
    /// grid is an [`EmbossError::IndexOutOfRange`].
    pub fn get(&self, col: usize, row: usize) -> EmbossResult<u16> {
        let index = self.index(col, row)?;
        Ok(self.samples[index])
    }

    /// Overwrites the sample at `(col, row)`.
    pub fn set(&mut self, col: usize, row: usize, value: u16) -> EmbossResult<()> {
        let index = self.index(col, row)?;
        self.samples[index] = value;
        Ok(())
    }

    /// Largest sample in the grid.
    pub fn max_elevation(&self) -> u16 {
        self.samples.iter().copied().max().unwrap_or(0)
    }

    /// Row-major view of all samples.
    #[inline]
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    fn index(&self, col: usize, row: usize) -> EmbossResult<usize> {
        if col >= self.width || row >= self.height {
            return Err(EmbossError::IndexOutOfRange {
                col,
                row,
                width: self.width,
                height: self.height,
            });
        }
        Ok(row * self.width + col)
    }
}

//! Grid loader: decodes an image file into an elevation grid.
//!
//! The luma channel is the elevation. Colour images are converted to
//! grayscale first and any alpha channel is dropped.

use std::path::Path;

use anyhow::{Context, Result};
use emboss_mesh::ElevationGrid;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use tracing::debug;

/// Sample depth read from the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    /// 0..=255
    Eight,
    /// 0..=65535
    Sixteen,
}

/// Opens and decodes `path` into a grid.
pub fn load_grid(path: &Path, depth: BitDepth) -> Result<ElevationGrid> {
    let image = image::open(path)
        .with_context(|| format!("failed to decode image '{}'", path.display()))?;
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "Decoded image"
    );
    grid_from_image(&image, depth)
}

/// Converts a decoded image into a grid.
pub fn grid_from_image(image: &DynamicImage, depth: BitDepth) -> Result<ElevationGrid> {
    let grid = match depth {
        BitDepth::Eight => grid_from_luma8(&image.to_luma8()),
        BitDepth::Sixteen => grid_from_luma16(&image.to_luma16()),
    };
    grid.context("image is too small to mesh")
}

fn grid_from_luma8(luma: &GrayImage) -> emboss_mesh::EmbossResult<ElevationGrid> {
    let (width, height) = luma.dimensions();
    let samples = luma.as_raw().iter().map(|&v| u16::from(v)).collect();
    ElevationGrid::new(width as usize, height as usize, samples)
}

fn grid_from_luma16(
    luma: &ImageBuffer<Luma<u16>, Vec<u16>>,
) -> emboss_mesh::EmbossResult<ElevationGrid> {
    let (width, height) = luma.dimensions();
    ElevationGrid::new(width as usize, height as usize, luma.as_raw().clone())
}

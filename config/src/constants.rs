//! # Configuration Constants
//!
//! Centralized constants for the emboss pipeline. Output dimensions,
//! circular crop tuning, STL layout sizes and safety limits are defined here.
//!
//! ## Categories
//!
//! - **Output**: Default physical dimensions of the embossed plate
//! - **Domain**: Circular crop tuning
//! - **STL Layout**: Byte sizes of the binary STL format
//! - **Limits**: Maximum values for safety bounds

// =============================================================================
// OUTPUT CONSTANTS
// =============================================================================

/// Default physical width of the output mesh in millimetres.
///
/// The grid width is stretched to this many millimetres along X.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_TARGET_WIDTH_MM;
///
/// // 100 pixel wide image -> 10 mm per pixel
/// let dx = DEFAULT_TARGET_WIDTH_MM / 100.0;
/// assert_eq!(dx, 10.0);
/// ```
pub const DEFAULT_TARGET_WIDTH_MM: f64 = 1000.0;

/// Default emboss depth in millimetres.
///
/// The brightest retained sample is lifted to this height along Z.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_TARGET_DEPTH_MM;
///
/// let dz = DEFAULT_TARGET_DEPTH_MM / 255.0;
/// assert!(dz > 0.0);
/// ```
pub const DEFAULT_TARGET_DEPTH_MM: f64 = 50.0;

/// Minimum number of samples along each grid axis.
///
/// A mesh needs at least one full cell, which spans two samples.
pub const MIN_GRID_DIMENSION: usize = 2;

// =============================================================================
// DOMAIN CONSTANTS
// =============================================================================

/// Default edge buffer for the circular crop, in cells.
///
/// Samples farther than `radius - DEFAULT_EDGE_BUFFER` from the cell-space
/// centroid are zeroed so the rim cells do not produce jagged spikes.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_EDGE_BUFFER;
///
/// let radius = 50.0;
/// let keep_radius = radius - DEFAULT_EDGE_BUFFER;
/// assert_eq!(keep_radius, 48.0);
/// ```
pub const DEFAULT_EDGE_BUFFER: f64 = 2.0;

// =============================================================================
// STL LAYOUT CONSTANTS
// =============================================================================

/// Size of the free-form binary STL header in bytes.
pub const STL_HEADER_SIZE: usize = 80;

/// Size of the little-endian triangle count that follows the header.
pub const STL_COUNT_SIZE: usize = 4;

/// Size of one binary STL triangle record in bytes.
///
/// Normal (3 x f32) + three vertices (9 x f32) + u16 attribute.
///
/// # Example
///
/// ```rust
/// use config::constants::STL_TRIANGLE_RECORD_SIZE;
///
/// assert_eq!(STL_TRIANGLE_RECORD_SIZE, 12 * 4 + 2);
/// ```
pub const STL_TRIANGLE_RECORD_SIZE: usize = 50;

/// Text written at the start of every STL header (space padded to 80 bytes).
///
/// Must not begin with `solid`, which readers take as an ASCII STL marker.
pub const STL_HEADER_TEXT: &str = "binary STL heightfield generated by emboss";

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of triangles in a single mesh.
///
/// The binary STL count field is a u32; this keeps output files under
/// roughly 10 GB as well.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_TRIANGLES;
///
/// // A 4096 x 4096 image fits comfortably
/// let triangles = 2 * 4095 * 4095;
/// assert!(triangles < MAX_TRIANGLES);
/// ```
pub const MAX_TRIANGLES: usize = 200_000_000;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Returns the size in bytes of a binary STL file holding `triangles` records.
///
/// # Example
///
/// ```rust
/// use config::constants::stl_file_size;
///
/// assert_eq!(stl_file_size(0), 84);
/// assert_eq!(stl_file_size(2), 184);
/// ```
#[inline]
pub fn stl_file_size(triangles: usize) -> usize {
    STL_HEADER_SIZE + STL_COUNT_SIZE + triangles * STL_TRIANGLE_RECORD_SIZE
}

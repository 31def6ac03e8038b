//! # Emboss Errors
//!
//! Error types for heightfield conversion and STL serialization.

use thiserror::Error;

/// Result type for emboss operations.
pub type EmbossResult<T> = Result<T, EmbossError>;

/// Errors that can occur while converting a heightfield to a mesh.
#[derive(Debug, Error)]
pub enum EmbossError {
    /// Grid too small, flat grid, or unusable output dimensions
    #[error("Degenerate input: {message}")]
    DegenerateInput { message: String },

    /// Grid lookup outside the allocated samples
    #[error("Index out of range: ({col}, {row}) in {width}x{height} grid")]
    IndexOutOfRange {
        col: usize,
        row: usize,
        width: usize,
        height: usize,
    },

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The streamed triangles disagree with the count written to the header
    #[error("Triangle count mismatch: header declares {declared}, wrote {written}")]
    TriangleCountMismatch { declared: usize, written: usize },

    /// Too many triangles for a binary STL file
    #[error("Too many triangles: {count} (max: {max})")]
    TooManyTriangles { count: usize, max: usize },

    /// Malformed binary STL data
    #[error("Invalid STL: {message}")]
    InvalidStl { message: String },
}

impl EmbossError {
    /// Creates a degenerate input error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateInput {
            message: message.into(),
        }
    }

    /// Creates an invalid STL error.
    pub fn invalid_stl(message: impl Into<String>) -> Self {
        Self::InvalidStl {
            message: message.into(),
        }
    }
}

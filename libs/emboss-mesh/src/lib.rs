//! # Emboss Mesh
//!
//! Converts a grayscale heightfield into a triangle mesh and writes it as
//! binary STL for fabrication.
//!
//! ## Architecture
//!
//! ```text
//! ElevationGrid → CircularDomain (optional) → ScaleModel → Triangulator → StlWriter
//!                                                                ↘ BoundaryTrace
//! ```
//!
//! ## Algorithms
//!
//! - **Triangulation**: each cell is split along its flatter diagonal
//! - **Circular crop**: samples outside a disk are zeroed, cells outside it
//!   are skipped, leaving a stair-stepped rim
//! - **Boundary trace**: rim corner points sorted by angle around the centre
//!
//! ## Usage
//!
//! ```rust
//! use emboss_mesh::{ConversionParams, Converter, ElevationGrid};
//!
//! let grid = ElevationGrid::from_fn(64, 64, |col, row| ((col ^ row) & 0xff) as u16).unwrap();
//! let converter = Converter::new(grid, ConversionParams::default()).unwrap();
//!
//! let mesh = converter.to_mesh().unwrap();
//! assert_eq!(mesh.triangle_count(), converter.triangle_count());
//! ```

pub mod boundary;
pub mod cell;
pub mod domain;
pub mod error;
pub mod grid;
pub mod mesh;
pub mod pipeline;
pub mod scale;
pub mod stl;
pub mod triangulate;

pub use boundary::{BoundaryPoint, BoundaryTrace};
pub use cell::{Cell, Corner, Direction};
pub use domain::{CircularDomain, Domain};
pub use error::{EmbossError, EmbossResult};
pub use grid::ElevationGrid;
pub use mesh::{Mesh, Triangle};
pub use pipeline::{convert, ConversionParams, Converter, DepthScalePolicy};
pub use scale::{ScaleMode, ScaleModel};
pub use stl::{load_stl, read_binary_stl, save_stl, StlContents, StlRecord, StlWriter};
pub use triangulate::{Diagonal, Triangulator};

//! # Config Crate
//!
//! Centralized configuration constants for the emboss pipeline.
//! All magic numbers and tunable defaults live here so the mesh library
//! and the command line tool agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_EDGE_BUFFER, DEFAULT_TARGET_WIDTH_MM, STL_HEADER_SIZE};
//!
//! // The circular crop trims this many cells inside the disk radius
//! assert_eq!(DEFAULT_EDGE_BUFFER, 2.0);
//!
//! // Output plates default to one metre wide
//! assert_eq!(DEFAULT_TARGET_WIDTH_MM, 1000.0);
//!
//! // Binary STL files start with a fixed 80-byte header
//! assert_eq!(STL_HEADER_SIZE, 80);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Format Exact**: STL layout sizes match the binary format byte for byte
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

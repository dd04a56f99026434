//! # vcms-lut
//!
//! 16-bit 3D lookup tables for video display calibration.
//!
//! This crate provides the cube handed to the video renderer and the binary
//! `.3dlut` container calibration tools write it in.
//!
//! # LUT Types
//!
//! - [`Clut3D`] - 3-dimensional lookup table with 16-bit RGB entries
//!
//! # Supported Formats
//!
//! - `.3dlut` - Binary little-endian cube ([`threedlut`] module)
//!
//! # Usage
//!
//! ```rust
//! use vcms_lut::Clut3D;
//!
//! let lut = Clut3D::identity(33).unwrap();
//! assert_eq!(lut.get(0, 0, 0), [0, 0, 0]);
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling
//! - [`byteorder`] - Little-endian file fields
//! - [`tracing`] - Diagnostics
//!
//! # Used By
//!
//! - `vcms` - LUT-file mode and sampled ICC transforms

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod clut;
mod error;
pub mod threedlut;

pub use clut::{Clut3D, MAX_SIZE, MIN_SIZE, grid_value};
pub use error::{LutError, LutResult};

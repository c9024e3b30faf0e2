#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]

//! Scale, rotate, reflect and shear for point sets and rasters.
//!
//! Point sets go through [`geom`]: a builder produces a square
//! [`TransformMatrix`], which [`geom::apply`] multiplies with the points in an
//! explicit [`PointLayout`]. Rasters go through [`raster`], which derives a
//! 2x3 affine map and resamples with a replicate border.
//!
//! ```
//! use xform_engine::geom::{self, Axis, PointSet, Tolerance};
//!
//! let points = PointSet::from_rows(&[[1.0, 0.0]])?;
//! let rotated = geom::rotate_points(&points, 90.0, Axis::Z)?;
//! assert!(rotated.approx_eq(&PointSet::from_rows(&[[0.0, 1.0]])?, Tolerance::DEFAULT));
//! # Ok::<(), xform_engine::TransformError>(())
//! ```
//!
//! The library only logs through the `log` facade; installing a logger is up
//! to the binary.

pub mod error;
pub mod geom;
#[cfg(feature = "image-io")]
pub mod io;
pub mod raster;
pub mod render;

#[cfg(feature = "image-io")]
pub use error::RasterIoError;
pub use error::{Result, TransformError};
pub use geom::{Axis, Dimension, PointLayout, PointSet, TransformKind, TransformMatrix};
pub use raster::Raster;

//! Contract for presenting point sets and rasters.
//!
//! The engine never draws anything itself. Front ends implement [`Renderer`]
//! and use [`validate_render_request`] to check a request before plotting.

use crate::error::{Result, TransformError};
use crate::geom::{Dimension, PointSet};
use crate::raster::Raster;

/// Plot style chosen from the dimension of the point sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    TwoD,
    ThreeD,
}

impl RenderMode {
    /// `TwoD` when every set is 2D, `ThreeD` when every set is 3D.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] for an empty slice and
    /// [`TransformError::DimensionMismatch`] for mixed dimensions.
    pub fn for_point_sets(sets: &[PointSet]) -> Result<Self> {
        let first = sets
            .first()
            .ok_or_else(|| TransformError::invalid_parameter("no point sets to render"))?;
        let dim = first.dimension();
        if let Some(other) = sets.iter().find(|set| set.dimension() != dim) {
            return Err(TransformError::DimensionMismatch {
                points_rows: first.len(),
                points_cols: dim.get(),
                matrix_rows: other.len(),
                matrix_cols: other.dimension().get(),
            });
        }
        Ok(match dim {
            Dimension::Two => Self::TwoD,
            Dimension::Three => Self::ThreeD,
        })
    }
}

/// Checks that every set has a label and that the sets can share one plot.
///
/// # Errors
/// Returns [`TransformError::InvalidParameter`] when the label count differs
/// from the set count, and the errors of [`RenderMode::for_point_sets`].
pub fn validate_render_request(sets: &[PointSet], labels: &[&str]) -> Result<RenderMode> {
    if sets.len() != labels.len() {
        return Err(TransformError::invalid_parameter(format!(
            "{} point sets but {} labels",
            sets.len(),
            labels.len()
        )));
    }
    RenderMode::for_point_sets(sets)
}

/// Shared axis limits: smallest and largest coordinate over all sets.
#[must_use]
pub fn value_range(sets: &[PointSet]) -> Option<(f64, f64)> {
    sets.iter()
        .filter_map(PointSet::value_range)
        .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
}

/// A sink for transform results.
pub trait Renderer {
    type Error: std::error::Error;

    /// Draws labelled point sets in one plot.
    fn render_points(
        &mut self,
        sets: &[PointSet],
        labels: &[&str],
        mode: RenderMode,
    ) -> Result<(), Self::Error>;

    /// Displays a raster.
    fn render_raster(&mut self, raster: &Raster) -> Result<(), Self::Error>;
}

//! Application of transform matrices to point sets.

use crate::error::{Result, TransformError};

use super::builder;
use super::core::{Axis, Dimension};
use super::matrix::{TransformMatrix, multiply};
use super::point_set::PointSet;

/// How the points of a set are laid out relative to the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointLayout {
    /// Each point is a row vector: `points * M`. Needs `M.rows == d`.
    RowVectors,
    /// Each point is a column vector: `M * p`. Needs `M.cols == d`.
    ColumnVectors,
    /// The whole `n x d` set is one operand: `M * points`. Needs `M.cols == n`.
    Block,
}

impl PointLayout {
    /// Shape-inferred layout: `RowVectors` if `M.rows == d`, else `Block` if
    /// `M.cols == n`.
    ///
    /// A square matrix matching the dimension always resolves to `RowVectors`,
    /// even when `Block` would also be valid.
    ///
    /// # Errors
    /// Returns [`TransformError::DimensionMismatch`] if neither shape matches.
    pub fn infer(points: &PointSet, matrix: &TransformMatrix) -> Result<Self> {
        let n = points.len();
        let d = points.dimension().get();
        if matrix.rows() == d {
            if matrix.cols() == n {
                log::debug!(
                    "{}x{} matrix fits a {n}x{d} point set both ways, using row vectors",
                    matrix.rows(),
                    matrix.cols()
                );
            }
            Ok(Self::RowVectors)
        } else if matrix.cols() == n {
            Ok(Self::Block)
        } else {
            Err(mismatch(points, matrix))
        }
    }
}

/// Applies `matrix` to `points` in the given layout and returns a new set.
///
/// # Errors
/// Returns [`TransformError::DimensionMismatch`] if the shapes do not fit the
/// layout, or if the result would not be a 2D or 3D point set.
pub fn apply(points: &PointSet, matrix: &TransformMatrix, layout: PointLayout) -> Result<PointSet> {
    let n = points.len();
    let d = points.dimension().get();
    log::debug!(
        "apply {:?} {}x{} matrix to {n} {d}D points as {layout:?}",
        matrix.kind(),
        matrix.rows(),
        matrix.cols()
    );

    let (out_dim, coords) = match layout {
        PointLayout::RowVectors => {
            if matrix.rows() != d {
                return Err(mismatch(points, matrix));
            }
            let coords = multiply(points.as_flat(), n, d, matrix.as_flat(), matrix.cols());
            (matrix.cols(), coords)
        }
        PointLayout::ColumnVectors => {
            if matrix.cols() != d {
                return Err(mismatch(points, matrix));
            }
            // (M * P^T)^T == P * M^T
            let transposed = matrix.transpose();
            let coords = multiply(points.as_flat(), n, d, transposed.as_flat(), matrix.rows());
            (matrix.rows(), coords)
        }
        PointLayout::Block => {
            if matrix.cols() != n {
                return Err(mismatch(points, matrix));
            }
            let coords = multiply(matrix.as_flat(), matrix.rows(), n, points.as_flat(), d);
            (d, coords)
        }
    };

    let out_dim = Dimension::try_from(out_dim).map_err(|_| mismatch(points, matrix))?;
    PointSet::from_flat(out_dim, coords)
}

/// Applies `matrix` using the layout chosen by [`PointLayout::infer`].
///
/// Kept for call sites that pass matrices of arbitrary shape. For square
/// matrices of the point dimension this multiplies on the right
/// (`points * M`), which is the transpose of what [`apply`] with
/// [`PointLayout::ColumnVectors`] computes. Prefer [`apply`] with an explicit
/// layout when both readings are possible.
///
/// # Errors
/// Returns [`TransformError::DimensionMismatch`] if no orientation fits.
pub fn apply_inferred(points: &PointSet, matrix: &TransformMatrix) -> Result<PointSet> {
    let layout = PointLayout::infer(points, matrix)?;
    apply(points, matrix, layout)
}

/// Scales every point by `factors`, one factor per axis.
///
/// # Errors
/// See [`builder::scale`].
pub fn scale_points(points: &PointSet, factors: &[f64]) -> Result<PointSet> {
    let matrix = builder::scale(points.dimension(), factors)?;
    apply(points, &matrix, PointLayout::ColumnVectors)
}

/// Rotates every point counter-clockwise by `angle_degrees` (about `axis` in 3D).
///
/// # Errors
/// See [`builder::rotate`].
pub fn rotate_points(points: &PointSet, angle_degrees: f64, axis: Axis) -> Result<PointSet> {
    let matrix = builder::rotate(points.dimension(), angle_degrees, axis)?;
    apply(points, &matrix, PointLayout::ColumnVectors)
}

/// Reflects every point across the axes whose flag is set.
///
/// # Errors
/// See [`builder::reflect`].
pub fn reflect_points(points: &PointSet, flags: &[bool]) -> Result<PointSet> {
    let matrix = builder::reflect(points.dimension(), flags)?;
    apply(points, &matrix, PointLayout::ColumnVectors)
}

/// Shears the `variable_axis` coordinate by `k` times the `fixed_axis` coordinate.
///
/// # Errors
/// See [`builder::shear`].
pub fn shear_points(
    points: &PointSet,
    k: f64,
    fixed_axis: usize,
    variable_axis: usize,
) -> Result<PointSet> {
    let matrix = builder::shear(points.dimension(), k, fixed_axis, variable_axis)?;
    apply(points, &matrix, PointLayout::ColumnVectors)
}

fn mismatch(points: &PointSet, matrix: &TransformMatrix) -> TransformError {
    TransformError::DimensionMismatch {
        points_rows: points.len(),
        points_cols: points.dimension().get(),
        matrix_rows: matrix.rows(),
        matrix_cols: matrix.cols(),
    }
}

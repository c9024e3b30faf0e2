//! Construction of scale, rotation, reflection and shear matrices.
//!
//! Every builder is a pure function of its arguments and returns a square
//! matrix for the requested [`Dimension`]. Matrices follow the column-vector
//! convention: a point `p` maps to `M * p`.

use crate::error::{Result, TransformError};

use super::core::{Axis, Dimension};
use super::matrix::{TransformKind, TransformMatrix};

/// Diagonal scale matrix with `factors` on the diagonal.
///
/// # Errors
/// Returns [`TransformError::InvalidParameter`] if the number of factors does
/// not match `dim` or a factor is not finite.
pub fn scale(dim: Dimension, factors: &[f64]) -> Result<TransformMatrix> {
    if factors.len() != dim.get() {
        return Err(TransformError::invalid_parameter(format!(
            "scale needs {} factors for {dim} data, got {}",
            dim.get(),
            factors.len()
        )));
    }
    if factors.iter().any(|f| !f.is_finite()) {
        return Err(TransformError::invalid_parameter("scale factors must be finite"));
    }

    let matrix = TransformMatrix::diagonal(TransformKind::Scale, factors);
    log::trace!("scale matrix {matrix}");
    Ok(matrix)
}

/// Counter-clockwise rotation by `angle_degrees`.
///
/// In 2D `axis` is ignored. In 3D the basis vector of `axis` stays fixed and
/// the other two rotate in their plane (right-handed).
///
/// # Errors
/// Returns [`TransformError::InvalidParameter`] if the angle is not finite.
pub fn rotate(dim: Dimension, angle_degrees: f64, axis: Axis) -> Result<TransformMatrix> {
    if !angle_degrees.is_finite() {
        return Err(TransformError::invalid_parameter(format!(
            "rotation angle must be finite: {angle_degrees}"
        )));
    }

    let (s, c) = angle_degrees.to_radians().sin_cos();
    let matrix = match (dim, axis) {
        (Dimension::Two, _) => {
            TransformMatrix::from_square(TransformKind::Rotate, &[&[c, -s], &[s, c]])
        }
        (Dimension::Three, Axis::X) => TransformMatrix::from_square(
            TransformKind::Rotate,
            &[&[1.0, 0.0, 0.0], &[0.0, c, -s], &[0.0, s, c]],
        ),
        (Dimension::Three, Axis::Y) => TransformMatrix::from_square(
            TransformKind::Rotate,
            &[&[c, 0.0, s], &[0.0, 1.0, 0.0], &[-s, 0.0, c]],
        ),
        (Dimension::Three, Axis::Z) => TransformMatrix::from_square(
            TransformKind::Rotate,
            &[&[c, -s, 0.0], &[s, c, 0.0], &[0.0, 0.0, 1.0]],
        ),
    };
    log::trace!("rotate {angle_degrees} deg about {axis}: {matrix}");
    Ok(matrix)
}

/// [`rotate`] with the axis given as a token (`"x"`, `"y"` or `"z"`).
///
/// # Errors
/// Returns [`TransformError::InvalidAxis`] for an unknown token. A 2D rotation
/// still validates the token even though it does not use it.
pub fn rotate_token(dim: Dimension, angle_degrees: f64, axis: &str) -> Result<TransformMatrix> {
    rotate(dim, angle_degrees, axis.parse()?)
}

/// Diagonal reflection matrix: `-1` where `flags[i]` is set, `1` elsewhere.
///
/// The flag count must equal the data dimension. Two flags are never padded
/// to a 3D matrix.
///
/// # Errors
/// Returns [`TransformError::InvalidParameter`] if `flags.len()` differs from `dim`.
pub fn reflect(dim: Dimension, flags: &[bool]) -> Result<TransformMatrix> {
    if flags.len() != dim.get() {
        return Err(TransformError::invalid_parameter(format!(
            "reflect needs {} axis flags for {dim} data, got {}",
            dim.get(),
            flags.len()
        )));
    }

    let diag: Vec<f64> = flags
        .iter()
        .map(|&flip| if flip { -1.0 } else { 1.0 })
        .collect();
    let matrix = TransformMatrix::diagonal(TransformKind::Reflect, &diag);
    log::trace!("reflect matrix {matrix}");
    Ok(matrix)
}

/// Reflection across every axis in `axes`.
///
/// # Errors
/// Returns [`TransformError::InvalidParameter`] if an axis does not exist in `dim`.
pub fn reflect_axes(dim: Dimension, axes: &[Axis]) -> Result<TransformMatrix> {
    let mut flags = vec![false; dim.get()];
    for axis in axes {
        flags[axis.index_in(dim)?] = true;
    }
    reflect(dim, &flags)
}

/// Shear that moves `variable_axis` by `k` times the `fixed_axis` coordinate.
///
/// Starts from the identity and sets `[variable_axis][fixed_axis] = k`.
///
/// # Errors
/// Returns [`TransformError::InvalidParameter`] for equal axes, an index
/// outside `dim`, or a non-finite `k`.
pub fn shear(
    dim: Dimension,
    k: f64,
    fixed_axis: usize,
    variable_axis: usize,
) -> Result<TransformMatrix> {
    let n = dim.get();
    if fixed_axis >= n || variable_axis >= n {
        return Err(TransformError::invalid_parameter(format!(
            "shear axes ({fixed_axis}, {variable_axis}) out of range for {dim} data"
        )));
    }
    if fixed_axis == variable_axis {
        return Err(TransformError::invalid_parameter(format!(
            "degenerate shear: fixed and variable axis are both {fixed_axis}"
        )));
    }
    if !k.is_finite() {
        return Err(TransformError::invalid_parameter(format!(
            "shear factor must be finite: {k}"
        )));
    }

    let mut matrix = TransformMatrix::identity(dim).with_kind(TransformKind::Shear);
    matrix.set(variable_axis, fixed_axis, k);
    log::trace!("shear matrix {matrix}");
    Ok(matrix)
}

/// [`shear`] with typed axes.
///
/// # Errors
/// Same as [`shear`]; `Z` is out of range in 2D.
pub fn shear_axes(dim: Dimension, k: f64, fixed: Axis, variable: Axis) -> Result<TransformMatrix> {
    shear(dim, k, fixed.index_in(dim)?, variable.index_in(dim)?)
}

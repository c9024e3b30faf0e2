//! 2x3 affine maps for raster resampling and small 2D point arrays.

use crate::error::{Result, TransformError};
use crate::geom::{Axis, Dimension, PointSet, Tolerance};

/// Determinant magnitude below which a 2x2 linear part counts as singular.
const SINGULAR_EPS: f64 = 1e-12;

/// A 2D affine map `p' = L * p + t`, stored as `[[a, b, tx], [c, d, ty]]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2 {
    m: [[f64; 3]; 2],
}

impl Affine2 {
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        }
    }

    #[must_use]
    pub const fn from_rows(m: [[f64; 3]; 2]) -> Self {
        Self { m }
    }

    /// Rotation by `angle_degrees` about `center`, combined with uniform `scale`.
    ///
    /// Positive angles turn counter-clockwise as seen on screen, where the y
    /// axis points down:
    ///
    /// ```text
    /// [  α  β  (1 - α) cx - β cy ]
    /// [ -β  α  β cx + (1 - α) cy ]      α = scale cos θ, β = scale sin θ
    /// ```
    #[must_use]
    pub fn rotation_about(center: [f64; 2], angle_degrees: f64, scale: f64) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        let alpha = scale * cos;
        let beta = scale * sin;
        let [cx, cy] = center;
        Self {
            m: [
                [alpha, beta, (1.0 - alpha) * cx - beta * cy],
                [-beta, alpha, beta * cx + (1.0 - alpha) * cy],
            ],
        }
    }

    /// The unique affine map taking each `src[i]` to `dst[i]`.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] when the source points are
    /// collinear or any coordinate is not finite.
    pub fn from_correspondences(src: [[f64; 2]; 3], dst: [[f64; 2]; 3]) -> Result<Self> {
        if src.iter().chain(dst.iter()).flatten().any(|v| !v.is_finite()) {
            return Err(TransformError::invalid_parameter(
                "affine correspondences must be finite",
            ));
        }

        // Solve in the frame of src[0]: the edge vectors give the linear part.
        let e1 = [src[1][0] - src[0][0], src[1][1] - src[0][1]];
        let e2 = [src[2][0] - src[0][0], src[2][1] - src[0][1]];
        let f1 = [dst[1][0] - dst[0][0], dst[1][1] - dst[0][1]];
        let f2 = [dst[2][0] - dst[0][0], dst[2][1] - dst[0][1]];

        let det = e1[0] * e2[1] - e2[0] * e1[1];
        if det.abs() < SINGULAR_EPS {
            return Err(TransformError::invalid_parameter(
                "affine source points are collinear",
            ));
        }
        let inv_det = 1.0 / det;
        // E^-1 for E = [e1 e2] (columns)
        let ei = [
            [e2[1] * inv_det, -e2[0] * inv_det],
            [-e1[1] * inv_det, e1[0] * inv_det],
        ];

        // L = F * E^-1 with F = [f1 f2] (columns)
        let a = f1[0] * ei[0][0] + f2[0] * ei[1][0];
        let b = f1[0] * ei[0][1] + f2[0] * ei[1][1];
        let c = f1[1] * ei[0][0] + f2[1] * ei[1][0];
        let d = f1[1] * ei[0][1] + f2[1] * ei[1][1];

        let tx = dst[0][0] - (a * src[0][0] + b * src[0][1]);
        let ty = dst[0][1] - (c * src[0][0] + d * src[0][1]);

        Ok(Self {
            m: [[a, b, tx], [c, d, ty]],
        })
    }

    #[must_use]
    pub fn determinant(self) -> f64 {
        self.m[0][0] * self.m[1][1] - self.m[0][1] * self.m[1][0]
    }

    /// Compute the inverse map.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] if the linear part is singular.
    pub fn invert(self) -> Result<Self> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPS {
            return Err(TransformError::invalid_parameter(
                "affine map is singular and cannot be inverted",
            ));
        }
        let [[a, b, tx], [c, d, ty]] = self.m;
        let inv_det = 1.0 / det;
        let ia = d * inv_det;
        let ib = -b * inv_det;
        let ic = -c * inv_det;
        let id = a * inv_det;
        Ok(Self {
            m: [
                [ia, ib, -(ia * tx + ib * ty)],
                [ic, id, -(ic * tx + id * ty)],
            ],
        })
    }

    #[must_use]
    pub fn apply(self, p: [f64; 2]) -> [f64; 2] {
        let [[a, b, tx], [c, d, ty]] = self.m;
        [a * p[0] + b * p[1] + tx, c * p[0] + d * p[1] + ty]
    }

    #[must_use]
    pub const fn as_matrix(&self) -> &[[f64; 3]; 2] {
        &self.m
    }

    #[must_use]
    pub fn approx_eq(self, other: Self, tol: Tolerance) -> bool {
        tol.approx_eq_coords(self.m.as_flattened(), other.m.as_flattened())
    }

    /// Maps every point of a 2D set through this affine map.
    ///
    /// # Errors
    /// Returns [`TransformError::DimensionMismatch`] for a 3D set.
    pub fn transform_points(self, points: &PointSet) -> Result<PointSet> {
        if points.dimension() != Dimension::Two {
            return Err(TransformError::DimensionMismatch {
                points_rows: points.len(),
                points_cols: points.dimension().get(),
                matrix_rows: 2,
                matrix_cols: 3,
            });
        }
        log::debug!("affine map of {} points: {:?}", points.len(), self.m);
        let coords = points
            .iter()
            .flat_map(|p| self.apply([p[0], p[1]]))
            .collect();
        PointSet::from_flat(Dimension::Two, coords)
    }
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Source triangle used by shear: origin, top-right and bottom-left corners.
pub(crate) fn shear_correspondences(
    width: f64,
    height: f64,
    k: f64,
    axis: Axis,
) -> Result<([[f64; 2]; 3], [[f64; 2]; 3])> {
    let src = [[0.0, 0.0], [width, 0.0], [0.0, height]];
    let dst = match axis {
        Axis::X => [[0.0, 0.0], [width, 0.0], [k * height, height]],
        Axis::Y => [[0.0, 0.0], [width, k * width], [0.0, height]],
        Axis::Z => return Err(TransformError::invalid_axis("z", "`x`, `y`")),
    };
    Ok((src, dst))
}

// ─────────────────────────────────────────────────────────────────────────────
// Point-array helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Rotates a 2D point array about the origin with the raster rotation convention.
///
/// # Errors
/// Returns [`TransformError::InvalidParameter`] for non-finite arguments and
/// [`TransformError::DimensionMismatch`] for a 3D set.
pub fn rotate_point_array(points: &PointSet, angle_degrees: f64, scale: f64) -> Result<PointSet> {
    if !angle_degrees.is_finite() || !scale.is_finite() {
        return Err(TransformError::invalid_parameter(
            "rotation angle and scale must be finite",
        ));
    }
    Affine2::rotation_about([0.0, 0.0], angle_degrees, scale).transform_points(points)
}

/// Uniformly scales a 2D point array about the origin.
///
/// # Errors
/// See [`rotate_point_array`].
pub fn scale_point_array(points: &PointSet, scale: f64) -> Result<PointSet> {
    rotate_point_array(points, 0.0, scale)
}

/// Flips a 2D point array viewed as an `n x 2` grid.
///
/// `X` reverses the order of the points; `Y` swaps the two coordinates of
/// every point.
///
/// # Errors
/// Returns [`TransformError::InvalidAxis`] for `Z` and
/// [`TransformError::DimensionMismatch`] for a 3D set.
pub fn reflect_point_array(points: &PointSet, axis: Axis) -> Result<PointSet> {
    if points.dimension() != Dimension::Two {
        return Err(TransformError::DimensionMismatch {
            points_rows: points.len(),
            points_cols: points.dimension().get(),
            matrix_rows: 2,
            matrix_cols: 2,
        });
    }
    let coords: Vec<f64> = match axis {
        Axis::X => points.iter().rev().flatten().copied().collect(),
        Axis::Y => points.iter().flat_map(|p| [p[1], p[0]]).collect(),
        Axis::Z => return Err(TransformError::invalid_axis("z", "`x`, `y`")),
    };
    PointSet::from_flat(Dimension::Two, coords)
}

/// Shears a 2D point array with the raster shear correspondences on a unit canvas.
///
/// # Errors
/// Returns [`TransformError::InvalidAxis`] for `Z`,
/// [`TransformError::InvalidParameter`] for a non-finite `k` and
/// [`TransformError::DimensionMismatch`] for a 3D set.
pub fn shear_point_array(points: &PointSet, k: f64, axis: Axis) -> Result<PointSet> {
    let (src, dst) = shear_correspondences(1.0, 1.0, k, axis)?;
    Affine2::from_correspondences(src, dst)?.transform_points(points)
}

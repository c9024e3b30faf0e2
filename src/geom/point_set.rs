use crate::error::{Result, TransformError};

use super::core::{Dimension, Tolerance};

/// An ordered set of 2D or 3D points sharing one dimension.
///
/// Coordinates are stored row-major: point `i` occupies
/// `coords[i * dim .. (i + 1) * dim]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    dim: Dimension,
    coords: Vec<f64>,
}

impl PointSet {
    /// Creates an empty set with a fixed dimension.
    #[must_use]
    pub const fn empty(dim: Dimension) -> Self {
        Self {
            dim,
            coords: Vec::new(),
        }
    }

    /// Builds a set from rows of coordinates.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] when `rows` is empty, when the
    /// rows differ in length, when the length is not 2 or 3, or when a
    /// coordinate is not finite.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| {
                TransformError::invalid_parameter(
                    "point set needs at least one point to infer its dimension",
                )
            })?
            .as_ref()
            .len();
        let dim = Dimension::try_from(first)?;

        let mut coords = Vec::with_capacity(rows.len() * first);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != first {
                return Err(TransformError::invalid_parameter(format!(
                    "point {index} has {} coordinates, expected {first}",
                    row.len()
                )));
            }
            coords.extend_from_slice(row);
        }

        Self::from_flat(dim, coords)
    }

    /// Builds a set from a flat row-major coordinate buffer.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] when the buffer length is not
    /// a multiple of the dimension or a coordinate is not finite.
    pub fn from_flat(dim: Dimension, coords: Vec<f64>) -> Result<Self> {
        if coords.len() % dim.get() != 0 {
            return Err(TransformError::invalid_parameter(format!(
                "{} coordinates do not form whole {dim} points",
                coords.len()
            )));
        }
        if let Some(bad) = coords.iter().position(|c| !c.is_finite()) {
            return Err(TransformError::invalid_parameter(format!(
                "coordinate {} of point {} is not finite",
                bad % dim.get(),
                bad / dim.get()
            )));
        }
        Ok(Self { dim, coords })
    }

    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dim
    }

    /// Number of points (rows).
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len() / self.dim.get()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Coordinates of point `index`, if present.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&[f64]> {
        let d = self.dim.get();
        self.coords.get(index * d..(index + 1) * d)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &[f64]> + ExactSizeIterator + '_ {
        self.coords.chunks_exact(self.dim.get())
    }

    /// Flat row-major view of all coordinates.
    #[must_use]
    pub fn as_flat(&self) -> &[f64] {
        &self.coords
    }

    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter().map(<[f64]>::to_vec).collect()
    }

    /// Smallest and largest coordinate over all axes, or `None` when empty.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.coords.iter().copied().fold(None, |acc, c| match acc {
            None => Some((c, c)),
            Some((lo, hi)) => Some((lo.min(c), hi.max(c))),
        })
    }

    /// Point-wise comparison within `tol`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tol: Tolerance) -> bool {
        self.dim == other.dim && tol.approx_eq_coords(&self.coords, &other.coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_infers_dimension() {
        let set = PointSet::from_rows(&[[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(set.dimension(), Dimension::Three);
        assert_eq!(set.len(), 2);
        assert_eq!(set.point(1), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(set.point(2), None);
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let rows: Vec<Vec<f64>> = vec![vec![0.0, 0.0], vec![1.0, 2.0, 3.0]];
        assert!(matches!(
            PointSet::from_rows(&rows),
            Err(TransformError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn from_rows_rejects_unsupported_dimension() {
        assert!(PointSet::from_rows(&[[1.0]]).is_err());
        assert!(PointSet::from_rows(&[[1.0, 2.0, 3.0, 4.0]]).is_err());
        assert!(PointSet::from_rows::<[f64; 2]>(&[]).is_err());
    }

    #[test]
    fn from_flat_rejects_non_finite() {
        let err = PointSet::from_flat(Dimension::Two, vec![0.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, TransformError::InvalidParameter { .. }));
    }

    #[test]
    fn value_range_spans_all_axes() {
        let set = PointSet::from_rows(&[[-1.5, 0.5], [1.0, 0.2]]).unwrap();
        assert_eq!(set.value_range(), Some((-1.5, 1.0)));
        assert_eq!(PointSet::empty(Dimension::Two).value_range(), None);
    }
}

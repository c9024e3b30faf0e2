use std::fmt;

use crate::error::{Result, TransformError};

use super::core::{Dimension, Tolerance};

/// The operation a matrix was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Scale,
    Rotate,
    Reflect,
    Shear,
    /// Supplied directly by the caller.
    Generic,
}

/// A dense row-major matrix tagged with the operation that produced it.
///
/// Builders always produce square `d x d` matrices. Caller-supplied matrices
/// ([`TransformKind::Generic`]) may have any non-empty rectangular shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformMatrix {
    kind: TransformKind,
    rows: usize,
    cols: usize,
    m: Vec<f64>,
}

impl TransformMatrix {
    /// Creates a generic matrix from rows.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] for an empty or ragged
    /// matrix, or one containing non-finite entries.
    pub fn new<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.is_empty() || cols == 0 {
            return Err(TransformError::invalid_parameter("matrix must not be empty"));
        }

        let mut m = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(TransformError::invalid_parameter(format!(
                    "matrix row {index} has {} entries, expected {cols}",
                    row.len()
                )));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(TransformError::invalid_parameter(format!(
                    "matrix row {index} contains a non-finite entry"
                )));
            }
            m.extend_from_slice(row);
        }

        Ok(Self {
            kind: TransformKind::Generic,
            rows: rows.len(),
            cols,
            m,
        })
    }

    #[must_use]
    pub fn identity(dim: Dimension) -> Self {
        Self::diagonal(TransformKind::Generic, &vec![1.0; dim.get()])
    }

    pub(crate) fn diagonal(kind: TransformKind, diag: &[f64]) -> Self {
        let n = diag.len();
        let mut m = vec![0.0; n * n];
        for (i, &value) in diag.iter().enumerate() {
            m[i * n + i] = value;
        }
        Self {
            kind,
            rows: n,
            cols: n,
            m,
        }
    }

    pub(crate) fn from_square(kind: TransformKind, rows: &[&[f64]]) -> Self {
        let n = rows.len();
        debug_assert!(rows.iter().all(|row| row.len() == n));
        Self {
            kind,
            rows: n,
            cols: n,
            m: rows.concat(),
        }
    }

    pub(crate) fn with_kind(mut self, kind: TransformKind) -> Self {
        self.kind = kind;
        self
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        self.m[row * self.cols + col] = value;
    }

    #[must_use]
    pub const fn kind(&self) -> TransformKind {
        self.kind
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub const fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Entry at (`row`, `col`), if in range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        (row < self.rows && col < self.cols).then(|| self.m[row * self.cols + col])
    }

    /// Access the raw row-major matrix data.
    #[must_use]
    pub fn as_flat(&self) -> &[f64] {
        &self.m
    }

    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.m.chunks_exact(self.cols).map(<[f64]>::to_vec).collect()
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut m = vec![0.0; self.m.len()];
        for r in 0..self.rows {
            for c in 0..self.cols {
                m[c * self.rows + r] = self.m[r * self.cols + c];
            }
        }
        Self {
            kind: self.kind,
            rows: self.cols,
            cols: self.rows,
            m,
        }
    }

    #[must_use]
    pub fn approx_eq(&self, other: &Self, tol: Tolerance) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && tol.approx_eq_coords(&self.m, &other.m)
    }
}

impl fmt::Display for TransformMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (r, row) in self.m.chunks_exact(self.cols).enumerate() {
            if r > 0 {
                f.write_str(", ")?;
            }
            f.write_str("[")?;
            for (c, value) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{value}")?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}

/// Dense product `a (a_rows x inner) * b (inner x b_cols)` over flat row-major buffers.
pub(crate) fn multiply(a: &[f64], a_rows: usize, inner: usize, b: &[f64], b_cols: usize) -> Vec<f64> {
    debug_assert_eq!(a.len(), a_rows * inner);
    debug_assert_eq!(b.len(), inner * b_cols);

    let mut out = vec![0.0; a_rows * b_cols];
    for i in 0..a_rows {
        for k in 0..inner {
            let lhs = a[i * inner + k];
            if lhs == 0.0 {
                continue;
            }
            for j in 0..b_cols {
                out[i * b_cols + j] += lhs * b[k * b_cols + j];
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_ragged_rows() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 0.0], vec![0.0]];
        assert!(TransformMatrix::new(&rows).is_err());
        assert!(TransformMatrix::new::<[f64; 2]>(&[]).is_err());
    }

    #[test]
    fn identity_is_square_and_generic() {
        let id = TransformMatrix::identity(Dimension::Three);
        assert_eq!((id.rows(), id.cols()), (3, 3));
        assert_eq!(id.kind(), TransformKind::Generic);
        assert_eq!(id.get(1, 1), Some(1.0));
        assert_eq!(id.get(0, 1), Some(0.0));
        assert_eq!(id.get(3, 0), None);
    }

    #[test]
    fn transpose_swaps_shape() {
        let m = TransformMatrix::new(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let t = m.transpose();
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert_eq!(t.to_rows(), vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
    }

    #[test]
    fn multiply_matches_hand_product() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [0.0, 1.0, 1.0, 0.0];
        assert_eq!(multiply(&a, 2, 2, &b, 2), vec![2.0, 1.0, 4.0, 3.0]);
    }

    #[test]
    fn display_lists_rows() {
        let m = TransformMatrix::new(&[[0.0, 1.0], [1.0, 0.0]]).unwrap();
        assert_eq!(m.to_string(), "[[0, 1], [1, 0]]");
    }
}

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TransformError};

// ─────────────────────────────────────────────────────────────────────────────
// Axis
// ─────────────────────────────────────────────────────────────────────────────

/// Token list reported when an axis string cannot be parsed.
pub(crate) const AXIS_TOKENS: &str = "`x`, `y`, `z`";

/// A coordinate axis used to parameterize rotation, reflection and shear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Column index of this axis in a coordinate vector.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }

    /// Returns the index of this axis if it exists in `dim`.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] for `Z` in two dimensions.
    pub fn index_in(self, dim: Dimension) -> Result<usize> {
        let index = self.index();
        if index < dim.get() {
            Ok(index)
        } else {
            Err(TransformError::invalid_parameter(format!(
                "axis {} does not exist in {dim}",
                self.name()
            )))
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = TransformError;

    fn from_str(token: &str) -> Result<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            _ => Err(TransformError::invalid_axis(token, AXIS_TOKENS)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dimension
// ─────────────────────────────────────────────────────────────────────────────

/// Coordinate dimension of a point set or a builder target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Two,
    Three,
}

impl Dimension {
    #[must_use]
    pub const fn get(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl TryFrom<usize> for Dimension {
    type Error = TransformError;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(TransformError::invalid_parameter(format!(
                "only 2D and 3D coordinates are supported, got {other}D"
            ))),
        }
    }
}

impl From<Dimension> for usize {
    fn from(dim: Dimension) -> Self {
        dim.get()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.get())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tolerance
// ─────────────────────────────────────────────────────────────────────────────

/// Numeric tolerance for approximate comparisons.
///
/// - `Tolerance::DEFAULT` - General comparisons (1e-9)
/// - `Tolerance::LOOSE` - Results that went through trigonometry twice (1e-6)
/// - `Tolerance::TIGHT` - Near-exact comparisons (1e-12)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub eps: f64,
}

impl Tolerance {
    /// Default tolerance (1e-9).
    pub const DEFAULT: Self = Self { eps: 1e-9 };

    /// Loose tolerance for coarse comparisons (1e-6).
    pub const LOOSE: Self = Self { eps: 1e-6 };

    /// Tight tolerance for precise comparisons (1e-12).
    pub const TIGHT: Self = Self { eps: 1e-12 };

    #[must_use]
    pub const fn new(eps: f64) -> Self {
        Self { eps }
    }

    #[must_use]
    pub fn approx_eq_f64(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.eps
    }

    #[must_use]
    pub fn approx_zero_f64(self, a: f64) -> bool {
        a.abs() <= self.eps
    }

    /// Component-wise comparison of two coordinate slices of equal length.
    #[must_use]
    pub fn approx_eq_coords(self, a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a
                .iter()
                .zip(b)
                .all(|(&lhs, &rhs)| self.approx_eq_f64(lhs, rhs))
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_parse_tokens() {
        assert_eq!("x".parse::<Axis>(), Ok(Axis::X));
        assert_eq!(" Y ".parse::<Axis>(), Ok(Axis::Y));
        assert_eq!("z".parse::<Axis>(), Ok(Axis::Z));
    }

    #[test]
    fn test_axis_parse_rejects_unknown_token() {
        let err = "w".parse::<Axis>().unwrap_err();
        assert!(matches!(err, TransformError::InvalidAxis { ref axis, .. } if axis == "w"));
    }

    #[test]
    fn test_axis_index_in_dimension() {
        assert_eq!(Axis::Y.index_in(Dimension::Two), Ok(1));
        assert_eq!(Axis::Z.index_in(Dimension::Three), Ok(2));
        assert!(matches!(
            Axis::Z.index_in(Dimension::Two),
            Err(TransformError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_dimension_try_from() {
        assert_eq!(Dimension::try_from(2), Ok(Dimension::Two));
        assert_eq!(Dimension::try_from(3), Ok(Dimension::Three));
        assert!(Dimension::try_from(4).is_err());
        assert!(Dimension::try_from(1).is_err());
    }

    #[test]
    fn test_tolerance_coords() {
        let tol = Tolerance::new(1e-6);
        assert!(tol.approx_eq_coords(&[1.0, 2.0], &[1.0 + 1e-7, 2.0]));
        assert!(!tol.approx_eq_coords(&[1.0, 2.0], &[1.0, 2.1]));
        assert!(!tol.approx_eq_coords(&[1.0, 2.0], &[1.0, 2.0, 3.0]));
    }
}

mod apply;
pub mod builder;
mod core;
mod matrix;
mod point_set;

pub use apply::{
    PointLayout, apply, apply_inferred, reflect_points, rotate_points, scale_points, shear_points,
};
pub use self::core::{Axis, Dimension, Tolerance};
pub use matrix::{TransformKind, TransformMatrix};
pub use point_set::PointSet;

#[cfg(test)]
mod tests;

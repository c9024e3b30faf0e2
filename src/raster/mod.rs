//! Raster buffers and affine resampling.

mod affine;
mod buffer;
mod ops;
mod sample;
mod warp;

pub use affine::{
    Affine2, reflect_point_array, rotate_point_array, scale_point_array, shear_point_array,
};
pub use buffer::{MAX_CHANNELS, Raster};
pub use ops::{
    DEFAULT_INTERPOLATION, reflect, reflect_token, rotate, scale, shear, shear_token,
};
pub use sample::{BorderMode, Interpolation, sample_into};
pub use warp::{resize, warp_affine};

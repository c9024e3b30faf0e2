//! Rotate, scale, reflect and shear applied directly to rasters.
//!
//! All operations return a new raster and leave the input untouched. The
//! resampling operations use bilinear interpolation. Samples that fall outside
//! the source repeat the nearest edge pixel.

use crate::error::{Result, TransformError};
use crate::geom::Axis;

use super::affine::{Affine2, shear_correspondences};
use super::buffer::Raster;
use super::sample::{BorderMode, Interpolation};
use super::warp::{resize, warp_affine};

/// Axis tokens accepted by the raster operations.
const RASTER_AXES: &str = "`x`, `y`";

/// Interpolation used by [`rotate`], [`scale`] and [`shear`].
pub const DEFAULT_INTERPOLATION: Interpolation = Interpolation::Bilinear;

/// Rotates `image` by `angle_degrees` about its midpoint on a canvas of the
/// same size.
///
/// Content that leaves the canvas is cropped; uncovered corners repeat the
/// edge pixels.
///
/// # Errors
/// Returns [`TransformError::InvalidParameter`] if the angle is not finite.
pub fn rotate(image: &Raster, angle_degrees: f64) -> Result<Raster> {
    if !angle_degrees.is_finite() {
        return Err(TransformError::invalid_parameter(format!(
            "rotation angle must be finite: {angle_degrees}"
        )));
    }
    let (width, height) = (image.width(), image.height());
    let center = [width as f64 / 2.0, height as f64 / 2.0];
    let transform = Affine2::rotation_about(center, angle_degrees, 1.0);
    log::debug!("rotate {width}x{height} raster by {angle_degrees} deg about {center:?}");
    warp_affine(
        image,
        &transform,
        width,
        height,
        DEFAULT_INTERPOLATION,
        BorderMode::Replicate,
    )
}

/// Resizes `image` by independent factors per axis.
///
/// The output is `round(width * scale_x) x round(height * scale_y)`.
///
/// # Errors
/// Returns [`TransformError::InvalidParameter`] for a non-finite or
/// non-positive factor, or when the rounded size is zero.
pub fn scale(image: &Raster, scale_x: f64, scale_y: f64) -> Result<Raster> {
    if !(scale_x.is_finite() && scale_y.is_finite() && scale_x > 0.0 && scale_y > 0.0) {
        return Err(TransformError::invalid_parameter(format!(
            "scale factors must be finite and positive, got ({scale_x}, {scale_y})"
        )));
    }
    let out_width = scaled_len(image.width(), scale_x)?;
    let out_height = scaled_len(image.height(), scale_y)?;
    log::debug!(
        "scale {}x{} raster by ({scale_x}, {scale_y}) to {out_width}x{out_height}",
        image.width(),
        image.height()
    );
    resize(image, out_width, out_height, DEFAULT_INTERPOLATION)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_len(len: usize, factor: f64) -> Result<usize> {
    let scaled = (len as f64 * factor).round();
    if scaled < 1.0 || scaled > u32::MAX as f64 {
        return Err(TransformError::invalid_parameter(format!(
            "scaling {len} pixels by {factor} gives an unusable size {scaled}"
        )));
    }
    Ok(scaled as usize)
}

/// Exact flip: `X` swaps top and bottom, `Y` swaps left and right.
///
/// # Errors
/// Returns [`TransformError::InvalidAxis`] for `Z`.
pub fn reflect(image: &Raster, axis: Axis) -> Result<Raster> {
    let (width, height, channels) = (image.width(), image.height(), image.channels());
    let mut out = match axis {
        Axis::X | Axis::Y => image.blank_like(width, height)?,
        Axis::Z => return Err(TransformError::invalid_axis(axis.name(), RASTER_AXES)),
    };
    log::debug!("reflect {width}x{height} raster across {axis}");

    let stride = width * channels;
    for (y, dst_row) in out.data_mut().chunks_exact_mut(stride).enumerate() {
        match axis {
            Axis::X => dst_row.copy_from_slice(image.row(height - 1 - y)),
            _ => {
                let src_row = image.row(y);
                for (dst_px, src_px) in dst_row
                    .chunks_exact_mut(channels)
                    .zip(src_row.chunks_exact(channels).rev())
                {
                    dst_px.copy_from_slice(src_px);
                }
            }
        }
    }
    Ok(out)
}

/// [`reflect`] with the axis given as a token.
///
/// # Errors
/// Returns [`TransformError::InvalidAxis`] for anything but `x` or `y`.
pub fn reflect_token(image: &Raster, axis: &str) -> Result<Raster> {
    reflect(image, parse_raster_axis(axis)?)
}

/// Shears `image` by `k` along `axis` on a canvas of the same size.
///
/// For `X` the bottom-left corner moves right by `k * height`; for `Y` the
/// top-right corner moves down by `k * width`. The affine map is solved from
/// the origin, top-right and bottom-left corners.
///
/// # Errors
/// Returns [`TransformError::InvalidAxis`] for `Z` and
/// [`TransformError::InvalidParameter`] for a non-finite `k`.
pub fn shear(image: &Raster, k: f64, axis: Axis) -> Result<Raster> {
    if axis == Axis::Z {
        return Err(TransformError::invalid_axis(axis.name(), RASTER_AXES));
    }
    if !k.is_finite() {
        return Err(TransformError::invalid_parameter(format!(
            "shear factor must be finite: {k}"
        )));
    }
    let (width, height) = (image.width(), image.height());
    let (src, dst) = shear_correspondences(width as f64, height as f64, k, axis)?;
    let transform = Affine2::from_correspondences(src, dst)?;
    log::debug!("shear {width}x{height} raster by {k} along {axis}");
    warp_affine(
        image,
        &transform,
        width,
        height,
        DEFAULT_INTERPOLATION,
        BorderMode::Replicate,
    )
}

/// [`shear`] with the axis given as a token.
///
/// # Errors
/// Returns [`TransformError::InvalidAxis`] for anything but `x` or `y`.
pub fn shear_token(image: &Raster, k: f64, axis: &str) -> Result<Raster> {
    shear(image, k, parse_raster_axis(axis)?)
}

fn parse_raster_axis(token: &str) -> Result<Axis> {
    match token.parse::<Axis>() {
        Ok(axis @ (Axis::X | Axis::Y)) => Ok(axis),
        _ => Err(TransformError::invalid_axis(token, RASTER_AXES)),
    }
}

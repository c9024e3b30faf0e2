use crate::error::{Result, TransformError};

use super::affine::Affine2;
use super::buffer::Raster;
use super::sample::{BorderMode, Interpolation, sample_into};

/// Resamples `src` through `transform` into an `out_width x out_height` canvas.
///
/// `transform` maps source coordinates to destination coordinates. Each
/// destination pixel samples the source at the inverse-mapped position.
///
/// # Errors
/// Returns [`TransformError::InvalidParameter`] for an empty output canvas or
/// a singular transform.
pub fn warp_affine(
    src: &Raster,
    transform: &Affine2,
    out_width: usize,
    out_height: usize,
    interpolation: Interpolation,
    border: BorderMode,
) -> Result<Raster> {
    let inverse = transform.invert()?;
    let mut dst = src.blank_like(out_width, out_height)?;
    log::debug!(
        "warp {}x{} -> {out_width}x{out_height} ({interpolation:?}, {border:?})",
        src.width(),
        src.height()
    );

    let channels = src.channels();
    let [[a, b, tx], [c, d, ty]] = *inverse.as_matrix();
    for (y, row) in dst
        .data_mut()
        .chunks_exact_mut(out_width * channels)
        .enumerate()
    {
        let yf = y as f64;
        for (x, pixel) in row.chunks_exact_mut(channels).enumerate() {
            let xf = x as f64;
            let sx = a * xf + b * yf + tx;
            let sy = c * xf + d * yf + ty;
            sample_into(src, sx, sy, interpolation, border, pixel);
        }
    }
    Ok(dst)
}

/// Resizes `src` to `out_width x out_height` with half-pixel-center mapping.
///
/// Destination pixel `i` samples source coordinate `(i + 0.5) / s - 0.5`
/// per axis. Taps outside the source replicate the edge.
///
/// # Errors
/// Returns [`TransformError::InvalidParameter`] for an empty output canvas.
pub fn resize(
    src: &Raster,
    out_width: usize,
    out_height: usize,
    interpolation: Interpolation,
) -> Result<Raster> {
    if out_width == 0 || out_height == 0 {
        return Err(TransformError::invalid_parameter(format!(
            "resize target must not be empty, got {out_width}x{out_height}"
        )));
    }
    let mut dst = src.blank_like(out_width, out_height)?;
    log::debug!(
        "resize {}x{} -> {out_width}x{out_height} ({interpolation:?})",
        src.width(),
        src.height()
    );

    let inv_sx = src.width() as f64 / out_width as f64;
    let inv_sy = src.height() as f64 / out_height as f64;
    let channels = src.channels();
    for (y, row) in dst
        .data_mut()
        .chunks_exact_mut(out_width * channels)
        .enumerate()
    {
        let sy = (y as f64 + 0.5) * inv_sy - 0.5;
        for (x, pixel) in row.chunks_exact_mut(channels).enumerate() {
            let sx = (x as f64 + 0.5) * inv_sx - 0.5;
            sample_into(src, sx, sy, interpolation, BorderMode::Replicate, pixel);
        }
    }
    Ok(dst)
}

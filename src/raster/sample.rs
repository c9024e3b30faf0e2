//! Pixel sampling with interpolation and border handling.
//!
//! Sampling uses pixel-center coordinates: integer coordinates address pixel
//! centers. Bilinear sampling blends the floor-based 2x2 neighborhood.

use super::buffer::{MAX_CHANNELS, Raster};

/// How to sample between pixel centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    /// Round to the nearest pixel center.
    Nearest,
    /// Blend the four surrounding pixels.
    #[default]
    Bilinear,
}

/// How to treat taps that fall outside the source canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderMode {
    /// Repeat the nearest edge pixel.
    #[default]
    Replicate,
    /// Use a fixed value for every channel.
    Constant(u8),
}

/// A single source tap: either a pixel index or the constant border.
#[derive(Debug, Clone, Copy)]
enum Tap {
    Pixel(usize, usize),
    Border(u8),
}

fn resolve(coord: i64, len: usize) -> Option<usize> {
    usize::try_from(coord).ok().filter(|&c| c < len)
}

fn tap(src: &Raster, x: i64, y: i64, border: BorderMode) -> Tap {
    match (resolve(x, src.width()), resolve(y, src.height()), border) {
        (Some(px), Some(py), _) => Tap::Pixel(px, py),
        (_, _, BorderMode::Constant(value)) => Tap::Border(value),
        (_, _, BorderMode::Replicate) => Tap::Pixel(clamp_index(x, src.width()), clamp_index(y, src.height())),
    }
}

fn clamp_index(coord: i64, len: usize) -> usize {
    let max = i64::try_from(len).unwrap_or(i64::MAX) - 1;
    // `max >= 0` since rasters are never empty.
    usize::try_from(coord.clamp(0, max)).unwrap_or(0)
}

fn tap_value(src: &Raster, tap: Tap, channel: usize) -> f64 {
    match tap {
        Tap::Pixel(x, y) => f64::from(src.as_bytes()[src.offset(x, y) + channel]),
        Tap::Border(value) => f64::from(value),
    }
}

/// Converts a coordinate to a tap index, saturating far outside the canvas.
#[allow(clippy::cast_possible_truncation)]
fn to_index(v: f64) -> i64 {
    // Float-to-int `as` saturates; NaN becomes 0.
    v as i64
}

/// Round an interpolated channel value back to a byte.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_byte(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Samples `src` at (`x`, `y`) and writes one value per channel into `out`.
///
/// `out` must hold exactly `src.channels()` values.
pub fn sample_into(
    src: &Raster,
    x: f64,
    y: f64,
    interpolation: Interpolation,
    border: BorderMode,
    out: &mut [u8],
) {
    debug_assert_eq!(out.len(), src.channels());

    match interpolation {
        Interpolation::Nearest => {
            let t = tap(src, to_index(x.round()), to_index(y.round()), border);
            for (channel, slot) in out.iter_mut().enumerate() {
                *slot = to_byte(tap_value(src, t, channel));
            }
        }
        Interpolation::Bilinear => {
            let x0f = x.floor();
            let y0f = y.floor();
            let fx = x - x0f;
            let fy = y - y0f;
            let x0 = to_index(x0f);
            let y0 = to_index(y0f);

            let t00 = tap(src, x0, y0, border);
            let t10 = tap(src, x0.saturating_add(1), y0, border);
            let t01 = tap(src, x0, y0.saturating_add(1), border);
            let t11 = tap(src, x0.saturating_add(1), y0.saturating_add(1), border);

            let mut acc = [0.0_f64; MAX_CHANNELS];
            for (channel, value) in acc.iter_mut().enumerate().take(out.len()) {
                let top = tap_value(src, t00, channel) * (1.0 - fx) + tap_value(src, t10, channel) * fx;
                let bottom =
                    tap_value(src, t01, channel) * (1.0 - fx) + tap_value(src, t11, channel) * fx;
                *value = top * (1.0 - fy) + bottom * fy;
            }
            for (slot, value) in out.iter_mut().zip(acc) {
                *slot = to_byte(value);
            }
        }
    }
}

//! Loading and saving rasters through the `image` crate.

use std::path::Path;

use image::{ColorType, DynamicImage, ExtendedColorType};

use crate::error::RasterIoError;
use crate::raster::Raster;

/// Decodes an image file into a raster.
///
/// 8-bit gray, gray+alpha, RGB and RGBA keep their channel count; other
/// layouts are converted to RGBA.
///
/// # Errors
/// Returns [`RasterIoError::Image`] if the file cannot be read or decoded.
pub fn load(path: impl AsRef<Path>) -> Result<Raster, RasterIoError> {
    let path = path.as_ref();
    let img = image::open(path)?;
    log::debug!("loaded {} ({:?})", path.display(), img.color());
    from_image(img)
}

/// Converts a decoded image into a raster.
///
/// # Errors
/// Returns [`RasterIoError::Transform`] for an empty image.
pub fn from_image(img: DynamicImage) -> Result<Raster, RasterIoError> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let (channels, bytes) = match img.color() {
        ColorType::L8 => (1, img.into_bytes()),
        ColorType::La8 => (2, img.into_bytes()),
        ColorType::Rgb8 => (3, img.into_bytes()),
        ColorType::Rgba8 => (4, img.into_bytes()),
        _ => (4, img.to_rgba8().into_raw()),
    };
    Ok(Raster::from_raw(width, height, channels, bytes)?)
}

/// Encodes a raster; the format follows the file extension.
///
/// # Errors
/// Returns [`RasterIoError::Image`] if encoding or writing fails.
pub fn save(path: impl AsRef<Path>, raster: &Raster) -> Result<(), RasterIoError> {
    let path = path.as_ref();
    let color = match raster.channels() {
        1 => ExtendedColorType::L8,
        2 => ExtendedColorType::La8,
        3 => ExtendedColorType::Rgb8,
        4 => ExtendedColorType::Rgba8,
        channels => return Err(RasterIoError::UnsupportedChannels { channels }),
    };
    let (width, height) = dimensions_u32(raster)?;
    image::save_buffer(path, raster.as_bytes(), width, height, color)?;
    log::debug!("saved {} ({}x{})", path.display(), width, height);
    Ok(())
}

fn dimensions_u32(raster: &Raster) -> Result<(u32, u32), RasterIoError> {
    let convert = |v: usize| {
        u32::try_from(v).map_err(|_| {
            RasterIoError::Image(image::ImageError::Limits(
                image::error::LimitError::from_kind(image::error::LimitErrorKind::DimensionError),
            ))
        })
    };
    Ok((convert(raster.width())?, convert(raster.height())?))
}

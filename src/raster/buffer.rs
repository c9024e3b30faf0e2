use crate::error::{Result, TransformError};

/// Largest supported channel count (RGBA).
pub const MAX_CHANNELS: usize = 4;

/// An owned 8-bit raster with interleaved channels, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Wraps an existing pixel buffer.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidParameter`] for a zero-sized canvas, a
    /// channel count outside `1..=4`, or a buffer of the wrong length.
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        let expected = validate_shape(width, height, channels)?;
        if data.len() != expected {
            return Err(TransformError::invalid_parameter(format!(
                "{width}x{height}x{channels} raster needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// A raster with every byte set to `value`.
    ///
    /// # Errors
    /// Same shape rules as [`Raster::from_raw`].
    pub fn filled(width: usize, height: usize, channels: usize, value: u8) -> Result<Self> {
        let len = validate_shape(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![value; len],
        })
    }

    /// Builds a raster by evaluating `f(x, y)` for every pixel.
    ///
    /// # Errors
    /// Same shape rules as [`Raster::from_raw`].
    pub fn from_fn<const C: usize>(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> [u8; C],
    ) -> Result<Self> {
        let len = validate_shape(width, height, C)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            channels: C,
            data,
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn channels(&self) -> usize {
        self.channels
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Channel values of the pixel at (`x`, `y`), if inside the canvas.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = self.offset(x, y);
        Some(&self.data[start..start + self.channels])
    }

    pub(crate) fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * self.channels
    }

    pub(crate) fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * self.channels;
        &self.data[y * stride..(y + 1) * stride]
    }

    /// Empty destination canvas with the channel layout of `self`.
    pub(crate) fn blank_like(&self, width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, self.channels, 0)
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// Checks the canvas shape and returns its length in bytes.
fn validate_shape(width: usize, height: usize, channels: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(TransformError::invalid_parameter(format!(
            "raster canvas must not be empty, got {width}x{height}"
        )));
    }
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(TransformError::invalid_parameter(format!(
            "raster must have 1 to {MAX_CHANNELS} channels, got {channels}"
        )));
    }
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or_else(|| {
            TransformError::invalid_parameter(format!(
                "{width}x{height}x{channels} raster does not fit in memory"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_checks_length() {
        assert!(Raster::from_raw(2, 2, 3, vec![0; 12]).is_ok());
        assert!(Raster::from_raw(2, 2, 3, vec![0; 11]).is_err());
    }

    #[test]
    fn shape_rules() {
        assert!(Raster::filled(0, 4, 1, 0).is_err());
        assert!(Raster::filled(4, 4, 5, 0).is_err());
        assert!(Raster::filled(4, 4, 0, 0).is_err());
    }

    #[test]
    fn oversized_canvas_is_rejected() {
        let huge = usize::MAX / 2;
        assert!(matches!(
            Raster::filled(huge, 3, 1, 0),
            Err(TransformError::InvalidParameter { .. })
        ));
        assert!(matches!(
            Raster::from_raw(huge, huge, 4, Vec::new()),
            Err(TransformError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn from_fn_lays_out_rows() {
        let raster = Raster::from_fn(3, 2, |x, y| [(y * 3 + x) as u8]).unwrap();
        assert_eq!(raster.as_bytes(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(raster.pixel(2, 1), Some(&[5u8][..]));
        assert_eq!(raster.pixel(3, 0), None);
        assert_eq!(raster.row(1), &[3, 4, 5]);
    }
}

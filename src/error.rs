//! Error types shared by the point and raster transform paths.

/// Errors raised by matrix construction, point application and raster resampling.
///
/// Every operation validates its arguments up front and fails before producing
/// any output, so an `Err` never comes with a partially transformed result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// The point set and the matrix cannot be multiplied in the requested
    /// orientation (or in either orientation for shape-inferred dispatch).
    #[error(
        "cannot multiply a {points_rows}x{points_cols} point set with a \
         {matrix_rows}x{matrix_cols} matrix"
    )]
    DimensionMismatch {
        points_rows: usize,
        points_cols: usize,
        matrix_rows: usize,
        matrix_cols: usize,
    },

    /// An axis token outside the recognized set was supplied.
    #[error("invalid axis `{axis}`, expected one of {expected}")]
    InvalidAxis {
        axis: String,
        expected: &'static str,
    },

    /// Malformed operation arguments.
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },
}

impl TransformError {
    pub(crate) fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_axis(axis: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidAxis {
            axis: axis.into(),
            expected,
        }
    }
}

/// Result alias used throughout the engine.
pub type Result<T, E = TransformError> = std::result::Result<T, E>;

/// Errors from loading or saving rasters.
#[cfg(feature = "image-io")]
#[derive(Debug, thiserror::Error)]
pub enum RasterIoError {
    /// The image codec failed to decode or encode.
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// The decoded buffer could not be turned into a raster.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The raster has a channel layout the encoder cannot write.
    #[error("cannot encode a raster with {channels} channels")]
    UnsupportedChannels { channels: usize },
}

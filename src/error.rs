//! Error types shared by buffers, codecs and configuration loading.

use std::path::PathBuf;

/// Errors raised by image operations.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// A pixel coordinate lies outside the image.
    #[error("pixel ({x},{y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// Two images that must share a size do not.
    #[error("dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    /// A source region does not fit into the destination image.
    #[error(
        "region {region_width}x{region_height} at ({x},{y}) exceeds image {width}x{height}"
    )]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        region_width: u32,
        region_height: u32,
        width: u32,
        height: u32,
    },

    /// Raw pixel storage does not match the requested dimensions.
    #[error("data length ({len}) must equal width * height ({expected})")]
    LengthMismatch { len: usize, expected: usize },

    /// A batch write was requested without any image.
    #[error("image batch is empty")]
    EmptyBatch,

    /// The binary container only accepts its two registered extensions.
    #[error("invalid file extension: {0:?}")]
    InvalidExtension(String),

    /// The container stores pixels of a different size than requested.
    #[error("pixel size mismatch: file stores {found} bytes per pixel, expected {expected}")]
    PixelSizeMismatch { expected: usize, found: u32 },

    /// The input is structurally invalid.
    #[error("malformed data: {0}")]
    Malformed(String),

    /// A configuration file could not be parsed.
    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),

    /// A file could not be opened or created.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to a stream failed.
    #[error("stream error: {0}")]
    Stream(#[from] std::io::Error),
}

impl ImageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn dimension_mismatch(left: (u32, u32), right: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            left_width: left.0,
            left_height: left.1,
            right_width: right.0,
            right_height: right.1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ImageError>;

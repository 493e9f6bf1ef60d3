#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod image;
pub mod kinds;
pub mod processing;
pub mod pyramid;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{ImageError, Result};
pub use crate::image::{Image, ImageFormat, Pixel, PixelMath};
pub use crate::kinds::{
    ColorImageR8G8B8, ColorImageR8G8B8A8, ColorImageR32, ColorImageRGB, ColorImageRGBA,
    DepthImage, DepthImage16, PointImage,
};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use base_image::prelude::*;
/// use std::path::Path;
///
/// # fn main() -> base_image::Result<()> {
/// let depth = DepthImage::load_binary(Path::new("scan.mbindepth"))?;
/// let mut smoothed = depth.clone();
/// smoothed.smooth(2);
///
/// let pyramid = Pyramid::build(smoothed, PyramidOptions::new(4));
/// let preview = ColorImageRGB::from_depth(&pyramid.levels[1]);
/// println!("{}x{} preview", preview.width(), preview.height());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{Image, ImageView, ImageViewMut};
    pub use crate::kinds::{ColorImageRGB, ColorImageRGBA, DepthImage, DepthImage16};
    pub use crate::pyramid::{Pyramid, PyramidOptions};
}

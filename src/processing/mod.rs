//! Image-processing algorithms generic over [`PixelMath`](crate::image::PixelMath).
//!
//! All algorithms respect the per-image sentinel:
//!
//! - `mip_map`: 2×2 box downsample (half resolution, odd sizes truncate).
//!   With `ignore_invalid == false` sentinels take part in the average, so a
//!   `-inf` depth pollutes its block; with `true` only valid pixels count.
//! - `resample`: nearest-neighbour resampling through normalized coordinates.
//! - `interpolated`: bilinear sampling at fractional pixel coordinates.
//! - `smooth`: 4-neighbour Laplacian smoothing restricted to valid pixels.
//!
//! Every routine is single-threaded and operates on owned buffers.

pub mod mipmap;
pub mod sampling;
pub mod smooth;

//! Concrete image kinds used by depth and color consumers.
//!
//! Each kind fixes a pixel type and thereby its default sentinel:
//! - [`DepthImage`]: `f32`, `-inf`
//! - [`DepthImage16`]: `u16`, `0`
//! - [`ColorImageRGB`] / [`PointImage`]: `Vector3<f32>`, `(-inf, -inf, -inf)`
//! - [`ColorImageRGBA`]: `Vector4<f32>`, all components `-inf`
//!
//! Depth images convert into false-color images through a fixed hue ramp
//! (see [`false_color`]).

pub mod color;
pub mod false_color;

use crate::image::Image;
use nalgebra::{Vector3, Vector4};

pub type DepthImage = Image<f32>;
pub type DepthImage16 = Image<u16>;
pub type ColorImageRGB = Image<Vector3<f32>>;
pub type ColorImageRGBA = Image<Vector4<f32>>;
/// Per-pixel 3D positions share the RGB float layout.
pub type PointImage = ColorImageRGB;
pub type ColorImageR8G8B8 = Image<Vector3<u8>>;
pub type ColorImageR8G8B8A8 = Image<Vector4<u8>>;
pub type ColorImageR32 = Image<f32>;

pub use false_color::{depth_range, hue_to_rgb};

use super::{ColorImageR8G8B8, ColorImageR8G8B8A8, ColorImageRGB, ColorImageRGBA};
use crate::image::{FromPixel, Image, Pixel};
use nalgebra::{Vector3, Vector4};

impl ColorImageRGB {
    /// Gray RGB image broadcasting each scalar to all three channels.
    /// Scalar sentinels become the RGB sentinel.
    pub fn from_scalar(scalar: &Image<f32>) -> Self {
        let src_invalid = scalar.invalid_value();
        let dst_invalid = Vector3::<f32>::default_invalid();
        scalar
            .map_pixels(|v| {
                if v == src_invalid {
                    dst_invalid
                } else {
                    Vector3::from_pixel(v)
                }
            })
            .with_invalid(dst_invalid)
    }

    /// 8-bit RGB divided by `scale` (usually 255).
    pub fn from_rgb8(rgb: &ColorImageR8G8B8, scale: f32) -> Self {
        rgb.map_pixels(|c| c.cast::<f32>() / scale)
            .with_invalid(Vector3::<f32>::default_invalid())
    }
}

impl ColorImageRGBA {
    /// 8-bit RGBA divided by `scale` (usually 255).
    pub fn from_rgba8(rgba: &ColorImageR8G8B8A8, scale: f32) -> Self {
        rgba.map_pixels(|c| c.cast::<f32>() / scale)
            .with_invalid(Vector4::<f32>::default_invalid())
    }

    /// Opaque RGBA from RGB; sentinel pixels stay invalid.
    pub fn from_rgb(rgb: &ColorImageRGB) -> Self {
        let src_invalid = rgb.invalid_value();
        let dst_invalid = Vector4::<f32>::default_invalid();
        rgb.map_pixels(|c| {
            if c == src_invalid {
                dst_invalid
            } else {
                Vector4::from_pixel(c)
            }
        })
        .with_invalid(dst_invalid)
    }
}

//! False-color visualization of depth images.
//!
//! Normalized depth `d` in `[0, 1]` selects hue `240° * d` at full saturation
//! and value, so the nearest depth renders red and the farthest blue.

use super::{ColorImageRGB, ColorImageRGBA, DepthImage};
use crate::image::Pixel;
use log::debug;
use nalgebra::{Vector3, Vector4};

const FAR_HUE_DEG: f32 = 240.0;

/// Fully saturated RGB for `hue_deg` in `[0, 360)`.
pub fn hue_to_rgb(hue_deg: f32) -> Vector3<f32> {
    let h = hue_deg.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;
    let (v, p, q, t) = (1.0, 0.0, 1.0 - f, f);
    match sector as u32 {
        0 => Vector3::new(v, t, p),
        1 => Vector3::new(q, v, p),
        2 => Vector3::new(p, v, t),
        3 => Vector3::new(p, q, v),
        4 => Vector3::new(t, p, v),
        _ => Vector3::new(v, p, q),
    }
}

/// Min and max over the valid pixels, `None` when there are none.
pub fn depth_range(depth: &DepthImage) -> Option<(f32, f32)> {
    let invalid = depth.invalid_value();
    let range = depth
        .as_slice()
        .iter()
        .copied()
        .filter(|&d| d != invalid && !d.is_nan())
        .fold(None, |acc: Option<(f32, f32)>, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        });
    match range {
        Some((lo, hi)) => debug!(
            "depth range: [{lo}, {hi}] over {}x{}",
            depth.width(),
            depth.height()
        ),
        None => debug!(
            "depth range: no valid pixels in {}x{}",
            depth.width(),
            depth.height()
        ),
    }
    range
}

fn ramp(d: f32, min: f32, max: f32) -> Vector3<f32> {
    if max <= min {
        return hue_to_rgb(0.0);
    }
    let t = ((d - min) / (max - min)).clamp(0.0, 1.0);
    hue_to_rgb(FAR_HUE_DEG * t)
}

impl ColorImageRGB {
    /// False color over the observed depth range of `depth`.
    pub fn from_depth(depth: &DepthImage) -> Self {
        let (min, max) = depth_range(depth).unwrap_or((0.0, 0.0));
        Self::from_depth_range(depth, min, max)
    }

    /// False color with `min` mapped to red and `max` to blue.
    pub fn from_depth_range(depth: &DepthImage, min: f32, max: f32) -> Self {
        let src_invalid = depth.invalid_value();
        let dst_invalid = Vector3::<f32>::default_invalid();
        depth
            .map_pixels(|d| {
                if d == src_invalid {
                    dst_invalid
                } else {
                    ramp(d, min, max)
                }
            })
            .with_invalid(dst_invalid)
    }
}

impl ColorImageRGBA {
    pub fn from_depth(depth: &DepthImage) -> Self {
        let (min, max) = depth_range(depth).unwrap_or((0.0, 0.0));
        Self::from_depth_range(depth, min, max)
    }

    /// Same ramp as [`ColorImageRGB::from_depth_range`] with opaque alpha.
    pub fn from_depth_range(depth: &DepthImage, min: f32, max: f32) -> Self {
        let src_invalid = depth.invalid_value();
        let dst_invalid = Vector4::<f32>::default_invalid();
        depth
            .map_pixels(|d| {
                if d == src_invalid {
                    dst_invalid
                } else {
                    let c = ramp(d, min, max);
                    Vector4::new(c.x, c.y, c.z, 1.0)
                }
            })
            .with_invalid(dst_invalid)
    }
}

//! JSON configuration for depth preprocessing and visualization.
//!
//! ```json
//! {
//!   "pyramid": { "levels": 3, "ignore_invalid": true },
//!   "smooth_steps": 2,
//!   "depth_range": { "min": 0.5, "max": 4.0 }
//! }
//! ```
//!
//! Every field is optional.

use crate::error::{ImageError, Result};
use crate::kinds::{ColorImageRGB, DepthImage};
use crate::pyramid::{build_pyramid, PyramidOptions, PyramidResult};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Explicit depth interval for false-color rendering.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct DepthRange {
    pub min: f32,
    pub max: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub pyramid: PyramidOptions,
    /// Laplacian smoothing iterations applied before the pyramid is built.
    pub smooth_steps: u32,
    /// Fixed false-color range; scanned from the image when absent.
    pub depth_range: Option<DepthRange>,
}

pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let data = fs::read_to_string(path).map_err(|e| ImageError::io(path, e))?;
    let config = parse_config(&data)?;
    debug!("loaded config {}: {config:?}", path.display());
    Ok(config)
}

pub fn parse_config(text: &str) -> Result<PipelineConfig> {
    Ok(serde_json::from_str(text)?)
}

/// Smooth a copy of `depth` and build its mip-map pyramid.
pub fn preprocess_depth(depth: &DepthImage, config: &PipelineConfig) -> PyramidResult<f32> {
    let mut base = depth.clone();
    base.smooth(config.smooth_steps);
    build_pyramid(base, config.pyramid)
}

pub fn false_color(depth: &DepthImage, config: &PipelineConfig) -> ColorImageRGB {
    match config.depth_range {
        Some(DepthRange { min, max }) => ColorImageRGB::from_depth_range(depth, min, max),
        None => ColorImageRGB::from_depth(depth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn empty_object_uses_defaults() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.pyramid, PyramidOptions::default());
        assert_eq!(config.smooth_steps, 0);
        assert!(config.depth_range.is_none());
    }

    #[test]
    fn partial_pyramid_section() {
        let config =
            parse_config(r#"{"pyramid": {"levels": 2}, "depth_range": {"min": 1, "max": 2}}"#)
                .unwrap();
        assert_eq!(config.pyramid.levels, 2);
        assert!(config.pyramid.ignore_invalid);
        assert_eq!(config.depth_range, Some(DepthRange { min: 1.0, max: 2.0 }));
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(
            parse_config("{\"smooth_steps\": -1}"),
            Err(ImageError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/base_image/config.json")).unwrap_err();
        assert!(matches!(err, ImageError::Io { .. }));
    }

    #[test]
    fn preprocess_keeps_input_and_builds_levels() {
        let depth = DepthImage::filled(8, 8, 2.0);
        let config = PipelineConfig {
            pyramid: PyramidOptions::new(3),
            smooth_steps: 1,
            depth_range: None,
        };
        let result = preprocess_depth(&depth, &config);
        assert_eq!(result.levels, 3);
        assert_eq!(result.pyramid.levels[2].dimensions(), (2, 2));
        assert_eq!(depth, DepthImage::filled(8, 8, 2.0));
    }

    #[test]
    fn oversized_level_count_stops_at_smallest_level() {
        let config = parse_config(r#"{"pyramid": {"levels": 18446744073709551615}}"#).unwrap();
        assert_eq!(config.pyramid.levels, usize::MAX);
        let result = preprocess_depth(&DepthImage::filled(4, 4, 1.0), &config);
        assert_eq!(result.levels, 3);
        assert_eq!(result.pyramid.coarsest().map(|l| l.dimensions()), Some((1, 1)));
    }

    #[test]
    fn configured_range_overrides_scan() {
        let depth = DepthImage::from_vec(2, 1, vec![1.0, 2.0]).unwrap();
        let config = PipelineConfig {
            depth_range: Some(DepthRange { min: 0.0, max: 2.0 }),
            ..PipelineConfig::default()
        };
        let rgb = false_color(&depth, &config);
        // 1.0 is mid-range (green) instead of the scanned near end (red).
        assert!((rgb[(0, 0)] - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-5);
        assert!((rgb[(1, 0)] - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-5);
    }
}

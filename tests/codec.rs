mod common;

use base_image::image::io::{load_binary_batch, save_binary_batch};
use base_image::{ColorImageRGB, DepthImage, DepthImage16, ImageError};
use common::scratch_dir;
use common::synthetic_image::{depth_with_hole, sparse_depth16};
use nalgebra::Vector3;
use std::fs;

#[test]
fn depth_file_round_trip() {
    let dir = scratch_dir("depth_file_round_trip");
    let path = dir.join("nested").join("scan.mbindepth");
    let depth = depth_with_hole(9, 7, 3);

    depth.save_binary(&path).unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), 16 + 9 * 7 * 4);

    let loaded = DepthImage::load_binary(&path).unwrap();
    assert_eq!(loaded, depth);
    assert_eq!(loaded.invalid_value(), f32::NEG_INFINITY);
    assert_eq!(loaded.count_valid(), 9 * 7 - 9);
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn color_batch_round_trip() {
    let dir = scratch_dir("color_batch_round_trip");
    let path = dir.join("frames.mbinRGB");
    let frames = vec![
        ColorImageRGB::filled(3, 2, Vector3::new(0.1, 0.2, 0.3)),
        ColorImageRGB::filled(3, 2, Vector3::new(1.0, 0.5, 0.0)),
    ];

    save_binary_batch(&path, &frames).unwrap();
    let loaded = load_binary_batch::<Vector3<f32>>(&path).unwrap();
    assert_eq!(loaded, frames);

    // A batch of two is not a single image.
    assert!(matches!(
        ColorImageRGB::load_binary(&path),
        Err(ImageError::Malformed(_))
    ));
    // Wrong pixel type for the stored layout.
    assert!(matches!(
        DepthImage::load_binary(&path),
        Err(ImageError::PixelSizeMismatch { expected: 4, found: 12 })
    ));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn unknown_extension_never_touches_disk() {
    let dir = scratch_dir("unknown_extension_never_touches_disk");
    let path = dir.join("scan.png");
    let err = DepthImage::new(2, 2).save_binary(&path).unwrap_err();
    assert!(matches!(err, ImageError::InvalidExtension(_)));
    assert!(!dir.exists());
}

#[test]
fn mismatched_batch_creates_no_file() {
    let dir = scratch_dir("mismatched_batch_creates_no_file");
    let path = dir.join("depth.mbindepth");
    let batch = vec![DepthImage::new(2, 2), DepthImage::new(3, 2)];
    assert!(matches!(
        save_binary_batch(&path, &batch),
        Err(ImageError::DimensionMismatch { .. })
    ));
    assert!(!path.exists());
}

#[test]
fn stream_codec_keeps_custom_sentinel() {
    let depth = sparse_depth16(5, 4, 3).with_invalid(1003);
    let mut bytes = Vec::new();
    depth.write_to(&mut bytes).unwrap();
    let back = DepthImage16::read_from(&mut bytes.as_slice()).unwrap();
    assert_eq!(back, depth);
    assert_eq!(back.invalid_value(), 1003);
}

#[test]
fn ppm_round_trip_quantizes_and_counts_clamps() {
    let dir = scratch_dir("ppm_round_trip_quantizes_and_counts_clamps");
    let path = dir.join("depth.ppm");
    let depth = DepthImage::from_vec(3, 2, vec![0.0, 0.5, 1.0, f32::NEG_INFINITY, 0.25, 2.0])
        .unwrap();

    let clamped = depth.save_ppm(&path).unwrap();
    assert_eq!(clamped, 2);

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("P3"));
    assert!(lines.next().unwrap().starts_with('#'));
    assert_eq!(lines.next(), Some("2 3"));
    assert_eq!(lines.next(), Some("255"));
    assert_eq!(lines.next(), Some("0 0 0"));

    let loaded = DepthImage::load_ppm(&path).unwrap();
    assert_eq!(loaded.dimensions(), (3, 2));
    for ((_, _, &a), (_, _, &b)) in loaded.iter().zip(depth.iter()) {
        let expected = b.clamp(0.0, 1.0);
        assert!((a - expected).abs() <= 1.0 / 255.0, "{a} vs {expected}");
    }
    let _ = fs::remove_dir_all(dir);
}

mod common;

use base_image::config::{false_color, parse_config, preprocess_depth};
use base_image::pyramid::{build_pyramid, PyramidOptions};
use base_image::{ColorImageRGB, DepthImage, Image};
use common::synthetic_image::{depth_ramp, depth_with_hole, sparse_depth16};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn mip_chain_fills_holes_from_valid_neighbours() {
    init_logger();
    let depth = depth_with_hole(16, 16, 4);
    let result = build_pyramid(depth, PyramidOptions::new(8));
    let dims: Vec<_> = result.pyramid.levels.iter().map(Image::dimensions).collect();
    assert_eq!(dims, vec![(16, 16), (8, 8), (4, 4), (2, 2), (1, 1)]);
    // The 4x4 hole covers four whole blocks at level 1, which straddle the
    // level 2 blocks and get filled there.
    assert_eq!(result.pyramid.levels[1].count_valid(), 60);
    assert_eq!(result.pyramid.levels[2].count_valid(), 16);
    assert!(result.elapsed_ms >= 0.0);
}

#[test]
fn pyramid_over_sparse_u16_depth() {
    init_logger();
    let depth = sparse_depth16(8, 8, 4);
    let result = build_pyramid(depth, PyramidOptions::new(2).with_ignore_invalid(true));
    let level = &result.pyramid.levels[1];
    assert_eq!(level.invalid_value(), 0);
    assert_eq!(level.count_valid(), 16);
}

#[test]
fn smoothing_preserves_linear_ramp_interior() {
    init_logger();
    let mut depth = depth_ramp(6, 4, 1.0, 6.0);
    depth.smooth(1);
    // Away from the left and right borders a linear ramp is a fixed point.
    for y in 0..4 {
        for x in 1..5 {
            assert!((depth[(x, y)] - (1.0 + x as f32)).abs() < 1e-5);
        }
    }
    // Corner: right neighbour 2 and lower neighbour 1, (2 * 1 + 3) / 4.
    assert!((depth[(0, 0)] - 1.25).abs() < 1e-6);
}

#[test]
fn resample_then_interpolate() {
    init_logger();
    let mut depth = depth_ramp(5, 5, 0.0, 4.0);
    depth.resample(9, 9);
    assert_eq!(depth.dimensions(), (9, 9));
    // Columns now read [0, 1, 1, 2, 2, 3, 3, 4, 4].
    assert_eq!(depth[(3, 0)], 2.0);
    let v = depth.interpolated(4.5, 2.0).unwrap();
    assert!((v - 2.5).abs() < 1e-6, "got {v}");
}

#[test]
fn configured_pipeline() {
    init_logger();
    let config = parse_config(
        r#"{
            "pyramid": { "levels": 3, "ignore_invalid": true },
            "smooth_steps": 1,
            "depth_range": { "min": 1.0, "max": 2.0 }
        }"#,
    )
    .unwrap();

    let depth: DepthImage = depth_with_hole(8, 8, 2);
    let result = preprocess_depth(&depth, &config);
    assert_eq!(result.levels, 3);
    assert_eq!(result.pyramid.levels[0].count_valid(), 60);

    let colors: ColorImageRGB = false_color(&depth, &config);
    assert_eq!(colors.count_valid(), 60);
    assert_eq!(colors[(3, 3)], colors.invalid_value());
    assert!(colors[(0, 0)].x > 0.99);
    assert!(colors[(7, 0)].z > 0.99);
}

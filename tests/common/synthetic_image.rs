use base_image::{DepthImage, DepthImage16};

/// Depth increasing linearly from `near` at the left edge to `far` at the right.
pub fn depth_ramp(width: u32, height: u32, near: f32, far: f32) -> DepthImage {
    assert!(width > 1 && height > 0, "ramp needs at least two columns");
    let step = (far - near) / (width - 1) as f32;
    let mut img = DepthImage::new(width, height);
    img.fill(|x, _| near + step * x as f32);
    img
}

/// Depth ramp with a square hole of invalid pixels centred in the image.
pub fn depth_with_hole(width: u32, height: u32, hole: u32) -> DepthImage {
    let mut img = depth_ramp(width, height, 1.0, 2.0);
    let x0 = (width - hole) / 2;
    let y0 = (height - hole) / 2;
    for y in y0..y0 + hole {
        for x in x0..x0 + hole {
            img.set_invalid(x, y).expect("hole inside image");
        }
    }
    img
}

/// 16-bit depth in millimetres with every `period`-th pixel missing.
pub fn sparse_depth16(width: u32, height: u32, period: usize) -> DepthImage16 {
    assert!(period > 0, "period must be positive");
    let mut img = DepthImage16::new(width, height);
    img.fill(|x, y| {
        let i = y * width as usize + x;
        if i % period == 0 {
            0
        } else {
            1000 + i as u16
        }
    });
    img
}

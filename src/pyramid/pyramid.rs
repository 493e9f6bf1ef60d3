use super::options::PyramidOptions;
use crate::image::{Image, PixelMath};
use log::debug;
use serde::Serialize;
use std::time::Instant;

#[derive(Clone, Debug)]
pub struct Pyramid<T: PixelMath> {
    pub levels: Vec<Image<T>>,
}

impl<T: PixelMath> Default for Pyramid<T> {
    fn default() -> Self {
        Self { levels: Vec::new() }
    }
}

impl<T: PixelMath> Pyramid<T> {
    /// Build up to `options.levels` levels; `0` is treated as `1`.
    pub fn build(image: Image<T>, options: PyramidOptions) -> Self {
        let max_levels = options.levels.max(1);
        // Halving stops once the shorter side reaches 1.
        let reachable = image
            .width()
            .min(image.height())
            .checked_ilog2()
            .map_or(1, |l| l as usize + 1);
        let mut levels = Vec::with_capacity(max_levels.min(reachable));
        let mut current = image;

        for lvl in 1..max_levels {
            let down = current.mip_map(options.ignore_invalid);
            if down.is_empty() {
                debug!(
                    "pyramid: stopping at level {lvl}, {}x{} cannot be halved",
                    current.width(),
                    current.height()
                );
                break;
            }
            levels.push(std::mem::replace(&mut current, down));
        }
        levels.push(current);

        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Coarsest level, if any.
    pub fn coarsest(&self) -> Option<&Image<T>> {
        self.levels.last()
    }

    pub fn scale_for_level(&self, level: &Image<T>) -> f32 {
        if let Some(index) = self.levels.iter().position(|l| std::ptr::eq(l, level)) {
            1.0 / (2u32.pow(index as u32) as f32)
        } else {
            1.0
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PyramidResult<T: PixelMath> {
    #[serde(skip)]
    pub pyramid: Pyramid<T>,
    pub levels: usize,
    pub elapsed_ms: f64,
}

pub fn build_pyramid<T: PixelMath>(image: Image<T>, options: PyramidOptions) -> PyramidResult<T> {
    let start = Instant::now();
    let pyramid = Pyramid::build(image, options);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!("pyramid: built {} level(s) in {elapsed_ms:.3} ms", pyramid.len());

    PyramidResult {
        levels: pyramid.len(),
        pyramid,
        elapsed_ms,
    }
}

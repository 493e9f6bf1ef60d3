use crate::error::{ImageError, Result};
use crate::image::{Image, ImageViewMut, PixelMath};

/// Normalized position of sample `i` out of `count` (`0` when `count <= 1`).
#[inline]
fn normalized(i: usize, count: u32) -> f32 {
    if count > 1 {
        i as f32 / (count - 1) as f32
    } else {
        0.0
    }
}

impl<T: PixelMath> Image<T> {
    /// Nearest-neighbour resampling to `new_width × new_height`.
    ///
    /// Sample `(j, i)` reads the source at normalized coordinates
    /// `(j / (new_width - 1), i / (new_height - 1))`. Matching dimensions are a
    /// no-op; otherwise the buffer is replaced in one step.
    pub fn resample(&mut self, new_width: u32, new_height: u32) {
        if self.dimensions() == (new_width, new_height) {
            return;
        }
        let invalid = self.invalid_value();
        let mut resampled = Image::<T>::filled(new_width, new_height, invalid).with_invalid(invalid);
        if !self.is_empty() {
            for (i, row) in resampled.rows_mut().enumerate() {
                let y = normalized(i, new_height);
                for (j, px) in row.iter_mut().enumerate() {
                    let x = normalized(j, new_width);
                    *px = self.get(x, y).unwrap_or(invalid);
                }
            }
        }
        self.swap(&mut resampled);
    }

    /// Bilinearly interpolated pixel at fractional coordinates.
    ///
    /// Blends the four pixels around `(x, y)` with weights from the fractional
    /// offsets. Requires `0 <= x <= width - 1` and `0 <= y <= height - 1`;
    /// anything else is reported as [`ImageError::OutOfBounds`].
    pub fn interpolated(&self, x: f32, y: f32) -> Result<T> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(ImageError::OutOfBounds {
                x: x as i64,
                y: y as i64,
                width: self.width(),
                height: self.height(),
            });
        }
        let (xl, xh) = (x.floor(), x.ceil());
        let (yl, yh) = (y.floor(), y.ceil());
        let t = x - xl;
        let s = y - yl;

        let p00 = self.get(xl as i64, yl as i64)?.widen();
        let p10 = self.get(xh as i64, yl as i64)?.widen();
        let p01 = self.get(xl as i64, yh as i64)?.widen();
        let p11 = self.get(xh as i64, yh as i64)?.widen();

        let top = p00 + (p10 - p00) * t;
        let bottom = p01 + (p11 - p01) * t;
        Ok(T::narrow(top + (bottom - top) * s))
    }
}

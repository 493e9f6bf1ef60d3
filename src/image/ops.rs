//! Image algebra.
//!
//! `&a + &b` and `&a - &b` panic on mismatched dimensions; `checked_add` and
//! `checked_sub` report the mismatch as an error instead. The scalar
//! assignment operators apply element-wise through [`PixelMath`].

use super::buffer::Image;
use super::pixel::PixelMath;
use crate::error::{ImageError, Result};
use std::ops::{Add, AddAssign, DivAssign, MulAssign, Sub, SubAssign};

impl<T: PixelMath> Image<T> {
    fn zip_with(&self, other: &Self, f: impl Fn(T, T) -> T) -> Result<Self> {
        if self.dimensions() != other.dimensions() {
            return Err(ImageError::dimension_mismatch(
                self.dimensions(),
                other.dimensions(),
            ));
        }
        let data = self
            .as_slice()
            .iter()
            .zip(other.as_slice())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Image::from_vec(self.width(), self.height(), data)?.with_invalid(self.invalid_value()))
    }

    /// Element-wise `self + other`.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, T::add_pixel)
    }

    /// Element-wise `self - other`.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, T::sub_pixel)
    }

    /// Multiply every pixel by `s`.
    pub fn scale(&mut self, s: f32) {
        for px in self.as_mut_slice() {
            *px = px.scale_pixel(s);
        }
    }
}

impl<T: PixelMath> Add for &Image<T> {
    type Output = Image<T>;

    fn add(self, rhs: &Image<T>) -> Image<T> {
        match self.checked_add(rhs) {
            Ok(sum) => sum,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: PixelMath> Sub for &Image<T> {
    type Output = Image<T>;

    fn sub(self, rhs: &Image<T>) -> Image<T> {
        match self.checked_sub(rhs) {
            Ok(diff) => diff,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: PixelMath> MulAssign<f32> for Image<T> {
    fn mul_assign(&mut self, s: f32) {
        self.scale(s);
    }
}

impl<T: PixelMath> DivAssign<f32> for Image<T> {
    fn div_assign(&mut self, s: f32) {
        for px in self.as_mut_slice() {
            *px = T::narrow(px.widen() / s);
        }
    }
}

impl<T: PixelMath> AddAssign<T> for Image<T> {
    fn add_assign(&mut self, offset: T) {
        for px in self.as_mut_slice() {
            *px = px.add_pixel(offset);
        }
    }
}

impl<T: PixelMath> SubAssign<T> for Image<T> {
    fn sub_assign(&mut self, offset: T) {
        for px in self.as_mut_slice() {
            *px = px.sub_pixel(offset);
        }
    }
}

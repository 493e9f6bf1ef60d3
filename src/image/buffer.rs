//! Owned 2D pixel buffer, generic over pixel type, row-major (stride == width).
//!
//! Each image carries an `invalid` sentinel. A pixel is considered missing iff
//! it compares equal to the sentinel; there is no separate validity mask, so a
//! computed value that happens to equal the sentinel is indistinguishable from
//! missing data.
//!
//! Empty images (`width == 0 || height == 0`) own no storage and always report
//! `0×0`.

use super::coordinate::Coordinate;
use super::pixel::{FromPixel, ImageFormat, Pixel};
use crate::error::{ImageError, Result};
use std::fmt;

/// A 2D image with runtime dimensions, generic over pixel type `T`.
pub struct Image<T: Pixel> {
    width: u32,
    height: u32,
    /// Row-major pixels, `len == width * height`.
    data: Vec<T>,
    invalid: T,
}

#[inline]
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

impl<T: Pixel> Image<T> {
    // --- Constructors ---

    /// An image without storage, carrying the default sentinel of `T`.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
            invalid: T::default_invalid(),
        }
    }

    /// A `width × height` image filled with [`Pixel::zero`].
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, T::zero())
    }

    /// A `width × height` image with every pixel set to `value`.
    pub fn filled(width: u32, height: u32, value: T) -> Self {
        if width == 0 || height == 0 {
            return Self::empty();
        }
        Self {
            width,
            height,
            data: vec![value; pixel_count(width, height)],
            invalid: T::default_invalid(),
        }
    }

    /// Wrap an existing row-major pixel vector.
    pub fn from_vec(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        let expected = pixel_count(width, height);
        if data.len() != expected {
            return Err(ImageError::LengthMismatch {
                len: data.len(),
                expected,
            });
        }
        if expected == 0 {
            return Ok(Self::empty());
        }
        Ok(Self {
            width,
            height,
            data,
            invalid: T::default_invalid(),
        })
    }

    /// Copy a row-major pixel slice into a new image.
    pub fn from_slice(width: u32, height: u32, data: &[T]) -> Result<Self> {
        Self::from_vec(width, height, data.to_vec())
    }

    /// Builder-style sentinel override.
    pub fn with_invalid(mut self, invalid: T) -> Self {
        self.invalid = invalid;
        self
    }

    // --- Storage management ---

    /// Resize the image. Zero dimensions release storage; a size change
    /// discards the old contents and zero-fills; equal sizes are a no-op.
    pub fn allocate(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            self.clear();
        } else if width != self.width || height != self.height {
            self.data = vec![T::zero(); pixel_count(width, height)];
            self.width = width;
            self.height = height;
        }
    }

    /// Allocate to the size of `other`.
    pub fn allocate_same_size<U: Pixel>(&mut self, other: &Image<U>) {
        self.allocate(other.width(), other.height());
    }

    /// Release all storage. The sentinel is kept.
    pub fn clear(&mut self) {
        self.data = Vec::new();
        self.width = 0;
        self.height = 0;
    }

    /// Move the contents out, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        let invalid = self.invalid;
        std::mem::replace(self, Self::empty().with_invalid(invalid))
    }

    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    // --- Accessors ---

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Raw pointer to the first pixel (dangling for empty images).
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    fn linear_index<C: Coordinate>(&self, x: C, y: C) -> Result<usize> {
        match (x.resolve(self.width), y.resolve(self.height)) {
            (Ok(x), Ok(y)) => Ok(y * self.width as usize + x),
            (x, y) => Err(ImageError::OutOfBounds {
                x: x.map_or_else(|raw| raw, |v| v as i64),
                y: y.map_or_else(|raw| raw, |v| v as i64),
                width: self.width,
                height: self.height,
            }),
        }
    }

    /// Pixel at `(x, y)`. Integer coordinates are pixel indices, float
    /// coordinates are normalized to `[0, 1]`.
    #[inline]
    pub fn get<C: Coordinate>(&self, x: C, y: C) -> Result<T> {
        let idx = self.linear_index(x, y)?;
        Ok(self.data[idx])
    }

    #[inline]
    pub fn get_mut<C: Coordinate>(&mut self, x: C, y: C) -> Result<&mut T> {
        let idx = self.linear_index(x, y)?;
        Ok(&mut self.data[idx])
    }

    #[inline]
    pub fn set<C: Coordinate>(&mut self, x: C, y: C, value: T) -> Result<()> {
        *self.get_mut(x, y)? = value;
        Ok(())
    }

    pub fn is_valid_coordinate<C: Coordinate>(&self, x: C, y: C) -> bool {
        self.linear_index(x, y).is_ok()
    }

    // --- Sentinel handling ---

    #[inline]
    pub fn invalid_value(&self) -> T {
        self.invalid
    }

    pub fn set_invalid_value(&mut self, invalid: T) {
        self.invalid = invalid;
    }

    #[inline]
    pub fn is_valid_value(&self, value: T) -> bool {
        value != self.invalid
    }

    /// Whether the pixel at `(x, y)` differs from the sentinel.
    pub fn is_valid<C: Coordinate>(&self, x: C, y: C) -> Result<bool> {
        Ok(self.is_valid_value(self.get(x, y)?))
    }

    pub fn set_invalid<C: Coordinate>(&mut self, x: C, y: C) -> Result<()> {
        let invalid = self.invalid;
        self.set(x, y, invalid)
    }

    pub fn count_valid(&self) -> usize {
        self.count_not_equal_to(self.invalid)
    }

    // --- Bulk operations ---

    /// Overwrite every pixel with `f(x, y)` in row-major order.
    pub fn fill<F: FnMut(usize, usize) -> T>(&mut self, mut f: F) {
        let width = self.width as usize;
        for (y, row) in self.data.chunks_exact_mut(width.max(1)).enumerate() {
            for (x, px) in row.iter_mut().enumerate() {
                *px = f(x, y);
            }
        }
    }

    /// Copy `source` into the region starting at `(start_x, start_y)`.
    ///
    /// Fails without touching `self` when the region does not fit.
    pub fn copy_into(&mut self, source: &Image<T>, start_x: u32, start_y: u32) -> Result<()> {
        let fits_x = u64::from(start_x) + u64::from(source.width) <= u64::from(self.width);
        let fits_y = u64::from(start_y) + u64::from(source.height) <= u64::from(self.height);
        if !(fits_x && fits_y) {
            return Err(ImageError::RegionOutOfBounds {
                x: start_x,
                y: start_y,
                region_width: source.width,
                region_height: source.height,
                width: self.width,
                height: self.height,
            });
        }
        let dst_width = self.width as usize;
        let src_width = source.width as usize;
        for (sy, src_row) in source.data.chunks_exact(src_width.max(1)).enumerate() {
            let start = (start_y as usize + sy) * dst_width + start_x as usize;
            self.data[start..start + src_width].copy_from_slice(src_row);
        }
        Ok(())
    }

    /// Mirror horizontally (reverse every row).
    pub fn flip_x(&mut self) {
        let width = self.width as usize;
        for row in self.data.chunks_exact_mut(width.max(1)) {
            row.reverse();
        }
    }

    /// Mirror vertically (swap rows top to bottom).
    pub fn flip_y(&mut self) {
        let width = self.width as usize;
        let height = self.height as usize;
        for y in 0..height / 2 {
            let (top, bottom) = self.data.split_at_mut((height - 1 - y) * width);
            top[y * width..(y + 1) * width].swap_with_slice(&mut bottom[..width]);
        }
    }

    pub fn replace_value(&mut self, old: T, new: T) {
        for px in self.data.iter_mut().filter(|px| **px == old) {
            *px = new;
        }
    }

    pub fn set_all(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn count_not_equal_to(&self, value: T) -> usize {
        self.data.iter().filter(|&&px| px != value).count()
    }

    // --- Conversion ---

    /// Convert every pixel (and the sentinel) through `f`.
    pub fn map_pixels<U: Pixel, F: Fn(T) -> U>(&self, f: F) -> Image<U> {
        Image {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&px| f(px)).collect(),
            invalid: f(self.invalid),
        }
    }

    /// Build an image from another pixel type using its [`FromPixel`] conversion.
    pub fn convert_from<U: Pixel>(other: &Image<U>) -> Self
    where
        T: FromPixel<U>,
    {
        other.map_pixels(T::from_pixel)
    }

    // --- Introspection ---

    pub fn format(&self) -> ImageFormat {
        T::FORMAT
    }

    pub fn num_channels(&self) -> Option<u32> {
        T::CHANNELS
    }

    pub fn bytes_per_channel(&self) -> Option<u32> {
        T::CHANNELS.map(|channels| T::BYTES_PER_PIXEL as u32 / channels)
    }

    pub fn bytes_per_pixel(&self) -> u32 {
        T::BYTES_PER_PIXEL as u32
    }

    #[inline]
    fn bounds_check(&self, x: usize, y: usize) {
        assert!(
            x < self.width as usize && y < self.height as usize,
            "pixel ({x},{y}) out of bounds for image {}×{}",
            self.width,
            self.height,
        );
    }
}

impl<T: Pixel> Default for Image<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Pixel> Clone for Image<T> {
    fn clone(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.clone(),
            invalid: self.invalid,
        }
    }

    // Reuses the existing allocation when the sizes already agree.
    fn clone_from(&mut self, source: &Self) {
        self.data.clone_from(&source.data);
        self.width = source.width;
        self.height = source.height;
        self.invalid = source.invalid;
    }
}

/// Dimensions and pixels only; the sentinel does not take part.
impl<T: Pixel> PartialEq for Image<T> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.data == other.data
    }
}

impl<T: Pixel> fmt::Debug for Image<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Image<{}> {{ {}×{}, invalid={:?} }}",
            std::any::type_name::<T>(),
            self.width,
            self.height,
            self.invalid,
        )?;
        let width = self.width as usize;
        for (y, row) in self.data.chunks_exact(width.max(1)).take(8).enumerate() {
            write!(f, "  row {y}: [")?;
            for (x, px) in row.iter().take(16).enumerate() {
                if x > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{px:?}")?;
            }
            if width > 16 {
                write!(f, ", ...")?;
            }
            writeln!(f, "]")?;
        }
        if self.height > 8 {
            writeln!(f, "  ...")?;
        }
        Ok(())
    }
}

impl<T: Pixel> std::ops::Index<(usize, usize)> for Image<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &T {
        self.bounds_check(x, y);
        &self.data[y * self.width as usize + x]
    }
}

impl<T: Pixel> std::ops::IndexMut<(usize, usize)> for Image<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        self.bounds_check(x, y);
        let idx = y * self.width as usize + x;
        &mut self.data[idx]
    }
}

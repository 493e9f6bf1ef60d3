//! Position-aware pixel iteration in row-major order (x varies fastest).
//!
//! The iterators borrow the image, so it cannot be reallocated while a
//! traversal is alive. Calling [`Image::iter`] again restarts from `(0, 0)`.

use super::buffer::Image;
use super::pixel::Pixel;
use std::iter::Enumerate;
use std::slice;

/// Read-only iterator yielding `(x, y, &pixel)`.
pub struct PixelIter<'a, T> {
    inner: Enumerate<slice::Iter<'a, T>>,
    width: usize,
}

/// Mutable iterator yielding `(x, y, &mut pixel)`.
pub struct PixelIterMut<'a, T> {
    inner: Enumerate<slice::IterMut<'a, T>>,
    width: usize,
}

impl<'a, T> Iterator for PixelIter<'a, T> {
    type Item = (usize, usize, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (i, px) = self.inner.next()?;
        Some((i % self.width, i / self.width, px))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for PixelIter<'_, T> {}

impl<'a, T> Iterator for PixelIterMut<'a, T> {
    type Item = (usize, usize, &'a mut T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (i, px) = self.inner.next()?;
        Some((i % self.width, i / self.width, px))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for PixelIterMut<'_, T> {}

impl<T: Pixel> Image<T> {
    pub fn iter(&self) -> PixelIter<'_, T> {
        PixelIter {
            width: self.width() as usize,
            inner: self.as_slice().iter().enumerate(),
        }
    }

    pub fn iter_mut(&mut self) -> PixelIterMut<'_, T> {
        PixelIterMut {
            width: self.width() as usize,
            inner: self.as_mut_slice().iter_mut().enumerate(),
        }
    }
}

impl<'a, T: Pixel> IntoIterator for &'a Image<T> {
    type Item = (usize, usize, &'a T);
    type IntoIter = PixelIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Pixel> IntoIterator for &'a mut Image<T> {
    type Item = (usize, usize, &'a mut T);
    type IntoIter = PixelIterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

//! Pixel addressing.
//!
//! Integer coordinates address pixels directly. Floating-point coordinates are
//! normalized to `[0, 1]` and map to `round(c * (extent - 1))`.

/// A coordinate type accepted by the checked accessors of [`Image`](super::Image).
pub trait Coordinate: Copy {
    /// Map onto `[0, extent)`. On failure returns the raw position for error
    /// reporting.
    fn resolve(self, extent: u32) -> Result<usize, i64>;
}

macro_rules! impl_integer_coordinate {
    ($($t:ty),*) => {
        $(
            impl Coordinate for $t {
                #[inline]
                fn resolve(self, extent: u32) -> Result<usize, i64> {
                    let raw = i64::try_from(self).unwrap_or(i64::MAX);
                    if raw >= 0 && raw < i64::from(extent) {
                        Ok(raw as usize)
                    } else {
                        Err(raw)
                    }
                }
            }
        )*
    };
}

impl_integer_coordinate!(u32, usize, u64, i32, i64);

macro_rules! impl_normalized_coordinate {
    ($($t:ty),*) => {
        $(
            impl Coordinate for $t {
                #[inline]
                fn resolve(self, extent: u32) -> Result<usize, i64> {
                    let scaled = (f64::from(self) * (f64::from(extent) - 1.0)).round();
                    if scaled >= 0.0 && scaled < f64::from(extent) {
                        Ok(scaled as usize)
                    } else {
                        Err(scaled as i64)
                    }
                }
            }
        )*
    };
}

impl_normalized_coordinate!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_address_pixels() {
        assert_eq!(3u32.resolve(4), Ok(3));
        assert_eq!(4usize.resolve(4), Err(4));
        assert_eq!((-1i32).resolve(4), Err(-1));
    }

    #[test]
    fn floats_are_normalized() {
        assert_eq!(0.0f32.resolve(5), Ok(0));
        assert_eq!(1.0f32.resolve(5), Ok(4));
        assert_eq!(0.5f64.resolve(5), Ok(2));
        assert!(1.5f32.resolve(5).is_err());
        assert!(f32::NAN.resolve(5).is_err());
        assert!(0.0f32.resolve(0).is_err());
    }
}

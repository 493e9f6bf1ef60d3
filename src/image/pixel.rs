//! Pixel capabilities: storage, byte layout, sentinel defaults and arithmetic.
//!
//! - [`Pixel`]: what every image element must provide (default sentinel,
//!   little-endian byte codec, channel/format introspection).
//! - [`PixelMath`]: accumulator arithmetic used by averaging algorithms
//!   (mip-mapping, smoothing, interpolation, image algebra).
//! - [`FromPixel`]: pixel-type conversions used when converting whole images.
//!
//! Scalars and `nalgebra` vectors of 2–4 components are supported out of the
//! box. Integer pixels accumulate in `f32`; narrowing back truncates toward
//! zero and saturates at the type bounds.

use nalgebra::{Scalar, Vector2, Vector3, Vector4};
use serde::Serialize;
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

/// Pixel layout tag exposed to consumers that upload or interpret raw storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ImageFormat {
    ColorImageR8G8B8A8,
    ColorImageR32G32B32A32,
    ColorImageR32G32B32,
    DepthImage,
    DepthImage16,
    Unknown,
}

impl ImageFormat {
    pub fn of<T: Pixel>() -> Self {
        T::FORMAT
    }
}

/// Trait for types that can serve as pixel values in an [`Image`](super::Image).
pub trait Pixel: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Format tag; untagged pixel types report [`ImageFormat::Unknown`].
    const FORMAT: ImageFormat = ImageFormat::Unknown;
    /// Number of channels, `None` when the shape is not known.
    const CHANNELS: Option<u32> = None;
    /// Size of one encoded pixel in the binary container.
    const BYTES_PER_PIXEL: usize = std::mem::size_of::<Self>();

    /// Value used for freshly allocated storage.
    fn zero() -> Self;

    /// Sentinel marking "no data" for images of this pixel type.
    fn default_invalid() -> Self;

    /// Append the little-endian encoding (`BYTES_PER_PIXEL` bytes) to `out`.
    fn write_le(&self, out: &mut Vec<u8>);

    /// Decode a pixel from the first `BYTES_PER_PIXEL` bytes of `bytes`.
    fn read_le(bytes: &[u8]) -> Self;
}

/// Scalar component of a pixel.
pub trait Channel: Scalar + Copy + Send + Sync {
    const SIZE: usize;

    fn put_le(self, out: &mut Vec<u8>);
    fn take_le(bytes: &[u8]) -> Self;
    fn zero_channel() -> Self;
    fn invalid_channel() -> Self;
}

macro_rules! impl_channel {
    ($($t:ty => $invalid:expr),* $(,)?) => {
        $(
            impl Channel for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                #[inline]
                fn put_le(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }

                #[inline]
                fn take_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$t>()];
                    raw.copy_from_slice(&bytes[..Self::SIZE]);
                    <$t>::from_le_bytes(raw)
                }

                #[inline]
                fn zero_channel() -> Self {
                    0 as $t
                }

                #[inline]
                fn invalid_channel() -> Self {
                    $invalid
                }
            }
        )*
    };
}

impl_channel!(
    u8 => 0,
    u16 => 0,
    u32 => 0,
    i32 => 0,
    f32 => f32::NEG_INFINITY,
    f64 => f64::NEG_INFINITY,
);

macro_rules! impl_scalar_pixel {
    ($($t:ty => $format:expr),* $(,)?) => {
        $(
            impl Pixel for $t {
                const FORMAT: ImageFormat = $format;
                const CHANNELS: Option<u32> = Some(1);

                #[inline]
                fn zero() -> Self {
                    <$t as Channel>::zero_channel()
                }

                #[inline]
                fn default_invalid() -> Self {
                    <$t as Channel>::invalid_channel()
                }

                #[inline]
                fn write_le(&self, out: &mut Vec<u8>) {
                    self.put_le(out);
                }

                #[inline]
                fn read_le(bytes: &[u8]) -> Self {
                    <$t as Channel>::take_le(bytes)
                }
            }
        )*
    };
}

impl_scalar_pixel!(
    u8 => ImageFormat::Unknown,
    u16 => ImageFormat::DepthImage16,
    u32 => ImageFormat::Unknown,
    i32 => ImageFormat::Unknown,
    f32 => ImageFormat::DepthImage,
    f64 => ImageFormat::Unknown,
);

macro_rules! impl_vector_pixel {
    ($($vec:ident<$c:ty>, $n:expr => $format:expr);* $(;)?) => {
        $(
            impl Pixel for $vec<$c> {
                const FORMAT: ImageFormat = $format;
                const CHANNELS: Option<u32> = Some($n);

                #[inline]
                fn zero() -> Self {
                    $vec::from_element(<$c as Channel>::zero_channel())
                }

                #[inline]
                fn default_invalid() -> Self {
                    $vec::from_element(<$c as Channel>::invalid_channel())
                }

                #[inline]
                fn write_le(&self, out: &mut Vec<u8>) {
                    for c in self.iter() {
                        c.put_le(out);
                    }
                }

                #[inline]
                fn read_le(bytes: &[u8]) -> Self {
                    $vec::from_fn(|i, _| <$c as Channel>::take_le(&bytes[i * <$c as Channel>::SIZE..]))
                }
            }
        )*
    };
}

impl_vector_pixel!(
    Vector2<f32>, 2 => ImageFormat::Unknown;
    Vector3<f32>, 3 => ImageFormat::ColorImageR32G32B32;
    Vector4<f32>, 4 => ImageFormat::ColorImageR32G32B32A32;
    Vector2<f64>, 2 => ImageFormat::Unknown;
    Vector3<f64>, 3 => ImageFormat::Unknown;
    Vector4<f64>, 4 => ImageFormat::Unknown;
    Vector2<u8>, 2 => ImageFormat::Unknown;
    Vector3<u8>, 3 => ImageFormat::Unknown;
    Vector4<u8>, 4 => ImageFormat::ColorImageR8G8B8A8;
    Vector2<u16>, 2 => ImageFormat::Unknown;
    Vector3<u16>, 3 => ImageFormat::Unknown;
    Vector4<u16>, 4 => ImageFormat::Unknown;
);

/// Arithmetic capability required by averaging algorithms.
///
/// Pixels are widened into an accumulator that supports addition,
/// subtraction and scalar weighting, then narrowed back.
pub trait PixelMath: Pixel {
    type Accum: Copy
        + Add<Output = Self::Accum>
        + Sub<Output = Self::Accum>
        + Mul<f32, Output = Self::Accum>
        + Div<f32, Output = Self::Accum>;

    fn widen(self) -> Self::Accum;
    fn narrow(acc: Self::Accum) -> Self;

    #[inline]
    fn accum_zero() -> Self::Accum {
        Self::zero().widen()
    }

    #[inline]
    fn add_pixel(self, rhs: Self) -> Self {
        Self::narrow(self.widen() + rhs.widen())
    }

    #[inline]
    fn sub_pixel(self, rhs: Self) -> Self {
        Self::narrow(self.widen() - rhs.widen())
    }

    #[inline]
    fn scale_pixel(self, s: f32) -> Self {
        Self::narrow(self.widen() * s)
    }

    /// `a + (b - a) * t`
    #[inline]
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        let a = a.widen();
        Self::narrow(a + (b.widen() - a) * t)
    }
}

impl PixelMath for f32 {
    type Accum = f32;

    #[inline]
    fn widen(self) -> f32 {
        self
    }

    #[inline]
    fn narrow(acc: f32) -> Self {
        acc
    }
}

macro_rules! impl_int_scalar_math {
    ($($t:ty),*) => {
        $(
            impl PixelMath for $t {
                type Accum = f32;

                #[inline]
                fn widen(self) -> f32 {
                    self as f32
                }

                #[inline]
                fn narrow(acc: f32) -> Self {
                    acc as $t
                }
            }
        )*
    };
}

impl_int_scalar_math!(u8, u16);

macro_rules! impl_float_vector_math {
    ($($vec:ident),*) => {
        $(
            impl PixelMath for $vec<f32> {
                type Accum = $vec<f32>;

                #[inline]
                fn widen(self) -> Self::Accum {
                    self
                }

                #[inline]
                fn narrow(acc: Self::Accum) -> Self {
                    acc
                }
            }
        )*
    };
}

impl_float_vector_math!(Vector2, Vector3, Vector4);

macro_rules! impl_int_vector_math {
    ($($vec:ident<$c:ty>),*) => {
        $(
            impl PixelMath for $vec<$c> {
                type Accum = $vec<f32>;

                #[inline]
                fn widen(self) -> Self::Accum {
                    self.map(|c| c as f32)
                }

                #[inline]
                fn narrow(acc: Self::Accum) -> Self {
                    acc.map(|c| c as $c)
                }
            }
        )*
    };
}

impl_int_vector_math!(
    Vector2<u8>,
    Vector3<u8>,
    Vector4<u8>,
    Vector2<u16>,
    Vector3<u16>,
    Vector4<u16>
);

/// Conversion between pixel types, used by [`Image::convert_from`](super::Image::convert_from).
pub trait FromPixel<U>: Sized {
    fn from_pixel(value: U) -> Self;
}

impl FromPixel<u16> for f32 {
    #[inline]
    fn from_pixel(value: u16) -> Self {
        value as f32
    }
}

impl FromPixel<u8> for f32 {
    #[inline]
    fn from_pixel(value: u8) -> Self {
        value as f32 / 255.0
    }
}

impl FromPixel<f32> for u16 {
    #[inline]
    fn from_pixel(value: f32) -> Self {
        value as u16
    }
}

impl FromPixel<f32> for Vector3<f32> {
    #[inline]
    fn from_pixel(value: f32) -> Self {
        Vector3::from_element(value)
    }
}

impl FromPixel<Vector3<u8>> for Vector3<f32> {
    #[inline]
    fn from_pixel(value: Vector3<u8>) -> Self {
        value.map(|c| c as f32 / 255.0)
    }
}

impl FromPixel<Vector4<u8>> for Vector4<f32> {
    #[inline]
    fn from_pixel(value: Vector4<u8>) -> Self {
        value.map(|c| c as f32 / 255.0)
    }
}

impl FromPixel<Vector3<f32>> for Vector4<f32> {
    #[inline]
    fn from_pixel(value: Vector3<f32>) -> Self {
        Vector4::new(value.x, value.y, value.z, 1.0)
    }
}

impl FromPixel<Vector4<f32>> for Vector3<f32> {
    #[inline]
    fn from_pixel(value: Vector4<f32>) -> Self {
        value.xyz()
    }
}

pub mod buffer;
pub mod coordinate;
pub mod io;
pub mod iter;
pub mod ops;
pub mod pixel;
pub mod ppm;
pub mod traits;


pub use self::buffer::Image;
pub use self::coordinate::Coordinate;
pub use self::iter::{PixelIter, PixelIterMut};
pub use self::pixel::{Channel, FromPixel, ImageFormat, Pixel, PixelMath};
pub use self::traits::{ImageView, ImageViewMut, Rows, RowsMut};

//! Binary I/O for images.
//!
//! - `write_binary_batch` / `read_binary_batch`: the private container format
//!   on arbitrary writers/readers.
//! - `save_binary_batch` / `load_binary_batch`: the same on disk, gated on the
//!   `.mbindepth` / `.mbinRGB` extensions.
//! - `Image::write_to` / `Image::read_from`: single-image stream encoding that
//!   also carries the sentinel.
//!
//! Container layout (little-endian):
//!
//! ```text
//! u32 num_images
//! u32 width
//! u32 height
//! u32 bytes_per_pixel
//! num_images × (width * height * bytes_per_pixel) pixel bytes, row-major
//! ```
//!
//! The container carries no pixel-type tag; the reader only checks that the
//! stored pixel size matches the requested type.
use super::{Image, ImageView, Pixel};
use crate::error::{ImageError, Result};
use log::debug;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Extension conventionally used for depth buffers.
pub const DEPTH_EXTENSION: &str = "mbindepth";
/// Extension conventionally used for color buffers.
pub const COLOR_EXTENSION: &str = "mbinRGB";

/// Accept only the two registered container extensions.
pub fn check_extension(path: &Path) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if ext == DEPTH_EXTENSION || ext == COLOR_EXTENSION {
        Ok(())
    } else {
        Err(ImageError::InvalidExtension(ext.to_string()))
    }
}

fn write_u32<W: Write>(writer: &mut W, value: u32) -> Result<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut raw = [0u8; 4];
    reader.read_exact(&mut raw)?;
    Ok(u32::from_le_bytes(raw))
}

/// Read exactly `len` bytes, growing the buffer only as data arrives.
fn read_block<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut block = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut block)?;
    if block.len() != len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("expected {len} pixel bytes, got {}", block.len()),
        )
        .into());
    }
    Ok(block)
}

fn encode_pixels<T: Pixel>(image: &Image<T>, out: &mut Vec<u8>) {
    out.reserve(image.len() * T::BYTES_PER_PIXEL);
    for row in image.rows() {
        for px in row {
            px.write_le(out);
        }
    }
}

fn decode_pixels<T: Pixel>(bytes: &[u8]) -> Vec<T> {
    bytes.chunks_exact(T::BYTES_PER_PIXEL).map(T::read_le).collect()
}

/// Check that a batch is non-empty and uniformly sized; returns the shared size.
fn validate_batch<T: Pixel>(images: &[Image<T>]) -> Result<(u32, u32)> {
    let first = images.first().ok_or(ImageError::EmptyBatch)?;
    let dims = first.dimensions();
    if let Some(other) = images.iter().find(|img| img.dimensions() != dims) {
        return Err(ImageError::dimension_mismatch(dims, other.dimensions()));
    }
    Ok(dims)
}

/// Write a batch of equally sized images in the container format.
///
/// The batch is validated before the first byte is written.
pub fn write_binary_batch<T: Pixel, W: Write>(writer: &mut W, images: &[Image<T>]) -> Result<()> {
    let (width, height) = validate_batch(images)?;
    let num_images = u32::try_from(images.len())
        .map_err(|_| ImageError::Malformed(format!("too many images: {}", images.len())))?;

    write_u32(writer, num_images)?;
    write_u32(writer, width)?;
    write_u32(writer, height)?;
    write_u32(writer, T::BYTES_PER_PIXEL as u32)?;

    let mut block = Vec::new();
    for image in images {
        block.clear();
        encode_pixels(image, &mut block);
        writer.write_all(&block)?;
    }
    Ok(())
}

/// Read every image stored in a container.
///
/// Fails with [`ImageError::PixelSizeMismatch`] before reading pixel data when
/// the stored pixel size differs from `T`.
pub fn read_binary_batch<T: Pixel, R: Read>(reader: &mut R) -> Result<Vec<Image<T>>> {
    let num_images = read_u32(reader)?;
    let width = read_u32(reader)?;
    let height = read_u32(reader)?;
    let bytes_per_pixel = read_u32(reader)?;
    if bytes_per_pixel as usize != T::BYTES_PER_PIXEL {
        return Err(ImageError::PixelSizeMismatch {
            expected: T::BYTES_PER_PIXEL,
            found: bytes_per_pixel,
        });
    }
    debug!(
        "binary container: {num_images} image(s) of {width}x{height}, {bytes_per_pixel} bytes per pixel"
    );

    let block_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(T::BYTES_PER_PIXEL))
        .ok_or_else(|| ImageError::Malformed(format!("image size {width}x{height} overflows")))?;

    // The header is untrusted: buffers grow only with bytes actually read.
    let mut images = Vec::with_capacity((num_images as usize).min(16));
    for _ in 0..num_images {
        let block = read_block(reader, block_len)?;
        images.push(Image::from_vec(width, height, decode_pixels(&block))?);
    }
    Ok(images)
}

/// Save a batch to `path`; only `.mbindepth` and `.mbinRGB` are accepted.
pub fn save_binary_batch<T: Pixel>(path: &Path, images: &[Image<T>]) -> Result<()> {
    check_extension(path)?;
    validate_batch(images)?;
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|e| ImageError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_binary_batch(&mut writer, images)?;
    writer.flush()?;
    Ok(())
}

/// Load every image stored at `path`.
pub fn load_binary_batch<T: Pixel>(path: &Path) -> Result<Vec<Image<T>>> {
    check_extension(path)?;
    let file = File::open(path).map_err(|e| ImageError::io(path, e))?;
    read_binary_batch(&mut BufReader::new(file))
}

impl<T: Pixel> Image<T> {
    /// Save this image as a single-entry container.
    pub fn save_binary(&self, path: &Path) -> Result<()> {
        save_binary_batch(path, std::slice::from_ref(self))
    }

    /// Load a container holding exactly one image.
    pub fn load_binary(path: &Path) -> Result<Self> {
        let mut images = load_binary_batch::<T>(path)?;
        if images.len() != 1 {
            return Err(ImageError::Malformed(format!(
                "expected a single image in {}, found {}",
                path.display(),
                images.len()
            )));
        }
        Ok(images.remove(0))
    }

    /// Stream encoding: `u32 width, u32 height, sentinel, pixels`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_u32(writer, self.width())?;
        write_u32(writer, self.height())?;
        let mut bytes = Vec::new();
        self.invalid_value().write_le(&mut bytes);
        encode_pixels(self, &mut bytes);
        writer.write_all(&bytes)?;
        Ok(())
    }

    /// Decode an image written by [`Image::write_to`].
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let width = read_u32(reader)?;
        let height = read_u32(reader)?;
        let mut raw = vec![0u8; T::BYTES_PER_PIXEL];
        reader.read_exact(&mut raw)?;
        let invalid = T::read_le(&raw);

        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(T::BYTES_PER_PIXEL))
            .ok_or_else(|| ImageError::Malformed(format!("image size {width}x{height} overflows")))?;
        let block = read_block(reader, len)?;
        Ok(Image::from_vec(width, height, decode_pixels(&block))?.with_invalid(invalid))
    }
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ImageError::io(parent, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn header_layout_matches_container_format() {
        let img = Image::<u16>::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let mut bytes = Vec::new();
        write_binary_batch(&mut bytes, std::slice::from_ref(&img)).unwrap();
        assert_eq!(
            &bytes[..16],
            &[1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 2, 0, 0, 0]
        );
        assert_eq!(bytes.len(), 16 + 12);
        assert_eq!(&bytes[16..20], &[1, 0, 2, 0]);

        let back = read_binary_batch::<u16, _>(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0], img);
        assert_eq!(back[0].invalid_value(), 0);
    }

    #[test]
    fn pixel_size_mismatch_is_rejected() {
        let img = Image::<u16>::filled(2, 2, 7);
        let mut bytes = Vec::new();
        write_binary_batch(&mut bytes, &[img]).unwrap();
        let err = read_binary_batch::<f32, _>(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(
            err,
            ImageError::PixelSizeMismatch {
                expected: 4,
                found: 2
            }
        ));
    }

    #[test]
    fn mixed_sizes_fail_before_writing() {
        let a = Image::<f32>::new(2, 2);
        let b = Image::<f32>::new(3, 2);
        let mut bytes = Vec::new();
        let err = write_binary_batch(&mut bytes, &[a, b]).unwrap_err();
        assert!(matches!(err, ImageError::DimensionMismatch { .. }));
        assert!(bytes.is_empty());

        let err = write_binary_batch::<f32, _>(&mut bytes, &[]).unwrap_err();
        assert!(matches!(err, ImageError::EmptyBatch));
    }

    #[test]
    fn truncated_stream_reports_io_error() {
        let img = Image::<f32>::filled(4, 4, 1.0);
        let mut bytes = Vec::new();
        write_binary_batch(&mut bytes, &[img]).unwrap();
        bytes.truncate(bytes.len() - 3);
        let err = read_binary_batch::<f32, _>(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, ImageError::Stream(_)));
    }

    fn header(words: [u32; 4]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn huge_header_without_payload_is_an_error() {
        let empty = header([0, 1 << 30, 1 << 30, 4]);
        let images = read_binary_batch::<f32, _>(&mut Cursor::new(empty)).unwrap();
        assert!(images.is_empty());

        let truncated = header([1, 1 << 30, 1 << 30, 4]);
        let err = read_binary_batch::<f32, _>(&mut Cursor::new(truncated)).unwrap_err();
        assert!(matches!(err, ImageError::Stream(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));

        let mut stream = Vec::new();
        stream.extend_from_slice(&(1u32 << 30).to_le_bytes());
        stream.extend_from_slice(&(1u32 << 30).to_le_bytes());
        stream.extend_from_slice(&f32::NEG_INFINITY.to_le_bytes());
        stream.extend_from_slice(&[0u8; 8]);
        let err = Image::<f32>::read_from(&mut Cursor::new(stream)).unwrap_err();
        assert!(matches!(err, ImageError::Stream(_)));
    }

    #[test]
    fn stream_codec_keeps_sentinel() {
        let mut img = Image::<f32>::filled(3, 2, 0.25).with_invalid(-1.0);
        img.set(1, 1, -1.0).unwrap();
        let mut bytes = Vec::new();
        img.write_to(&mut bytes).unwrap();
        let back = Image::<f32>::read_from(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(back, img);
        assert_eq!(back.invalid_value(), -1.0);
        assert_eq!(back.count_valid(), 5);
    }

    #[test]
    fn extension_gate() {
        assert!(check_extension(Path::new("a/b.mbindepth")).is_ok());
        assert!(check_extension(Path::new("b.mbinRGB")).is_ok());
        assert!(matches!(
            check_extension(Path::new("b.png")),
            Err(ImageError::InvalidExtension(ext)) if ext == "png"
        ));
        assert!(check_extension(Path::new("noext")).is_err());
    }
}

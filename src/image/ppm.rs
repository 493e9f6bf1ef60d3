//! Plain-text PPM export/import for single-channel depth images.
//!
//! Values in `[0, 1]` map to `[0, 255]`; each pixel is written as an equal
//! gray triplet on its own line. The dimension line stores `height width`.
//! Precision is lost on export, and values outside `[0, 1]` (including the
//! `-inf` sentinel) are clamped with a warning.
use super::io::ensure_parent_dir;
use super::{Image, ImageView};
use crate::error::{ImageError, Result};
use log::warn;
use std::fs;
use std::path::Path;

const PPM_MAGIC: &str = "P3";
const PPM_MAX_VALUE: u32 = 255;

/// Map `[0, 1]` to `[0, 255]`; the flag is set when the value was clamped.
fn to_external(v: f32) -> (u8, bool) {
    if v < 0.0 {
        (0, true)
    } else if v > 1.0 {
        (255, true)
    } else if v.is_nan() {
        (0, true)
    } else {
        ((v * 255.0 + 0.49999) as u8, false)
    }
}

fn from_external(c: u8) -> f32 {
    c as f32 / 255.0
}

impl Image<f32> {
    /// Write as text PPM. Returns the number of clamped values.
    pub fn save_ppm(&self, path: &Path) -> Result<usize> {
        ensure_parent_dir(path)?;
        let mut out = String::with_capacity(32 + self.len() * 12);
        out.push_str(PPM_MAGIC);
        out.push('\n');
        out.push_str(&format!("#{}\n", path.display()));
        out.push_str(&format!("{} {}\n", self.height(), self.width()));
        out.push_str(&format!("{PPM_MAX_VALUE}\n"));

        let mut clamped = 0usize;
        for row in self.rows() {
            for &px in row {
                let (c, was_clamped) = to_external(px);
                clamped += usize::from(was_clamped);
                out.push_str(&format!("{c} {c} {c}\n"));
            }
        }
        if clamped > 0 {
            warn!(
                "save_ppm {}: clamped {clamped} value(s) outside [0, 1]",
                path.display()
            );
        }
        fs::write(path, out).map_err(|e| ImageError::io(path, e))?;
        Ok(clamped)
    }

    /// Read a text PPM written by [`Image::save_ppm`].
    pub fn load_ppm(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ImageError::io(path, e))?;
        parse_ppm(&text)
    }
}

fn parse_ppm(text: &str) -> Result<Image<f32>> {
    let mut lines = text.lines();
    let magic = lines.next().unwrap_or("").trim();
    if magic != PPM_MAGIC {
        return Err(ImageError::Malformed(format!("unexpected PPM magic {magic:?}")));
    }
    let _comment = lines.next();
    let dims = lines
        .next()
        .ok_or_else(|| ImageError::Malformed("missing PPM dimensions".into()))?;
    let mut dims = dims.split_whitespace().map(str::parse::<u32>);
    let (height, width) = match (dims.next(), dims.next()) {
        (Some(Ok(h)), Some(Ok(w))) => (h, w),
        _ => return Err(ImageError::Malformed("invalid PPM dimensions".into())),
    };
    let _max_value = lines.next();

    let mut values = lines.flat_map(str::split_whitespace).map(|tok| {
        tok.parse::<u32>()
            .map_err(|_| ImageError::Malformed(format!("invalid PPM value {tok:?}")))
    });
    let mut next_channel = || -> Option<Result<u8>> {
        let c = match values.next()? {
            Ok(c) => c,
            Err(e) => return Some(Err(e)),
        };
        Some(u8::try_from(c).map_err(|_| {
            ImageError::Malformed(format!("PPM value {c} exceeds {PPM_MAX_VALUE}"))
        }))
    };

    // Pixels are collected before the header size is trusted.
    let expected = u64::from(width) * u64::from(height);
    let mut data = Vec::new();
    while let Some(r) = next_channel() {
        let truncated = || ImageError::Malformed("truncated PPM pixel data".into());
        let r = r?;
        let g = next_channel().ok_or_else(truncated)??;
        let b = next_channel().ok_or_else(truncated)??;
        if r != g || g != b {
            return Err(ImageError::Malformed(format!(
                "PPM triplet ({r}, {g}, {b}) is not gray"
            )));
        }
        if data.len() as u64 == expected {
            return Err(ImageError::Malformed(format!(
                "PPM holds more than {height}x{width} pixels"
            )));
        }
        data.push(from_external(r));
    }
    if data.len() as u64 != expected {
        return Err(ImageError::Malformed(format!(
            "truncated PPM pixel data: {} of {expected} pixels",
            data.len()
        )));
    }
    Image::from_vec(width, height, data)
}

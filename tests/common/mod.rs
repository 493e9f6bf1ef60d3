#![allow(dead_code)]

pub mod synthetic_image;

use std::path::PathBuf;

/// Fresh scratch directory under the system temp dir, unique per test.
pub fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("base_image_{}_{test}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

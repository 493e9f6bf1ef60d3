//! Mip-map pyramid built from repeated 2×2 box downsampling.
//!
//! Level 0 is the input image; each further level is `mip_map` of the previous
//! one, so dimensions halve (rounding down) at every step. Construction stops
//! early once a level would become empty. Sentinel handling follows
//! [`PyramidOptions::ignore_invalid`].

pub mod options;
pub mod pyramid;

pub use options::PyramidOptions;
pub use pyramid::{build_pyramid, Pyramid, PyramidResult};

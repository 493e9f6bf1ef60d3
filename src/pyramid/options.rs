use serde::Deserialize;

/// Options controlling pyramid construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PyramidOptions {
    /// Maximum number of levels, including level 0.
    pub levels: usize,
    /// Exclude sentinel pixels from the 2×2 averages.
    pub ignore_invalid: bool,
}

impl Default for PyramidOptions {
    fn default() -> Self {
        Self {
            levels: 4,
            ignore_invalid: true,
        }
    }
}

impl PyramidOptions {
    pub fn new(levels: usize) -> Self {
        Self {
            levels,
            ..Self::default()
        }
    }

    pub fn with_ignore_invalid(mut self, ignore_invalid: bool) -> Self {
        self.ignore_invalid = ignore_invalid;
        self
    }
}

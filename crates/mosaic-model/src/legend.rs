use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Discrete color legend over `[min, max]`.
///
/// `boundaries` has `bin_count + 1` entries; `colors` and `percent_text`
/// have `bin_count` entries each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendModel {
    pub bin_count: usize,
    pub min: f64,
    pub max: f64,
    pub boundaries: Vec<f64>,
    pub colors: Vec<Rgb>,
    pub percent_text: Vec<String>,
}

impl LegendModel {
    /// Checks the length and ordering invariants.
    pub fn is_consistent(&self) -> bool {
        self.boundaries.len() == self.bin_count + 1
            && self.colors.len() == self.bin_count
            && self.percent_text.len() == self.bin_count
            && self.boundaries.windows(2).all(|w| w[0] <= w[1])
    }

    /// Lower and upper boundary of bin `i`.
    pub fn bin_range(&self, i: usize) -> Option<(f64, f64)> {
        Some((*self.boundaries.get(i)?, *self.boundaries.get(i + 1)?))
    }
}

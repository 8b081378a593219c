//! Cube dimensions and size utilities

use ndarray::Array3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cube dimensions structure
///
/// Samples run along a line (x), lines run down the image (y), and bands
/// stack images of the same footprint. Positions handed to bricks and ground
/// maps are 1-based, so the pixel at `(sample, line, band) = (1, 1, 1)` is the
/// first element of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    /// Pixels per line
    pub samples: usize,
    /// Lines per band
    pub lines: usize,
    /// Number of bands
    pub bands: usize,
}

impl ImageSize {
    /// Create a new ImageSize
    pub fn new(samples: usize, lines: usize, bands: usize) -> Self {
        Self {
            samples,
            lines,
            bands,
        }
    }

    /// Single band image
    pub fn single_band(samples: usize, lines: usize) -> Self {
        Self::new(samples, lines, 1)
    }

    /// Create a core filled with `value`
    ///
    /// Returns an ndarray Array3 with shape (bands, lines, samples).
    /// Note the ordering convention: the slowest axis comes first.
    pub fn filled_core(&self, value: f64) -> Array3<f64> {
        Array3::from_elem((self.bands, self.lines, self.samples), value)
    }

    /// Get total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.samples * self.lines * self.bands
    }

    /// Convert a 1-based (sample, line, band) position into a core index.
    ///
    /// Returns `None` when the position falls outside the cube.
    pub fn index_of(&self, sample: i64, line: i64, band: i64) -> Option<[usize; 3]> {
        let inside = |value: i64, limit: usize| value >= 1 && value <= limit as i64;
        if inside(sample, self.samples) && inside(line, self.lines) && inside(band, self.bands) {
            Some([(band - 1) as usize, (line - 1) as usize, (sample - 1) as usize])
        } else {
            None
        }
    }

    /// Shape of a core with these dimensions
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.bands, self.lines, self.samples)
    }

    /// Dimensions of an existing core
    pub fn from_core(core: &Array3<f64>) -> Self {
        let (bands, lines, samples) = core.dim();
        Self::new(samples, lines, bands)
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}x{}", self.samples, self.lines, self.bands)
    }
}

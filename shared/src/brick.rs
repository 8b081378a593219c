//! Rectangular pixel windows bound to a cube position.
//!
//! A brick is a `samples x lines x bands` buffer whose base position (its
//! upper-left pixel on its first band) can be moved around a cube. The buffer
//! is addressed linearly with samples varying fastest:
//!
//! ```text
//! index = sample + samples * (line + lines * band)
//! ```
//!
//! so for a single band `n x n` brick, `brick[n * i + c]` walks down column
//! `c` as `i` increases and `brick[n * r + i]` walks along row `r`.

use std::ops::{Index, IndexMut};

use crate::special_pixel::NULL;

#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    samples: usize,
    lines: usize,
    base: (i64, i64, i64),
    buffer: Vec<f64>,
}

impl Brick {
    /// Create a brick filled with Null, based at (1, 1, 1).
    pub fn new(samples: usize, lines: usize, bands: usize) -> Self {
        Self {
            samples,
            lines,
            base: (1, 1, 1),
            buffer: vec![NULL; samples * lines * bands],
        }
    }

    /// Move the brick so its first pixel sits at the 1-based `(sample, line, band)`.
    pub fn set_base_position(&mut self, sample: i64, line: i64, band: i64) {
        self.base = (sample, line, band);
    }

    /// Current base `(sample, line, band)`.
    pub fn base_position(&self) -> (i64, i64, i64) {
        self.base
    }

    /// Number of pixels in the buffer
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Cube position of the buffer element at `index`.
    pub fn position(&self, index: usize) -> (i64, i64, i64) {
        let sample = index % self.samples;
        let line = (index / self.samples) % self.lines;
        let band = index / (self.samples * self.lines);
        (
            self.base.0 + sample as i64,
            self.base.1 + line as i64,
            self.base.2 + band as i64,
        )
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.buffer
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.buffer
    }

    /// Set every pixel to `value`.
    pub fn fill(&mut self, value: f64) {
        self.buffer.iter_mut().for_each(|v| *v = value);
    }
}

impl Index<usize> for Brick {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.buffer[index]
    }
}

impl IndexMut<usize> for Brick {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.buffer[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::special_pixel::is_null;

    #[test]
    fn test_new_brick_is_null() {
        let brick = Brick::new(3, 2, 1);
        assert_eq!(brick.size(), 6);
        assert!(brick.as_slice().iter().all(|v| is_null(*v)));
        assert_eq!(brick.base_position(), (1, 1, 1));
    }

    #[test]
    fn test_position_follows_base() {
        let mut brick = Brick::new(3, 2, 2);
        brick.set_base_position(10, 20, 1);
        assert_eq!(brick.position(0), (10, 20, 1));
        assert_eq!(brick.position(2), (12, 20, 1));
        assert_eq!(brick.position(3), (10, 21, 1));
        assert_eq!(brick.position(6), (10, 20, 2));
    }

    #[test]
    fn test_index_mut() {
        let mut brick = Brick::new(2, 2, 1);
        brick[3] = 5.0;
        assert_eq!(brick[3], 5.0);
        brick.fill(1.0);
        assert_eq!(brick.as_slice(), &[1.0; 4]);
    }
}

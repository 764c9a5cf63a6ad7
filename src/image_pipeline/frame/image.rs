//! Row-major image buffers for color and depth data

use crate::image_pipeline::common::error::{BokehError, Result};

/// Normalized RGB sample, each channel in `[0, 1]`.
pub type Rgb = [f32; 3];

/// A `rows x cols` grid of pixels stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<P> {
    rows: usize,
    cols: usize,
    data: Vec<P>,
}

/// Three-channel floating-point color image.
pub type ColorImage = Image<Rgb>;

/// Single-channel 8-bit depth map.
pub type DepthImage = Image<u8>;

impl<P: Copy> Image<P> {
    /// Create an image with every pixel set to `value`.
    pub fn filled(rows: usize, cols: usize, value: P) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Wrap a row-major pixel vector; its length must be `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<P>) -> Result<Self> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(BokehError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// If the coordinate lies outside the image.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> P {
        assert!(row < self.rows && col < self.cols, "pixel ({row}, {col}) out of bounds");
        self.data[row * self.cols + col]
    }

    /// Pixel at `(row, col)`, or `None` outside the image.
    #[inline]
    pub fn try_get(&self, row: usize, col: usize) -> Option<P> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: P) {
        assert!(row < self.rows && col < self.cols, "pixel ({row}, {col}) out of bounds");
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[P] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    /// Iterate `(row, col, pixel)` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, P)> + '_ {
        let cols = self.cols.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, &p)| (idx / cols, idx % cols, p))
    }
}

impl ColorImage {
    /// Build a color image from interleaved 8-bit RGB samples, scaling to `[0, 1]`.
    pub fn from_rgb8(rows: usize, cols: usize, samples: &[u8]) -> Result<Self> {
        if samples.len() != rows * cols * 3 {
            return Err(BokehError::BufferSizeMismatch {
                expected: rows * cols * 3,
                actual: samples.len(),
            });
        }
        let data = samples
            .chunks_exact(3)
            .map(|px| [unit(px[0]), unit(px[1]), unit(px[2])])
            .collect();
        Self::from_vec(rows, cols, data)
    }

    /// Interleaved 8-bit RGB samples, clamped and rounded.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.data
            .iter()
            .flat_map(|px| px.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
            .collect()
    }

    /// Interleaved 16-bit RGB samples, clamped and rounded.
    pub fn to_rgb16(&self) -> Vec<u16> {
        self.data
            .iter()
            .flat_map(|px| px.map(|c| (c.clamp(0.0, 1.0) * 65535.0).round() as u16))
            .collect()
    }
}

#[inline]
fn unit(v: u8) -> f32 {
    v as f32 / 255.0
}

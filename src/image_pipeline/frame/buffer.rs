use crate::image_pipeline::common::error::{BokehError, Result};
use crate::image_pipeline::frame::image::{ColorImage, DepthImage};

/// The three images an interactive session works on: the source color
/// image, its depth map and the most recently rendered output.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    color: ColorImage,
    depth: DepthImage,
    output: ColorImage,
    focus: Option<u8>,
}

impl FrameBuffer {
    /// Pair a color image with its depth map. The output starts as a copy of
    /// the color image, matching an unfocused first display.
    pub fn new(color: ColorImage, depth: DepthImage) -> Result<Self> {
        ensure_same_dimensions(&color, &depth)?;
        let output = color.clone();
        Ok(Self {
            color,
            depth,
            output,
            focus: None,
        })
    }

    pub fn color(&self) -> &ColorImage {
        &self.color
    }

    pub fn depth(&self) -> &DepthImage {
        &self.depth
    }

    pub fn output(&self) -> &ColorImage {
        &self.output
    }

    /// Focal depth the current output was rendered with, if any.
    pub fn focus(&self) -> Option<u8> {
        self.focus
    }

    /// `(rows, cols)` shared by all three images.
    pub fn dimensions(&self) -> (usize, usize) {
        self.color.dimensions()
    }

    /// Depth under a pointer. Pointer `x` is the column and `y` the row.
    pub fn depth_at_pointer(&self, x: usize, y: usize) -> Result<u8> {
        self.depth
            .try_get(y, x)
            .ok_or_else(|| BokehError::PointerOutOfBounds {
                x,
                y,
                cols: self.depth.cols(),
                rows: self.depth.rows(),
            })
    }

    pub(crate) fn replace_output(&mut self, output: ColorImage, focus: u8) {
        debug_assert_eq!(output.dimensions(), self.color.dimensions());
        self.output = output;
        self.focus = Some(focus);
    }
}

/// Reject empty images and color/depth pairs of different size.
pub fn ensure_same_dimensions(color: &ColorImage, depth: &DepthImage) -> Result<()> {
    let (rows, cols) = color.dimensions();
    if color.is_empty() {
        return Err(BokehError::InvalidDimensions(rows, cols));
    }
    if color.dimensions() != depth.dimensions() {
        return Err(BokehError::DimensionMismatch {
            color_rows: rows,
            color_cols: cols,
            depth_rows: depth.rows(),
            depth_cols: depth.cols(),
        });
    }
    Ok(())
}

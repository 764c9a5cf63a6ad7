//! Frame data module
//!
//! Image buffers for color and depth data, and the frame holder that owns them
//! for the duration of a focus session.

mod image;
mod buffer;

pub use image::{Image, ColorImage, DepthImage, Rgb};
pub use buffer::{FrameBuffer, ensure_same_dimensions};

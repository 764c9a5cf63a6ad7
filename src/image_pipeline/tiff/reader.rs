use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::frame::{ColorImage, DepthImage};

pub trait RgbdImageReader {
    fn read_color(&self, data: &[u8]) -> Result<ColorImage>;
    fn read_depth(&self, data: &[u8]) -> Result<DepthImage>;
}

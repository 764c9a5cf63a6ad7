use std::io::Write;
use crate::image_pipeline::common::config::BokehConfig;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::frame::ColorImage;

pub trait TiffWriter {
    fn write_color(&self, image: &ColorImage, output: &mut dyn Write, config: &BokehConfig) -> Result<()>;
}

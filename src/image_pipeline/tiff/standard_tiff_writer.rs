use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::config::{BokehConfig, OutputBitDepth, TiffCompression};
use crate::image_pipeline::common::error::{BokehError, Result};
use crate::image_pipeline::frame::ColorImage;
use crate::image_pipeline::tiff::writer::TiffWriter;

pub struct StandardTiffWriter;

impl TiffWriter for StandardTiffWriter {
    fn write_color(&self, image: &ColorImage, output: &mut dyn Write, config: &BokehConfig) -> Result<()> {
        let (rows, cols) = image.dimensions();
        debug!("Encoding TIFF image: {}x{} ({:?})", cols, rows, config.output_depth);

        let mut buffer = Vec::new();

        {
            let compression = match config.compression {
                TiffCompression::None => tiff::encoder::Compression::Uncompressed,
                TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
                TiffCompression::Deflate => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            };

            let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(|e| BokehError::EncodeError(e.to_string()))?
                .with_compression(compression);

            if let Some(predictor_val) = config.predictor {
                let predictor = match predictor_val {
                    2 => tiff::tags::Predictor::Horizontal,
                    _ => tiff::tags::Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }

            let written = match config.output_depth {
                OutputBitDepth::Eight => encoder.write_image::<tiff::encoder::colortype::RGB8>(
                    cols as u32,
                    rows as u32,
                    &image.to_rgb8(),
                ),
                OutputBitDepth::Sixteen => encoder.write_image::<tiff::encoder::colortype::RGB16>(
                    cols as u32,
                    rows as u32,
                    &image.to_rgb16(),
                ),
            };
            written.map_err(|e| BokehError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}

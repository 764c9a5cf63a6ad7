//! TIFF decoding for color images and depth maps.
//!
//! Gray, gray+alpha, RGB and RGBA layouts at 8 or 16 bits per sample are
//! accepted. Color samples are scaled to `[0, 1]`, with gray replicated across
//! the three channels and alpha dropped. Depth samples are reduced to a single
//! 8-bit channel; RGB depth maps are converted with Rec. 601 luma weights.

use std::io::Cursor;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::image_pipeline::common::error::{BokehError, Result};
use crate::image_pipeline::frame::{ColorImage, DepthImage};
use crate::image_pipeline::tiff::reader::RgbdImageReader;

const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Reader for baseline TIFF files using the `tiff` crate.
pub struct StandardTiffReader;

/// Decoded samples normalized to `[0, 1]`, interleaved by channel.
struct Samples {
    rows: usize,
    cols: usize,
    channels: usize,
    values: Vec<f32>,
}

impl Samples {
    fn pixels(&self) -> impl Iterator<Item = &[f32]> {
        self.values.chunks_exact(self.channels)
    }
}

fn decode(data: &[u8]) -> Result<Samples> {
    debug!("Decoding TIFF image, {} bytes", data.len());

    let mut decoder = Decoder::new(Cursor::new(data))
        .map_err(|e| BokehError::DecodeError(e.to_string()))?;
    let (width, height) = decoder
        .dimensions()
        .map_err(|e| BokehError::DecodeError(e.to_string()))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| BokehError::DecodeError(e.to_string()))?;

    let channels = match color_type {
        ColorType::Gray(8 | 16) => 1,
        ColorType::GrayA(8 | 16) => 2,
        ColorType::RGB(8 | 16) => 3,
        ColorType::RGBA(8 | 16) => 4,
        other => {
            return Err(BokehError::UnsupportedFormat(format!("{other:?}")));
        }
    };

    let values: Vec<f32> = match decoder
        .read_image()
        .map_err(|e| BokehError::DecodeError(e.to_string()))?
    {
        DecodingResult::U8(buf) => buf.iter().map(|&v| v as f32 / u8::MAX as f32).collect(),
        DecodingResult::U16(buf) => buf.iter().map(|&v| v as f32 / u16::MAX as f32).collect(),
        _ => {
            return Err(BokehError::UnsupportedFormat(format!(
                "{color_type:?} sample encoding"
            )));
        }
    };

    let (rows, cols) = (height as usize, width as usize);
    if values.len() != rows * cols * channels {
        return Err(BokehError::DecodeError(format!(
            "expected {} samples for {}x{}x{}, got {}",
            rows * cols * channels,
            cols,
            rows,
            channels,
            values.len()
        )));
    }

    debug!("Decoded image: {}x{}, {:?}", cols, rows, color_type);
    Ok(Samples {
        rows,
        cols,
        channels,
        values,
    })
}

impl RgbdImageReader for StandardTiffReader {
    fn read_color(&self, data: &[u8]) -> Result<ColorImage> {
        let samples = decode(data)?;
        let pixels = samples
            .pixels()
            .map(|px| match px.len() {
                1 | 2 => [px[0]; 3],
                _ => [px[0], px[1], px[2]],
            })
            .collect();
        ColorImage::from_vec(samples.rows, samples.cols, pixels)
    }

    fn read_depth(&self, data: &[u8]) -> Result<DepthImage> {
        let samples = decode(data)?;
        let pixels = samples
            .pixels()
            .map(|px| {
                let level = match px.len() {
                    1 | 2 => px[0],
                    _ => LUMA_WEIGHTS[0] * px[0] + LUMA_WEIGHTS[1] * px[1] + LUMA_WEIGHTS[2] * px[2],
                };
                (level.clamp(0.0, 1.0) * 255.0).round() as u8
            })
            .collect();
        DepthImage::from_vec(samples.rows, samples.cols, pixels)
    }
}

use tracing::{info, instrument, warn};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    common::{
        config::BokehConfig,
        error::{BokehError, Result},
    },
    convolution::DepthAwareConvolver,
    frame::FrameBuffer,
    tiff::{RgbdImageReader, StandardTiffReader, StandardTiffWriter, TiffWriter},
};

/// Loads RGB-D frames, renders them at a focal depth and writes the result.
pub struct BokehPipeline<R: RgbdImageReader, W: TiffWriter> {
    reader: R,
    writer: W,
    config: BokehConfig,
    convolver: DepthAwareConvolver,
}

impl BokehPipeline<StandardTiffReader, StandardTiffWriter> {
    pub fn new(config: BokehConfig) -> Self {
        Self::with_custom(StandardTiffReader, StandardTiffWriter, config)
    }
}

impl<R: RgbdImageReader, W: TiffWriter> BokehPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: BokehConfig) -> Self {
        Self {
            reader,
            writer,
            convolver: DepthAwareConvolver::new(&config),
            config,
        }
    }

    fn validate_dimensions(&self, rows: usize, cols: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if rows == 0 || cols == 0 {
            return Err(BokehError::InvalidDimensions(rows, cols));
        }

        if let Some(max) = self.config.max_dimension {
            if rows > max || cols > max {
                warn!(rows, cols, max, "Image dimensions exceed maximum");
                return Err(BokehError::InvalidDimensions(rows, cols));
            }
        }

        Ok(())
    }

    /// Decode a color image and its depth map into a frame.
    #[instrument(skip_all, fields(color_size = color_data.len(), depth_size = depth_data.len()))]
    pub fn load(&self, color_data: &[u8], depth_data: &[u8]) -> Result<FrameBuffer> {
        let color = {
            let _span = tracing::info_span!("decode_color").entered();
            self.reader.read_color(color_data)?
        };

        let depth = {
            let _span = tracing::info_span!("decode_depth").entered();
            self.reader.read_depth(depth_data)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                rows = color.rows(),
                cols = color.cols()
            ).entered();
            self.validate_dimensions(color.rows(), color.cols())?;
        }

        let frame = FrameBuffer::new(color, depth)?;
        let (rows, cols) = frame.dimensions();
        info!(rows, cols, "Frame loaded");
        Ok(frame)
    }

    #[instrument(skip(self, color_path, depth_path))]
    pub fn load_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        color_path: P,
        depth_path: Q,
    ) -> Result<FrameBuffer> {
        let color_path = color_path.as_ref();
        let depth_path = depth_path.as_ref();

        info!(
            color = %color_path.display(),
            depth = %depth_path.display(),
            "Loading frame"
        );

        let color_data = read_input(color_path)?;
        let depth_data = read_input(depth_path)?;

        self.load(&color_data, &depth_data)
    }

    /// Re-render the frame's output at `focus`, replacing the previous output.
    #[instrument(skip(self, frame))]
    pub fn refocus(&self, frame: &mut FrameBuffer, focus: u8) -> Result<()> {
        let output = self.convolver.filter(frame.color(), frame.depth(), focus)?;
        frame.replace_output(output, focus);
        info!(focus, "Frame refocused");
        Ok(())
    }

    /// Encode the frame's current output.
    pub fn write(&self, frame: &FrameBuffer, output: &mut dyn Write) -> Result<()> {
        let _span = tracing::info_span!("encode_tiff").entered();
        self.writer.write_color(frame.output(), output, &self.config)
    }

    #[instrument(skip(self, frame, output_path))]
    pub fn write_file<P: AsRef<Path>>(&self, frame: &FrameBuffer, output_path: P) -> Result<()> {
        let output_path = output_path.as_ref();

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                BokehError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.write(frame, &mut output_file)?;

        info!(output = %output_path.display(), "Frame written");
        Ok(())
    }

    pub fn config(&self) -> &BokehConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: BokehConfig) {
        self.convolver = DepthAwareConvolver::new(&config);
        self.config = config;
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let _span = tracing::info_span!("read_input_file", path = %path.display()).entered();
    std::fs::read(path)
        .map_err(|e| BokehError::InputReadError(format!("{}: {}", path.display(), e)))
}

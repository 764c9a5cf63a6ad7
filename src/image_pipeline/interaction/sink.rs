use std::path::{Path, PathBuf};

use tracing::info;

use crate::image_pipeline::common::config::BokehConfig;
use crate::image_pipeline::common::error::{BokehError, Result};
use crate::image_pipeline::frame::ColorImage;
use crate::image_pipeline::tiff::{StandardTiffWriter, TiffWriter};

/// Receives every frame the session wants shown.
pub trait DisplaySink {
    fn present(&mut self, image: &ColorImage) -> Result<()>;
}

/// Display sink that overwrites a TIFF file with each presented frame.
pub struct TiffFileSink<W: TiffWriter = StandardTiffWriter> {
    path: PathBuf,
    writer: W,
    config: BokehConfig,
    presented: usize,
}

impl TiffFileSink<StandardTiffWriter> {
    pub fn new<P: AsRef<Path>>(path: P, config: BokehConfig) -> Self {
        Self::with_writer(path, StandardTiffWriter, config)
    }
}

impl<W: TiffWriter> TiffFileSink<W> {
    pub fn with_writer<P: AsRef<Path>>(path: P, writer: W, config: BokehConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            writer,
            config,
            presented: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of frames written so far.
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl<W: TiffWriter> DisplaySink for TiffFileSink<W> {
    fn present(&mut self, image: &ColorImage) -> Result<()> {
        let mut file = std::fs::File::create(&self.path).map_err(|e| {
            BokehError::OutputWriteError(format!("{}: {}", self.path.display(), e))
        })?;
        self.writer.write_color(image, &mut file, &self.config)?;
        self.presented += 1;
        info!(output = %self.path.display(), frame = self.presented, "Frame presented");
        Ok(())
    }
}

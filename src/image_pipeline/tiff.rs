//! TIFF module
//!
//! This module provides decoding of color/depth input pairs and encoding of rendered frames.

mod reader;
mod writer;
mod standard_tiff_reader;
mod standard_tiff_writer;


pub use reader::RgbdImageReader;
pub use writer::TiffWriter;
pub use standard_tiff_reader::StandardTiffReader;
pub use standard_tiff_writer::StandardTiffWriter;

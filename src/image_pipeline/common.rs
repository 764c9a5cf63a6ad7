//! Common utilities module
//!
//! This module contains the error type and the configuration shared across the image pipeline.

pub mod error;
pub mod config;

pub use error::{BokehError, Result};
pub use config::{BokehConfig, BokehConfigBuilder, EdgePolicy, OutputBitDepth, TiffCompression};

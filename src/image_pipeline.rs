//! Image processing pipeline module
//!
//! This module renders synthetic depth of field from an RGB image and a co-registered
//! depth map, with separate modules for kernel synthesis, depth-aware convolution,
//! TIFF input/output, pipeline orchestration and pointer-driven refocusing.

pub mod common;
pub mod frame;
pub mod kernel;
pub mod convolution;
pub mod tiff;
pub mod conversions;
pub mod interaction;

pub use common::{
    BokehError,
    Result,
    BokehConfig,
    BokehConfigBuilder,
    EdgePolicy,
    OutputBitDepth,
    TiffCompression,
};

pub use frame::{
    Image,
    ColorImage,
    DepthImage,
    Rgb,
    FrameBuffer,
};

pub use kernel::{
    Kernel,
    KernelFactory,
    GaussianKernelFactory,
    FocusKernelTable,
    DEPTH_LEVELS,
    MAX_KERNEL_DIAMETER,
};

pub use convolution::DepthAwareConvolver;

pub use self::tiff::{
    RgbdImageReader,
    StandardTiffReader,
    TiffWriter,
    StandardTiffWriter,
};

pub use conversions::BokehPipeline;

pub use interaction::{
    PointerEvent,
    SessionControl,
    DisplaySink,
    TiffFileSink,
    FocusSession,
};

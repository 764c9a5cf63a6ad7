use thiserror::Error;

#[derive(Error, Debug)]
pub enum BokehError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode TIFF image: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: rows={0}, cols={1}")]
    InvalidDimensions(usize, usize),

    #[error(
        "Color image is {color_rows}x{color_cols} but depth image is {depth_rows}x{depth_cols}"
    )]
    DimensionMismatch {
        color_rows: usize,
        color_cols: usize,
        depth_rows: usize,
        depth_cols: usize,
    },

    #[error("Pixel buffer holds {actual} values, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Gaussian sigma must be finite and positive, got {0}")]
    InvalidSigma(f32),

    #[error("Maximum kernel diameter must be finite and positive, got {0}")]
    InvalidKernelDiameter(f32),

    #[error("Pointer ({x}, {y}) lies outside the {cols}x{rows} image")]
    PointerOutOfBounds {
        x: usize,
        y: usize,
        cols: usize,
        rows: usize,
    },

    #[error("Invalid pointer event: {0}")]
    InvalidEvent(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BokehError>;

//! Pipeline configuration types

use crate::image_pipeline::kernel::DEFAULT_MAX_KERNEL_DIAMETER;

/// TIFF compression methods for the rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression, balanced level
    Deflate,
}

/// Sample width of the written frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputBitDepth {
    Eight,
    Sixteen,
}

/// Which neighbor coordinates count as inside the image during convolution.
///
/// `Legacy` treats row 0 and column 0 as outside, so they never contribute to
/// a neighbor's blur (their weight is redirected to the target pixel like any
/// other excluded tap). `Inclusive` uses the full `[0, rows) x [0, cols)` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    #[default]
    Legacy,
    Inclusive,
}

impl EdgePolicy {
    /// Smallest row/column index a tap may land on and still contribute.
    #[inline]
    pub fn first_index(self) -> isize {
        match self {
            EdgePolicy::Legacy => 1,
            EdgePolicy::Inclusive => 0,
        }
    }
}

/// Configuration for depth-of-field rendering
#[derive(Debug, Clone)]
pub struct BokehConfig {
    /// Kernel diameter (pixels) used for depth index 0
    pub max_kernel_diameter: f32,
    /// Bounds rule applied to convolution taps
    pub edge_policy: EdgePolicy,
    /// Compression method for written frames
    pub compression: TiffCompression,
    /// Predictor value for compression (2 for horizontal differencing)
    pub predictor: Option<u16>,
    /// Sample width of written frames
    pub output_depth: OutputBitDepth,
    /// Whether to validate image dimensions after decoding
    pub validate_dimensions: bool,
    /// Largest accepted side length, when validation is enabled
    pub max_dimension: Option<usize>,
}

impl Default for BokehConfig {
    fn default() -> Self {
        Self {
            max_kernel_diameter: DEFAULT_MAX_KERNEL_DIAMETER,
            edge_policy: EdgePolicy::Legacy,
            compression: TiffCompression::None,
            predictor: None,
            output_depth: OutputBitDepth::Eight,
            validate_dimensions: true,
            max_dimension: Some(50000),
        }
    }
}

impl BokehConfig {
    pub fn builder() -> BokehConfigBuilder {
        BokehConfigBuilder::default()
    }
}

/// Builder for BokehConfig
#[derive(Default)]
pub struct BokehConfigBuilder {
    max_kernel_diameter: Option<f32>,
    edge_policy: Option<EdgePolicy>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    output_depth: Option<OutputBitDepth>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
}

impl BokehConfigBuilder {
    pub fn max_kernel_diameter(mut self, diameter: f32) -> Self {
        self.max_kernel_diameter = Some(diameter);
        self
    }

    pub fn edge_policy(mut self, policy: EdgePolicy) -> Self {
        self.edge_policy = Some(policy);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn output_depth(mut self, depth: OutputBitDepth) -> Self {
        self.output_depth = Some(depth);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> BokehConfig {
        let default = BokehConfig::default();
        BokehConfig {
            max_kernel_diameter: self.max_kernel_diameter.unwrap_or(default.max_kernel_diameter),
            edge_policy: self.edge_policy.unwrap_or(default.edge_policy),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            output_depth: self.output_depth.unwrap_or(default.output_depth),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}

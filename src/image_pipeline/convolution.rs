//! Depth-aware convolution module

mod depth_aware;

pub use depth_aware::DepthAwareConvolver;

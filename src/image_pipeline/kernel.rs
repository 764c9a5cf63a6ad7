//! Blur kernel module
//!
//! Gaussian kernel synthesis and the per-depth kernel lookup table built for a focal depth.

mod factory;
mod table;

pub use factory::{Kernel, KernelFactory, GaussianKernelFactory, MAX_KERNEL_SIZE};
pub use table::{FocusKernelTable, DEPTH_LEVELS, DEFAULT_MAX_KERNEL_DIAMETER, MAX_KERNEL_DIAMETER};

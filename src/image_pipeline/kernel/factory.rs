//! Square Gaussian kernels.

use tracing::trace;

use crate::image_pipeline::common::error::{BokehError, Result};

/// A square, odd-sized grid of convolution weights stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// The 1x1 passthrough kernel.
    pub fn identity() -> Self {
        Self {
            size: 1,
            weights: vec![1.0],
        }
    }

    /// Side length `N`, always odd.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Integer half-width `N / 2`.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Weight at kernel cell `(row, col)`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.weights[row * self.size + col]
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    pub fn is_identity(&self) -> bool {
        self.size == 1
    }
}

/// Largest kernel side a factory will allocate.
pub const MAX_KERNEL_SIZE: usize = 1025;

/// Source of kernels for a `(size, sigma)` request.
pub trait KernelFactory {
    fn build(&self, size: usize, sigma: f32) -> Result<Kernel>;
}

/// Builds normalized isotropic Gaussian kernels.
///
/// An even `size` is bumped to the next odd value so the kernel has a center
/// cell. Each cell holds `exp(-d² / 2σ²)` for its squared distance `d²` to the
/// center, and the grid is divided by its total so the weights sum to one.
/// Sides above [`MAX_KERNEL_SIZE`] are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianKernelFactory;

impl KernelFactory for GaussianKernelFactory {
    fn build(&self, size: usize, sigma: f32) -> Result<Kernel> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(BokehError::InvalidSigma(sigma));
        }

        let n = if size % 2 == 0 { size + 1 } else { size };
        if n > MAX_KERNEL_SIZE {
            return Err(BokehError::InvalidKernelDiameter(size as f32));
        }
        let center = (n - 1) as f32 * 0.5;
        let two_sigma_sq = 2.0 * sigma * sigma;

        let mut weights = Vec::with_capacity(n * n);
        for i in 0..n {
            let di = i as f32 - center;
            for j in 0..n {
                let dj = j as f32 - center;
                weights.push((-(di * di + dj * dj) / two_sigma_sq).exp());
            }
        }

        // The center cell is exp(0) = 1, so the sum never vanishes.
        let sum: f32 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        trace!(size = n, sigma, "Built Gaussian kernel");
        Ok(Kernel { size: n, weights })
    }
}

use std::ops::Index;

use tracing::debug;

use crate::image_pipeline::common::error::{BokehError, Result};
use crate::image_pipeline::kernel::factory::{GaussianKernelFactory, Kernel, KernelFactory, MAX_KERNEL_SIZE};

/// Number of distinct depth values, one kernel each.
pub const DEPTH_LEVELS: usize = 256;

/// Diameter in pixels of the kernel used for depth index 0.
pub const DEFAULT_MAX_KERNEL_DIAMETER: f32 = 20.0;

/// Largest accepted diameter; its kernel is `MAX_KERNEL_SIZE` wide.
pub const MAX_KERNEL_DIAMETER: f32 = MAX_KERNEL_SIZE as f32;

/// Sigma of the passthrough kernel used at and beyond the focal depth.
const PASSTHROUGH_SIGMA: f32 = 0.01;

/// One kernel per depth value for a given focal depth.
///
/// Depths at or above the focus map to the 1x1 identity kernel. Below the
/// focus the kernel extent shrinks linearly from the maximum diameter at
/// depth 0 toward the focal index, with `sigma = sqrt(extent)`.
#[derive(Debug, Clone)]
pub struct FocusKernelTable {
    focus: u8,
    kernels: Vec<Kernel>,
}

impl FocusKernelTable {
    /// Build the table for `focus` with Gaussian kernels and the default diameter.
    pub fn build(focus: u8) -> Result<Self> {
        Self::build_with(&GaussianKernelFactory, focus, DEFAULT_MAX_KERNEL_DIAMETER)
    }

    pub fn build_with<F: KernelFactory>(factory: &F, focus: u8, max_diameter: f32) -> Result<Self> {
        if !(max_diameter.is_finite() && max_diameter > 0.0 && max_diameter <= MAX_KERNEL_DIAMETER) {
            return Err(BokehError::InvalidKernelDiameter(max_diameter));
        }

        let gap = max_diameter / (focus as f32 + 1.0);
        let mut kernels = Vec::with_capacity(DEPTH_LEVELS);

        for i in 0..focus as usize {
            let extent = max_diameter - i as f32 * gap;
            kernels.push(factory.build(extent as usize, extent.sqrt())?);
        }

        let passthrough = factory.build(1, PASSTHROUGH_SIGMA)?;
        kernels.resize(DEPTH_LEVELS, passthrough);

        debug!(
            focus,
            gap,
            max_kernel_size = kernels[0].size(),
            "Built focus kernel table"
        );

        Ok(Self { focus, kernels })
    }

    pub fn focus(&self) -> u8 {
        self.focus
    }

    /// Kernel selected for a pixel of the given depth.
    #[inline]
    pub fn kernel(&self, depth: u8) -> &Kernel {
        &self.kernels[depth as usize]
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Kernel> {
        self.kernels.iter()
    }

    /// Side length of the largest kernel in the table.
    pub fn max_kernel_size(&self) -> usize {
        self.kernels.iter().map(Kernel::size).max().unwrap_or(1)
    }
}

impl Index<u8> for FocusKernelTable {
    type Output = Kernel;

    fn index(&self, depth: u8) -> &Kernel {
        self.kernel(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_one_kernel_per_depth() {
        for focus in [0u8, 1, 10, 128, 255] {
            let table = FocusKernelTable::build(focus).unwrap();
            assert_eq!(table.len(), DEPTH_LEVELS);
            assert_eq!(table.focus(), focus);
        }
    }

    #[test]
    fn test_zero_focus_is_all_identity() {
        let table = FocusKernelTable::build(0).unwrap();
        assert!(table.iter().all(Kernel::is_identity));
        assert_eq!(table.max_kernel_size(), 1);
    }

    #[test]
    fn test_at_and_beyond_focus_is_identity() {
        let focus = 40u8;
        let table = FocusKernelTable::build(focus).unwrap();
        for depth in focus..=255 {
            assert_eq!(table[depth], Kernel::identity(), "depth {depth}");
        }
        assert!(!table[0].is_identity());
    }

    #[test]
    fn test_sizes_shrink_toward_focus() {
        let table = FocusKernelTable::build(10).unwrap();
        // gap = 20 / 11; extent(0) = 20 -> 21x21 after odd rounding.
        assert_eq!(table[0].size(), 21);
        let sizes: Vec<usize> = (0..10u8).map(|d| table[d].size()).collect();
        assert!(sizes.windows(2).all(|w| w[0] >= w[1]), "sizes {sizes:?}");
        // extent(9) = 20 - 9 * 20 / 11 = 3.63 -> 3
        assert_eq!(table[9].size(), 3);
    }

    #[test]
    fn test_full_focus_spans_whole_range() {
        let table = FocusKernelTable::build(255).unwrap();
        assert_eq!(table[0].size(), 21);
        assert!(table[200].size() > 1);
        assert!(table[255].is_identity());
        for kernel in table.iter() {
            assert!((kernel.sum() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_custom_diameter() {
        let table = FocusKernelTable::build_with(&GaussianKernelFactory, 4, 6.0).unwrap();
        // gap = 1.2; extents 6.0, 4.8, 3.6, 2.4 -> sizes 7, 5, 3, 3
        let sizes: Vec<usize> = (0..4u8).map(|d| table[d].size()).collect();
        assert_eq!(sizes, vec![7, 5, 3, 3]);
    }

    #[test]
    fn test_invalid_diameter_rejected() {
        for diameter in [0.0, -3.0, f32::INFINITY] {
            assert!(matches!(
                FocusKernelTable::build_with(&GaussianKernelFactory, 5, diameter),
                Err(BokehError::InvalidKernelDiameter(_))
            ));
        }
    }

    #[test]
    fn test_huge_diameter_rejected_before_allocation() {
        for diameter in [MAX_KERNEL_DIAMETER + 1.0, 1.0e6, f32::MAX] {
            assert!(matches!(
                FocusKernelTable::build_with(&GaussianKernelFactory, 1, diameter),
                Err(BokehError::InvalidKernelDiameter(d)) if d == diameter
            ));
        }
        let table = FocusKernelTable::build_with(&GaussianKernelFactory, 1, MAX_KERNEL_DIAMETER).unwrap();
        assert_eq!(table.max_kernel_size(), MAX_KERNEL_SIZE);
    }

    struct RecordingFactory {
        calls: std::cell::RefCell<Vec<(usize, f32)>>,
    }

    impl KernelFactory for RecordingFactory {
        fn build(&self, size: usize, sigma: f32) -> Result<Kernel> {
            self.calls.borrow_mut().push((size, sigma));
            Ok(Kernel::identity())
        }
    }

    #[test]
    fn test_sigma_is_sqrt_of_extent() {
        let factory = RecordingFactory { calls: Default::default() };
        FocusKernelTable::build_with(&factory, 3, 20.0).unwrap();
        let calls = factory.calls.borrow();
        // Three blurred levels plus the passthrough kernel.
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0].0, 20);
        assert!((calls[0].1 - 20f32.sqrt()).abs() < 1e-6);
        assert_eq!(calls[1].0, 15);
        assert!((calls[1].1 - 15f32.sqrt()).abs() < 1e-6);
        assert_eq!(calls[3], (1, PASSTHROUGH_SIGMA));
    }
}

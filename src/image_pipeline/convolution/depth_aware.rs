use tracing::{debug, info_span};

use crate::image_pipeline::common::config::{BokehConfig, EdgePolicy};
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::frame::{ColorImage, DepthImage, Rgb, ensure_same_dimensions};
use crate::image_pipeline::kernel::{FocusKernelTable, GaussianKernelFactory, Kernel};

/// Variable-kernel convolution that blurs each pixel by its depth while
/// keeping farther pixels from bleeding onto nearer ones.
///
/// For a target pixel of depth `d`, a tap contributes its color only if it
/// lies inside the image and its own depth is `<= d`. The weight of every
/// rejected tap is given to the target pixel's own color instead, so the
/// effective kernel still sums to one.
#[derive(Debug, Clone)]
pub struct DepthAwareConvolver {
    max_kernel_diameter: f32,
    edge_policy: EdgePolicy,
}

impl Default for DepthAwareConvolver {
    fn default() -> Self {
        Self::new(&BokehConfig::default())
    }
}

impl DepthAwareConvolver {
    pub fn new(config: &BokehConfig) -> Self {
        Self {
            max_kernel_diameter: config.max_kernel_diameter,
            edge_policy: config.edge_policy,
        }
    }

    pub fn edge_policy(&self) -> EdgePolicy {
        self.edge_policy
    }

    /// Build the kernel table for `focus` and convolve the whole image.
    pub fn filter(&self, color: &ColorImage, depth: &DepthImage, focus: u8) -> Result<ColorImage> {
        ensure_same_dimensions(color, depth)?;
        let table = {
            let _span = info_span!("build_kernel_table", focus).entered();
            FocusKernelTable::build_with(&GaussianKernelFactory, focus, self.max_kernel_diameter)?
        };
        Ok(self.convolve(color, depth, &table))
    }

    /// Convolve with a prebuilt table.
    pub fn apply(
        &self,
        color: &ColorImage,
        depth: &DepthImage,
        table: &FocusKernelTable,
    ) -> Result<ColorImage> {
        ensure_same_dimensions(color, depth)?;
        Ok(self.convolve(color, depth, table))
    }

    fn convolve(&self, color: &ColorImage, depth: &DepthImage, table: &FocusKernelTable) -> ColorImage {
        let (rows, cols) = color.dimensions();
        let _span = info_span!("convolve", rows, cols, focus = table.focus()).entered();

        let mut output = ColorImage::filled(rows, cols, [0.0; 3]);
        for x in 0..rows {
            for y in 0..cols {
                let current = depth.get(x, y);
                let value = self.convolve_pixel(color, depth, table.kernel(current), x, y, current);
                output.set(x, y, value);
            }
        }

        debug!(rows, cols, "Depth-aware convolution complete");
        output
    }

    #[inline]
    fn convolve_pixel(
        &self,
        color: &ColorImage,
        depth: &DepthImage,
        kernel: &Kernel,
        x: usize,
        y: usize,
        current: u8,
    ) -> Rgb {
        let first = self.edge_policy.first_index();
        let rows = color.rows() as isize;
        let cols = color.cols() as isize;
        let r = kernel.radius() as isize;

        let mut acc = [0.0f32; 3];
        let mut excluded = 0.0f32;

        for di in -r..=r {
            let i = x as isize + di;
            let row_inside = i >= first && i < rows;
            for dj in -r..=r {
                let j = y as isize + dj;
                let weight = kernel.at((di + r) as usize, (dj + r) as usize);

                if row_inside && j >= first && j < cols {
                    let (i, j) = (i as usize, j as usize);
                    if depth.get(i, j) <= current {
                        let c = color.get(i, j);
                        acc[0] += c[0] * weight;
                        acc[1] += c[1] * weight;
                        acc[2] += c[2] * weight;
                        continue;
                    }
                }
                excluded += weight;
            }
        }

        if excluded > 0.0 {
            let own = color.get(x, y);
            acc[0] += own[0] * excluded;
            acc[1] += own[1] * excluded;
            acc[2] += own[2] * excluded;
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-4;

    fn convolver(edge_policy: EdgePolicy) -> DepthAwareConvolver {
        DepthAwareConvolver::new(&BokehConfig::builder().edge_policy(edge_policy).build())
    }

    fn gradient_color(rows: usize, cols: usize) -> ColorImage {
        let data = (0..rows * cols)
            .map(|idx| {
                let (r, c) = (idx / cols, idx % cols);
                [
                    r as f32 / rows as f32,
                    c as f32 / cols as f32,
                    ((r * 7 + c * 3) % 11) as f32 / 10.0,
                ]
            })
            .collect();
        ColorImage::from_vec(rows, cols, data).unwrap()
    }

    fn assert_close(a: Rgb, b: Rgb, what: &str) {
        for ch in 0..3 {
            assert!((a[ch] - b[ch]).abs() < TOLERANCE, "{what}: {a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_all_in_focus_returns_input() {
        let color = gradient_color(6, 9);
        let depth = DepthImage::filled(6, 9, 255);
        for focus in [0u8, 100, 255] {
            let out = DepthAwareConvolver::default().filter(&color, &depth, focus).unwrap();
            assert_eq!(out, color, "focus {focus}");
        }
    }

    #[test]
    fn test_zero_focus_uniform_red_unchanged() {
        let color = ColorImage::filled(5, 5, [1.0, 0.0, 0.0]);
        let depth = DepthImage::filled(5, 5, 200);
        let out = DepthAwareConvolver::default().filter(&color, &depth, 0).unwrap();
        assert_eq!(out, color);
    }

    #[test]
    fn test_occluded_center_keeps_own_color() {
        let mut color = ColorImage::filled(3, 3, [0.9, 0.8, 0.7]);
        color.set(1, 1, [0.2, 0.4, 0.6]);
        let mut depth = DepthImage::filled(3, 3, 255);
        depth.set(1, 1, 0);

        let table = FocusKernelTable::build(10).unwrap();
        assert!(table[0].size() > 1);

        for policy in [EdgePolicy::Legacy, EdgePolicy::Inclusive] {
            let out = convolver(policy).apply(&color, &depth, &table).unwrap();
            assert_close(out.get(1, 1), [0.2, 0.4, 0.6], "center");
        }
    }

    #[test]
    fn test_weight_is_conserved() {
        // With every color equal to one, each output channel equals the sum
        // of contributed plus redirected weight.
        let (rows, cols) = (12, 17);
        let color = ColorImage::filled(rows, cols, [1.0; 3]);
        let depth = DepthImage::from_vec(
            rows,
            cols,
            (0..rows * cols).map(|i| ((i * 37) % 256) as u8).collect(),
        )
        .unwrap();

        for policy in [EdgePolicy::Legacy, EdgePolicy::Inclusive] {
            for focus in [0u8, 30, 128, 255] {
                let out = convolver(policy).filter(&color, &depth, focus).unwrap();
                for (x, y, px) in out.pixels() {
                    assert_close(px, [1.0; 3], &format!("({x}, {y}) focus {focus} {policy:?}"));
                }
            }
        }
    }

    #[test]
    fn test_degenerate_shapes_stay_in_bounds() {
        // Maximal kernels over images narrower than the kernel radius.
        for &(rows, cols) in &[(1, 1), (1, 7), (7, 1), (2, 3), (25, 25)] {
            let color = gradient_color(rows, cols);
            let depth = DepthImage::filled(rows, cols, 0);
            for policy in [EdgePolicy::Legacy, EdgePolicy::Inclusive] {
                let out = convolver(policy).filter(&color, &depth, 255).unwrap();
                assert_eq!(out.dimensions(), (rows, cols));
            }
        }
    }

    #[test]
    fn test_single_pixel_is_unchanged() {
        let color = ColorImage::filled(1, 1, [0.3, 0.6, 0.9]);
        let depth = DepthImage::filled(1, 1, 0);
        for policy in [EdgePolicy::Legacy, EdgePolicy::Inclusive] {
            let out = convolver(policy).filter(&color, &depth, 255).unwrap();
            assert_close(out.get(0, 0), [0.3, 0.6, 0.9], "single pixel");
        }
    }

    #[test]
    fn test_near_pixels_blur_into_far_target() {
        // Row 2 holds a bright near stripe (depth 0) over a dark far
        // background (depth 5). Background pixels pick up the stripe; the
        // stripe never picks up the background.
        let (rows, cols) = (5, 5);
        let mut color = ColorImage::filled(rows, cols, [0.0; 3]);
        let mut depth = DepthImage::filled(rows, cols, 5);
        for c in 0..cols {
            color.set(2, c, [1.0; 3]);
            depth.set(2, c, 0);
        }

        let out = convolver(EdgePolicy::Inclusive).filter(&color, &depth, 10).unwrap();
        assert!(out.get(1, 2)[0] > 0.0, "far pixel next to the stripe should brighten");
        assert!(out.get(3, 2)[0] > 0.0);
        for c in 0..cols {
            assert_close(out.get(2, c), [1.0; 3], "stripe");
        }
    }

    #[test]
    fn test_legacy_policy_ignores_first_row_and_column() {
        // Bright first row and column, dark elsewhere, all at the same depth.
        let (rows, cols) = (4, 4);
        let mut color = ColorImage::filled(rows, cols, [0.0; 3]);
        for k in 0..rows {
            color.set(0, k, [1.0; 3]);
            color.set(k, 0, [1.0; 3]);
        }
        let depth = DepthImage::filled(rows, cols, 0);

        let legacy = convolver(EdgePolicy::Legacy).filter(&color, &depth, 20).unwrap();
        let inclusive = convolver(EdgePolicy::Inclusive).filter(&color, &depth, 20).unwrap();

        assert_close(legacy.get(1, 1), [0.0; 3], "legacy interior");
        assert!(inclusive.get(1, 1)[0] > 0.0);
        // A legacy edge pixel only ever mixes its own color with interior ones.
        assert!(legacy.get(0, 2)[0] < 1.0);
        assert!(legacy.get(0, 2)[0] > 0.0);
    }

    #[test]
    fn test_inputs_not_mutated() {
        let color = gradient_color(8, 8);
        let depth = DepthImage::filled(8, 8, 3);
        let (color_before, depth_before) = (color.clone(), depth.clone());
        let out = DepthAwareConvolver::default().filter(&color, &depth, 200).unwrap();
        assert_eq!(color, color_before);
        assert_eq!(depth, depth_before);
        assert_ne!(out, color);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let color = ColorImage::filled(4, 4, [0.0; 3]);
        let depth = DepthImage::filled(4, 5, 0);
        assert!(DepthAwareConvolver::default().filter(&color, &depth, 10).is_err());
    }
}

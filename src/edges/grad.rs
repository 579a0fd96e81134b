//! Sobel image gradients with L2 magnitude.
//!
//! Convolves the 3×3 Sobel kernel pair with border clamping and outputs
//! per-pixel `gx`, `gy`, `mag = sqrt(gx^2 + gy^2)`. On a 0..255 input the
//! magnitude is directly comparable against 8-bit edge thresholds.
use crate::image::GrayF32;

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per-pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative (convolution with kernel X)
    pub gx: GrayF32,
    /// Vertical derivative (convolution with kernel Y)
    pub gy: GrayF32,
    /// Euclidean magnitude per pixel: `sqrt(gx^2 + gy^2)`
    pub mag: GrayF32,
}

/// Compute Sobel gradients on a single-channel float image.
pub fn sobel_gradients(l: &GrayF32) -> Grad {
    let w = l.w;
    let h = l.h;
    let mut gx = GrayF32::new(w, h);
    let mut gy = GrayF32::new(w, h);
    let mut mag = GrayF32::new(w, h);

    if w == 0 || h == 0 {
        return Grad { gx, gy, mag };
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [l.row(y_idx[0]), l.row(y_idx[1]), l.row(y_idx[2])];
        let out_gx = gx.row_mut(y);
        let out_gy = gy.row_mut(y);
        let out_mag = mag.row_mut(y);
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, src_row) in rows.iter().enumerate() {
                let kx_row = &SOBEL_KERNEL_X[ky];
                let ky_row = &SOBEL_KERNEL_Y[ky];
                sum_x += src_row[x_idx[0]] * kx_row[0]
                    + src_row[x_idx[1]] * kx_row[1]
                    + src_row[x_idx[2]] * kx_row[2];
                sum_y += src_row[x_idx[0]] * ky_row[0]
                    + src_row[x_idx[1]] * ky_row[1]
                    + src_row[x_idx[2]] * ky_row[2];
            }

            out_gx[x] = sum_x;
            out_gy[x] = sum_y;
            out_mag[x] = (sum_x * sum_x + sum_y * sum_y).sqrt();
        }
    }

    Grad { gx, gy, mag }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_image(w: usize, h: usize, split_x: usize, low: f32, high: f32) -> GrayF32 {
        let mut img = GrayF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                img.set(x, y, if x < split_x { low } else { high });
            }
        }
        img
    }

    #[test]
    fn vertical_step_has_horizontal_gradient() {
        let img = step_image(16, 16, 8, 0.0, 200.0);
        let grad = sobel_gradients(&img);
        let mid = grad.mag.get(8, 8);
        assert!(mid > 500.0, "step of 200 should exceed any 8-bit threshold, got {mid}");
        assert!(grad.gx.get(8, 8).abs() > grad.gy.get(8, 8).abs());
    }

    #[test]
    fn flat_image_has_zero_gradient() {
        let img = step_image(8, 8, 8, 64.0, 64.0);
        let grad = sobel_gradients(&img);
        assert!(grad.mag.data.iter().all(|&v| v.abs() < 1e-4));
    }
}

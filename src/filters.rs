//! Fixed 5×5 Gaussian-equivalent smoothing.
//!
//! The kernel is the normalised binomial `[1, 4, 6, 4, 1] / 16`, applied as
//! a separable horizontal-then-vertical pass with clamped (replicate)
//! borders. The taps are a compile-time constant so edge counts downstream
//! are reproducible run to run and build to build.
use crate::image::GrayF32;
use rayon::prelude::*;

/// Normalised 5-tap Gaussian filter `[1, 4, 6, 4, 1] / 16`.
pub const GAUSSIAN_5TAP: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Smooth `src` with the fixed 5×5 kernel. Rows are processed in parallel;
/// the result is independent of the scheduling order.
pub fn gaussian_blur_5x5(src: &GrayF32) -> GrayF32 {
    let (w, h) = (src.w, src.h);
    if w == 0 || h == 0 {
        return GrayF32::new(w, h);
    }

    let mut tmp = GrayF32::new(w, h);
    tmp.data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst)| {
            let row = src.row(y);
            for (x, out) in dst.iter_mut().enumerate() {
                let mut acc = 0.0;
                for (k, tap) in GAUSSIAN_5TAP.iter().enumerate() {
                    let xi = (x + k).saturating_sub(2).min(w - 1);
                    acc += tap * row[xi];
                }
                *out = acc;
            }
        });

    let mut out = GrayF32::new(w, h);
    let tmp_ref = &tmp;
    out.data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst)| {
            let rows: [&[f32]; 5] = [
                tmp_ref.row(y.saturating_sub(2)),
                tmp_ref.row(y.saturating_sub(1)),
                tmp_ref.row(y),
                tmp_ref.row((y + 1).min(h - 1)),
                tmp_ref.row((y + 2).min(h - 1)),
            ];
            for (x, out_px) in dst.iter_mut().enumerate() {
                let mut acc = 0.0;
                for (k, tap) in GAUSSIAN_5TAP.iter().enumerate() {
                    acc += tap * rows[k][x];
                }
                *out_px = acc;
            }
        });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taps_are_normalised() {
        let sum: f32 = GAUSSIAN_5TAP.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn constant_image_is_a_fixed_point() {
        let mut img = GrayF32::new(16, 12);
        img.data.fill(120.0);
        let blurred = gaussian_blur_5x5(&img);
        for &v in &blurred.data {
            assert!((v - 120.0).abs() < 1e-3, "constant image must stay constant, got {v}");
        }
    }

    #[test]
    fn impulse_response_is_symmetric() {
        let mut img = GrayF32::new(11, 11);
        img.set(5, 5, 160.0);
        let blurred = gaussian_blur_5x5(&img);
        assert!((blurred.get(3, 5) - blurred.get(7, 5)).abs() < 1e-6);
        assert!((blurred.get(5, 3) - blurred.get(5, 7)).abs() < 1e-6);
        // peak stays at the impulse
        assert!(blurred.get(5, 5) > blurred.get(4, 5));
    }

    #[test]
    fn blur_is_deterministic_across_runs() {
        let mut img = GrayF32::new(33, 21);
        for y in 0..21 {
            for x in 0..33 {
                img.set(x, y, ((x * 7 + y * 13) % 256) as f32);
            }
        }
        let a = gaussian_blur_5x5(&img);
        let b = gaussian_blur_5x5(&img);
        assert_eq!(a.data, b.data);
    }
}

//! Canny-style edge detection: NMS plus dual-threshold hysteresis.
//!
//! For each pixel the gradient magnitude is compared against its two
//! neighbors along the quantized gradient direction (4 bins via the
//! tan 22.5° sector test); non-maxima are suppressed. Surviving pixels at
//! or above the high threshold seed the edge map, and pixels at or above
//! the low threshold are kept only when 8-connected to a seed.
//!
//! Thresholds read against the L2 Sobel magnitude of a 0..255 input.
use super::grad::sobel_gradients;
use crate::image::{GrayF32, Mask8};
use log::debug;
use serde::{Deserialize, Serialize};

/// Dual thresholds for hysteresis, on the 8-bit intensity scale.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyOptions {
    /// Pixels below this magnitude never become edges.
    pub low_threshold: f32,
    /// Pixels at or above this magnitude seed edge tracing.
    pub high_threshold: f32,
}

impl Default for CannyOptions {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
        }
    }
}

const TAN_22_5_DEG: f32 = 0.41421356237;

const WEAK: u8 = 1;
const STRONG: u8 = 2;

/// Detect edges in a smoothed intensity image, producing a binary edge map
/// of the same dimensions.
pub fn detect_edges(l: &GrayF32, options: &CannyOptions) -> Mask8 {
    let grad = sobel_gradients(l);
    let w = l.w;
    let h = l.h;
    let mut out = Mask8::new(w, h);
    if w < 3 || h < 3 {
        return out;
    }

    // classify NMS survivors as weak or strong
    let mut class = vec![0u8; w * h];
    let mut seeds = Vec::new();
    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag < options.low_threshold {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            // neighbors along the quantized gradient direction; a same-sign
            // gradient points down-right/up-left, opposite signs down-left/
            // up-right
            let (neighbor1, neighbor2) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (mag_row[x - 1], mag_row[x + 1])
                } else if same_sign {
                    (mag_prev[x - 1], mag_next[x + 1])
                } else {
                    (mag_prev[x + 1], mag_next[x - 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x - 1], mag_next[x + 1])
            } else {
                (mag_prev[x + 1], mag_next[x - 1])
            };

            // asymmetric tie-break: a plateau of equal magnitudes keeps its
            // first pixel instead of vanishing entirely
            if mag <= neighbor1 || mag < neighbor2 {
                continue;
            }

            let idx = y * w + x;
            if mag >= options.high_threshold {
                class[idx] = STRONG;
                seeds.push(idx);
            } else {
                class[idx] = WEAK;
            }
        }
    }

    // hysteresis: grow from strong seeds through weak neighbors
    let mut stack = seeds;
    while let Some(idx) = stack.pop() {
        if out.data[idx] != 0 {
            continue;
        }
        out.data[idx] = 255;
        let x = idx % w;
        let y = idx / w;
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                let nidx = ny * w + nx;
                if class[nidx] != 0 && out.data[nidx] == 0 {
                    stack.push(nidx);
                }
            }
        }
    }

    debug!(
        "detect_edges {}x{} -> {} edge pixels",
        w,
        h,
        out.count_set()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Vertical ramp edge at `mid_x`: `low` left of it, `high` right of it,
    /// the midpoint value in the `mid_x` column. The ramp gives the NMS a
    /// unique magnitude peak, like a blurred step would.
    fn ramp_image(w: usize, h: usize, mid_x: usize, low: f32, high: f32) -> GrayF32 {
        let mut img = GrayF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let v = if x < mid_x {
                    low
                } else if x == mid_x {
                    (low + high) * 0.5
                } else {
                    high
                };
                img.set(x, y, v);
            }
        }
        img
    }

    #[test]
    fn strong_step_produces_an_edge_column() {
        let img = ramp_image(32, 32, 16, 0.0, 200.0);
        let edges = detect_edges(&img, &CannyOptions::default());
        let hits = (1..31)
            .filter(|&y| (14..19).any(|x| edges.get(x, y) != 0))
            .count();
        assert!(hits >= 28, "expected an edge along the step, got {hits} rows");
    }

    #[test]
    fn flat_image_has_no_edges() {
        let img = ramp_image(16, 16, 16, 90.0, 90.0);
        let edges = detect_edges(&img, &CannyOptions::default());
        assert_eq!(edges.count_set(), 0);
    }

    #[test]
    fn weak_only_edges_are_suppressed() {
        // a step of 25 peaks near Sobel magnitude 100: above low, below high
        let img = ramp_image(32, 32, 16, 100.0, 125.0);
        let grad = crate::edges::sobel_gradients(&img);
        let peak = grad.mag.get(16, 16);
        assert!(peak >= 50.0 && peak < 150.0, "test premise broken: mag {peak}");
        let edges = detect_edges(&img, &CannyOptions::default());
        assert_eq!(edges.count_set(), 0, "weak edges without a strong seed must vanish");
    }

    #[test]
    fn weak_edges_connected_to_strong_survive() {
        // ramp edge whose height fades smoothly from strong to weak along y
        let mut img = GrayF32::new(32, 48);
        for y in 0..48 {
            let high = 220.0 - 2.0 * y as f32;
            for x in 0..32 {
                let v = if x < 16 {
                    100.0
                } else if x == 16 {
                    (100.0 + high) * 0.5
                } else {
                    high
                };
                img.set(x, y, v);
            }
        }
        // premise: the bottom rows are weak on their own
        let grad = crate::edges::sobel_gradients(&img);
        let tail = grad.mag.get(16, 45);
        assert!((50.0..150.0).contains(&tail), "test premise broken: mag {tail}");

        let edges = detect_edges(&img, &CannyOptions::default());
        let weak_rows = (43..47).filter(|&y| edges.get(16, y) != 0).count();
        assert_eq!(weak_rows, 4, "weak tail of a strong edge should be traced");
    }
}

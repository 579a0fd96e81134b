//! Edge extraction: Sobel gradients and a Canny-style detector.
//!
//! - Gradient computation (Sobel) returning `gx`, `gy`, and the L2
//!   magnitude.
//! - Direction-aligned non-maximum suppression over the magnitude, then
//!   dual-threshold hysteresis producing a binary edge map.
//!
//! Borders are handled by clamping indices (replicate) in the gradient
//! pass; NMS ignores the outermost 1-pixel frame to avoid out-of-bounds
//! neighbor lookups.

pub mod canny;
pub mod grad;

pub use canny::{detect_edges, CannyOptions};
pub use grad::{sobel_gradients, Grad};

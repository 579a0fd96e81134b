//! Raster types used by the pipeline.
//!
//! - [`GrayF32`] — owned single-channel f32 image on the 0..255 scale, the
//!   working format for smoothing and gradients.
//! - [`Mask8`] — owned single-channel binary image (0 or 255), used for the
//!   edge map and the region-of-interest mask.
//! - [`RgbView`] / [`RgbFrame`] — borrowed input frame and owned annotated
//!   copy, interleaved 8-bit RGB.
//!
//! All types store `w`, `h`, and row-major data; views additionally carry a
//! `stride` in pixels. Border handling in the processing code clamps
//! indices (replicate).

pub mod draw;
pub mod gray;
pub mod io;
pub mod rgb;

pub use self::gray::{GrayF32, Mask8};
pub use self::rgb::{luma_f32, RgbFrame, RgbView};

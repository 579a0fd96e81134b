//! Frame analyzer orchestrating the fixed per-frame pipeline.
//!
//! Overview
//! - Converts the input RGB frame to single-channel intensity (standard
//!   luma weighting).
//! - Smooths with the fixed 5×5 Gaussian kernel so isolated noise pixels
//!   do not seed spurious edges.
//! - Extracts edges Canny-style (Sobel → NMS → dual-threshold hysteresis).
//! - Restricts the edge map to the triangular walking corridor and runs
//!   the probabilistic Hough transform over what remains.
//! - Draws the detected segments into an annotated copy of the frame.
//!
//! The analyzer is deterministic: identical frame content yields an
//! identical edge map, mask, and segment set. The only state kept between
//! calls is the region mask cached per frame dimension, which is always
//! byte-identical to a fresh rasterization.
mod options;

pub use options::AnalyzerOptions;

use crate::diagnostics::TimingBreakdown;
use crate::edges::detect_edges;
use crate::filters::gaussian_blur_5x5;
use crate::hough::detect_segments;
use crate::image::draw::{draw_segment, LANE_COLOR};
use crate::image::{luma_f32, Mask8, RgbFrame, RgbView};
use crate::roi::triangle_mask;
use crate::types::LineSegment;
use log::debug;
use std::fmt;
use std::time::Instant;

/// Stroke width of the annotated overlay, in pixels.
const OVERLAY_THICKNESS: i32 = 3;

/// Rejected input frame. The analysis produces no partial output; the
/// caller decides whether to skip the frame or stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidFrameError {
    /// Width or height is zero.
    EmptyFrame { width: usize, height: usize },
    /// The pixel buffer is shorter than the view geometry implies.
    BufferTooSmall { expected: usize, actual: usize },
}

impl fmt::Display for InvalidFrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidFrameError::EmptyFrame { width, height } => {
                write!(f, "empty frame ({width}x{height})")
            }
            InvalidFrameError::BufferTooSmall { expected, actual } => {
                write!(f, "frame buffer too small ({actual} bytes, need {expected})")
            }
        }
    }
}

impl std::error::Error for InvalidFrameError {}

/// Result of analyzing one frame.
#[derive(Clone, Debug)]
pub struct FrameReport {
    /// Copy of the input with detected segments drawn 3 px wide.
    pub annotated: RgbFrame,
    /// Detected segments, all inside the region of interest.
    pub segments: Vec<LineSegment>,
    /// Edge map after the region-of-interest intersection.
    pub edge_map: Mask8,
    /// Per-stage timing trace.
    pub timings: TimingBreakdown,
    /// Total wall time of the call in milliseconds.
    pub latency_ms: f64,
}

struct RoiCache {
    w: usize,
    h: usize,
    mask: Mask8,
}

/// Per-frame lane analyzer. Holds the options and the by-dimension region
/// mask cache; everything else is recomputed on every call.
pub struct FrameAnalyzer {
    options: AnalyzerOptions,
    roi_cache: Option<RoiCache>,
}

impl FrameAnalyzer {
    /// Create an analyzer with the supplied parameters.
    pub fn new(options: AnalyzerOptions) -> Self {
        Self {
            options,
            roi_cache: None,
        }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Region-of-interest mask for a `w × h` frame, from the cache when the
    /// dimensions match the previous call.
    pub fn region_mask(&mut self, w: usize, h: usize) -> &Mask8 {
        let stale = self
            .roi_cache
            .as_ref()
            .map_or(true, |c| c.w != w || c.h != h);
        if stale {
            self.roi_cache = Some(RoiCache {
                w,
                h,
                mask: triangle_mask(w, h),
            });
        }
        &self
            .roi_cache
            .as_ref()
            .expect("roi cache populated")
            .mask
    }

    /// Run the full pipeline on one frame.
    pub fn process(&mut self, frame: RgbView<'_>) -> Result<FrameReport, InvalidFrameError> {
        if frame.w == 0 || frame.h == 0 {
            return Err(InvalidFrameError::EmptyFrame {
                width: frame.w,
                height: frame.h,
            });
        }
        let expected = frame.min_len();
        if frame.data.len() < expected {
            return Err(InvalidFrameError::BufferTooSmall {
                expected,
                actual: frame.data.len(),
            });
        }

        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let stage = Instant::now();
        let gray = luma_f32(&frame);
        timings.push("luma", stage.elapsed().as_secs_f64() * 1000.0);

        let stage = Instant::now();
        let blurred = gaussian_blur_5x5(&gray);
        timings.push("blur", stage.elapsed().as_secs_f64() * 1000.0);

        let stage = Instant::now();
        let mut edge_map = detect_edges(&blurred, &self.options.canny);
        timings.push("edges", stage.elapsed().as_secs_f64() * 1000.0);

        let stage = Instant::now();
        let mask = self.region_mask(frame.w, frame.h);
        edge_map.and_inplace(mask);
        timings.push("mask", stage.elapsed().as_secs_f64() * 1000.0);

        let stage = Instant::now();
        let segments = detect_segments(&edge_map, &self.options.hough);
        timings.push("hough", stage.elapsed().as_secs_f64() * 1000.0);

        let stage = Instant::now();
        let mut annotated = RgbFrame::from_view(&frame);
        for segment in &segments {
            draw_segment(&mut annotated, segment, LANE_COLOR, OVERLAY_THICKNESS);
        }
        timings.push("annotate", stage.elapsed().as_secs_f64() * 1000.0);

        let latency_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        timings.total_ms = latency_ms;
        debug!(
            "FrameAnalyzer::process {}x{} -> {} segments in {:.3} ms",
            frame.w,
            frame.h,
            segments.len(),
            latency_ms
        );

        Ok(FrameReport {
            annotated,
            segments,
            edge_map,
            timings,
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_frame_is_rejected() {
        let mut analyzer = FrameAnalyzer::new(AnalyzerOptions::default());
        let data = [0u8; 0];
        let frame = RgbView {
            w: 0,
            h: 480,
            stride: 0,
            data: &data,
        };
        match analyzer.process(frame) {
            Err(InvalidFrameError::EmptyFrame { width, height }) => {
                assert_eq!((width, height), (0, 480));
            }
            other => panic!("expected EmptyFrame, got {other:?}"),
        }
    }

    #[test]
    fn truncated_buffer_is_rejected() {
        let mut analyzer = FrameAnalyzer::new(AnalyzerOptions::default());
        let data = vec![0u8; 10];
        let frame = RgbView {
            w: 4,
            h: 4,
            stride: 4,
            data: &data,
        };
        match analyzer.process(frame) {
            Err(InvalidFrameError::BufferTooSmall { expected, actual }) => {
                assert_eq!(expected, 48);
                assert_eq!(actual, 10);
            }
            other => panic!("expected BufferTooSmall, got {other:?}"),
        }
    }

    #[test]
    fn cached_mask_matches_fresh_rasterization() {
        let mut analyzer = FrameAnalyzer::new(AnalyzerOptions::default());
        let first = analyzer.region_mask(320, 240).clone();
        let cached = analyzer.region_mask(320, 240).clone();
        assert_eq!(first, cached);
        assert_eq!(first, triangle_mask(320, 240));
        // switching dimensions invalidates the cache
        let other = analyzer.region_mask(64, 48).clone();
        assert_eq!(other, triangle_mask(64, 48));
    }

    #[test]
    fn dark_frame_yields_no_segments_and_a_clean_copy() {
        let mut analyzer = FrameAnalyzer::new(AnalyzerOptions::default());
        let data = vec![8u8; 64 * 48 * 3];
        let frame = RgbView {
            w: 64,
            h: 48,
            stride: 64,
            data: &data,
        };
        let report = analyzer.process(frame).expect("valid frame");
        assert!(report.segments.is_empty());
        assert_eq!(report.edge_map.count_set(), 0);
        assert_eq!(report.annotated.data, data);
        assert_eq!(report.timings.stages.len(), 6);
    }
}

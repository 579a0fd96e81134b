#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod advisor;
pub mod analyzer;
pub mod config;
pub mod diagnostics;
pub mod image;
pub mod types;

// Pipeline building blocks – public for tooling, considered internals.
pub mod edges;
pub mod filters;
pub mod hough;
pub mod roi;

// --- High-level re-exports -------------------------------------------------

pub use crate::advisor::{AdvisorOptions, DirectionAdvisor, InvalidSegmentError};
pub use crate::analyzer::{AnalyzerOptions, FrameAnalyzer, FrameReport, InvalidFrameError};
pub use crate::types::{Direction, LineSegment, TurnAssessment, TurnHint};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use lane_detector::prelude::*;
///
/// # fn main() {
/// let (w, h) = (640usize, 480usize);
/// let rgb = vec![0u8; w * h * 3];
/// let frame = RgbView { w, h, stride: w, data: &rgb };
///
/// let mut analyzer = FrameAnalyzer::new(AnalyzerOptions::default());
/// let advisor = DirectionAdvisor::new(AdvisorOptions::default());
///
/// let report = analyzer.process(frame).expect("valid frame");
/// if let Ok(direction) = advisor.decide(&report.segments, w as u32) {
///     println!("{direction} latency_ms={:.3}", report.latency_ms);
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{RgbFrame, RgbView};
    pub use crate::{
        AdvisorOptions, AnalyzerOptions, Direction, DirectionAdvisor, FrameAnalyzer, FrameReport,
    };
}

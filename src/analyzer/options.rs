//! Parameter types configuring the frame analysis stages.
use crate::edges::CannyOptions;
use crate::hough::HoughOptions;
use serde::{Deserialize, Serialize};

/// Analyzer-wide parameters controlling the per-frame pipeline.
///
/// The smoothing kernel is fixed (see [`crate::filters::GAUSSIAN_5TAP`]);
/// only the edge thresholds and the segment detector are tunable. Defaults
/// reproduce the reference behaviour: Canny 50/150, Hough 1 px / 1° / 100
/// votes / 100 px / 50 px.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerOptions {
    /// Dual-threshold edge detection parameters.
    pub canny: CannyOptions,
    /// Probabilistic line-segment detector parameters.
    pub hough: HoughOptions,
}

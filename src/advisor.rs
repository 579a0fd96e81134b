//! Direction inference from detected lane segments.
//!
//! The advisor averages the horizontal midpoints of all detected segments
//! and compares the mean against the frame centre: a mean left of centre
//! suggests steering left, right of centre steering right. An empty
//! segment set deliberately maps to `Straight` — no boundaries in the
//! corridor means the path ahead is clear, not that the situation is
//! unknown.
//!
//! A secondary per-segment classification reads the turn tendency from the
//! slope sign; vertical segments get an explicit `Vertical` hint instead of
//! a division fault.
use crate::types::{Direction, LineSegment, TurnAssessment, TurnHint};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters of the direction policy.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorOptions {
    /// Half-width of the band around the frame centre treated as
    /// `Straight`. Zero keeps only the exact-centre case.
    pub center_tolerance_px: i32,
}

impl Default for AdvisorOptions {
    fn default() -> Self {
        Self {
            center_tolerance_px: 0,
        }
    }
}

/// Malformed segment reaching the advisor. Segments produced by the frame
/// analyzer always pass; this guards against corrupted upstream data
/// instead of propagating a silently wrong decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidSegmentError {
    NegativeCoordinate { x1: i32, y1: i32, x2: i32, y2: i32 },
    OutOfBounds { x1: i32, x2: i32, frame_width: u32 },
}

impl fmt::Display for InvalidSegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidSegmentError::NegativeCoordinate { x1, y1, x2, y2 } => {
                write!(f, "segment has negative coordinates ({x1},{y1})-({x2},{y2})")
            }
            InvalidSegmentError::OutOfBounds {
                x1,
                x2,
                frame_width,
            } => write!(
                f,
                "segment x-range [{x1},{x2}] exceeds frame width {frame_width}"
            ),
        }
    }
}

impl std::error::Error for InvalidSegmentError {}

/// Steering advisor; a pure function of its inputs apart from the options.
pub struct DirectionAdvisor {
    options: AdvisorOptions,
}

impl DirectionAdvisor {
    /// Create an advisor with the supplied parameters.
    pub fn new(options: AdvisorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AdvisorOptions {
        &self.options
    }

    /// Derive a steering suggestion from the segment set of one frame.
    ///
    /// The mean of the segment midpoints is computed in f64 and rounded to
    /// the nearest integer before comparison against `frame_width / 2`
    /// (integer division). The exact-centre case is an explicit `Straight`.
    pub fn decide(
        &self,
        segments: &[LineSegment],
        frame_width: u32,
    ) -> Result<Direction, InvalidSegmentError> {
        if segments.is_empty() {
            // no boundaries detected: treat the corridor as clear
            return Ok(Direction::Straight);
        }

        let mut sum = 0.0f64;
        for segment in segments {
            ensure_well_formed(segment, Some(frame_width))?;
            sum += segment.midpoint_x() as f64;
        }
        let average_mid_x = (sum / segments.len() as f64).round() as i64;
        let center = (frame_width / 2) as i64;
        let offset = average_mid_x - center;

        let direction = if offset.abs() <= self.options.center_tolerance_px.max(0) as i64 {
            Direction::Straight
        } else if offset < 0 {
            Direction::Left
        } else {
            Direction::Right
        };
        debug!(
            "decide: {} segments, average_mid_x={average_mid_x}, center={center} -> {direction}",
            segments.len()
        );
        Ok(direction)
    }

    /// Classify each segment's turn tendency from the sign of its slope.
    ///
    /// Image coordinates grow downward, so a negative slope rises towards
    /// the right of the frame. Vertical segments carry an explicit
    /// [`TurnHint::Vertical`] instead of an undefined slope.
    pub fn classify_turns(
        &self,
        segments: &[LineSegment],
    ) -> Result<Vec<TurnAssessment>, InvalidSegmentError> {
        segments
            .iter()
            .map(|segment| {
                ensure_well_formed(segment, None)?;
                let hint = if segment.is_vertical() {
                    TurnHint::Vertical
                } else {
                    let slope = (segment.y2 - segment.y1) as f32 / (segment.x2 - segment.x1) as f32;
                    if slope < 0.0 {
                        TurnHint::Left
                    } else if slope > 0.0 {
                        TurnHint::Right
                    } else {
                        TurnHint::Flat
                    }
                };
                Ok(TurnAssessment {
                    segment: segment.clone(),
                    hint,
                })
            })
            .collect()
    }
}

fn ensure_well_formed(
    segment: &LineSegment,
    frame_width: Option<u32>,
) -> Result<(), InvalidSegmentError> {
    if segment.x1 < 0 || segment.y1 < 0 || segment.x2 < 0 || segment.y2 < 0 {
        return Err(InvalidSegmentError::NegativeCoordinate {
            x1: segment.x1,
            y1: segment.y1,
            x2: segment.x2,
            y2: segment.y2,
        });
    }
    if let Some(width) = frame_width {
        if segment.x1 >= width as i32 || segment.x2 >= width as i32 {
            return Err(InvalidSegmentError::OutOfBounds {
                x1: segment.x1,
                x2: segment.x2,
                frame_width: width,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advisor() -> DirectionAdvisor {
        DirectionAdvisor::new(AdvisorOptions::default())
    }

    #[test]
    fn empty_set_means_clear_path() {
        assert_eq!(advisor().decide(&[], 640), Ok(Direction::Straight));
    }

    #[test]
    fn midpoints_left_of_center_steer_left() {
        let segments = vec![
            LineSegment::new(100, 470, 220, 350),
            LineSegment::new(120, 460, 200, 360),
        ];
        assert_eq!(advisor().decide(&segments, 640), Ok(Direction::Left));
    }

    #[test]
    fn midpoints_right_of_center_steer_right() {
        let segments = vec![LineSegment::new(400, 470, 560, 350)];
        assert_eq!(advisor().decide(&segments, 640), Ok(Direction::Right));
    }

    #[test]
    fn exact_center_is_straight() {
        // single symmetric segment, midpoint exactly at frame_width / 2
        let segments = vec![LineSegment::new(300, 400, 340, 440)];
        assert_eq!(advisor().decide(&segments, 640), Ok(Direction::Straight));
    }

    #[test]
    fn quarter_width_cases() {
        let left = vec![LineSegment::new(140, 400, 180, 440)]; // mid 160 = w/4
        let right = vec![LineSegment::new(460, 400, 500, 440)]; // mid 480 = 3w/4
        assert_eq!(advisor().decide(&left, 640), Ok(Direction::Left));
        assert_eq!(advisor().decide(&right, 640), Ok(Direction::Right));
    }

    #[test]
    fn center_tolerance_widens_the_straight_band() {
        let advisor = DirectionAdvisor::new(AdvisorOptions {
            center_tolerance_px: 10,
        });
        let nudged = vec![LineSegment::new(292, 400, 332, 440)]; // mid 312
        assert_eq!(advisor.decide(&nudged, 640), Ok(Direction::Straight));
    }

    #[test]
    fn negative_coordinates_fail_fast() {
        let segments = vec![LineSegment::new(-3, 10, 50, 60)];
        assert_eq!(
            advisor().decide(&segments, 640),
            Err(InvalidSegmentError::NegativeCoordinate {
                x1: -3,
                y1: 10,
                x2: 50,
                y2: 60
            })
        );
    }

    #[test]
    fn out_of_bounds_x_fails_fast() {
        let segments = vec![LineSegment::new(10, 10, 700, 60)];
        assert_eq!(
            advisor().decide(&segments, 640),
            Err(InvalidSegmentError::OutOfBounds {
                x1: 10,
                x2: 700,
                frame_width: 640
            })
        );
    }

    #[test]
    fn slope_signs_map_to_hints() {
        let advisor = advisor();
        let segments = vec![
            LineSegment::new(10, 100, 110, 40), // rising to the right: negative slope
            LineSegment::new(10, 40, 110, 100), // falling to the right: positive slope
            LineSegment::new(10, 70, 110, 70),  // horizontal
        ];
        let hints: Vec<TurnHint> = advisor
            .classify_turns(&segments)
            .expect("well-formed segments")
            .into_iter()
            .map(|a| a.hint)
            .collect();
        assert_eq!(hints, vec![TurnHint::Left, TurnHint::Right, TurnHint::Flat]);
    }

    #[test]
    fn vertical_segment_gets_an_explicit_hint() {
        let assessments = advisor()
            .classify_turns(&[LineSegment::new(50, 10, 50, 200)])
            .expect("well-formed segment");
        assert_eq!(assessments[0].hint, TurnHint::Vertical);
    }
}

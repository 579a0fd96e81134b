//! Core value types shared across the pipeline: detected line segments,
//! steering directions, and per-segment turn hints.
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::fmt;

/// Line segment detected in a frame, endpoints in pixel coordinates.
///
/// Segments carry no identity across frames; every analysis call produces a
/// fresh set. Derived geometry (direction, length, normal form) is computed
/// lazily and cached.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    #[serde(skip)]
    direction: OnceCell<Vector2<f32>>,
    #[serde(skip)]
    length: OnceCell<f32>,
    #[serde(skip)]
    line: OnceCell<Vector3<f32>>,
}

impl PartialEq for LineSegment {
    fn eq(&self, other: &Self) -> bool {
        self.x1 == other.x1 && self.y1 == other.y1 && self.x2 == other.x2 && self.y2 == other.y2
    }
}

impl Eq for LineSegment {}

impl LineSegment {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            direction: OnceCell::new(),
            length: OnceCell::new(),
            line: OnceCell::new(),
        }
    }

    /// Horizontal midpoint, integer division (truncating like the capture
    /// coordinates themselves).
    pub fn midpoint_x(&self) -> i32 {
        (self.x1 + self.x2) / 2
    }

    /// True when the segment is exactly vertical and its slope is undefined.
    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }

    fn compute_length(&self) -> f32 {
        let dx = (self.x2 - self.x1) as f32;
        let dy = (self.y2 - self.y1) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f32 {
        *self.length.get_or_init(|| self.compute_length())
    }

    fn compute_direction(&self) -> Vector2<f32> {
        let len = self.length();
        if len > 0.0 {
            Vector2::new(
                (self.x2 - self.x1) as f32 / len,
                (self.y2 - self.y1) as f32 / len,
            )
        } else {
            Vector2::zeros()
        }
    }

    /// Unit direction from (x1, y1) towards (x2, y2); zero for degenerate
    /// segments.
    pub fn direction(&self) -> Vector2<f32> {
        *self.direction.get_or_init(|| self.compute_direction())
    }

    fn compute_line(&self) -> Vector3<f32> {
        let a = (self.y2 - self.y1) as f32;
        let b = (self.x1 - self.x2) as f32;
        let c = (self.x2 * self.y1 - self.x1 * self.y2) as f32;
        let norm = (a * a + b * b).sqrt();
        if norm > 0.0 {
            Vector3::new(a / norm, b / norm, c / norm)
        } else {
            Vector3::zeros()
        }
    }

    /// Line representation `ax + by + c = 0` with `sqrt(a^2 + b^2) = 1`.
    pub fn line(&self) -> Vector3<f32> {
        *self.line.get_or_init(|| self.compute_line())
    }
}

/// Steering suggestion derived from one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Straight,
    /// No decision available. The built-in policy never produces this (an
    /// empty segment set maps to `Straight`); it exists for callers that
    /// merge in an external command source with its own fallback.
    Unknown,
}

impl Direction {
    /// Phrase spoken by a narration front-end for this direction.
    pub fn narration(&self) -> &'static str {
        match self {
            Direction::Left => "Turn left",
            Direction::Right => "Turn right",
            Direction::Straight => "Walk straight",
            Direction::Unknown => "No advice",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Straight => "straight",
            Direction::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Turn tendency of a single segment, from the sign of its slope.
///
/// `Vertical` is the explicit value for segments with `x1 == x2`, whose
/// slope is undefined; classification never divides by zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnHint {
    Left,
    Right,
    Flat,
    Vertical,
}

/// A segment paired with its turn classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnAssessment {
    pub segment: LineSegment,
    pub hint: TurnHint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_x_truncates() {
        assert_eq!(LineSegment::new(0, 0, 5, 0).midpoint_x(), 2);
        assert_eq!(LineSegment::new(3, 0, 4, 0).midpoint_x(), 3);
        assert_eq!(LineSegment::new(10, 0, 10, 9).midpoint_x(), 10);
    }

    #[test]
    fn geometry_accessors() {
        let seg = LineSegment::new(0, 0, 3, 4);
        assert!((seg.length() - 5.0).abs() < 1e-6);
        let dir = seg.direction();
        assert!((dir.x - 0.6).abs() < 1e-6);
        assert!((dir.y - 0.8).abs() < 1e-6);

        let line = seg.line();
        // both endpoints satisfy ax + by + c = 0
        assert!((line.x * 0.0 + line.y * 0.0 + line.z).abs() < 1e-4);
        assert!((line.x * 3.0 + line.y * 4.0 + line.z).abs() < 1e-4);
    }

    #[test]
    fn vertical_predicate() {
        assert!(LineSegment::new(7, 0, 7, 20).is_vertical());
        assert!(!LineSegment::new(7, 0, 8, 20).is_vertical());
    }

    #[test]
    fn equality_ignores_cached_geometry() {
        let a = LineSegment::new(1, 2, 3, 4);
        let b = LineSegment::new(1, 2, 3, 4);
        let _ = a.length();
        assert_eq!(a, b);
    }
}

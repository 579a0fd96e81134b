//! Segment overlay drawing for the annotated output frame.
use super::rgb::RgbFrame;
use crate::types::LineSegment;

/// Colour used for detected lane overlays.
pub const LANE_COLOR: [u8; 3] = [0, 255, 0];

/// Draw `segment` into `frame` with the given thickness, clamping to the
/// frame bounds. Thickness is realized as a square brush of side
/// `thickness` centred on each line pixel.
pub fn draw_segment(frame: &mut RgbFrame, segment: &LineSegment, color: [u8; 3], thickness: i32) {
    let radius = (thickness.max(1) - 1) / 2;
    let (mut x, mut y) = (segment.x1, segment.y1);
    let (x2, y2) = (segment.x2, segment.y2);

    let dx = (x2 - x).abs();
    let dy = -(y2 - y).abs();
    let sx = if x < x2 { 1 } else { -1 };
    let sy = if y < y2 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        stamp(frame, x, y, radius, color);
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn stamp(frame: &mut RgbFrame, cx: i32, cy: i32, radius: i32, color: [u8; 3]) {
    for y in cy - radius..=cy + radius {
        if y < 0 || y as usize >= frame.h {
            continue;
        }
        for x in cx - radius..=cx + radius {
            if x < 0 || x as usize >= frame.w {
                continue;
            }
            frame.set(x as usize, y as usize, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_both_endpoints() {
        let mut frame = RgbFrame::new(20, 20);
        let seg = LineSegment::new(2, 3, 15, 12);
        draw_segment(&mut frame, &seg, LANE_COLOR, 3);
        assert_eq!(frame.get(2, 3), LANE_COLOR);
        assert_eq!(frame.get(15, 12), LANE_COLOR);
    }

    #[test]
    fn thickness_widens_the_stroke() {
        let mut frame = RgbFrame::new(20, 20);
        let seg = LineSegment::new(5, 10, 15, 10);
        draw_segment(&mut frame, &seg, LANE_COLOR, 3);
        // one pixel above and below the horizontal stroke
        assert_eq!(frame.get(10, 9), LANE_COLOR);
        assert_eq!(frame.get(10, 11), LANE_COLOR);
        assert_eq!(frame.get(10, 12), [0, 0, 0]);
    }

    #[test]
    fn clamps_at_frame_border() {
        let mut frame = RgbFrame::new(10, 10);
        let seg = LineSegment::new(0, 0, 9, 9);
        draw_segment(&mut frame, &seg, LANE_COLOR, 3);
        assert_eq!(frame.get(0, 0), LANE_COLOR);
        assert_eq!(frame.get(9, 9), LANE_COLOR);
    }
}

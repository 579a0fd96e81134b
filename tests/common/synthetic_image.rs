/// Generates a dark RGB frame with bright lane stripes.
///
/// Each stripe is `[x1, y1, x2, y2]` in pixel coordinates and is stamped as
/// a square brush of side `thickness` along the line, bright grey on a
/// near-black background.
pub fn lane_frame_rgb(width: usize, height: usize, stripes: &[[i32; 4]], thickness: i32) -> Vec<u8> {
    assert!(width > 0 && height > 0, "frame dimensions must be positive");
    assert!(thickness > 0, "stripe thickness must be positive");

    let mut rgb = vec![16u8; width * height * 3];
    let radius = (thickness - 1) / 2;

    for stripe in stripes {
        let [x1, y1, x2, y2] = *stripe;
        let dx = (x2 - x1) as f64;
        let dy = (y2 - y1) as f64;
        let steps = (dx.abs().max(dy.abs()) as usize).max(1) * 2;
        for t in 0..=steps {
            let f = t as f64 / steps as f64;
            let cx = (x1 as f64 + dx * f).round() as i32;
            let cy = (y1 as f64 + dy * f).round() as i32;
            for y in cy - radius..=cy + radius {
                if y < 0 || y as usize >= height {
                    continue;
                }
                for x in cx - radius..=cx + radius {
                    if x < 0 || x as usize >= width {
                        continue;
                    }
                    let idx = (y as usize * width + x as usize) * 3;
                    rgb[idx..idx + 3].copy_from_slice(&[235, 235, 235]);
                }
            }
        }
    }
    rgb
}

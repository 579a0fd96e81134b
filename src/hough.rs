//! Probabilistic Hough transform over a binary edge map.
//!
//! The extractor samples edge points one at a time, votes each sample into
//! a `(theta, rho)` accumulator, and as soon as a bin crosses the vote
//! threshold it walks the corresponding line in both directions through the
//! remaining edge pixels, tolerating gaps up to a limit. Spans long enough
//! are emitted as segments; the walked pixels are retired from the point
//! pool either way and a detected span's votes are cancelled, so each edge
//! pixel supports at most one segment.
//!
//! Sampling order comes from a fixed-seed xorshift generator that is
//! re-initialized on every call: identical edge maps always produce the
//! identical segment set, which keeps the whole analysis idempotent per
//! frame.
//!
//! Emitted endpoints are coordinates of actual edge pixels, so every
//! segment lies inside the map bounds and on the mask that produced it.
use crate::image::Mask8;
use crate::types::LineSegment;
use log::debug;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Parameters of the probabilistic Hough transform.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughOptions {
    /// Distance resolution of the accumulator in pixels.
    pub rho_res_px: f32,
    /// Angular resolution of the accumulator in degrees.
    pub theta_res_deg: f32,
    /// Accumulator votes required before a line hypothesis is traced.
    pub votes_threshold: i32,
    /// Minimum accepted segment length in pixels.
    pub min_length_px: f32,
    /// Maximum run of non-edge pixels bridged while tracing a line.
    pub max_gap_px: i32,
}

impl Default for HoughOptions {
    fn default() -> Self {
        Self {
            rho_res_px: 1.0,
            theta_res_deg: 1.0,
            votes_threshold: 100,
            min_length_px: 100.0,
            max_gap_px: 50,
        }
    }
}

/// Detect line segments in a binary edge map.
pub fn detect_segments(edges: &Mask8, options: &HoughOptions) -> Vec<LineSegment> {
    if edges.w == 0 || edges.h == 0 {
        return Vec::new();
    }
    HoughExtractor::new(edges, *options).extract()
}

// fixed-point scale of the sub-pixel line walk
const SHIFT: i32 = 16;

// fixed sampling seed: identical input must yield identical output
const SAMPLING_SEED: u64 = 0x853C_49E6_748F_EA9B;

struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        (x.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 32) as u32
    }

    fn next_below(&mut self, n: u32) -> u32 {
        self.next_u32() % n
    }
}

struct WalkStart {
    xflag: bool,
    x0: i32,
    y0: i32,
    dx0: i32,
    dy0: i32,
}

struct HoughExtractor {
    w: i32,
    h: i32,
    options: HoughOptions,
    theta_rad: f32,
    numangle: usize,
    numrho: usize,
    cos_tab: Vec<f32>,
    sin_tab: Vec<f32>,
    mask: Vec<u8>,
    accum: Vec<i32>,
    points: Vec<(i32, i32)>,
    rng: XorShift64,
    segments: Vec<LineSegment>,
}

impl HoughExtractor {
    fn new(edges: &Mask8, options: HoughOptions) -> Self {
        let w = edges.w as i32;
        let h = edges.h as i32;
        let theta_rad = options.theta_res_deg.to_radians();
        let numangle = (std::f32::consts::PI / theta_rad).round() as usize;
        let numrho =
            (((w + h) * 2 + 1) as f32 / options.rho_res_px).round() as usize;

        let mut cos_tab = Vec::with_capacity(numangle);
        let mut sin_tab = Vec::with_capacity(numangle);
        for n in 0..numangle {
            let ang = n as f32 * theta_rad;
            cos_tab.push(ang.cos() / options.rho_res_px);
            sin_tab.push(ang.sin() / options.rho_res_px);
        }

        let mut points = Vec::new();
        for y in 0..edges.h {
            let row = edges.row(y);
            for (x, &v) in row.iter().enumerate() {
                if v != 0 {
                    points.push((x as i32, y as i32));
                }
            }
        }

        Self {
            w,
            h,
            options,
            theta_rad,
            numangle,
            numrho,
            cos_tab,
            sin_tab,
            mask: edges.data.clone(),
            accum: vec![0; numangle * numrho],
            points,
            rng: XorShift64::new(SAMPLING_SEED),
            segments: Vec::new(),
        }
    }

    fn extract(mut self) -> Vec<LineSegment> {
        let total_points = self.points.len();
        let mut count = total_points;
        while count > 0 {
            let pick = self.rng.next_below(count as u32) as usize;
            let (x, y) = self.points[pick];
            count -= 1;
            let last = self.points[count];
            self.points[pick] = last;

            // the point may already belong to an extracted span
            if self.mask[(y * self.w + x) as usize] == 0 {
                continue;
            }

            let (max_val, max_n) = self.vote(x, y);
            if max_val < self.options.votes_threshold {
                continue;
            }

            let start = self.walk_start(x, y, max_n);
            let ends = self.trace(&start, (x, y));
            let span = Vector2::new(
                (ends[1].0 - ends[0].0) as f32,
                (ends[1].1 - ends[0].1) as f32,
            );
            let good = span.norm() >= self.options.min_length_px;
            self.consume(&start, ends, good);
            if good {
                self.segments
                    .push(LineSegment::new(ends[0].0, ends[0].1, ends[1].0, ends[1].1));
            }
        }

        debug!(
            "hough: {} segments from {} edge points",
            self.segments.len(),
            total_points
        );
        self.segments
    }

    fn vote(&mut self, x: i32, y: i32) -> (i32, usize) {
        let offset = (self.numrho - 1) / 2;
        let mut max_val = 0;
        let mut max_n = 0;
        for n in 0..self.numangle {
            let r = (x as f32 * self.cos_tab[n] + y as f32 * self.sin_tab[n]).round() as i32
                + offset as i32;
            let cell = &mut self.accum[n * self.numrho + r as usize];
            *cell += 1;
            if *cell > max_val {
                max_val = *cell;
                max_n = n;
            }
        }
        (max_val, max_n)
    }

    fn unvote(&mut self, x: i32, y: i32) {
        let offset = (self.numrho - 1) / 2;
        for n in 0..self.numangle {
            let r = (x as f32 * self.cos_tab[n] + y as f32 * self.sin_tab[n]).round() as i32
                + offset as i32;
            self.accum[n * self.numrho + r as usize] -= 1;
        }
    }

    /// Fixed-point stepping setup along the line whose normal angle is bin
    /// `n`, anchored at the seed pixel. The dominant axis advances one pixel
    /// per step, the other in `1/2^SHIFT` sub-pixel increments.
    fn walk_start(&self, x: i32, y: i32, n: usize) -> WalkStart {
        let theta = n as f32 * self.theta_rad;
        let a = -theta.sin();
        let b = theta.cos();
        if a.abs() > b.abs() {
            WalkStart {
                xflag: true,
                x0: x,
                y0: (y << SHIFT) + (1 << (SHIFT - 1)),
                dx0: if a > 0.0 { 1 } else { -1 },
                dy0: (b * (1 << SHIFT) as f32 / a.abs()).round() as i32,
            }
        } else {
            WalkStart {
                xflag: false,
                x0: (x << SHIFT) + (1 << (SHIFT - 1)),
                y0: y,
                dx0: (a * (1 << SHIFT) as f32 / b.abs()).round() as i32,
                dy0: if b > 0.0 { 1 } else { -1 },
            }
        }
    }

    /// Walk in both directions from the seed and return the outermost edge
    /// pixels reached before the gap allowance runs out.
    fn trace(&self, start: &WalkStart, seed: (i32, i32)) -> [(i32, i32); 2] {
        let mut ends = [seed; 2];
        for (k, end) in ends.iter_mut().enumerate() {
            let sign = if k == 0 { 1 } else { -1 };
            let (dx, dy) = (sign * start.dx0, sign * start.dy0);
            let (mut xx, mut yy) = (start.x0, start.y0);
            let mut gap = 0;
            loop {
                let (j, i) = if start.xflag {
                    (xx, yy >> SHIFT)
                } else {
                    (xx >> SHIFT, yy)
                };
                if j < 0 || j >= self.w || i < 0 || i >= self.h {
                    break;
                }
                if self.mask[(i * self.w + j) as usize] != 0 {
                    gap = 0;
                    *end = (j, i);
                } else {
                    gap += 1;
                    if gap > self.options.max_gap_px {
                        break;
                    }
                }
                xx += dx;
                yy += dy;
            }
        }
        ends
    }

    /// Re-walk the traced span, retiring its pixels; votes are cancelled
    /// only for spans emitted as segments.
    fn consume(&mut self, start: &WalkStart, ends: [(i32, i32); 2], good: bool) {
        for (k, end) in ends.iter().enumerate() {
            let sign = if k == 0 { 1 } else { -1 };
            let (dx, dy) = (sign * start.dx0, sign * start.dy0);
            let (mut xx, mut yy) = (start.x0, start.y0);
            loop {
                let (j, i) = if start.xflag {
                    (xx, yy >> SHIFT)
                } else {
                    (xx >> SHIFT, yy)
                };
                if j < 0 || j >= self.w || i < 0 || i >= self.h {
                    break;
                }
                let idx = (i * self.w + j) as usize;
                if self.mask[idx] != 0 {
                    if good {
                        self.unvote(j, i);
                    }
                    self.mask[idx] = 0;
                }
                if (j, i) == *end {
                    break;
                }
                xx += dx;
                yy += dy;
            }
        }
    }
}

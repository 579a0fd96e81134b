//! Interleaved 8-bit RGB frame types and luma conversion.
use super::gray::GrayF32;

/// Borrowed view over an interleaved RGB frame. `stride` is in pixels, so a
/// row occupies `stride * 3` bytes; the caller owns the buffer and the
/// analyzer never retains it past one call.
#[derive(Clone, Debug)]
pub struct RgbView<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> RgbView<'a> {
    /// Minimum buffer length implied by the view geometry, in bytes.
    pub fn min_len(&self) -> usize {
        if self.h == 0 {
            0
        } else {
            ((self.h - 1) * self.stride + self.w) * 3
        }
    }

    /// Pixel row `y`, `w * 3` interleaved bytes.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride * 3;
        &self.data[start..start + self.w * 3]
    }
}

/// Owned, tightly packed RGB frame. Produced as the annotated output copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbFrame {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl RgbFrame {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h * 3],
        }
    }

    /// Copy a borrowed view into an owned, tightly packed frame.
    pub fn from_view(view: &RgbView<'_>) -> Self {
        let mut frame = Self::new(view.w, view.h);
        for y in 0..view.h {
            let src = view.row(y);
            let start = y * view.w * 3;
            frame.data[start..start + view.w * 3].copy_from_slice(src);
        }
        frame
    }

    pub fn as_view(&self) -> RgbView<'_> {
        RgbView {
            w: self.w,
            h: self.h,
            stride: self.w,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.w + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: [u8; 3]) {
        let i = (y * self.w + x) * 3;
        self.data[i..i + 3].copy_from_slice(&px);
    }
}

/// Convert an RGB view to single-channel intensity with the standard luma
/// weights `0.299 R + 0.587 G + 0.114 B`, keeping the 0..255 scale.
pub fn luma_f32(frame: &RgbView<'_>) -> GrayF32 {
    let mut out = GrayF32::new(frame.w, frame.h);
    for y in 0..frame.h {
        let src = frame.row(y);
        let dst = out.row_mut(y);
        for (x, px) in src.chunks_exact(3).enumerate() {
            dst[x] = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
        }
    }
    out
}

//! Grayscale image buffer and resampling.
//!
//! `GrayImage` is an owning buffer, `GrayImageView` a borrowing view over
//! the same row-major 8-bit layout, plus the sampling helpers needed to
//! upscale small crops for OCR.

/// A borrowed, row-major 8-bit grayscale image (`len(data) == width*height`).
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

/// An owning row-major 8-bit grayscale image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height],
        }
    }

    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.width + x] = v;
    }

    /// Extract an axis-aligned sub-image. Coordinates are clamped to bounds;
    /// a fully out-of-range crop returns a 0x0 image.
    pub fn crop(&self, x: usize, y: usize, w: usize, h: usize) -> GrayImage {
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        if x >= x1 || y >= y1 {
            return GrayImage::new(0, 0);
        }
        let cw = x1 - x;
        let ch = y1 - y;
        let mut out = GrayImage::new(cw, ch);
        for row in 0..ch {
            let src_start = (y + row) * self.width + x;
            out.data[row * cw..row * cw + cw].copy_from_slice(&self.data[src_start..src_start + cw]);
        }
        out
    }

    /// Upscale by an integer factor using bicubic (Catmull-Rom) interpolation,
    /// used when upscaling small OCR crops for sharper glyph edges than
    /// bilinear resampling gives.
    pub fn resize_cubic(&self, factor: usize) -> GrayImage {
        assert!(factor >= 1);
        if factor == 1 {
            return self.clone();
        }
        let new_w = self.width * factor;
        let new_h = self.height * factor;
        let mut out = GrayImage::new(new_w, new_h);
        let view = self.view();
        let inv = 1.0 / factor as f32;
        for y in 0..new_h {
            let sy = (y as f32 + 0.5) * inv - 0.5;
            for x in 0..new_w {
                let sx = (x as f32 + 0.5) * inv - 0.5;
                out.set(x, y, sample_bicubic_u8(&view, sx, sy));
            }
        }
        out
    }

    /// Mean pixel intensity, used to decide whether a binarized image is
    /// "mostly dark" and should be inverted before OCR.
    pub fn mean(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().map(|&v| v as u32).sum::<u32>() as f32 / self.data.len() as f32
    }

    pub fn invert(&mut self) {
        for v in self.data.iter_mut() {
            *v = 255 - *v;
        }
    }

    /// Pad with a constant-value border.
    pub fn pad(&self, border: usize, value: u8) -> GrayImage {
        let new_w = self.width + 2 * border;
        let new_h = self.height + 2 * border;
        let mut out = GrayImage::new(new_w, new_h);
        out.data.fill(value);
        for row in 0..self.height {
            let dst_start = (row + border) * new_w + border;
            let src_start = row * self.width;
            out.data[dst_start..dst_start + self.width]
                .copy_from_slice(&self.data[src_start..src_start + self.width]);
        }
        out
    }

    /// The 10th-percentile intensity across the whole buffer. Used by the
    /// border classifier's darkness score: robust to a handful of stray
    /// dark pixels bleeding in from nearby label glyphs.
    pub fn percentile(&self, p: f32) -> u8 {
        percentile_u8(&self.data, p)
    }
}

#[inline]
fn get_gray(src: &GrayImageView<'_>, x: i32, y: i32) -> u8 {
    if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
        return 255;
    }
    src.data[y as usize * src.width + x as usize]
}

#[inline]
pub fn sample_bilinear(src: &GrayImageView<'_>, x: f32, y: f32) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_gray(src, x0, y0) as f32;
    let p10 = get_gray(src, x0 + 1, y0) as f32;
    let p01 = get_gray(src, x0, y0 + 1) as f32;
    let p11 = get_gray(src, x0 + 1, y0 + 1) as f32;

    let a = p00 + fx * (p10 - p00);
    let b = p01 + fx * (p11 - p01);
    a + fy * (b - a)
}

#[inline]
fn cubic_kernel(t: f32) -> f32 {
    // Catmull-Rom (a = -0.5), the standard OpenCV INTER_CUBIC kernel.
    let a = -0.5f32;
    let t = t.abs();
    if t <= 1.0 {
        (a + 2.0) * t * t * t - (a + 3.0) * t * t + 1.0
    } else if t < 2.0 {
        a * t * t * t - 5.0 * a * t * t + 8.0 * a * t - 4.0 * a
    } else {
        0.0
    }
}

/// Bicubic-interpolated sample, clamped to `[0, 255]`.
pub fn sample_bicubic_u8(src: &GrayImageView<'_>, x: f32, y: f32) -> u8 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let mut acc = 0.0f32;
    let mut wsum = 0.0f32;
    for j in -1..=2 {
        let wy = cubic_kernel(fy - j as f32);
        for i in -1..=2 {
            let wx = cubic_kernel(fx - i as f32);
            let w = wx * wy;
            acc += w * get_gray(src, x0 + i, y0 + j) as f32;
            wsum += w;
        }
    }
    let v = if wsum > 0.0 { acc / wsum } else { acc };
    v.round().clamp(0.0, 255.0) as u8
}

#[inline]
pub fn sample_bilinear_u8(src: &GrayImageView<'_>, x: f32, y: f32) -> u8 {
    sample_bilinear(src, x, y).clamp(0.0, 255.0) as u8
}

/// Percentile (0..100) over a byte slice via a full sort. Crops passed to
/// this are small (border-classification strips, OCR crops) so an O(n log n)
/// sort is plenty fast and keeps the implementation simple.
pub fn percentile_u8(values: &[u8], p: f32) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted: Vec<u8> = values.to_vec();
    sorted.sort_unstable();
    let rank = ((p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f32).round() as usize;
    sorted[rank.min(sorted.len() - 1)]
}

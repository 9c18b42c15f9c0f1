//! Binary thresholding and rectangular morphology.
//!
//! Every stage that needs "is this pixel foreground" ends up here: the grid
//! locator's line-based and white-region strategies, and the label trimmer's
//! text isolation. Binary images are represented as a plain `GrayImage` with
//! only `0`/`255` values so the existing image utilities keep working on them.

use crate::image::GrayImage;

/// Global fixed threshold. `invert` makes dark pixels (below `t`) foreground
/// (`255`) rather than bright ones — used for "binarize dark text on light
/// background" passes.
pub fn threshold(img: &GrayImage, t: u8, invert: bool) -> GrayImage {
    let mut out = GrayImage::new(img.width, img.height);
    for (dst, &src) in out.data.iter_mut().zip(img.data.iter()) {
        let above = src >= t;
        *dst = if above != invert { 255 } else { 0 };
    }
    out
}

/// Adaptive threshold against a Gaussian-weighted local mean, minus a
/// constant `c`. `block` is the odd window diameter (radius `block/2`).
/// `invert` makes pixels darker than the local mean foreground, matching the
/// lattice detector's need to pick up both heavy and faint grid lines
/// regardless of local contrast.
pub fn adaptive_gaussian_threshold(img: &GrayImage, block: usize, c: i32, invert: bool) -> GrayImage {
    let local_mean = gaussian_blur(img, block);
    let mut out = GrayImage::new(img.width, img.height);
    for (i, (&src, &mean)) in img.data.iter().zip(local_mean.data.iter()).enumerate() {
        let above = src as i32 >= mean as i32 - c;
        out.data[i] = if above != invert { 255 } else { 0 };
    }
    out
}

/// Separable Gaussian blur with an odd `diameter`; sigma follows OpenCV's
/// default derivation (`0.3*((diameter-1)*0.5 - 1) + 0.8`).
fn gaussian_blur(img: &GrayImage, diameter: usize) -> GrayImage {
    let diameter = diameter | 1;
    let radius = (diameter / 2) as i32;
    let sigma = 0.3 * ((diameter as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let mut kernel = vec![0.0f32; diameter];
    let two_sigma_sq = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;
    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as i32 - radius;
        *k = (-((x * x) as f32) / two_sigma_sq).exp();
        sum += *k;
    }
    for k in kernel.iter_mut() {
        *k /= sum;
    }

    let horiz = convolve_horizontal(img, &kernel, radius);
    convolve_vertical(&horiz, &kernel, radius)
}

fn convolve_horizontal(img: &GrayImage, kernel: &[f32], radius: i32) -> GrayImage {
    let mut out = GrayImage::new(img.width, img.height);
    for y in 0..img.height {
        for x in 0..img.width {
            let mut acc = 0.0f32;
            for (i, &k) in kernel.iter().enumerate() {
                let sx = (x as i32 + i as i32 - radius).clamp(0, img.width as i32 - 1) as usize;
                acc += k * img.get(sx, y) as f32;
            }
            out.set(x, y, acc.round().clamp(0.0, 255.0) as u8);
        }
    }
    out
}

fn convolve_vertical(img: &GrayImage, kernel: &[f32], radius: i32) -> GrayImage {
    let mut out = GrayImage::new(img.width, img.height);
    for y in 0..img.height {
        for x in 0..img.width {
            let mut acc = 0.0f32;
            for (i, &k) in kernel.iter().enumerate() {
                let sy = (y as i32 + i as i32 - radius).clamp(0, img.height as i32 - 1) as usize;
                acc += k * img.get(x, sy) as f32;
            }
            out.set(x, y, acc.round().clamp(0.0, 255.0) as u8);
        }
    }
    out
}

/// Dilate a binary mask with a `kw x kh` rectangular structuring element:
/// a pixel becomes foreground if any pixel in its window is foreground.
pub fn dilate_rect(img: &GrayImage, kw: usize, kh: usize) -> GrayImage {
    rect_morph(img, kw, kh, true)
}

/// Erode with a `kw x kh` rectangular structuring element: a pixel stays
/// foreground only if every pixel in its window is foreground.
pub fn erode_rect(img: &GrayImage, kw: usize, kh: usize) -> GrayImage {
    rect_morph(img, kw, kh, false)
}

pub fn open_rect(img: &GrayImage, kw: usize, kh: usize) -> GrayImage {
    dilate_rect(&erode_rect(img, kw, kh), kw, kh)
}

pub fn close_rect(img: &GrayImage, kw: usize, kh: usize) -> GrayImage {
    erode_rect(&dilate_rect(img, kw, kh), kw, kh)
}

fn rect_morph(img: &GrayImage, kw: usize, kh: usize, is_dilate: bool) -> GrayImage {
    let rx = (kw.max(1) / 2) as i32;
    let ry = (kh.max(1) / 2) as i32;
    let mut out = GrayImage::new(img.width, img.height);
    for y in 0..img.height as i32 {
        for x in 0..img.width as i32 {
            let mut result = !is_dilate;
            'window: for dy in -ry..=ry {
                for dx in -rx..=rx {
                    let sx = x + dx;
                    let sy = y + dy;
                    let fg = if sx < 0 || sy < 0 || sx >= img.width as i32 || sy >= img.height as i32 {
                        false
                    } else {
                        img.get(sx as usize, sy as usize) != 0
                    };
                    if is_dilate && fg {
                        result = true;
                        break 'window;
                    }
                    if !is_dilate && !fg {
                        result = false;
                        break 'window;
                    }
                }
            }
            out.set(x as usize, y as usize, if result { 255 } else { 0 });
        }
    }
    out
}

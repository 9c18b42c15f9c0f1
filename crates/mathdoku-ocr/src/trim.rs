//! Isolates label glyphs from cage-border remnants and in-cell candidate
//! marks.

use mathdoku_core::contours::connected_components;
use mathdoku_core::morphology::threshold;
use mathdoku_core::GrayImage;

use crate::params::LabelReaderParams;

pub fn trim_to_text(crop_gray: &GrayImage, params: &LabelReaderParams) -> GrayImage {
    if crop_gray.width == 0 || crop_gray.height == 0 {
        return crop_gray.clone();
    }

    let binary = threshold(crop_gray, params.trim_threshold, true);

    let max_strip_x = ((params.trim_strip_max_fraction * crop_gray.width as f32) as usize).min(binary.width);
    let max_strip_y = ((params.trim_strip_max_fraction * crop_gray.height as f32) as usize).min(binary.height);

    let mut strip_left = 0;
    while strip_left < max_strip_x && column_is_solid(&binary, strip_left, params.trim_strip_solid_fraction) {
        strip_left += 1;
    }
    let mut strip_top = 0;
    while strip_top < max_strip_y && row_is_solid(&binary, strip_top, params.trim_strip_solid_fraction) {
        strip_top += 1;
    }

    if strip_left >= binary.width || strip_top >= binary.height {
        return strip_border(crop_gray, strip_left, strip_top);
    }

    let work = binary.crop(strip_left, strip_top, binary.width - strip_left, binary.height - strip_top);
    let padded = work.pad(2, 0);

    let crop_w = crop_gray.width as f32;
    let crop_h = crop_gray.height as f32;
    let kept: Vec<_> = connected_components(&padded)
        .into_iter()
        .filter(|comp| {
            let w = comp.bbox.w as f32;
            let h = comp.bbox.h as f32;
            let minus_exempt = w > 2.0 * h && w < 0.7 * crop_w && h < 0.3 * crop_h;
            comp.pixel_count >= params.min_contour_area && (comp.bbox.aspect() >= params.min_contour_aspect || minus_exempt)
        })
        .collect();

    if kept.is_empty() {
        return strip_border(crop_gray, strip_left, strip_top);
    }

    let min_x = kept.iter().map(|c| c.bbox.x).min().unwrap() as i32;
    let min_y = kept.iter().map(|c| c.bbox.y).min().unwrap() as i32;
    let max_x = kept.iter().map(|c| c.bbox.x + c.bbox.w).max().unwrap() as i32;
    let max_y = kept.iter().map(|c| c.bbox.y + c.bbox.h).max().unwrap() as i32;

    // Undo the +2 pad and the earlier strip offset to land back in
    // `crop_gray` coordinates, then pad the result by 3px.
    let orig_x0 = min_x - 2 + strip_left as i32;
    let orig_y0 = min_y - 2 + strip_top as i32;
    let orig_x1 = max_x - 2 + strip_left as i32;
    let orig_y1 = max_y - 2 + strip_top as i32;

    let out_x0 = (orig_x0 - 3).max(0);
    let out_y0 = (orig_y0 - 3).max(0);
    let out_x1 = (orig_x1 + 3).min(crop_gray.width as i32);
    let out_y1 = (orig_y1 + 3).min(crop_gray.height as i32);

    if out_x1 <= out_x0 || out_y1 <= out_y0 {
        return crop_gray.clone();
    }
    crop_gray.crop(out_x0 as usize, out_y0 as usize, (out_x1 - out_x0) as usize, (out_y1 - out_y0) as usize)
}

/// The border-stripped crop a fallback should hand back when no contour
/// survives (or the solid-run scan hit its cap): the solid rows/columns
/// already identified are still worth removing even with no glyph found.
fn strip_border(crop_gray: &GrayImage, strip_left: usize, strip_top: usize) -> GrayImage {
    if strip_left >= crop_gray.width || strip_top >= crop_gray.height {
        return crop_gray.clone();
    }
    crop_gray.crop(strip_left, strip_top, crop_gray.width - strip_left, crop_gray.height - strip_top)
}

fn column_is_solid(binary: &GrayImage, x: usize, fraction: f32) -> bool {
    if binary.height == 0 {
        return false;
    }
    let lit = (0..binary.height).filter(|&y| binary.get(x, y) != 0).count();
    lit as f32 / binary.height as f32 >= fraction
}

fn row_is_solid(binary: &GrayImage, y: usize, fraction: f32) -> bool {
    if binary.width == 0 {
        return false;
    }
    let row_start = y * binary.width;
    let lit = binary.data[row_start..row_start + binary.width].iter().filter(|&&v| v != 0).count();
    lit as f32 / binary.width as f32 >= fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_isolates_a_dark_glyph_from_a_bright_border() {
        let mut img = GrayImage::new(20, 10);
        img.data.fill(255);
        // Solid dark border strip along the left edge.
        for y in 0..10 {
            img.set(0, y, 0);
            img.set(1, y, 0);
        }
        // A glyph blob in the middle.
        for y in 3..7 {
            for x in 10..14 {
                img.set(x, y, 0);
            }
        }
        let trimmed = trim_to_text(&img, &LabelReaderParams::default());
        assert!(trimmed.width < img.width);
    }

    #[test]
    fn trim_falls_back_to_full_crop_when_nothing_survives() {
        let img = GrayImage::new(10, 10);
        let trimmed = trim_to_text(&img, &LabelReaderParams::default());
        assert_eq!(trimmed.width, img.width);
        assert_eq!(trimmed.height, img.height);
    }

    #[test]
    fn fallback_still_strips_a_solid_border_when_no_glyph_survives() {
        let mut img = GrayImage::new(10, 10);
        img.data.fill(255);
        // Solid dark border column along the left edge, nothing else dark.
        for y in 0..10 {
            img.set(0, y, 0);
        }
        let trimmed = trim_to_text(&img, &LabelReaderParams::default());
        assert_eq!(trimmed.width, img.width - 1);
        assert_eq!(trimmed.height, img.height);
    }
}

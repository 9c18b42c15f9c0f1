//! Post-recognition correction heuristics that don't themselves
//! require another OCR call: the narrow "0"->"9" rewrite, the
//! operators-shown decision, the trailing-digit misread rule, and the
//! shape-based fallback for an isolated trailing glyph.

use mathdoku_core::contours::connected_components;
use mathdoku_core::morphology::threshold;
use mathdoku_core::GrayImage;

/// A recognized value of exactly `"0"` is invalid in this puzzle family and
/// almost always a misread `9`. Kept deliberately narrow — it never fires
/// as a substring or prefix match, only on the exact parsed string.
pub fn correct_zero_value(digits: &str) -> String {
    if digits == "0" {
        "9".to_string()
    } else {
        digits.to_string()
    }
}

/// Whether the puzzle displays operators at all: true iff more multi-cell
/// cages carry a recovered operator than lack one.
pub fn operators_shown(multi_cell_with_op: usize, multi_cell_without_op: usize) -> bool {
    multi_cell_with_op > multi_cell_without_op
}

/// A trailing `0` or `4` is a common low-resolution misread of a `+` glyph
/// (round / cross shapes get mistaken for digits). Only fires on a digit
/// string with at least one digit remaining after stripping the misread.
pub fn trailing_digit_to_plus(digits: &str) -> Option<String> {
    let last = digits.chars().last()?;
    if last != '0' && last != '4' {
        return None;
    }
    let stripped = &digits[..digits.len() - last.len_utf8()];
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

/// Isolate the rightmost 4-connected component of a trimmed label crop,
/// binarized at `threshold_value`. Requires it to start past
/// `min_width_fraction` of the crop's width and occupy less than
/// `max_area_fraction` of the crop's area, matching the confidence gate
/// used before trusting it as a standalone operator glyph.
pub fn isolate_trailing_component(
    trimmed: &GrayImage,
    threshold_value: u8,
    min_width_fraction: f32,
    max_area_fraction: f32,
) -> Option<GrayImage> {
    let binary = threshold(trimmed, threshold_value, true);
    let total_area = (trimmed.width * trimmed.height) as f32;

    let rightmost = connected_components(&binary)
        .into_iter()
        .filter(|comp| comp.bbox.x as f32 >= min_width_fraction * trimmed.width as f32)
        .filter(|comp| comp.bbox.area() as f32 / total_area < max_area_fraction)
        .max_by_key(|comp| comp.bbox.x)?;

    Some(trimmed.crop(
        rightmost.bbox.x as usize,
        rightmost.bbox.y as usize,
        rightmost.bbox.w as usize,
        rightmost.bbox.h as usize,
    ))
}

/// Shape-based operator fallback for an isolated glyph crop: a near-square
/// blob with both its horizontal and vertical center strips mostly filled
/// reads as `+`; a wide, short blob reads as `-`.
pub fn classify_component_shape(component: &GrayImage, threshold_value: u8) -> Option<char> {
    if component.width == 0 || component.height == 0 {
        return None;
    }
    let aspect = component.width.min(component.height) as f32 / component.width.max(component.height) as f32;
    let wide_short = component.width as f32 / component.height as f32;

    if wide_short > 2.0 {
        return Some('-');
    }
    if (0.6..1.6).contains(&aspect) {
        let binary = threshold(component, threshold_value, true);
        let h_fill = center_row_fill(&binary);
        let v_fill = center_col_fill(&binary);
        if h_fill >= 0.5 && v_fill >= 0.5 {
            return Some('+');
        }
    }
    None
}

fn center_row_fill(binary: &GrayImage) -> f32 {
    let y = binary.height / 2;
    let row_start = y * binary.width;
    let lit = binary.data[row_start..row_start + binary.width].iter().filter(|&&v| v != 0).count();
    lit as f32 / binary.width as f32
}

fn center_col_fill(binary: &GrayImage) -> f32 {
    let x = binary.width / 2;
    let lit = (0..binary.height).filter(|&y| binary.get(x, y) != 0).count();
    lit as f32 / binary.height as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_corrected_to_nine() {
        assert_eq!(correct_zero_value("0"), "9");
        assert_eq!(correct_zero_value("10"), "10");
    }

    #[test]
    fn operators_shown_requires_a_strict_majority() {
        assert!(operators_shown(5, 2));
        assert!(!operators_shown(2, 5));
        assert!(!operators_shown(3, 3));
    }

    #[test]
    fn trailing_zero_is_reinterpreted_as_plus() {
        assert_eq!(trailing_digit_to_plus("80"), Some("8".to_string()));
        assert_eq!(trailing_digit_to_plus("4"), None);
        assert_eq!(trailing_digit_to_plus("124"), Some("12".to_string()));
        assert_eq!(trailing_digit_to_plus("17"), None);
    }

    #[test]
    fn classify_component_shape_reads_wide_blob_as_minus() {
        let mut img = GrayImage::new(20, 5);
        for y in 0..5 {
            for x in 0..20 {
                img.set(x, y, 0);
            }
        }
        assert_eq!(classify_component_shape(&img, 160), Some('-'));
    }

    #[test]
    fn isolate_trailing_component_rejects_a_sparse_but_large_bbox() {
        // A thin cross spanning nearly the whole crop: its foreground pixel
        // count is a small fraction of the crop area, but its bounding box
        // covers almost all of it, so the bbox-area gate must reject it even
        // though a pixel-count gate at the same threshold would accept it.
        let mut img = GrayImage::new(20, 20);
        img.data.fill(255);
        for x in 0..20 {
            img.set(x, 10, 0);
        }
        for y in 0..20 {
            img.set(10, y, 0);
        }
        assert!(isolate_trailing_component(&img, 160, 0.0, 0.35).is_none());
    }

    #[test]
    fn isolate_trailing_component_accepts_a_compact_glyph() {
        let mut img = GrayImage::new(20, 20);
        img.data.fill(255);
        for y in 14..18 {
            for x in 14..18 {
                img.set(x, y, 0);
            }
        }
        let component = isolate_trailing_component(&img, 160, 0.5, 0.35).unwrap();
        assert_eq!(component.width, 4);
        assert_eq!(component.height, 4);
    }

    #[test]
    fn classify_component_shape_reads_filled_cross_as_plus() {
        let mut img = GrayImage::new(10, 10);
        img.data.fill(255);
        for x in 0..10 {
            img.set(x, 5, 0);
        }
        for y in 0..10 {
            img.set(5, y, 0);
        }
        assert_eq!(classify_component_shape(&img, 160), Some('+'));
    }
}

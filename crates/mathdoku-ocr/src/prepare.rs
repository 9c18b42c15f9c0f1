//! Final OCR pre-processing pass: upscale small crops, binarize,
//! normalize polarity, pad.

use mathdoku_core::morphology::threshold;
use mathdoku_core::otsu::otsu_threshold_from_samples;
use mathdoku_core::GrayImage;

use crate::params::LabelReaderParams;

pub fn prepare_for_ocr(trimmed: &GrayImage, params: &LabelReaderParams) -> GrayImage {
    let mut image = trimmed.clone();

    if image.height > 0 && image.height < params.ocr_prep_min_height_px as usize {
        let factor = 2.max((params.ocr_prep_min_height_px as f32 / image.height as f32).floor() as usize);
        image = image.resize_cubic(factor);
    }

    let t = otsu_threshold_from_samples(&image.data);
    let mut binary = threshold(&image, t, false);

    // A mostly-dark result means the binarization inverted polarity
    // (dark background, light text); flip it back so the background is
    // white and the glyphs are black, which OCR engines expect.
    if binary.mean() < 127.0 {
        binary.invert();
    }

    binary.pad(params.ocr_pad_px, 255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_upscales_short_crops() {
        let img = GrayImage::new(10, 10);
        let prepared = prepare_for_ocr(&img, &LabelReaderParams::default());
        assert!(prepared.height > img.height);
    }

    #[test]
    fn prepare_normalizes_to_a_light_background() {
        let mut img = GrayImage::new(100, 100);
        img.data.fill(10);
        let prepared = prepare_for_ocr(&img, &LabelReaderParams::default());
        assert!(prepared.mean() > 127.0);
    }
}

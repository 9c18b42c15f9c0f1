//! Grid bounding-box localization: two strategies tried in order, falling
//! back to the next candidate when the first yields nothing plausible.

use mathdoku_core::morphology::{close_rect, dilate_rect, open_rect, threshold};
use mathdoku_core::otsu::otsu_threshold_from_samples;
use mathdoku_core::{GrayImage, GridBBox};

use crate::error::GridLocateError;
use crate::params::GridLocatorParams;

pub struct GridLocator {
    params: GridLocatorParams,
}

impl GridLocator {
    pub fn new(params: GridLocatorParams) -> Self {
        Self { params }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, image)))]
    pub fn locate(&self, image: &GrayImage) -> Result<GridBBox, GridLocateError> {
        if let Some(bbox) = self.strategy_line_based(image) {
            log::info!("grid located via line-based strategy: {bbox:?}");
            return Ok(bbox);
        }
        if let Some(bbox) = self.strategy_white_region(image) {
            log::info!("grid located via white-region fallback: {bbox:?}");
            return Ok(bbox);
        }
        log::warn!("grid locator exhausted both strategies");
        Err(GridLocateError::GridNotFound)
    }

    fn strategy_line_based(&self, image: &GrayImage) -> Option<GridBBox> {
        let t = otsu_threshold_from_samples(&image.data);
        let binary = threshold(image, t, true);

        let long_len = (image.width.min(image.height) as u32 / self.params.open_divisor).max(1) as usize;
        let horizontal = open_rect(&binary, long_len, 1);
        let vertical = open_rect(&binary, 1, long_len);
        let combined = or_masks(&horizontal, &vertical);

        let mut merged = combined;
        for _ in 0..self.params.merge_dilate_iterations {
            merged = dilate_rect(&merged, self.params.merge_dilate_kernel, self.params.merge_dilate_kernel);
        }

        self.best_candidate(&merged, image.width as u32, image.height as u32, self.params.min_area_fraction)
    }

    fn strategy_white_region(&self, image: &GrayImage) -> Option<GridBBox> {
        let binary = threshold(image, self.params.white_threshold, false);
        let closed = close_rect(&binary, self.params.white_close_kernel, self.params.white_close_kernel);
        self.best_candidate(
            &closed,
            image.width as u32,
            image.height as u32,
            self.params.white_region_min_area_fraction,
        )
    }

    fn best_candidate(&self, mask: &GrayImage, image_w: u32, image_h: u32, min_area_fraction: f64) -> Option<GridBBox> {
        let image_area = image_w as u64 * image_h as u64;
        mathdoku_core::contours::connected_components(mask)
            .into_iter()
            .filter(|comp| {
                comp.bbox.aspect() >= self.params.min_aspect
                    && comp.bbox.area() as f64 >= min_area_fraction * image_area as f64
            })
            .max_by_key(|comp| comp.bbox.area())
            .map(|comp| comp.bbox)
    }
}

fn or_masks(a: &GrayImage, b: &GrayImage) -> GrayImage {
    let mut out = a.clone();
    for (dst, &src) in out.data.iter_mut().zip(b.data.iter()) {
        if src != 0 {
            *dst = 255;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_square_frame(size: usize) -> GrayImage {
        let mut img = GrayImage::new(size, size);
        img.data.fill(255);
        let margin = size / 8;
        for x in margin..size - margin {
            img.set(x, margin, 0);
            img.set(x, size - margin - 1, 0);
        }
        for y in margin..size - margin {
            img.set(margin, y, 0);
            img.set(size - margin - 1, y, 0);
        }
        img
    }

    #[test]
    fn locates_a_square_frame() {
        let img = make_square_frame(120);
        let locator = GridLocator::new(GridLocatorParams::default());
        let bbox = locator.locate(&img).unwrap();
        assert!(bbox.aspect() > 0.7);
    }

    #[test]
    fn fails_on_blank_image() {
        let img = GrayImage::new(50, 50);
        let locator = GridLocator::new(GridLocatorParams::default());
        assert!(locator.locate(&img).is_err());
    }
}

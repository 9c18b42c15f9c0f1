//! Axis-aligned bounding box over `GrayImage` pixel coordinates.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in full-image pixel coordinates.
///
/// `min(w,h)/max(w,h) >= 0.70` and `w*h >= 0.03 * imgW*imgH` are expected of
/// any `GridBBox` accepted by the grid locator; `is_plausible_grid` checks
/// both against the source image dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridBBox {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    pub fn aspect(&self) -> f32 {
        let (small, large) = if self.w < self.h {
            (self.w, self.h)
        } else {
            (self.h, self.w)
        };
        if large == 0 {
            0.0
        } else {
            small as f32 / large as f32
        }
    }

    pub fn is_plausible_grid(&self, image_w: u32, image_h: u32) -> bool {
        let image_area = image_w as u64 * image_h as u64;
        if image_area == 0 {
            return false;
        }
        self.aspect() >= 0.70 && self.area() as f64 >= 0.03 * image_area as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_bbox_passes_aspect_check() {
        let bbox = GridBBox::new(0, 0, 400, 400);
        assert!(bbox.is_plausible_grid(1000, 1000));
    }

    #[test]
    fn sliver_bbox_fails_aspect_check() {
        let bbox = GridBBox::new(0, 0, 400, 20);
        assert!(!bbox.is_plausible_grid(1000, 1000));
    }

    #[test]
    fn tiny_bbox_fails_area_check() {
        let bbox = GridBBox::new(0, 0, 10, 10);
        assert!(!bbox.is_plausible_grid(1000, 1000));
    }
}

//! Measures each internal lattice segment's local darkness and separates
//! cage boundaries ("thick") from intra-cage lines ("thin") by an
//! automatically chosen threshold.

use mathdoku_core::lattice::BorderMap;
use mathdoku_core::otsu::otsu_threshold_scores;
use mathdoku_core::{GrayImage, GridBBox, Lattice};

use crate::params::BorderClassifierParams;

pub struct BorderClassifier {
    params: BorderClassifierParams,
}

impl BorderClassifier {
    pub fn new(params: BorderClassifierParams) -> Self {
        Self { params }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, image, lattice)))]
    pub fn classify(&self, image: &GrayImage, bbox: &GridBBox, lattice: &Lattice) -> BorderMap {
        let crop = image.crop(bbox.x as usize, bbox.y as usize, bbox.w as usize, bbox.h as usize);
        let n = lattice.n;

        let mut h_scores = vec![0.0f32; (n - 1) * n];
        let mut v_scores = vec![0.0f32; n * (n - 1)];

        for r in 1..n {
            for c in 0..n {
                h_scores[(r - 1) * n + c] = self.horizontal_segment_score(&crop, lattice, r, c);
            }
        }
        for r in 0..n {
            for c in 1..n {
                v_scores[r * (n - 1) + (c - 1)] = self.vertical_segment_score(&crop, lattice, r, c);
            }
        }

        let all_scores: Vec<f32> = h_scores.iter().chain(v_scores.iter()).copied().collect();
        let threshold = otsu_threshold_scores(&all_scores, self.params.threshold_floor);
        log::debug!("border classifier threshold={threshold}");

        let mut map = BorderMap::new(n);
        for r in 1..n {
            for c in 0..n {
                map.h_set(r, c, h_scores[(r - 1) * n + c] > threshold);
            }
        }
        for r in 0..n {
            for c in 1..n {
                map.v_set(r, c, v_scores[r * (n - 1) + (c - 1)] > threshold);
            }
        }
        map
    }

    fn horizontal_segment_score(&self, crop: &GrayImage, lattice: &Lattice, r: usize, c: usize) -> f32 {
        let cell_w = lattice.cell_width(c) as f32;
        let cell_h_above = lattice.cell_height(r - 1);
        let cell_h_below = lattice.cell_height(r);
        let min_cell = (cell_w as i32).min(cell_h_above.min(cell_h_below));
        let radius = ((0.02 * min_cell as f32).floor() as i32).max(2);

        let inset = (self.params.endpoint_inset_fraction * cell_w) as i32;
        let x0 = lattice.v[c] + inset;
        let x1 = lattice.v[c + 1] - inset;
        let row = lattice.h[r];
        let y0 = row - radius;
        let y1 = row + radius;

        let strip = gather_strip(crop, x0, x1, y0, y1);
        darkness_score(&strip, self.params.darkness_percentile)
    }

    fn vertical_segment_score(&self, crop: &GrayImage, lattice: &Lattice, r: usize, c: usize) -> f32 {
        let cell_h = lattice.cell_height(r) as f32;
        let cell_w_left = lattice.cell_width(c - 1);
        let cell_w_right = lattice.cell_width(c);
        let min_cell = (cell_h as i32).min(cell_w_left.min(cell_w_right));
        let radius = ((0.02 * min_cell as f32).floor() as i32).max(2);

        let inset = (self.params.endpoint_inset_fraction * cell_h) as i32;
        let y0 = lattice.h[r] + inset;
        let y1 = lattice.h[r + 1] - inset;
        let col = lattice.v[c];
        let x0 = col - radius;
        let x1 = col + radius;

        let strip = gather_strip(crop, x0, x1, y0, y1);
        darkness_score(&strip, self.params.darkness_percentile)
    }
}

fn gather_strip(image: &GrayImage, x0: i32, x1: i32, y0: i32, y1: i32) -> Vec<u8> {
    let x0 = x0.clamp(0, image.width as i32 - 1);
    let x1 = x1.clamp(x0, image.width as i32 - 1);
    let y0 = y0.clamp(0, image.height as i32 - 1);
    let y1 = y1.clamp(y0, image.height as i32 - 1);

    let mut strip = Vec::new();
    for y in y0..=y1 {
        for x in x0..=x1 {
            strip.push(image.get(x as usize, y as usize));
        }
    }
    strip
}

fn darkness_score(strip: &[u8], percentile: f32) -> f32 {
    if strip.is_empty() {
        return 0.0;
    }
    255.0 - mathdoku_core::image::percentile_u8(strip, percentile) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_marks_dark_lines_thick() {
        let mut img = GrayImage::new(100, 100);
        img.data.fill(255);
        // A heavy mid border at row index 2 (of a 4x4 grid, 25px cells).
        for x in 0..100 {
            for dy in -2i32..=2 {
                let y = (50 + dy).clamp(0, 99) as usize;
                img.set(x, y, 0);
            }
        }
        let lattice = Lattice::new(4, vec![0, 25, 50, 75, 100], vec![0, 25, 50, 75, 100], 100, 100).unwrap();
        let bbox = GridBBox::new(0, 0, 100, 100);
        let classifier = BorderClassifier::new(BorderClassifierParams::default());
        let map = classifier.classify(&img, &bbox, &lattice);
        assert!(map.h_get(2, 0));
    }
}

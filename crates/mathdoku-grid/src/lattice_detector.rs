//! Horizontal/vertical lattice-line candidate detection via adaptive
//! thresholding and row/column projection peaks.

use mathdoku_core::morphology::adaptive_gaussian_threshold;
use mathdoku_core::GrayImage;

use crate::params::LatticeDetectorParams;

pub struct LatticeDetector {
    params: LatticeDetectorParams,
}

impl LatticeDetector {
    pub fn new(params: LatticeDetectorParams) -> Self {
        Self { params }
    }

    /// Returns `(h_candidates, v_candidates)`: row and column indices (into
    /// `crop`) where a run of the adaptive-threshold projection peaked.
    /// Both lists are monotonic by construction (scanned left to right /
    /// top to bottom).
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, crop)))]
    pub fn detect(&self, crop: &GrayImage) -> (Vec<i32>, Vec<i32>) {
        let binary = adaptive_gaussian_threshold(crop, self.params.adaptive_block, self.params.adaptive_c, true);

        let h_projection = row_projection(&binary);
        let v_projection = column_projection(&binary);

        let h_candidates = find_peaks(&h_projection, self.params.peak_threshold);
        let v_candidates = find_peaks(&v_projection, self.params.peak_threshold);
        (h_candidates, v_candidates)
    }
}

fn row_projection(mask: &GrayImage) -> Vec<f32> {
    (0..mask.height)
        .map(|y| {
            let row_start = y * mask.width;
            let lit = mask.data[row_start..row_start + mask.width]
                .iter()
                .filter(|&&v| v != 0)
                .count();
            lit as f32 / mask.width as f32
        })
        .collect()
}

fn column_projection(mask: &GrayImage) -> Vec<f32> {
    (0..mask.width)
        .map(|x| {
            let lit = (0..mask.height).filter(|&y| mask.get(x, y) != 0).count();
            lit as f32 / mask.height as f32
        })
        .collect()
}

/// Open a run when the projection first exceeds `threshold`, close it when
/// it drops back to `<= threshold`; report the position of the run's
/// maximum value.
fn find_peaks(projection: &[f32], threshold: f32) -> Vec<i32> {
    let mut peaks = Vec::new();
    let mut run_start: Option<usize> = None;
    let mut run_best_idx = 0usize;
    let mut run_best_val = f32::MIN;

    for (i, &v) in projection.iter().enumerate() {
        if v > threshold {
            if run_start.is_none() {
                run_start = Some(i);
                run_best_idx = i;
                run_best_val = v;
            } else if v > run_best_val {
                run_best_val = v;
                run_best_idx = i;
            }
        } else if run_start.is_some() {
            peaks.push(run_best_idx as i32);
            run_start = None;
            run_best_val = f32::MIN;
        }
    }
    if run_start.is_some() {
        peaks.push(run_best_idx as i32);
    }
    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_peaks_reports_one_position_per_run() {
        let projection = vec![0.0, 0.1, 0.5, 0.9, 0.4, 0.0, 0.0, 0.6, 0.3, 0.0];
        let peaks = find_peaks(&projection, 0.25);
        assert_eq!(peaks, vec![3, 7]);
    }

    #[test]
    fn detect_finds_candidates_on_a_striped_grid() {
        let mut img = GrayImage::new(40, 40);
        img.data.fill(255);
        for y in [0usize, 13, 26, 39] {
            for x in 0..40 {
                img.set(x, y, 0);
            }
        }
        for x in [0usize, 13, 26, 39] {
            for y in 0..40 {
                img.set(x, y, 0);
            }
        }
        let detector = LatticeDetector::new(LatticeDetectorParams::default());
        let (h, v) = detector.detect(&img);
        assert!(!h.is_empty());
        assert!(!v.is_empty());
    }
}

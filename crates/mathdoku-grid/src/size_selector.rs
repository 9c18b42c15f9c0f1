//! Chooses the grid size N (or validates a forced N) by fitting the
//! detected lattice-line candidates to N+1 evenly-spaced positions and
//! scoring the fit.

use mathdoku_core::lattice::Lattice;

use crate::error::LatticeError;
use crate::params::SizeSelectorParams;

pub struct SizeSelector {
    params: SizeSelectorParams,
}

impl SizeSelector {
    pub fn new(params: SizeSelectorParams) -> Self {
        Self { params }
    }

    /// `bbox_h`/`bbox_w` are the cropped grid rectangle's pixel dimensions;
    /// `h_candidates`/`v_candidates` are the row/column peak positions from
    /// `LatticeDetector`. If `forced_n` is set, scoring is skipped.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, h_candidates, v_candidates)))]
    pub fn select(
        &self,
        h_candidates: &[i32],
        v_candidates: &[i32],
        bbox_h: i32,
        bbox_w: i32,
        forced_n: Option<usize>,
    ) -> Result<Lattice, LatticeError> {
        if h_candidates.is_empty() {
            return Err(LatticeError::NoCandidates { axis: "horizontal" });
        }
        if v_candidates.is_empty() {
            return Err(LatticeError::NoCandidates { axis: "vertical" });
        }

        let candidate_ns: Vec<usize> = match forced_n {
            Some(n) => vec![n],
            None => (self.params.min_n..=self.params.max_n).collect(),
        };

        let mut best: Option<(usize, Vec<i32>, Vec<i32>, f32)> = None;
        for n in candidate_ns {
            let (h_lines, h_score) = self.fit_lines(h_candidates, n, bbox_h);
            let (v_lines, v_score) = self.fit_lines(v_candidates, n, bbox_w);
            let total = h_score + v_score;
            log::debug!("size candidate n={n} score={total}");
            if best.as_ref().map(|(_, _, _, s)| total < *s).unwrap_or(true) {
                best = Some((n, h_lines, v_lines, total));
            }
        }

        let (n, h_lines, v_lines, score) = best.ok_or(LatticeError::NoSizeFit)?;
        if forced_n.is_none() && score.is_infinite() {
            return Err(LatticeError::NoSizeFit);
        }

        Lattice::new(n, h_lines, v_lines, bbox_h, bbox_w).ok_or(LatticeError::NoSizeFit)
    }

    /// Fit `n+1` line positions to `candidates`, snapping to a nearby
    /// candidate within `snap_fraction * spacing`, else using the expected
    /// evenly-spaced position verbatim. Returns the fitted lines and their
    /// score (lower is better; `+inf` signals a degenerate fit).
    fn fit_lines(&self, candidates: &[i32], n: usize, extent: i32) -> (Vec<i32>, f32) {
        if candidates.len() < 2 {
            return (evenly_spaced(0, extent, n), f32::INFINITY);
        }

        let first = candidates[0];
        let last = *candidates.last().unwrap();
        let spacing = (last - first) as f32 / n as f32;

        let mut lines = Vec::with_capacity(n + 1);
        let mut matched = 0u32;
        let mut error = 0.0f32;

        for k in 0..=n {
            let expected = first as f32 + k as f32 * spacing;
            let nearest = candidates
                .iter()
                .min_by(|a, b| {
                    let da = (**a as f32 - expected).abs();
                    let db = (**b as f32 - expected).abs();
                    da.partial_cmp(&db).unwrap()
                })
                .copied()
                .unwrap();
            let dist = (nearest as f32 - expected).abs();
            if dist <= self.params.snap_fraction * spacing {
                lines.push(nearest);
                matched += 1;
                error += dist;
            } else {
                lines.push(expected.round() as i32);
                error += 0.5 * spacing;
            }
        }

        let score = if spacing < self.params.min_spacing_px {
            f32::INFINITY
        } else {
            -1000.0 * matched as f32 + error / (n + 1) as f32
        };

        (lines, score)
    }
}

fn evenly_spaced(first: i32, last: i32, n: usize) -> Vec<i32> {
    let spacing = (last - first) as f32 / n as f32;
    (0..=n).map(|k| (first as f32 + k as f32 * spacing).round() as i32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_n_matching_evenly_spaced_candidates() {
        let h = vec![0, 25, 50, 75, 100];
        let v = vec![0, 25, 50, 75, 100];
        let selector = SizeSelector::new(SizeSelectorParams::default());
        let lattice = selector.select(&h, &v, 100, 100, None).unwrap();
        assert_eq!(lattice.n, 4);
        assert_eq!(lattice.h, vec![0, 25, 50, 75, 100]);
    }

    #[test]
    fn forced_n_skips_scoring() {
        let h = vec![0, 20, 40, 60, 80, 100, 120];
        let v = vec![0, 20, 40, 60, 80, 100, 120];
        let selector = SizeSelector::new(SizeSelectorParams::default());
        let lattice = selector.select(&h, &v, 120, 120, Some(6)).unwrap();
        assert_eq!(lattice.n, 6);
    }

    #[test]
    fn rejects_when_no_candidates_present() {
        let selector = SizeSelector::new(SizeSelectorParams::default());
        assert!(selector.select(&[], &[0, 10], 100, 100, None).is_err());
    }
}

//! Otsu's between-class-variance threshold, in two flavors.
//!
//! `otsu_threshold_from_samples` is the classic 256-bin histogram version.
//! `otsu_threshold_scores` generalizes the same between-class-variance
//! maximization to an arbitrary 1-D float distribution, trying every
//! distinct observed value as a candidate split rather than 256 fixed bins —
//! needed for the border classifier's darkness scores, which aren't byte
//! intensities.

/// Classic Otsu threshold over 8-bit samples: builds a 256-bin histogram and
/// picks the bin boundary maximizing between-class variance.
pub fn otsu_threshold_from_samples(samples: &[u8]) -> u8 {
    if samples.is_empty() {
        return 0;
    }
    let mut histogram = [0u32; 256];
    for &s in samples {
        histogram[s as usize] += 1;
    }
    let total = samples.len() as f64;

    let mut sum_all = 0.0f64;
    for (i, &count) in histogram.iter().enumerate() {
        sum_all += i as f64 * count as f64;
    }

    let mut weight_bg = 0.0f64;
    let mut sum_bg = 0.0f64;
    let mut best_variance = -1.0f64;
    let mut best_threshold = 0u8;

    for (t, &count) in histogram.iter().enumerate() {
        weight_bg += count as f64;
        if weight_bg == 0.0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg <= 0.0 {
            break;
        }
        sum_bg += t as f64 * count as f64;
        let mean_bg = sum_bg / weight_bg;
        let mean_fg = (sum_all - sum_bg) / weight_fg;
        let diff = mean_bg - mean_fg;
        let variance = weight_bg * weight_fg * diff * diff;
        if variance > best_variance {
            best_variance = variance;
            best_threshold = t as u8;
        }
    }

    best_threshold
}

/// Otsu's rule generalized to an arbitrary set of float scores: every
/// distinct observed value is tried as a candidate split, and the one
/// maximizing `|lo|*|hi|*(mean(hi)-mean(lo))^2` is returned, floored at
/// `floor` so near-uniform distributions don't produce a meaningless split.
pub fn otsu_threshold_scores(scores: &[f32], floor: f32) -> f32 {
    if scores.is_empty() {
        return floor;
    }
    let mut distinct: Vec<f32> = scores.to_vec();
    distinct.sort_by(|a, b| a.partial_cmp(b).unwrap());
    distinct.dedup();

    let mut best_variance = -1.0f64;
    let mut best_threshold = floor;

    for &candidate in &distinct {
        let (lo, hi): (Vec<f32>, Vec<f32>) = scores.iter().partition(|&&s| s <= candidate);
        if lo.is_empty() || hi.is_empty() {
            continue;
        }
        let mean_lo = lo.iter().map(|&v| v as f64).sum::<f64>() / lo.len() as f64;
        let mean_hi = hi.iter().map(|&v| v as f64).sum::<f64>() / hi.len() as f64;
        let diff = mean_hi - mean_lo;
        let variance = lo.len() as f64 * hi.len() as f64 * diff * diff;
        if variance > best_variance {
            best_variance = variance;
            best_threshold = candidate;
        }
    }

    best_threshold.max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_otsu_splits_bimodal_samples() {
        let mut samples = vec![10u8; 50];
        samples.extend(vec![220u8; 50]);
        let t = otsu_threshold_from_samples(&samples);
        assert!(t > 10 && t < 220);
    }

    #[test]
    fn score_otsu_splits_bimodal_scores() {
        let mut scores = vec![1.0f32; 20];
        scores.extend(vec![50.0f32; 20]);
        let t = otsu_threshold_scores(&scores, 3.0);
        assert!(t > 1.0 && t < 50.0);
    }

    #[test]
    fn score_otsu_respects_floor_on_uniform_input() {
        let scores = vec![2.0f32; 10];
        let t = otsu_threshold_scores(&scores, 3.0);
        assert_eq!(t, 3.0);
    }
}

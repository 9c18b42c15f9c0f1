use serde::{Deserialize, Serialize};

/// Tunables for `GridLocator`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GridLocatorParams {
    /// The long structuring element used by Strategy A is
    /// `min(H,W) / open_divisor` pixels long.
    pub open_divisor: u32,
    /// Square kernel used to merge near-touching segments after the
    /// horizontal/vertical opens.
    pub merge_dilate_kernel: usize,
    pub merge_dilate_iterations: usize,
    /// Minimum fraction of image area a Strategy A candidate bbox must cover.
    pub min_area_fraction: f64,
    /// Minimum aspect ratio (short side / long side) a candidate must have.
    pub min_aspect: f32,
    /// Strategy B: intensity above which a pixel counts as "white".
    pub white_threshold: u8,
    /// Strategy B: square closing kernel size.
    pub white_close_kernel: usize,
    /// Minimum fraction of image area a Strategy B candidate bbox must
    /// cover. Looser than `min_area_fraction`: Strategy B exists to rescue
    /// bboxes Strategy A rejected, down to the floor `GridBBox` itself
    /// requires.
    pub white_region_min_area_fraction: f64,
}

impl Default for GridLocatorParams {
    fn default() -> Self {
        Self {
            open_divisor: 3,
            merge_dilate_kernel: 5,
            merge_dilate_iterations: 2,
            min_area_fraction: 0.05,
            min_aspect: 0.70,
            white_threshold: 200,
            white_close_kernel: 15,
            white_region_min_area_fraction: 0.03,
        }
    }
}

/// Tunables for `LatticeDetector`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LatticeDetectorParams {
    pub adaptive_block: usize,
    pub adaptive_c: i32,
    pub peak_threshold: f32,
}

impl Default for LatticeDetectorParams {
    fn default() -> Self {
        Self {
            adaptive_block: 15,
            adaptive_c: 5,
            peak_threshold: 0.25,
        }
    }
}

/// Tunables for `SizeSelector`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SizeSelectorParams {
    pub min_n: usize,
    pub max_n: usize,
    pub min_spacing_px: f32,
    pub snap_fraction: f32,
}

impl Default for SizeSelectorParams {
    fn default() -> Self {
        Self {
            min_n: 4,
            max_n: 9,
            min_spacing_px: 10.0,
            snap_fraction: 0.20,
        }
    }
}

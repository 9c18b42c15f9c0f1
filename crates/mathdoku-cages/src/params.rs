use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BorderClassifierParams {
    /// Fraction of a cell's span inset from each strip endpoint, to exclude
    /// corner regions and cage-label glyphs.
    pub endpoint_inset_fraction: f32,
    /// Percentile used for the strip darkness score (robust to stray dark
    /// pixels bleeding in from nearby labels).
    pub darkness_percentile: f32,
    /// Floor applied to the automatically chosen Otsu threshold.
    pub threshold_floor: f32,
}

impl Default for BorderClassifierParams {
    fn default() -> Self {
        Self {
            endpoint_inset_fraction: 0.25,
            darkness_percentile: 10.0,
            threshold_floor: 3.0,
        }
    }
}

use serde::{Deserialize, Serialize};

/// One OCR engine invocation's configuration: a character whitelist, a
/// page-segmentation mode, and legacy-vs-LSTM engine selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrConfig {
    pub whitelist: Option<String>,
    pub psm: u8,
    /// Mirrors Tesseract's `--oem`: `true` selects the legacy engine,
    /// `false` the LSTM engine.
    pub legacy_engine: bool,
}

impl OcrConfig {
    pub fn new(whitelist: Option<&str>, psm: u8, legacy_engine: bool) -> Self {
        Self {
            whitelist: whitelist.map(str::to_owned),
            psm,
            legacy_engine,
        }
    }
}

/// The eight configurations tried in order by multi-configuration voting
/// whitelist + segmentation hint combinations, then two
/// whitelist-free passes to catch ambiguous cases.
pub fn vote_configs() -> Vec<OcrConfig> {
    const DIGITS_OPS: &str = "0123456789+-x/";
    vec![
        OcrConfig::new(Some(DIGITS_OPS), 7, false),
        OcrConfig::new(Some(DIGITS_OPS), 8, false),
        OcrConfig::new(Some(DIGITS_OPS), 13, false),
        OcrConfig::new(Some(DIGITS_OPS), 7, true),
        OcrConfig::new(Some(DIGITS_OPS), 8, true),
        OcrConfig::new(Some(DIGITS_OPS), 13, true),
        OcrConfig::new(None, 7, false),
        OcrConfig::new(None, 8, false),
    ]
}

/// Operator-only whitelist used by trailing-glyph detection.
pub fn operator_configs() -> Vec<OcrConfig> {
    const OPS: &str = "+-x/";
    vec![
        OcrConfig::new(Some(OPS), 10, false),
        OcrConfig::new(Some(OPS), 8, false),
        OcrConfig::new(Some(OPS), 7, false),
        OcrConfig::new(Some(OPS), 10, true),
        OcrConfig::new(Some(OPS), 8, true),
        OcrConfig::new(Some(OPS), 7, true),
    ]
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LabelReaderParams {
    pub small_cell_threshold_px: u32,
    pub label_width_fraction: f32,
    pub label_height_fraction: f32,
    pub trim_threshold: u8,
    pub trim_strip_solid_fraction: f32,
    pub trim_strip_max_fraction: f32,
    pub min_contour_area: u32,
    pub min_contour_aspect: f32,
    pub ocr_prep_min_height_px: u32,
    pub ocr_pad_px: usize,
    pub retry_upscales: [usize; 2],
    pub recovery_upscales: [usize; 2],
    pub recovery_margins: [u32; 3],
    pub trailing_component_min_width_fraction: f32,
    pub trailing_component_max_area_fraction: f32,
}

impl Default for LabelReaderParams {
    fn default() -> Self {
        Self {
            small_cell_threshold_px: 50,
            label_width_fraction: 0.92,
            label_height_fraction: 0.42,
            trim_threshold: 160,
            trim_strip_solid_fraction: 0.90,
            trim_strip_max_fraction: 0.25,
            min_contour_area: 20,
            min_contour_aspect: 0.08,
            ocr_prep_min_height_px: 80,
            ocr_pad_px: 12,
            retry_upscales: [3, 4],
            recovery_upscales: [4, 6],
            recovery_margins: [2, 3, 4],
            trailing_component_min_width_fraction: 0.35,
            trailing_component_max_area_fraction: 0.35,
        }
    }
}

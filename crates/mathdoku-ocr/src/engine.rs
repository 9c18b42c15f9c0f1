//! The OCR engine seam. Grounded on the `Recognizer` trait shape in the
//! `measurementor` Tauri example (`name`/`recognize` over a decoded image),
//! reworked around a single `recognize` call parameterized by `OcrConfig`
//! rather than a fixed per-recognizer configuration.

use mathdoku_core::GrayImage;

use crate::error::OcrError;
use crate::params::OcrConfig;

pub trait OcrEngine {
    fn recognize(&self, image: &GrayImage, config: &OcrConfig) -> Result<String, OcrError>;
}

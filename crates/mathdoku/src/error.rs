//! The facade's error type, wrapping every stage's error with `#[from]`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MathdokuError {
    /// OCR engine missing, reported before any image work.
    #[error("OCR engine unavailable: {0}")]
    Configuration(#[from] mathdoku_ocr::OcrError),

    /// Image file not found or undecodable.
    #[error("could not read input image: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not decode input image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Grid bounding box not found, or no candidate line fit
    /// for any N in [4,9].
    #[error("grid structure could not be recovered: {0}")]
    Structural(#[from] mathdoku_grid::GridError),
}

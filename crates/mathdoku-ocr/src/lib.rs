//! Cage label reading: crop extraction, trimming, OCR preparation,
//! multi-configuration voting, and post-recognition correction. The
//! dominant component of the recognition pipeline.

pub mod corrections;
pub mod engine;
pub mod error;
pub mod label_reader;
pub mod label_region;
pub mod params;
pub mod prepare;
pub mod tesseract_cli;
pub mod trim;
pub mod voting;

pub use engine::OcrEngine;
pub use error::OcrError;
pub use label_reader::{CageLabel, LabelReader};
pub use params::{LabelReaderParams, OcrConfig};
pub use tesseract_cli::TesseractCliEngine;

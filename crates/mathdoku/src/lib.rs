//! Facade crate: wires grid localization, lattice reconstruction, cage
//! grouping, and label OCR into a single image-to-spec pipeline.

pub mod context;
pub mod decode;
pub mod error;
pub mod pipeline;
pub mod spec;

pub use context::RecognitionContext;
pub use error::MathdokuError;
pub use pipeline::{recognize, recognize_from_path};
pub use spec::{assemble, cell_a1, CageOutput, PuzzleSpec};

pub use mathdoku_cages as cages;
pub use mathdoku_core as core;
pub use mathdoku_grid as grid;
pub use mathdoku_ocr as ocr;

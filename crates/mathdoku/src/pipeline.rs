//! Top-level entry points wiring every stage together in strict
//! left-to-right order: locate, reconstruct, classify, group, read, assemble.

use std::path::Path;

use mathdoku_cages::{BorderClassifier, CageBuilder};
use mathdoku_core::GrayImage;
use mathdoku_grid::{detect_grid, GridDetectParams};
use mathdoku_ocr::LabelReader;

use crate::context::RecognitionContext;
use crate::decode::load_grayscale;
use crate::error::MathdokuError;
use crate::spec::{assemble, PuzzleSpec};

/// Run the full pipeline against an already-decoded grayscale image.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(image, ctx)))]
pub fn recognize(image: &GrayImage, ctx: &RecognitionContext<'_>) -> Result<PuzzleSpec, MathdokuError> {
    let grid_params = GridDetectParams {
        locator: ctx.grid_locator,
        lattice: ctx.lattice_detector,
        size: ctx.size_selector,
        forced_n: ctx.forced_n,
    };
    let (bbox, lattice) = detect_grid(image, &grid_params)?;
    log::info!("located {}x{} grid at {:?}", lattice.n, lattice.n, bbox);

    let borders = BorderClassifier::new(ctx.border_classifier).classify(image, &bbox, &lattice);
    let cages = CageBuilder::new().build(lattice.n, &borders);
    log::info!("grouped {} cells into {} cages", lattice.n * lattice.n, cages.len());

    let labels = LabelReader::new(ctx.label_reader, ctx.ocr_engine).read_labels(image, &bbox, &lattice, &cages);

    Ok(assemble(lattice.n, &cages, &labels))
}

/// Decode `path` and run the full pipeline against it.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(ctx)))]
pub fn recognize_from_path(path: &Path, ctx: &RecognitionContext<'_>) -> Result<PuzzleSpec, MathdokuError> {
    let image = load_grayscale(path)?;
    recognize(&image, ctx)
}

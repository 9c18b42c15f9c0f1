//! End-to-end pipeline test over a synthetically drawn grid, exercising
//! every stage together (GridLocator through Assembler) rather than just
//! unit-level behavior.

use mathdoku::{recognize, RecognitionContext};
use mathdoku_core::GrayImage;
use mathdoku_ocr::{OcrConfig, OcrEngine, OcrError};

struct StubEngine;

impl OcrEngine for StubEngine {
    fn recognize(&self, _image: &GrayImage, _config: &OcrConfig) -> Result<String, OcrError> {
        Ok("9".to_string())
    }
}

/// Draws a 4x4 grid (40px cells, 160x160 image) with a uniform-weight
/// lattice: outer frame plus every internal line at the same thickness.
/// Every border ends up the same darkness, exercising the border
/// classifier's threshold-floor path and collapsing the
/// grid into a single whole-grid cage.
fn draw_uniform_grid(n: usize, cell: usize) -> GrayImage {
    let size = n * cell;
    let mut image = GrayImage::new(size, size);
    image.data.fill(255);
    for k in 0..=n {
        let pos = (k * cell).min(size - 1);
        for x in 0..size {
            image.set(x, pos, 0);
        }
        for y in 0..size {
            image.set(pos, y, 0);
        }
    }
    image
}

#[test]
fn recognizes_a_single_whole_grid_cage() {
    let image = draw_uniform_grid(4, 40);
    let engine = StubEngine;
    let ctx = RecognitionContext::new(&engine).with_forced_size(Some(4));

    let spec = recognize(&image, &ctx).expect("pipeline should succeed on a clean synthetic grid");

    assert_eq!(spec.size, 4);
    let total_cells: usize = spec.cages.iter().map(|cage| cage.cells.len()).sum();
    assert_eq!(total_cells, 16);

    let mut seen = std::collections::HashSet::new();
    for cage in &spec.cages {
        for cell in &cage.cells {
            assert!(seen.insert(cell.clone()), "cell {cell} appeared twice");
        }
    }
    assert_eq!(seen.len(), 16);
}

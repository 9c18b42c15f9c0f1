//! Bundles per-stage configuration and the OCR engine into a single value
//! threaded through the pipeline, instead of global mutable state.

use mathdoku_cages::BorderClassifierParams;
use mathdoku_grid::{GridLocatorParams, LatticeDetectorParams, SizeSelectorParams};
use mathdoku_ocr::{LabelReaderParams, OcrEngine};

pub struct RecognitionContext<'a> {
    pub forced_n: Option<usize>,
    pub grid_locator: GridLocatorParams,
    pub lattice_detector: LatticeDetectorParams,
    pub size_selector: SizeSelectorParams,
    pub border_classifier: BorderClassifierParams,
    pub label_reader: LabelReaderParams,
    pub ocr_engine: &'a dyn OcrEngine,
}

impl<'a> RecognitionContext<'a> {
    pub fn new(ocr_engine: &'a dyn OcrEngine) -> Self {
        Self {
            forced_n: None,
            grid_locator: GridLocatorParams::default(),
            lattice_detector: LatticeDetectorParams::default(),
            size_selector: SizeSelectorParams::default(),
            border_classifier: BorderClassifierParams::default(),
            label_reader: LabelReaderParams::default(),
            ocr_engine,
        }
    }

    pub fn with_forced_size(mut self, n: Option<usize>) -> Self {
        self.forced_n = n;
        self
    }
}

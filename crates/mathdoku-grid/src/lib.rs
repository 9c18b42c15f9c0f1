//! Grid localization, lattice reconstruction, and size selection: the first
//! three stages of the recognition pipeline.

pub mod error;
pub mod lattice_detector;
pub mod locator;
pub mod params;
pub mod size_selector;

pub use error::{GridLocateError, LatticeError};
pub use lattice_detector::LatticeDetector;
pub use locator::GridLocator;
pub use params::{GridLocatorParams, LatticeDetectorParams, SizeSelectorParams};
pub use size_selector::SizeSelector;

use mathdoku_core::lattice::Lattice;
use mathdoku_core::{GrayImage, GridBBox};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error(transparent)]
    Locate(#[from] GridLocateError),
    #[error(transparent)]
    Lattice(#[from] LatticeError),
}

/// Parameters for the combined locate+reconstruct pipeline.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridDetectParams {
    pub locator: GridLocatorParams,
    pub lattice: LatticeDetectorParams,
    pub size: SizeSelectorParams,
    pub forced_n: Option<usize>,
}

/// Locate the puzzle grid, recover its lattice lines, and (unless
/// `forced_n` is set) pick the best-fitting grid size.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(image, params)))]
pub fn detect_grid(image: &GrayImage, params: &GridDetectParams) -> Result<(GridBBox, Lattice), GridError> {
    let locator = GridLocator::new(params.locator);
    let bbox = locator.locate(image)?;

    let crop = image.crop(bbox.x as usize, bbox.y as usize, bbox.w as usize, bbox.h as usize);
    let detector = LatticeDetector::new(params.lattice);
    let (h_candidates, v_candidates) = detector.detect(&crop);

    let selector = SizeSelector::new(params.size);
    let lattice = selector.select(&h_candidates, &v_candidates, bbox.h as i32, bbox.w as i32, params.forced_n)?;

    log::info!("grid detected: n={} bbox={:?}", lattice.n, bbox);
    Ok((bbox, lattice))
}

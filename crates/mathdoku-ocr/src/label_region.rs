//! Per-cage label crop extraction.

use mathdoku_core::lattice::CellId;
use mathdoku_core::{GrayImage, Lattice};

use crate::params::LabelReaderParams;

/// The cage's anchor cell: minimum row, ties broken by minimum column.
pub fn top_left_cell(cage: &[CellId]) -> CellId {
    *cage
        .iter()
        .min_by_key(|cell| (cell.r, cell.c))
        .expect("cages are always non-empty")
}

/// Crop the label region inside `cell` out of `grid_crop` (the grid
/// rectangle, possibly already pre-upscaled by the caller), with the given
/// margin inset and the fixed width/height fractions of the cell's span.
pub fn extract_label_crop_with_margin(
    grid_crop: &GrayImage,
    lattice: &Lattice,
    cell: CellId,
    margin: u32,
    params: &LabelReaderParams,
) -> GrayImage {
    let cell_w = lattice.cell_width(cell.c);
    let cell_h = lattice.cell_height(cell.r);

    let x = lattice.v[cell.c] + margin as i32;
    let y = lattice.h[cell.r] + margin as i32;
    let w = (params.label_width_fraction * cell_w as f32) as usize;
    let h = (params.label_height_fraction * cell_h as f32) as usize;

    grid_crop.crop(x.max(0) as usize, y.max(0) as usize, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_cell_picks_min_row_then_min_col() {
        let cage = vec![CellId::new(1, 0), CellId::new(0, 2), CellId::new(0, 1)];
        assert_eq!(top_left_cell(&cage), CellId::new(0, 1));
    }

    #[test]
    fn extract_label_crop_stays_within_cell_bounds() {
        let lattice = Lattice::new(4, vec![0, 25, 50, 75, 100], vec![0, 25, 50, 75, 100], 100, 100).unwrap();
        let grid = GrayImage::new(100, 100);
        let crop = extract_label_crop_with_margin(&grid, &lattice, CellId::new(0, 0), 3, &LabelReaderParams::default());
        assert!(crop.width <= 25);
        assert!(crop.height <= 13);
    }
}

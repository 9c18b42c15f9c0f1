//! Raster decoding via the `image` crate into the grayscale buffer the
//! pipeline operates on.

use std::path::Path;

use mathdoku_core::GrayImage;

use crate::error::MathdokuError;

pub fn load_grayscale(path: &Path) -> Result<GrayImage, MathdokuError> {
    let decoded = image::open(path)?.into_luma8();
    let (width, height) = (decoded.width() as usize, decoded.height() as usize);
    Ok(GrayImage::from_raw(width, height, decoded.into_raw())
        .expect("image crate buffers are always width*height bytes for Luma8"))
}

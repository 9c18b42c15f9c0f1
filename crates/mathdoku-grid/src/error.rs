use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridLocateError {
    #[error("no plausible grid rectangle found in image")]
    GridNotFound,
}

#[derive(Debug, Error)]
pub enum LatticeError {
    #[error("no candidate lattice lines found on the {axis} axis")]
    NoCandidates { axis: &'static str },
    #[error("no valid grid size in [4,9] fit the detected lines")]
    NoSizeFit,
}

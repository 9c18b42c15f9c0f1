use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine executable not found on PATH or at a conventional install location")]
    EngineNotFound,
    #[error("failed to write OCR scratch file: {0}")]
    ScratchFile(#[from] std::io::Error),
    #[error("OCR engine invocation failed: {0}")]
    EngineFailure(String),
}

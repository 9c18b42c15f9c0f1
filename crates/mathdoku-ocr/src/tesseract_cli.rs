//! Default `OcrEngine`: shells out to the `tesseract` CLI binary, the same
//! way the original Python pipeline invoked it through `pytesseract` (which
//! is itself a subprocess wrapper, not a binding) and the way
//! `_require_tesseract` validated its presence before any image work began.

use std::path::PathBuf;
use std::process::Command;

use mathdoku_core::GrayImage;

use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::params::OcrConfig;

const CONVENTIONAL_PATHS: &[&str] = &["/usr/bin/tesseract", "/usr/local/bin/tesseract", "/opt/homebrew/bin/tesseract"];

pub struct TesseractCliEngine {
    executable: PathBuf,
}

impl TesseractCliEngine {
    /// Locate the `tesseract` executable via `PATH`, falling back to a few
    /// conventional install locations. Fails fast with `EngineNotFound` so
    /// the caller can surface a configuration error before touching the
    /// input image.
    pub fn locate() -> Result<Self, OcrError> {
        if let Some(path) = which("tesseract") {
            return Ok(Self { executable: path });
        }
        for candidate in CONVENTIONAL_PATHS {
            let path = PathBuf::from(candidate);
            if path.is_file() {
                return Ok(Self { executable: path });
            }
        }
        Err(OcrError::EngineNotFound)
    }
}

fn which(binary: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var).find_map(|dir| {
        let candidate = dir.join(binary);
        candidate.is_file().then_some(candidate)
    })
}

impl OcrEngine for TesseractCliEngine {
    fn recognize(&self, image: &GrayImage, config: &OcrConfig) -> Result<String, OcrError> {
        let input_file = tempfile::Builder::new().suffix(".png").tempfile()?;
        let input_path = input_file.path().to_path_buf();
        save_png(image, &input_path)?;

        let output_base = tempfile::Builder::new().tempfile()?;
        let output_base_path = output_base.path().to_path_buf();
        // Drop the NamedTempFile's own empty file so tesseract can create
        // `<base>.txt` without colliding with an existing empty file.
        drop(output_base);

        let mut command = Command::new(&self.executable);
        command.arg(&input_path).arg(&output_base_path);
        command.arg("--psm").arg(config.psm.to_string());
        command.arg("--oem").arg(if config.legacy_engine { "0" } else { "1" });
        if let Some(whitelist) = &config.whitelist {
            command.arg("-c").arg(format!("tessedit_char_whitelist={whitelist}"));
        }

        let status = command
            .output()
            .map_err(|e| OcrError::EngineFailure(e.to_string()))?;
        if !status.status.success() {
            return Err(OcrError::EngineFailure(
                String::from_utf8_lossy(&status.stderr).into_owned(),
            ));
        }

        let text_path = output_base_path.with_extension("txt");
        let text = std::fs::read_to_string(&text_path)?;
        let _ = std::fs::remove_file(&text_path);
        Ok(text)
    }
}

fn save_png(image: &GrayImage, path: &std::path::Path) -> Result<(), OcrError> {
    let buffer =
        image::GrayImage::from_raw(image.width as u32, image.height as u32, image.data.clone())
            .expect("GrayImage buffer length matches its declared dimensions");
    buffer.save(path).map_err(|e| OcrError::EngineFailure(e.to_string()))
}

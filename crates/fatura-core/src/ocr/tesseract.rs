//! Tesseract subprocess engine.

use std::process::Command;

use image::DynamicImage;
use tracing::{debug, warn};

use crate::error::OcrError;

use super::{error_text, validate_language, TextRecognizer};

/// OCR engine that shells out to the `tesseract` binary.
///
/// The image is staged as a PNG in a temp directory and handed to
/// `tesseract <image> stdout -l <lang>`.
#[derive(Debug, Default)]
pub struct TesseractRecognizer;

impl TesseractRecognizer {
    pub fn new() -> Self {
        Self
    }

    /// Whether the tesseract binary is on PATH.
    pub fn is_available(&self) -> bool {
        Command::new("tesseract")
            .arg("--version")
            .output()
            .is_ok()
    }

    /// Run the engine and return its raw text output.
    pub fn try_recognize(&self, image: &DynamicImage, lang: &str) -> Result<String, OcrError> {
        validate_language(lang)?;

        let dir = tempfile::tempdir()?;
        let image_path = dir.path().join("page.png");
        image.save_with_format(&image_path, image::ImageFormat::Png)?;

        let output = Command::new("tesseract")
            .arg(&image_path)
            .arg("stdout")
            .args(["-l", lang])
            .output();

        match output {
            Ok(output) if output.status.success() => {
                let text = String::from_utf8_lossy(&output.stdout).into_owned();
                debug!("tesseract produced {} chars (lang {lang})", text.len());
                Ok(text)
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(OcrError::EngineFailure(stderr.trim().to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(OcrError::EngineNotAvailable)
            }
            Err(e) => Err(OcrError::Io(e)),
        }
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &DynamicImage, lang: &str) -> String {
        match self.try_recognize(image, lang) {
            Ok(text) => text,
            Err(err) => {
                warn!("OCR failed: {err}");
                error_text(&err)
            }
        }
    }
}

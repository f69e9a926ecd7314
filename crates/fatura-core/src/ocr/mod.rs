//! OCR collaborator boundary.
//!
//! The pipeline treats OCR as a black box: image plus language code in,
//! raw text out. A failed engine call is folded into the returned text
//! as an error sentinel rather than raised, so downstream matching sees
//! ordinary text that happens to match no field.

mod enhance;
mod tesseract;

pub use enhance::enhance;
pub use tesseract::TesseractRecognizer;

use image::DynamicImage;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::OcrError;

/// Prefix of the text sentinel produced when an OCR call fails.
pub const OCR_ERROR_PREFIX: &str = "OCR error:";

lazy_static! {
    // tesseract language codes: "tur", "eng", "tur+eng", "osd"...
    static ref LANGUAGE_CODE: Regex =
        Regex::new(r"^[a-z]{3}(?:_[a-z]+)?(?:\+[a-z]{3}(?:_[a-z]+)?)*$").unwrap();
}

/// Check a language code before it reaches the engine subprocess.
pub fn validate_language(lang: &str) -> Result<(), OcrError> {
    if LANGUAGE_CODE.is_match(lang) {
        Ok(())
    } else {
        Err(OcrError::InvalidLanguage(lang.to_string()))
    }
}

/// Text recognition engine seam.
pub trait TextRecognizer {
    /// Recognize text in an image. Never fails: engine errors come back
    /// as an `OCR error: …` sentinel string in place of the text.
    fn recognize(&self, image: &DynamicImage, lang: &str) -> String;
}

/// Render an engine error as the text sentinel.
pub(crate) fn error_text(err: &OcrError) -> String {
    format!("{OCR_ERROR_PREFIX} {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_language_codes() {
        for lang in ["tur", "eng", "tur+eng", "osd", "chi_sim", "eng+chi_sim"] {
            assert!(validate_language(lang).is_ok(), "rejected {lang}");
        }
    }

    #[test]
    fn test_invalid_language_codes() {
        for lang in ["", "TUR", "tur eng", "tur;rm -rf /", "turkce", "t+e"] {
            assert!(
                matches!(validate_language(lang), Err(OcrError::InvalidLanguage(_))),
                "accepted {lang}"
            );
        }
    }

    #[test]
    fn test_error_text_carries_prefix() {
        let text = error_text(&OcrError::InvalidLanguage("xx".to_string()));
        assert!(text.starts_with(OCR_ERROR_PREFIX));
        assert!(text.contains("xx"));
    }
}

//! Configuration for the extraction pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Main configuration for the fatura pipeline.
///
/// Everything has a default, so a missing config file and an empty JSON
/// object behave the same.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaturaConfig {
    /// OCR language code passed to tesseract (e.g. "tur", "eng",
    /// "tur+eng").
    pub language: String,

    /// Apply image enhancement (contrast, grayscale, autocontrast)
    /// before OCR.
    pub enhance: bool,

    /// Table name used by the SQL export and the query runner.
    pub table_name: String,

    /// Directory holding the pattern store and the session table.
    /// `None` means the platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for FaturaConfig {
    fn default() -> Self {
        Self {
            language: "tur".to_string(),
            enhance: false,
            table_name: "fatura_df".to_string(),
            data_dir: None,
        }
    }
}

impl FaturaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FaturaConfig::default();
        assert_eq!(config.language, "tur");
        assert!(!config.enhance);
        assert_eq!(config.table_name, "fatura_df");
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"language": "eng"}"#).unwrap();

        let config = FaturaConfig::from_file(&path).unwrap();
        assert_eq!(config.language, "eng");
        assert_eq!(config.table_name, "fatura_df");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = FaturaConfig::default();
        config.enhance = true;
        config.data_dir = Some(PathBuf::from("/tmp/fatura"));
        config.save(&path).unwrap();

        let reloaded = FaturaConfig::from_file(&path).unwrap();
        assert!(reloaded.enhance);
        assert_eq!(reloaded.data_dir, Some(PathBuf::from("/tmp/fatura")));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{nope").unwrap();
        assert!(FaturaConfig::from_file(&path).is_err());
    }
}

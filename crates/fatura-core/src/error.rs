//! Error types for the fatura-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the fatura library.
#[derive(Error, Debug)]
pub enum FaturaError {
    /// Pattern store error.
    #[error("pattern store error: {0}")]
    Store(#[from] StoreError),

    /// Session state error.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Document decoding error.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// SQL query error.
    #[error("query error: {0}")]
    Query(#[from] QueryError),

    /// Record export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to the pattern store.
///
/// A corrupt store file is fatal to every store operation. It is never
/// silently replaced with defaults, so a typo while hand-editing the
/// file cannot wipe the user's rules.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file exists but does not parse as the expected JSON shape.
    #[error("pattern store {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Failed to read or write the store file.
    #[error("failed to access pattern store: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize rules for writing.
    #[error("failed to serialize rules: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors related to the persisted session table.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The session file exists but does not parse as the expected JSON shape.
    #[error("session file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Failed to read or write the session file.
    #[error("failed to access session file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the record table for writing.
    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors related to document decoding.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The file extension is not a supported document type.
    #[error("unsupported document type: {0}")]
    UnsupportedFormat(String),

    /// Failed to decode the bytes as an image.
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to parse the PDF document.
    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The PDF carries neither usable text nor an extractable image.
    #[error("PDF has no extractable text or image")]
    EmptyPdf,

    /// Failed to read the document.
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to OCR processing.
///
/// These never cross the extraction boundary: the OCR engine folds them
/// into the recognized text as an error sentinel and the pipeline
/// carries on, matching nothing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The tesseract binary was not found on PATH.
    #[error("tesseract not found; install tesseract-ocr and ensure it is on PATH")]
    EngineNotAvailable,

    /// The language code would not be accepted by tesseract.
    #[error("invalid OCR language code: {0}")]
    InvalidLanguage(String),

    /// The tesseract subprocess exited with a failure status.
    #[error("tesseract failed: {0}")]
    EngineFailure(String),

    /// Failed to encode the image for the engine.
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to stage the image or read engine output.
    #[error("I/O error during OCR: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to SQL queries over the record table.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The record table holds no records, so no table can be built.
    #[error("record table is empty")]
    EmptyTable,

    /// The SQL engine rejected the statement or the data.
    #[error("SQL error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Errors related to record export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write the export output.
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the fatura library.
pub type Result<T> = std::result::Result<T, FaturaError>;

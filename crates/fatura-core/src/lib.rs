//! Core library for Turkish invoice OCR processing.
//!
//! This crate provides:
//! - Document decoding (JPG/PNG, text- and image-based PDFs)
//! - OCR via the tesseract subprocess, with image enhancement
//! - A user-editable pattern store of named extraction rules
//! - Field extraction (canonical five-field and dynamic per-rule modes)
//! - An accumulating record table with CSV/JSON/SQL export and an
//!   in-memory SQL query runner

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod extract;
pub mod matcher;
pub mod ocr;
pub mod query;
pub mod rules;
pub mod session;
pub mod table;
pub mod text;

pub use config::FaturaConfig;
pub use document::{decode, DocumentContent};
pub use error::{FaturaError, Result};
pub use extract::{
    canonical_record, dynamic_record, extract_canonical, extract_dynamic, InvoiceFields,
    CANONICAL_FIELDS, NOT_FOUND,
};
pub use matcher::{find_field, GroupPolicy, MatchOptions};
pub use ocr::{enhance, validate_language, TesseractRecognizer, TextRecognizer};
pub use query::{run_query, QueryOutput};
pub use rules::{default_rules, Category, PatternStore, Rule, RuleSet};
pub use session::Session;
pub use table::{Record, RecordTable};
pub use text::normalize;

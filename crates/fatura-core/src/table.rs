//! Accumulated extraction records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One processed document's extracted values. Built once by the
/// extractor and never mutated afterwards; rows leave the table only
/// through a full clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier of the source document, usually its filename.
    pub source_name: String,
    /// Values keyed by field or rule name, in extraction order.
    pub values: IndexMap<String, String>,
}

impl Record {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            values: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// The value stored under `name`, if the record has that column.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Ordered collection of records, one per processed document.
///
/// Append-only apart from a full reset; there is no deduplication, so
/// processing the same document twice yields two rows. Serializes as a
/// bare array of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordTable {
    records: Vec<Record>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one record to the end of the table.
    pub fn append(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Read-only view of the accumulated records.
    pub fn snapshot(&self) -> &[Record] {
        &self.records
    }

    /// Reset to empty.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column order for tabular display and export: `source_name` first,
    /// then every value key in first-seen order across the records.
    /// Stable even when records carry different rule sets.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = vec!["source_name".to_string()];
        for record in &self.records {
            for key in record.values.keys() {
                if !columns.iter().any(|column| column == key) {
                    columns.push(key.clone());
                }
            }
        }
        columns
    }
}

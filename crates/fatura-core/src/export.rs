//! Record table export formatting.
//!
//! Pure renderings of a table snapshot; no extraction logic. Column
//! order is the table's stable order (`source_name` first, then value
//! keys as first seen), so heterogeneous rule sets still export cleanly.

use serde_json::Value;

use crate::error::ExportError;
use crate::table::{Record, RecordTable};

/// Render the snapshot as CSV with a header row. Cells for columns a
/// record never had are left empty.
pub fn to_csv(table: &RecordTable) -> Result<String, ExportError> {
    let columns = table.columns();
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(&columns)?;
    for record in table.snapshot() {
        let row: Vec<&str> = columns
            .iter()
            .map(|column| cell(record, column).unwrap_or(""))
            .collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    String::from_utf8(bytes)
        .map_err(|err| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}

/// Render the snapshot as a JSON array of objects over the unified
/// column set. Cells for columns a record never had are `null`.
pub fn to_json(table: &RecordTable) -> Result<String, ExportError> {
    let columns = table.columns();
    let rows: Vec<Value> = table
        .snapshot()
        .iter()
        .map(|record| {
            let object = columns
                .iter()
                .map(|column| {
                    let value = match cell(record, column) {
                        Some(text) => Value::String(text.to_string()),
                        None => Value::Null,
                    };
                    (column.clone(), value)
                })
                .collect::<serde_json::Map<String, Value>>();
            Value::Object(object)
        })
        .collect();

    Ok(serde_json::to_string_pretty(&Value::Array(rows))?)
}

/// Render the snapshot as a SQL script: one `CREATE TABLE` with TEXT
/// columns, then one `INSERT` per record. Identifiers are double-quoted
/// and single quotes inside values are doubled. Cells for columns a
/// record never had become NULL.
pub fn to_sql(table: &RecordTable, table_name: &str) -> String {
    let columns = table.columns();
    let mut script = String::new();

    let column_defs = columns
        .iter()
        .map(|column| format!("{} TEXT", quote_ident(column)))
        .collect::<Vec<_>>()
        .join(", ");
    script.push_str(&format!(
        "CREATE TABLE {} ({});\n",
        quote_ident(table_name),
        column_defs
    ));

    for record in table.snapshot() {
        let values = columns
            .iter()
            .map(|column| match cell(record, column) {
                Some(value) => format!("'{}'", value.replace('\'', "''")),
                None => "NULL".to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        script.push_str(&format!(
            "INSERT INTO {} VALUES ({});\n",
            quote_ident(table_name),
            values
        ));
    }

    script
}

fn cell<'a>(record: &'a Record, column: &str) -> Option<&'a str> {
    if column == "source_name" {
        Some(record.source_name.as_str())
    } else {
        record.get(column)
    }
}

pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

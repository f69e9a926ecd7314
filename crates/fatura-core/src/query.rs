//! SQL queries over the record table.

use rusqlite::types::ValueRef;
use rusqlite::Connection;
use tracing::debug;

use crate::error::QueryError;
use crate::export;
use crate::table::RecordTable;

/// Result of one query: column names plus rows rendered as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Run one SQL query against the table snapshot.
///
/// The snapshot is loaded into an in-memory SQLite database as a single
/// TEXT table named `table_name` (the same script the SQL export
/// produces), so a query like `SELECT * FROM fatura_df WHERE total <>
/// 'bulunamadı'` works against exactly what an export would contain.
pub fn run_query(
    table: &RecordTable,
    table_name: &str,
    sql: &str,
) -> Result<QueryOutput, QueryError> {
    if table.is_empty() {
        return Err(QueryError::EmptyTable);
    }

    let conn = Connection::open_in_memory()?;
    conn.execute_batch(&export::to_sql(table, table_name))?;

    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|name| name.to_string()).collect();

    let mut rows = Vec::new();
    let mut results = stmt.query([])?;
    while let Some(row) = results.next()? {
        let mut cells = Vec::with_capacity(columns.len());
        for index in 0..columns.len() {
            cells.push(render_value(row.get_ref(index)?));
        }
        rows.push(cells);
    }

    debug!("query over {} records returned {} rows", table.len(), rows.len());
    Ok(QueryOutput { columns, rows })
}

fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(number) => number.to_string(),
        ValueRef::Real(number) => number.to_string(),
        ValueRef::Text(text) => String::from_utf8_lossy(text).into_owned(),
        ValueRef::Blob(blob) => format!("<{} bytes>", blob.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Record;

    fn sample_table() -> RecordTable {
        let mut table = RecordTable::new();
        for (name, total) in [("a.png", "1.234,56"), ("b.png", "bulunamadı"), ("c.png", "42,00")] {
            let mut record = Record::new(name);
            record.insert("total", total);
            table.append(record);
        }
        table
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let result = run_query(&RecordTable::new(), "fatura_df", "SELECT 1");
        assert!(matches!(result, Err(QueryError::EmptyTable)));
    }

    #[test]
    fn test_select_all() {
        let output = run_query(&sample_table(), "fatura_df", "SELECT * FROM fatura_df").unwrap();
        assert_eq!(output.columns, vec!["source_name", "total"]);
        assert_eq!(output.rows.len(), 3);
        assert_eq!(output.rows[0], vec!["a.png", "1.234,56"]);
    }

    #[test]
    fn test_filter_on_sentinel() {
        let output = run_query(
            &sample_table(),
            "fatura_df",
            "SELECT source_name FROM fatura_df WHERE total <> 'bulunamadı'",
        )
        .unwrap();
        assert_eq!(output.rows, vec![vec!["a.png"], vec!["c.png"]]);
    }

    #[test]
    fn test_aggregates_render_as_strings() {
        let output = run_query(
            &sample_table(),
            "fatura_df",
            "SELECT COUNT(*) AS n FROM fatura_df",
        )
        .unwrap();
        assert_eq!(output.columns, vec!["n"]);
        assert_eq!(output.rows, vec![vec!["3"]]);
    }

    #[test]
    fn test_quoted_values_survive_the_round_trip() {
        let mut table = RecordTable::new();
        let mut record = Record::new("q.png");
        record.insert("seller", "O'Reilly Yazılım");
        table.append(record);

        let output = run_query(&table, "t", "SELECT seller FROM t").unwrap();
        assert_eq!(output.rows, vec![vec!["O'Reilly Yazılım"]]);
    }

    #[test]
    fn test_invalid_sql_is_an_error() {
        let result = run_query(&sample_table(), "fatura_df", "SELEK * FORM x");
        assert!(matches!(result, Err(QueryError::Sqlite(_))));
    }
}

//! Export command - render the session table as CSV, JSON or SQL.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use fatura_core::export::{to_csv, to_json, to_sql};

use super::Context;

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Table name for the SQL script
    #[arg(long)]
    table_name: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ExportFormat {
    /// Delimited text with a header row
    Csv,
    /// JSON array of objects
    Json,
    /// CREATE TABLE plus one INSERT per record
    Sql,
}

pub fn run(args: ExportArgs, ctx: &Context) -> anyhow::Result<()> {
    let session = ctx.open_session()?;
    let table = session.table();
    let table_name = args
        .table_name
        .unwrap_or_else(|| ctx.config.table_name.clone());

    let content = match args.format {
        ExportFormat::Csv => to_csv(table)?,
        ExportFormat::Json => to_json(table)?,
        ExportFormat::Sql => to_sql(table, &table_name),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, content)?;
            println!(
                "{} Exported {} records to {}",
                style("✓").green(),
                table.len(),
                path.display()
            );
        }
        None => print!("{content}"),
    }

    Ok(())
}

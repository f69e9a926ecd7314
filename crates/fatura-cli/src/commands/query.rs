//! Query command - run SQL against the session table.

use clap::Args;
use console::style;

use fatura_core::run_query;

use super::Context;

/// Arguments for the query command.
#[derive(Args)]
pub struct QueryArgs {
    /// SQL statement, e.g. "SELECT * FROM fatura_df"
    sql: String,

    /// Table name the records are loaded under
    #[arg(long)]
    table_name: Option<String>,
}

pub fn run(args: QueryArgs, ctx: &Context) -> anyhow::Result<()> {
    let session = ctx.open_session()?;
    let table_name = args
        .table_name
        .unwrap_or_else(|| ctx.config.table_name.clone());

    let output = run_query(session.table(), &table_name, &args.sql)?;

    println!("{}", style(output.columns.join(" | ")).bold());
    for row in &output.rows {
        println!("{}", row.join(" | "));
    }
    println!();
    println!("{} rows", output.rows.len());

    Ok(())
}

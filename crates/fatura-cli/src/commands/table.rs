//! Table command - show or clear the session table.

use clap::{Args, Subcommand};
use console::style;

use super::Context;

/// Arguments for the table command.
#[derive(Args)]
pub struct TableArgs {
    #[command(subcommand)]
    command: TableCommand,
}

#[derive(Subcommand)]
enum TableCommand {
    /// Show the accumulated records
    Show,

    /// Remove all records from the session table
    Clear,
}

pub fn run(args: TableArgs, ctx: &Context) -> anyhow::Result<()> {
    match args.command {
        TableCommand::Show => {
            let session = ctx.open_session()?;
            let table = session.table();

            if table.is_empty() {
                println!("{} Session table is empty", style("ℹ").blue());
                return Ok(());
            }

            let columns = table.columns();
            println!("{}", style(columns.join(" | ")).bold());
            for record in table.snapshot() {
                let row: Vec<&str> = columns
                    .iter()
                    .map(|column| {
                        if column == "source_name" {
                            record.source_name.as_str()
                        } else {
                            record.get(column).unwrap_or("")
                        }
                    })
                    .collect();
                println!("{}", row.join(" | "));
            }
            println!();
            println!("{} records", table.len());
        }
        TableCommand::Clear => {
            let mut session = ctx.open_session()?;
            let removed = session.table().len();
            session.table_mut().clear();
            session.save()?;
            println!(
                "{} Cleared session table ({removed} records removed)",
                style("✓").green()
            );
        }
    }

    Ok(())
}

//! CLI application for Turkish invoice OCR processing.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, export, query, rules, run, table, Context};

/// Turkish invoice OCR - extract structured fields from scanned invoices
#[derive(Parser)]
#[command(name = "fatura")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the pattern store and the session table
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process invoice files and append records to the session table
    Run(run::RunArgs),

    /// Manage extraction rules
    Rules(rules::RulesArgs),

    /// Show or clear the session table
    Table(table::TableArgs),

    /// Export the session table
    Export(export::ExportArgs),

    /// Run a SQL query against the session table
    Query(query::QueryArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Config(args) => config::run(args, cli.config.as_deref()),
        command => {
            let ctx = Context::new(cli.config.as_deref(), cli.data_dir)?;
            match command {
                Commands::Run(args) => run::run(args, &ctx),
                Commands::Rules(args) => rules::run(args, &ctx),
                Commands::Table(args) => table::run(args, &ctx),
                Commands::Export(args) => export::run(args, &ctx),
                Commands::Query(args) => query::run(args, &ctx),
                Commands::Config(_) => unreachable!(),
            }
        }
    }
}

//! Run command - process invoice files into the session table.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use fatura_core::{
    canonical_record, decode, dynamic_record, enhance, normalize, validate_language,
    DocumentContent, Record, RuleSet, TesseractRecognizer, TextRecognizer,
};

use super::Context;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Input files or glob patterns (PDF, PNG, JPG)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// OCR language code (e.g. tur, eng, tur+eng)
    #[arg(short, long)]
    lang: Option<String>,

    /// Enhance images before OCR (contrast, grayscale, autocontrast)
    #[arg(long)]
    enhance: bool,

    /// Extract only the five canonical fields instead of every stored rule
    #[arg(long)]
    canonical: bool,

    /// Print per-field extraction counts for this run
    #[arg(long)]
    summary: bool,
}

pub fn run(args: RunArgs, ctx: &Context) -> anyhow::Result<()> {
    let start = Instant::now();

    let lang = args.lang.unwrap_or_else(|| ctx.config.language.clone());
    validate_language(&lang)?;
    let enhance_images = args.enhance || ctx.config.enhance;

    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No matching invoice files found (PDF, PNG or JPG)");
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Store corruption is the one failure that stops the whole run.
    let rules = ctx.store().list()?;
    let mut session = ctx.open_session()?;
    let recognizer = TesseractRecognizer::new();

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut failed: Vec<(PathBuf, String)> = Vec::new();
    let mut extracted: Vec<Record> = Vec::new();

    for path in &files {
        match process_file(path, &rules, &recognizer, &lang, enhance_images, args.canonical) {
            Ok(record) => extracted.push(record),
            Err(e) => {
                // One bad document never stops the batch.
                warn!("failed to process {}: {e}", path.display());
                failed.push((path.clone(), e.to_string()));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if args.summary {
        print_summary(&extracted);
    }

    let processed = extracted.len();
    for record in extracted {
        session.table_mut().append(record);
    }
    session.save()?;

    println!();
    println!(
        "{} Processed {} of {} files in {:?}",
        style("✓").green(),
        style(processed).green(),
        files.len(),
        start.elapsed()
    );
    println!(
        "   Session table now holds {} records",
        session.table().len()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (path, error) in &failed {
            println!("  - {}: {}", path.display(), error);
        }
    }

    Ok(())
}

/// Per-field found/not-found counts over this run's records.
fn print_summary(records: &[Record]) {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        for (name, value) in &record.values {
            match counts.iter_mut().find(|(column, _)| column == name) {
                Some((_, count)) => {
                    if value != fatura_core::NOT_FOUND {
                        *count += 1;
                    }
                }
                None => {
                    let found = usize::from(value != fatura_core::NOT_FOUND);
                    counts.push((name.clone(), found));
                }
            }
        }
    }

    println!();
    println!("{}", style("Extraction summary:").bold());
    for (column, count) in &counts {
        println!("  {:<12} {}/{} found", column, count, records.len());
    }
}

/// Expand globs and literal paths, keeping only supported extensions.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        for entry in glob(input)? {
            let path = entry?;
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();
            if matches!(ext.as_str(), "pdf" | "png" | "jpg" | "jpeg") {
                files.push(path);
            } else {
                debug!("skipping {} (unsupported extension)", path.display());
            }
        }
    }
    Ok(files)
}

fn process_file(
    path: &Path,
    rules: &RuleSet,
    recognizer: &TesseractRecognizer,
    lang: &str,
    enhance_images: bool,
    canonical: bool,
) -> anyhow::Result<Record> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document");

    let bytes = fs::read(path)?;
    let raw_text = match decode(&bytes, name)? {
        DocumentContent::Text(text) => {
            debug!("{name}: using embedded PDF text");
            text
        }
        DocumentContent::Image(image) => {
            let image = if enhance_images { enhance(&image) } else { image };
            recognizer.recognize(&image, lang)
        }
    };

    let text = normalize(&raw_text);
    let record = if canonical {
        canonical_record(rules, &text, name)
    } else {
        dynamic_record(rules, &text, name)
    };
    Ok(record)
}

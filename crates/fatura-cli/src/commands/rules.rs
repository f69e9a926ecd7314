//! Rules command - manage the pattern store.

use clap::{Args, Subcommand};
use console::style;

use fatura_core::{Category, Rule};

use super::Context;

/// Arguments for the rules command.
#[derive(Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    command: RulesCommand,
}

#[derive(Subcommand)]
enum RulesCommand {
    /// List all rules
    List,

    /// Show one rule in full
    Show {
        /// Rule name
        name: String,
    },

    /// Add a rule or overwrite an existing one
    Set {
        /// Rule name
        name: String,
        /// Matching expression
        pattern: String,
        /// Illustrative sample value
        #[arg(long, default_value = "")]
        example: String,
        /// Category tag (date, amount, invoice-id, seller, tax,
        /// purchase, sale, other)
        #[arg(long, default_value = "other")]
        category: String,
    },

    /// Remove a rule (no error if it does not exist)
    Remove {
        /// Rule name
        name: String,
    },
}

pub fn run(args: RulesArgs, ctx: &Context) -> anyhow::Result<()> {
    let store = ctx.store();

    match args.command {
        RulesCommand::List => {
            let rules = store.list()?;
            println!(
                "{} {} rules in {}",
                style("ℹ").blue(),
                rules.len(),
                store.path().display()
            );
            for (name, rule) in &rules {
                println!(
                    "  {:<12} {:<12} {}",
                    style(name).cyan(),
                    rule.category,
                    rule.pattern
                );
            }
        }
        RulesCommand::Show { name } => match store.get_rule(&name)? {
            Some(rule) => {
                println!("Name:     {name}");
                println!("Category: {}", rule.category);
                println!("Pattern:  {}", rule.pattern);
                if !rule.example.is_empty() {
                    println!("Example:  {}", rule.example);
                }
            }
            None => anyhow::bail!("No rule named {name:?}"),
        },
        RulesCommand::Set {
            name,
            pattern,
            example,
            category,
        } => {
            let rule = Rule::new(pattern)
                .with_example(example)
                .with_category(Category::from_tag(&category));
            store.set(&name, rule)?;
            println!("{} Stored rule {name:?}", style("✓").green());
        }
        RulesCommand::Remove { name } => {
            store.remove(&name)?;
            println!("{} Removed rule {name:?} (if present)", style("✓").green());
        }
    }

    Ok(())
}

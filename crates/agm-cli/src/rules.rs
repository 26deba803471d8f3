//! # Rules Subcommand
//!
//! Lists the content rules in the order they run.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use agm_engine::ContentRule;

use crate::OutputFormat;

/// Arguments for the `agm rules` subcommand.
#[derive(Args, Debug, Default)]
pub struct RulesArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct RuleEntry {
    id: &'static str,
    description: &'static str,
}

fn entries() -> Vec<RuleEntry> {
    ContentRule::all()
        .iter()
        .map(|rule| RuleEntry {
            id: rule.id(),
            description: rule.description(),
        })
        .collect()
}

/// Render the rule list.
pub fn render_rules(format: OutputFormat) -> Result<String> {
    let entries = entries();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => {
            let width = entries.iter().map(|e| e.id.len()).max().unwrap_or(0);
            Ok(entries
                .iter()
                .map(|e| format!("{:<width$}  {}", e.id, e.description))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

/// Execute the rules subcommand.
pub fn run_rules(args: &RulesArgs) -> Result<u8> {
    println!("{}", render_rules(args.format)?);
    Ok(0)
}

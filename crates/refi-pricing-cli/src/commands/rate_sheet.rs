use clap::Args;
use serde_json::Value;

use refi_pricing_core::rate_sheet::{self, RateSheetInput};

use crate::commands::scenario::load_rules;
use crate::input;

/// Arguments for a rate sheet
#[derive(Args)]
pub struct RateSheetArgs {
    /// Path to JSON/YAML file with `base` scenario and `options`
    #[arg(long)]
    pub input: Option<String>,

    /// Pricing rules file; replaces any `rules` in the input
    #[arg(long)]
    pub rules: Option<String>,
}

pub fn run_rate_sheet(args: RateSheetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut sheet_input: RateSheetInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for a rate sheet".into());
    };

    if args.rules.is_some() {
        sheet_input.rules = load_rules(args.rules.as_deref())?;
    }

    let result = rate_sheet::build_rate_sheet(&sheet_input)?;
    Ok(serde_json::to_value(result)?)
}

use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use refi_pricing_core::schedule::{self, ScheduleInput};

use crate::input;

/// Arguments for an amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON/YAML schedule input (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount financed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Note rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    #[arg(long, default_value = "30")]
    pub term_years: Decimal,

    /// First payment date (YYYY-MM-DD)
    #[arg(long)]
    pub first_payment_date: Option<NaiveDate>,

    /// Only print yearly subtotals
    #[arg(long)]
    pub yearly: bool,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: ScheduleInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ScheduleInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            interest_rate_percent: args.rate.unwrap_or(dec!(0)),
            term_years: args.term_years,
            first_payment_date: args.first_payment_date,
        }
    };

    let mut output = schedule::build_amortization_schedule(&schedule_input)?;
    if args.yearly {
        output.result.rows.clear();
    }
    Ok(serde_json::to_value(output)?)
}

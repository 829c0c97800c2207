use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use refi_pricing_core::pricing::compensation::compensate;
use refi_pricing_core::{
    present, price_scenario, Audience, LoanProgram, PricingRules, ScenarioInput,
    TemporaryBuydown,
};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProgramArg {
    Conventional,
    Va,
    Fha,
    VaIrrrl,
}

impl From<ProgramArg> for LoanProgram {
    fn from(arg: ProgramArg) -> Self {
        match arg {
            ProgramArg::Conventional => LoanProgram::Conventional,
            ProgramArg::Va => LoanProgram::Va,
            ProgramArg::Fha => LoanProgram::Fha,
            ProgramArg::VaIrrrl => LoanProgram::VaIrrrl,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BuydownArg {
    None,
    #[value(name = "2-1")]
    TwoOne,
    #[value(name = "1-0")]
    OneZero,
}

impl From<BuydownArg> for TemporaryBuydown {
    fn from(arg: BuydownArg) -> Self {
        match arg {
            BuydownArg::None => TemporaryBuydown::None,
            BuydownArg::TwoOne => TemporaryBuydown::TwoOne,
            BuydownArg::OneZero => TemporaryBuydown::OneZero,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum AudienceArg {
    #[default]
    Officer,
    Borrower,
}

impl From<AudienceArg> for Audience {
    fn from(arg: AudienceArg) -> Self {
        match arg {
            AudienceArg::Officer => Audience::LoanOfficer,
            AudienceArg::Borrower => Audience::Borrower,
        }
    }
}

/// Arguments for pricing one scenario
#[derive(Args)]
pub struct ScenarioArgs {
    /// Path to JSON/YAML scenario file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to JSON/YAML pricing rules (defaults to the built-in rate sheet)
    #[arg(long)]
    pub rules: Option<String>,

    /// Who the quote is for; borrowers never see compensation
    #[arg(long, default_value = "officer")]
    pub audience: AudienceArg,

    #[arg(long, default_value = "conventional")]
    pub program: ProgramArg,

    #[arg(long)]
    pub appraised_value: Option<Decimal>,

    /// Payoff balance of the current mortgage
    #[arg(long)]
    pub current_balance: Option<Decimal>,

    #[arg(long)]
    pub cash_out: Option<Decimal>,

    /// Monthly taxes and insurance
    #[arg(long)]
    pub monthly_escrow: Option<Decimal>,

    /// Months of escrow collected at closing
    #[arg(long)]
    pub escrow_months: Option<Decimal>,

    #[arg(long)]
    pub bank_fee: Option<Decimal>,

    #[arg(long)]
    pub title_fee: Option<Decimal>,

    /// VA funding fee exemption (disability etc.)
    #[arg(long)]
    pub funding_fee_exempt: bool,

    /// Conventional annual MI rate in percent
    #[arg(long)]
    pub mi_rate: Option<Decimal>,

    #[arg(long)]
    pub lender_points: Option<Decimal>,

    #[arg(long)]
    pub branch_gen_points: Option<Decimal>,

    /// Note rate in percent (6.5 = 6.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    #[arg(long)]
    pub term_years: Option<Decimal>,

    #[arg(long, default_value = "none")]
    pub buydown: BuydownArg,

    /// Debt balances paid from cash-out
    #[arg(long)]
    pub debt_paid_off: Option<Decimal>,

    /// Monthly payments on the debts being paid off
    #[arg(long)]
    pub debt_monthly_payments: Option<Decimal>,

    #[arg(long)]
    pub previous_piti: Option<Decimal>,

    /// Cash-out is not used to pay off debt
    #[arg(long)]
    pub pure_cash_out: bool,
}

/// Arguments for tier lookup
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct TierArgs {
    /// Branch-gen points in percent
    #[arg(long)]
    pub points: Decimal,

    /// Final loan amount for compensation dollars
    #[arg(long, default_value = "0")]
    pub loan_amount: Decimal,

    #[arg(long)]
    pub rules: Option<String>,
}

pub(crate) fn load_rules(path: Option<&str>) -> Result<PricingRules, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let rules: PricingRules = input::file::read_input(path)?;
            rules.validate()?;
            tracing::debug!(path, "loaded pricing rules");
            Ok(rules)
        }
        None => Ok(PricingRules::default()),
    }
}

fn scenario_from_flags(args: &ScenarioArgs) -> Result<ScenarioInput, Box<dyn std::error::Error>> {
    Ok(ScenarioInput {
        loan_program: args.program.into(),
        appraised_value: args
            .appraised_value
            .ok_or("--appraised-value is required (or provide --input)")?,
        current_balance: args
            .current_balance
            .ok_or("--current-balance is required (or provide --input)")?,
        cash_out_amount: args.cash_out.unwrap_or_default(),
        monthly_escrow: args.monthly_escrow.unwrap_or_default(),
        escrow_months: args.escrow_months.unwrap_or_default(),
        bank_fee: args.bank_fee.unwrap_or_default(),
        title_fee: args.title_fee.unwrap_or_default(),
        is_funding_fee_exempt: args.funding_fee_exempt,
        mortgage_insurance_annual_rate_percent: args.mi_rate.unwrap_or_default(),
        lender_points_percent: args.lender_points.unwrap_or_default(),
        branch_gen_points_percent: args.branch_gen_points.unwrap_or_default(),
        interest_rate_percent: args
            .rate
            .ok_or("--rate is required (or provide --input)")?,
        term_years: args.term_years.unwrap_or(dec!(30)),
        temporary_buydown: args.buydown.into(),
        debt_paid_off: args.debt_paid_off.unwrap_or_default(),
        debt_monthly_payments: args.debt_monthly_payments.unwrap_or_default(),
        previous_monthly_piti: args.previous_piti.unwrap_or_default(),
        pure_cash_out_no_consolidation: args.pure_cash_out,
    })
}

pub fn run_scenario(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rules = load_rules(args.rules.as_deref())?;
    let scenario: ScenarioInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        scenario_from_flags(&args)?
    };

    let output = price_scenario(&scenario, &rules)?;
    Ok(serde_json::to_value(present(output, args.audience.into()))?)
}

pub fn run_tier(args: TierArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rules = load_rules(args.rules.as_deref())?;
    if args.loan_amount < Decimal::ZERO {
        return Err("--loan-amount must not be negative".into());
    }
    let breakdown = compensate(args.loan_amount, args.points, &rules);
    Ok(serde_json::json!({ "result": breakdown }))
}

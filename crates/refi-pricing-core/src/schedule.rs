//! Monthly amortization schedule for a fixed-rate refinance loan.
//!
//! Builds the payment-by-payment split of interest and principal, yearly
//! subtotals and lifetime totals using the same level payment the pricing
//! engine reports. Rows are rounded to cents and the final payment absorbs
//! the residual so the balance closes at exactly zero.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{level_payment, monthly_rate, term_months};
use crate::error::RefiPricingError;
use crate::pricing::engine::ScenarioResult;
use crate::pricing::normalize::{MAX_FACTOR, MAX_MONEY};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::RefiPricingResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Longest schedule we will materialise (50 years).
const MAX_SCHEDULE_MONTHS: u32 = 600;

/// Cents.
const MONEY_DP: u32 = 2;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for an amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    /// Amount financed.
    pub principal: Money,
    /// Note rate in percent (6.5 = 6.5%).
    pub interest_rate_percent: Percent,
    /// Loan term in years.
    pub term_years: Decimal,
    /// Date of the first monthly payment; rows carry dates when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

impl ScheduleInput {
    /// Schedule for the financed amount of a priced scenario.
    pub fn from_scenario(
        result: &ScenarioResult,
        interest_rate_percent: Percent,
        term_years: Decimal,
    ) -> Self {
        ScheduleInput {
            principal: result.final_loan_amount,
            interest_rate_percent,
            term_years,
            first_payment_date: None,
        }
    }
}

/// A single monthly payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Payment number (1-indexed).
    pub payment_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub remaining_balance: Money,
}

/// Totals for one loan year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleYear {
    pub year: u32,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub ending_balance: Money,
}

/// Amortization schedule output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    /// Scheduled monthly principal & interest.
    pub monthly_payment: Money,
    pub number_of_payments: u32,
    pub total_interest: Money,
    pub total_of_payments: Money,
    pub rows: Vec<ScheduleRow>,
    pub yearly: Vec<ScheduleYear>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build an amortization schedule wrapped in the standard output envelope.
pub fn build_amortization_schedule(
    input: &ScheduleInput,
) -> RefiPricingResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = amortization_schedule(input)?;

    if input.interest_rate_percent <= Decimal::ZERO {
        warnings.push("Zero note rate: schedule is straight-line principal only".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Level Payment Amortization",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Compute the full schedule.
pub fn amortization_schedule(input: &ScheduleInput) -> RefiPricingResult<ScheduleOutput> {
    validate_schedule(input)?;

    let rate = monthly_rate(input.interest_rate_percent);
    let nper = term_months(input.term_years);
    let payment = level_payment(input.principal, rate, nper).round_dp(MONEY_DP);

    let mut balance = input.principal;
    let mut rows = Vec::with_capacity(nper as usize);
    let mut yearly: Vec<ScheduleYear> = Vec::new();
    let mut total_interest = Decimal::ZERO;
    let mut total_of_payments = Decimal::ZERO;

    for n in 1..=nper {
        let interest = (balance * rate).round_dp(MONEY_DP);
        let (principal, this_payment) = if n == nper || payment - interest >= balance {
            (balance, balance + interest)
        } else {
            (payment - interest, payment)
        };
        balance -= principal;

        let payment_date = match input.first_payment_date {
            Some(first) => Some(nth_payment_date(first, n)?),
            None => None,
        };

        total_interest += interest;
        total_of_payments += this_payment;

        let year = (n - 1) / 12 + 1;
        match yearly.last_mut() {
            Some(y) if y.year == year => {
                y.interest_paid += interest;
                y.principal_paid += principal;
                y.ending_balance = balance;
            }
            _ => yearly.push(ScheduleYear {
                year,
                interest_paid: interest,
                principal_paid: principal,
                ending_balance: balance,
            }),
        }

        rows.push(ScheduleRow {
            payment_number: n,
            payment_date,
            payment: this_payment,
            interest,
            principal,
            remaining_balance: balance,
        });

        if balance.is_zero() {
            break;
        }
    }

    Ok(ScheduleOutput {
        monthly_payment: payment,
        number_of_payments: rows.len() as u32,
        total_interest,
        total_of_payments,
        rows,
        yearly,
    })
}

fn nth_payment_date(first: NaiveDate, n: u32) -> RefiPricingResult<NaiveDate> {
    first
        .checked_add_months(Months::new(n - 1))
        .ok_or_else(|| RefiPricingError::DateError(format!("payment {n} falls outside the calendar")))
}

fn validate_schedule(input: &ScheduleInput) -> RefiPricingResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(RefiPricingError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.principal > MAX_MONEY {
        return Err(RefiPricingError::InvalidInput {
            field: "principal".into(),
            reason: format!("Principal must not exceed {MAX_MONEY}"),
        });
    }
    if input.interest_rate_percent > MAX_FACTOR {
        return Err(RefiPricingError::InvalidInput {
            field: "interest_rate_percent".into(),
            reason: format!("Rate must not exceed {MAX_FACTOR}%"),
        });
    }
    if input.term_years <= Decimal::ZERO {
        return Err(RefiPricingError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be greater than zero".into(),
        });
    }
    if term_months(input.term_years) > MAX_SCHEDULE_MONTHS {
        return Err(RefiPricingError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Schedules are limited to {MAX_SCHEDULE_MONTHS} months"),
        });
    }
    Ok(())
}

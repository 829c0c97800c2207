//! Monthly PITI stack, loan-to-value and program LTV advisories.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::monthly_payment;
use crate::pricing::normalize::{NormalizedScenario, ProgramTerms};
use crate::pricing::rules::PricingRules;
use crate::types::{Money, Percent};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Monthly payment pieces for one loan amount and rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub principal_and_interest: Money,
    pub monthly_escrow: Money,
    /// FHA monthly MIP.
    pub monthly_mip: Money,
    /// Conventional monthly MI above the LTV threshold.
    pub monthly_mi: Money,
    pub total_monthly_piti: Money,
}

/// LTV in percent. Zero when there is no usable appraisal.
pub fn loan_to_value(loan_amount: Money, appraised_value: Money) -> Percent {
    if appraised_value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    loan_amount
        .checked_div(appraised_value)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .unwrap_or(Decimal::MAX)
}

/// Recurring mortgage insurance as `(mip, mi)`.
pub fn mortgage_insurance(
    loan_amount: Money,
    ltv_percent: Percent,
    terms: &ProgramTerms,
    rules: &PricingRules,
) -> (Money, Money) {
    match *terms {
        ProgramTerms::Fha => (
            loan_amount * rules.fha_annual_mip_percent / dec!(100) / MONTHS_PER_YEAR,
            Decimal::ZERO,
        ),
        ProgramTerms::Conventional {
            mi_annual_rate_percent,
            ..
        } if ltv_percent > rules.conventional_mi_ltv_percent => (
            Decimal::ZERO,
            loan_amount * mi_annual_rate_percent / dec!(100) / MONTHS_PER_YEAR,
        ),
        _ => (Decimal::ZERO, Decimal::ZERO),
    }
}

/// Full PITI for `loan_amount` at `rate_percent`. MI eligibility follows the
/// LTV of `loan_amount` itself.
pub fn payment_breakdown(
    loan_amount: Money,
    rate_percent: Percent,
    s: &NormalizedScenario,
    rules: &PricingRules,
) -> PaymentBreakdown {
    let ltv = loan_to_value(loan_amount, s.appraised_value);
    let principal_and_interest = monthly_payment(loan_amount, rate_percent, s.term_years);
    let (monthly_mip, monthly_mi) = mortgage_insurance(loan_amount, ltv, &s.terms, rules);

    PaymentBreakdown {
        principal_and_interest,
        monthly_escrow: s.monthly_escrow,
        monthly_mip,
        monthly_mi,
        total_monthly_piti: principal_and_interest + s.monthly_escrow + monthly_mip + monthly_mi,
    }
}

/// Program/LTV conditions. Reported only; pricing still completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LtvAdvisories {
    /// FHA above its LTV limit.
    pub fha_ltv_exceeded: bool,
    /// Conventional rate/term above its LTV limit.
    pub rate_term_ltv_exceeded: bool,
    /// Conventional cash-out above its LTV limit.
    pub cash_out_ltv_exceeded: bool,
    /// Conventional above the MI threshold (outside the cash-out case).
    pub mortgage_insurance_required: bool,
}

pub fn ltv_advisories(
    ltv_percent: Percent,
    s: &NormalizedScenario,
    rules: &PricingRules,
) -> LtvAdvisories {
    match s.terms {
        ProgramTerms::Fha => LtvAdvisories {
            fha_ltv_exceeded: ltv_percent > rules.fha_max_ltv_percent,
            ..LtvAdvisories::default()
        },
        ProgramTerms::Conventional { .. } => {
            let has_cash_out = s.cash_out > Decimal::ZERO;
            let cash_out_ltv_exceeded =
                has_cash_out && ltv_percent > rules.conventional_cash_out_max_ltv_percent;
            LtvAdvisories {
                fha_ltv_exceeded: false,
                rate_term_ltv_exceeded: !has_cash_out
                    && ltv_percent > rules.conventional_rate_term_max_ltv_percent,
                cash_out_ltv_exceeded,
                mortgage_insurance_required: !cash_out_ltv_exceeded
                    && ltv_percent > rules.conventional_mi_ltv_percent,
            }
        }
        ProgramTerms::Va { .. } | ProgramTerms::VaIrrrl { .. } => LtvAdvisories::default(),
    }
}

//! Temporary buydown subsidy sizing.
//!
//! The subsidy is sized against the pre-buydown loan amount so that financing
//! it does not feed back into its own size. The engine then adds the subsidy
//! to principal and reprices.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::pricing::input::TemporaryBuydown;
use crate::pricing::normalize::NormalizedScenario;
use crate::pricing::payment::payment_breakdown;
use crate::pricing::rules::PricingRules;
use crate::types::{Money, Percent};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Reduced rates for the buydown years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuydownRates {
    pub year1_rate_percent: Percent,
    pub year2_rate_percent: Option<Percent>,
}

/// Subsidy sizing against the pre-buydown loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuydownSubsidy {
    pub kind: TemporaryBuydown,
    /// Full note-rate PITI on the pre-buydown loan.
    pub reference_piti: Money,
    pub year1_reference_piti: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year2_reference_piti: Option<Money>,
    pub subsidy_cost: Money,
}

/// Borrower-facing buydown detail, priced on the final loan amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuydownDetail {
    pub kind: TemporaryBuydown,
    pub note_rate_percent: Percent,
    pub buydown_subsidy_cost: Money,
    pub year1_rate_percent: Percent,
    pub year1_piti: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year2_rate_percent: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year2_piti: Option<Money>,
    /// Pre-buydown sizing figures.
    pub sizing: BuydownSubsidy,
}

/// Year-1/Year-2 rates for a buydown, floored at zero.
pub fn buydown_rates(
    kind: TemporaryBuydown,
    note_rate_percent: Percent,
    rules: &PricingRules,
) -> Option<BuydownRates> {
    let step = rules.buydown_step_percent;
    let reduced = |steps: Decimal| (note_rate_percent - step * steps).max(Decimal::ZERO);
    match kind {
        TemporaryBuydown::None => None,
        TemporaryBuydown::TwoOne => Some(BuydownRates {
            year1_rate_percent: reduced(dec!(2)),
            year2_rate_percent: Some(reduced(Decimal::ONE)),
        }),
        TemporaryBuydown::OneZero => Some(BuydownRates {
            year1_rate_percent: reduced(Decimal::ONE),
            year2_rate_percent: None,
        }),
    }
}

/// Size the subsidy. `None` unless the normalized scenario carries a buydown.
pub fn size_subsidy(
    s: &NormalizedScenario,
    loan_pre_buydown: Money,
    rules: &PricingRules,
) -> Option<BuydownSubsidy> {
    let kind = s.buydown();
    let rates = buydown_rates(kind, s.interest_rate_percent, rules)?;

    let reference_piti =
        payment_breakdown(loan_pre_buydown, s.interest_rate_percent, s, rules).total_monthly_piti;
    let year1_reference_piti =
        payment_breakdown(loan_pre_buydown, rates.year1_rate_percent, s, rules).total_monthly_piti;
    let year2_reference_piti = rates.year2_rate_percent.map(|rate| {
        payment_breakdown(loan_pre_buydown, rate, s, rules).total_monthly_piti
    });

    let diff_year1 = (reference_piti - year1_reference_piti).max(Decimal::ZERO);
    let diff_year2 = year2_reference_piti
        .map(|piti| (reference_piti - piti).max(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO);

    Some(BuydownSubsidy {
        kind,
        reference_piti,
        year1_reference_piti,
        year2_reference_piti,
        subsidy_cost: (diff_year1 + diff_year2) * MONTHS_PER_YEAR,
    })
}

/// Year-by-year payments on the final (subsidy-inclusive) loan.
pub fn buydown_detail(
    s: &NormalizedScenario,
    sizing: BuydownSubsidy,
    final_loan_amount: Money,
    rules: &PricingRules,
) -> Option<BuydownDetail> {
    let rates = buydown_rates(sizing.kind, s.interest_rate_percent, rules)?;
    let piti_at = |rate: Percent| {
        payment_breakdown(final_loan_amount, rate, s, rules).total_monthly_piti
    };

    Some(BuydownDetail {
        kind: sizing.kind,
        note_rate_percent: s.interest_rate_percent,
        buydown_subsidy_cost: sizing.subsidy_cost,
        year1_rate_percent: rates.year1_rate_percent,
        year1_piti: piti_at(rates.year1_rate_percent),
        year2_rate_percent: rates.year2_rate_percent,
        year2_piti: rates.year2_rate_percent.map(piti_at),
        sizing,
    })
}

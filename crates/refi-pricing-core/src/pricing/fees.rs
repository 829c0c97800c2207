//! Closing costs, government fee and points, rolled into the pre-buydown loan amount.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::pricing::normalize::{NormalizedScenario, ProgramTerms};
use crate::pricing::rules::PricingRules;
use crate::types::{Money, Percent};

/// Which up-front government fee a program carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernmentFeeKind {
    /// VA and VA IRRRL funding fee.
    FundingFee,
    /// FHA up-front mortgage insurance premium.
    Ufmip,
}

impl GovernmentFeeKind {
    pub fn label(&self) -> &'static str {
        match self {
            GovernmentFeeKind::FundingFee => "Funding Fee",
            GovernmentFeeKind::Ufmip => "UFMIP",
        }
    }
}

/// Fee and loan-amount derivation before any buydown subsidy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Prepaid escrow: monthly escrow × months.
    pub escrow_cost: Money,
    pub base_loan_before_gov_fee: Money,
    /// `None` for Conventional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub government_fee_kind: Option<GovernmentFeeKind>,
    /// Rate actually applied (zero when exempt).
    pub government_fee_rate_percent: Percent,
    pub government_fee: Money,
    pub base_loan_with_gov_fee: Money,
    /// Lender + branch-gen points; never capped.
    pub total_points_percent: Percent,
    pub points_cost: Money,
    /// Bank, title, escrow, points and government fee.
    pub total_costs: Money,
    pub final_loan_pre_buydown: Money,
}

/// Government fee kind and rate for the program. Exemption covers VA loans only.
pub fn government_fee_terms(
    terms: &ProgramTerms,
    rules: &PricingRules,
) -> Option<(GovernmentFeeKind, Percent)> {
    match *terms {
        ProgramTerms::Conventional { .. } => None,
        ProgramTerms::Va { funding_fee_exempt } => Some((
            GovernmentFeeKind::FundingFee,
            if funding_fee_exempt {
                Decimal::ZERO
            } else {
                rules.va_funding_fee_percent
            },
        )),
        ProgramTerms::VaIrrrl { funding_fee_exempt } => Some((
            GovernmentFeeKind::FundingFee,
            if funding_fee_exempt {
                Decimal::ZERO
            } else {
                rules.va_irrrl_funding_fee_percent
            },
        )),
        ProgramTerms::Fha => Some((GovernmentFeeKind::Ufmip, rules.fha_ufmip_percent)),
    }
}

pub fn derive_fees(s: &NormalizedScenario, rules: &PricingRules) -> FeeBreakdown {
    let escrow_cost = s.monthly_escrow * s.escrow_months;

    let base_loan_before_gov_fee =
        s.current_balance + s.bank_fee + s.title_fee + escrow_cost + s.cash_out;

    let government_fee_kind = government_fee_terms(&s.terms, rules);
    let government_fee_rate_percent = government_fee_kind
        .map(|(_, rate)| rate)
        .unwrap_or(Decimal::ZERO);
    let government_fee = base_loan_before_gov_fee * government_fee_rate_percent / dec!(100);
    let base_loan_with_gov_fee = base_loan_before_gov_fee + government_fee;

    let total_points_percent = s.total_points_percent();
    let points_cost = base_loan_with_gov_fee * total_points_percent / dec!(100);

    let total_costs = s.bank_fee + s.title_fee + escrow_cost + points_cost + government_fee;
    let final_loan_pre_buydown = s.current_balance + s.cash_out + total_costs;

    FeeBreakdown {
        escrow_cost,
        base_loan_before_gov_fee,
        government_fee_kind: government_fee_kind.map(|(kind, _)| kind),
        government_fee_rate_percent,
        government_fee,
        base_loan_with_gov_fee,
        total_points_percent,
        points_cost,
        total_costs,
        final_loan_pre_buydown,
    }
}

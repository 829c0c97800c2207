use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::pricing::rules::PricingRules;
use crate::types::{Bps, Money, Percent};

/// Basis points divisor
const BPS_DIVISOR: Decimal = dec!(10000);

/// Pricing tier inferred from branch-gen points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingTier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
    #[default]
    None,
}

/// Loan officer and associate compensation for a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationBreakdown {
    pub inferred_pricing_tier: PricingTier,
    pub loan_officer_bps: Bps,
    pub associate_bps: Bps,
    pub loan_officer_compensation: Money,
    pub associate_compensation: Money,
}

pub fn infer_pricing_tier(branch_gen_points_percent: Percent, rules: &PricingRules) -> PricingTier {
    rules
        .tier_band(branch_gen_points_percent)
        .map(|band| band.tier)
        .unwrap_or_default()
}

pub fn compensate(
    final_loan_amount: Money,
    branch_gen_points_percent: Percent,
    rules: &PricingRules,
) -> CompensationBreakdown {
    let (inferred_pricing_tier, loan_officer_bps, associate_bps) =
        match rules.tier_band(branch_gen_points_percent) {
            Some(band) => (band.tier, band.loan_officer_bps, band.associate_bps),
            None => (PricingTier::None, Decimal::ZERO, Decimal::ZERO),
        };

    CompensationBreakdown {
        inferred_pricing_tier,
        loan_officer_bps,
        associate_bps,
        loan_officer_compensation: final_loan_amount * loan_officer_bps / BPS_DIVISOR,
        associate_compensation: final_loan_amount * associate_bps / BPS_DIVISOR,
    }
}

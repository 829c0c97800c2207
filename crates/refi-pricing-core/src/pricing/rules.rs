//! Program constants, advisory thresholds and the pricing-tier table.
//!
//! `PricingRules::default()` carries the current rate sheet. Every field is
//! `#[serde(default)]`, so a partial override file only needs the keys that
//! change.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RefiPricingError;
use crate::pricing::compensation::PricingTier;
use crate::types::{Bps, Percent};
use crate::RefiPricingResult;

/// One row of the branch-gen points → tier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierBand {
    pub tier: PricingTier,
    pub min_points_percent: Percent,
    pub min_inclusive: bool,
    pub max_points_percent: Percent,
    pub max_inclusive: bool,
    pub loan_officer_bps: Bps,
    pub associate_bps: Bps,
}

impl TierBand {
    pub fn contains(&self, points: Percent) -> bool {
        let above_min = if self.min_inclusive {
            points >= self.min_points_percent
        } else {
            points > self.min_points_percent
        };
        let below_max = if self.max_inclusive {
            points <= self.max_points_percent
        } else {
            points < self.max_points_percent
        };
        above_min && below_max
    }

    /// True when every point of `self` lies strictly below every point of `other`.
    fn lies_below(&self, other: &TierBand) -> bool {
        self.max_points_percent < other.min_points_percent
            || (self.max_points_percent == other.min_points_percent
                && !(self.max_inclusive && other.min_inclusive))
    }

    fn overlaps(&self, other: &TierBand) -> bool {
        !(self.lies_below(other) || other.lies_below(self))
    }
}

/// Rate sheet and program rules used by the pricing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    /// VA funding fee, percent of the base loan.
    pub va_funding_fee_percent: Percent,
    /// VA IRRRL funding fee, percent of the base loan.
    pub va_irrrl_funding_fee_percent: Percent,
    /// FHA up-front MIP, percent of the base loan.
    pub fha_ufmip_percent: Percent,
    /// FHA annual MIP, percent of the loan amount.
    pub fha_annual_mip_percent: Percent,
    /// Total points above this raise an alert.
    pub points_alert_threshold_percent: Percent,
    /// Conventional LTV above which MI is charged.
    pub conventional_mi_ltv_percent: Percent,
    /// Conventional rate/term refinance LTV limit.
    pub conventional_rate_term_max_ltv_percent: Percent,
    /// Conventional cash-out refinance LTV limit.
    pub conventional_cash_out_max_ltv_percent: Percent,
    /// FHA LTV limit for this product.
    pub fha_max_ltv_percent: Percent,
    /// Rate reduction per buydown year (2-1 steps down twice).
    pub buydown_step_percent: Percent,
    pub pricing_tiers: Vec<TierBand>,
}

impl Default for PricingRules {
    fn default() -> Self {
        PricingRules {
            va_funding_fee_percent: dec!(3.3),
            va_irrrl_funding_fee_percent: dec!(0.5),
            fha_ufmip_percent: dec!(1.75),
            fha_annual_mip_percent: dec!(0.55),
            points_alert_threshold_percent: dec!(4.75),
            conventional_mi_ltv_percent: dec!(80),
            conventional_rate_term_max_ltv_percent: dec!(96),
            conventional_cash_out_max_ltv_percent: dec!(80),
            fha_max_ltv_percent: dec!(80),
            buydown_step_percent: dec!(1),
            pricing_tiers: default_tiers(),
        }
    }
}

fn default_tiers() -> Vec<TierBand> {
    vec![
        TierBand {
            tier: PricingTier::Tier1,
            min_points_percent: dec!(2.25),
            min_inclusive: true,
            max_points_percent: dec!(3.00),
            max_inclusive: true,
            loan_officer_bps: dec!(100),
            associate_bps: dec!(80),
        },
        TierBand {
            tier: PricingTier::Tier2,
            min_points_percent: dec!(1.50),
            min_inclusive: true,
            max_points_percent: dec!(2.25),
            max_inclusive: false,
            loan_officer_bps: dec!(75),
            associate_bps: dec!(60),
        },
        TierBand {
            tier: PricingTier::Tier3,
            min_points_percent: dec!(0.75),
            min_inclusive: true,
            max_points_percent: dec!(1.50),
            max_inclusive: false,
            loan_officer_bps: dec!(50),
            associate_bps: dec!(50),
        },
        TierBand {
            tier: PricingTier::Tier4,
            min_points_percent: Decimal::ZERO,
            min_inclusive: false,
            max_points_percent: dec!(0.74),
            max_inclusive: true,
            loan_officer_bps: dec!(25),
            associate_bps: dec!(25),
        },
    ]
}

impl PricingRules {
    /// Reject rule sets the engine cannot price sensibly.
    pub fn validate(&self) -> RefiPricingResult<()> {
        let rates = [
            ("va_funding_fee_percent", self.va_funding_fee_percent),
            ("va_irrrl_funding_fee_percent", self.va_irrrl_funding_fee_percent),
            ("fha_ufmip_percent", self.fha_ufmip_percent),
            ("fha_annual_mip_percent", self.fha_annual_mip_percent),
            ("buydown_step_percent", self.buydown_step_percent),
        ];
        for (field, rate) in rates {
            if rate < Decimal::ZERO || rate > dec!(100) {
                return Err(RefiPricingError::InvalidInput {
                    field: field.into(),
                    reason: "Rate must be between 0 and 100 percent".into(),
                });
            }
        }

        let thresholds = [
            ("points_alert_threshold_percent", self.points_alert_threshold_percent),
            ("conventional_mi_ltv_percent", self.conventional_mi_ltv_percent),
            (
                "conventional_rate_term_max_ltv_percent",
                self.conventional_rate_term_max_ltv_percent,
            ),
            (
                "conventional_cash_out_max_ltv_percent",
                self.conventional_cash_out_max_ltv_percent,
            ),
            ("fha_max_ltv_percent", self.fha_max_ltv_percent),
        ];
        for (field, threshold) in thresholds {
            if threshold < Decimal::ZERO {
                return Err(RefiPricingError::InvalidInput {
                    field: field.into(),
                    reason: "Threshold cannot be negative".into(),
                });
            }
        }

        for (i, band) in self.pricing_tiers.iter().enumerate() {
            let field = format!("pricing_tiers[{i}]");
            if band.tier == PricingTier::None {
                return Err(RefiPricingError::InvalidInput {
                    field,
                    reason: "The None tier is implicit and cannot be banded".into(),
                });
            }
            if band.min_points_percent > band.max_points_percent {
                return Err(RefiPricingError::InvalidInput {
                    field,
                    reason: "Band minimum exceeds maximum".into(),
                });
            }
            let bps_range = Decimal::ZERO..=dec!(10000);
            if !bps_range.contains(&band.loan_officer_bps) || !bps_range.contains(&band.associate_bps) {
                return Err(RefiPricingError::InvalidInput {
                    field,
                    reason: "Compensation must be between 0 and 10000 basis points".into(),
                });
            }
            if let Some(j) = self.pricing_tiers[..i].iter().position(|b| b.overlaps(band)) {
                return Err(RefiPricingError::InvalidInput {
                    field,
                    reason: format!("Band overlaps pricing_tiers[{j}]"),
                });
            }
        }

        Ok(())
    }

    /// The band containing `points`, if any.
    pub fn tier_band(&self, points: Percent) -> Option<&TierBand> {
        self.pricing_tiers.iter().find(|band| band.contains(points))
    }
}

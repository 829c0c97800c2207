//! Refinance scenario pricing.
//!
//! `compute_scenario` runs the whole pipeline on one input: normalization,
//! fees and points, buydown subsidy, final PITI, consolidation savings and
//! compensation. It is total: every input produces a result and there is no
//! error path. `price_scenario` adds rule validation and the standard output
//! envelope for callers that want methodology and warnings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::pricing::advisories::{advisory_messages, Advisories};
use crate::pricing::buydown::{buydown_detail, size_subsidy, BuydownDetail};
use crate::pricing::compensation::{compensate, CompensationBreakdown};
use crate::pricing::consolidation::{ambiguous_cash_out_intent, summarize, ConsolidationSummary};
use crate::pricing::fees::{derive_fees, FeeBreakdown};
use crate::pricing::input::{LoanProgram, ScenarioInput, TemporaryBuydown};
use crate::pricing::normalize::NormalizedScenario;
use crate::pricing::payment::{loan_to_value, ltv_advisories, payment_breakdown, PaymentBreakdown};
use crate::pricing::rules::PricingRules;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::RefiPricingResult;

const METHODOLOGY: &str =
    "Refinance Pricing (Fee-Inclusive Loan Amount, Fixed-Rate PITI, Temporary Buydown Subsidy)";

/// Everything derived from one `ScenarioInput`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub loan_program: LoanProgram,
    /// Buydown after program rules.
    pub temporary_buydown: TemporaryBuydown,
    /// Cash-out after program rules.
    pub effective_cash_out: Money,
    pub fees: FeeBreakdown,
    pub buydown_subsidy_cost: Money,
    /// Pre-buydown amount plus any financed buydown subsidy.
    pub final_loan_amount: Money,
    pub loan_to_value_ratio_percent: Percent,
    pub payment: PaymentBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buydown: Option<BuydownDetail>,
    pub consolidation: ConsolidationSummary,
    /// Always present from the engine; removed by the borrower view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compensation: Option<CompensationBreakdown>,
    pub advisories: Advisories,
}

/// Price a scenario with the default rate sheet.
pub fn compute_scenario(input: &ScenarioInput) -> ScenarioResult {
    compute_scenario_with_rules(input, &PricingRules::default())
}

/// Price a scenario with explicit rules. Rules are assumed valid; see
/// [`PricingRules::validate`].
pub fn compute_scenario_with_rules(input: &ScenarioInput, rules: &PricingRules) -> ScenarioResult {
    let s = NormalizedScenario::from_input(input);
    debug!(
        program = s.program().label(),
        buydown = s.buydown().label(),
        cash_out = %s.cash_out,
        "normalized scenario"
    );

    let fees = derive_fees(&s, rules);
    debug!(
        base_loan = %fees.base_loan_with_gov_fee,
        government_fee = %fees.government_fee,
        points_cost = %fees.points_cost,
        loan_pre_buydown = %fees.final_loan_pre_buydown,
        "derived fees"
    );

    let sizing = size_subsidy(&s, fees.final_loan_pre_buydown, rules);
    let buydown_subsidy_cost = sizing
        .as_ref()
        .map(|b| b.subsidy_cost)
        .unwrap_or(Decimal::ZERO);
    let final_loan_amount = fees.final_loan_pre_buydown + buydown_subsidy_cost;
    if sizing.is_some() {
        debug!(subsidy = %buydown_subsidy_cost, final_loan = %final_loan_amount, "sized buydown");
    }

    let ltv = loan_to_value(final_loan_amount, s.appraised_value);
    let payment = payment_breakdown(final_loan_amount, s.interest_rate_percent, &s, rules);
    let buydown = sizing.and_then(|sizing| buydown_detail(&s, sizing, final_loan_amount, rules));

    let consolidation = summarize(&s, payment.total_monthly_piti, fees.total_costs);
    let compensation = compensate(final_loan_amount, s.branch_gen_points_percent, rules);

    let advisories = Advisories {
        points_too_high: fees.total_points_percent > rules.points_alert_threshold_percent,
        ltv: ltv_advisories(ltv, &s, rules),
        ambiguous_cash_out_intent: ambiguous_cash_out_intent(&s),
        buydown_ignored: s.overrides.buydown_ignored,
        cash_out_ignored: s.overrides.cash_out_ignored,
    };

    debug!(
        ltv = %ltv,
        piti = %payment.total_monthly_piti,
        tier = ?compensation.inferred_pricing_tier,
        advisories = advisories.any(),
        "priced scenario"
    );

    ScenarioResult {
        loan_program: s.program(),
        temporary_buydown: s.buydown(),
        effective_cash_out: s.cash_out,
        fees,
        buydown_subsidy_cost,
        final_loan_amount,
        loan_to_value_ratio_percent: ltv,
        payment,
        buydown,
        consolidation,
        compensation: Some(compensation),
        advisories,
    }
}

/// Validate rules, price the scenario and wrap it in the output envelope.
/// Advisories are repeated as envelope warnings.
pub fn price_scenario(
    input: &ScenarioInput,
    rules: &PricingRules,
) -> RefiPricingResult<ComputationOutput<ScenarioResult>> {
    let start = Instant::now();

    if let Err(e) = rules.validate() {
        warn!(error = %e, "rejected pricing rules");
        return Err(e);
    }

    let result = compute_scenario_with_rules(input, rules);
    let warnings = advisory_messages(&result, rules);

    let assumptions = serde_json::json!({
        "input": input,
        "rules": rules,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(METHODOLOGY, &assumptions, warnings, elapsed, result))
}

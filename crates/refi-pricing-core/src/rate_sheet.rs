use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::RefiPricingError;
use crate::pricing::engine::compute_scenario_with_rules;
use crate::pricing::input::ScenarioInput;
use crate::pricing::rules::PricingRules;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::RefiPricingResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// One rate/points combination to quote.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateOption {
    pub interest_rate_percent: Percent,
    #[serde(default)]
    pub lender_points_percent: Percent,
}

/// A base scenario quoted at several rate/points options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSheetInput {
    pub base: ScenarioInput,
    pub options: Vec<RateOption>,
    #[serde(default)]
    pub rules: PricingRules,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSheetRow {
    pub interest_rate_percent: Percent,
    pub lender_points_percent: Percent,
    pub points_cost: Money,
    pub final_loan_amount: Money,
    pub principal_and_interest: Money,
    pub total_monthly_piti: Money,
    pub total_monthly_savings: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months_to_recoup_costs: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSheetOutput {
    pub rows: Vec<RateSheetRow>,
    /// Row with the lowest PITI (first one on ties).
    pub lowest_piti_index: usize,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price the base scenario once per option, overriding only the note rate and
/// lender points.
pub fn build_rate_sheet(
    input: &RateSheetInput,
) -> RefiPricingResult<ComputationOutput<RateSheetOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.options.is_empty() {
        return Err(RefiPricingError::InvalidInput {
            field: "options".into(),
            reason: "At least one rate option is required".into(),
        });
    }
    input.rules.validate()?;

    let mut rows = Vec::with_capacity(input.options.len());
    for option in &input.options {
        let scenario = ScenarioInput {
            interest_rate_percent: option.interest_rate_percent,
            lender_points_percent: option.lender_points_percent,
            ..input.base.clone()
        };
        let result = compute_scenario_with_rules(&scenario, &input.rules);

        if result.advisories.points_too_high {
            warnings.push(format!(
                "Option {}% / {} pts exceeds the {}% points alert threshold",
                option.interest_rate_percent,
                option.lender_points_percent,
                input.rules.points_alert_threshold_percent
            ));
        }

        rows.push(RateSheetRow {
            interest_rate_percent: option.interest_rate_percent,
            lender_points_percent: option.lender_points_percent,
            points_cost: result.fees.points_cost,
            final_loan_amount: result.final_loan_amount,
            principal_and_interest: result.payment.principal_and_interest,
            total_monthly_piti: result.payment.total_monthly_piti,
            total_monthly_savings: result.consolidation.total_monthly_savings,
            months_to_recoup_costs: result.consolidation.months_to_recoup_costs,
        });
    }

    let lowest_piti_index = rows
        .iter()
        .enumerate()
        .min_by_key(|(_, row)| row.total_monthly_piti)
        .map(|(i, _)| i)
        .unwrap_or(0);
    debug!(options = rows.len(), lowest_piti_index, "built rate sheet");

    let output = RateSheetOutput {
        rows,
        lowest_piti_index,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Rate Sheet (Scenario Priced per Rate/Points Option)",
        &serde_json::json!({
            "loan_program": input.base.loan_program,
            "term_years": input.base.term_years.to_string(),
            "options": input.options.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

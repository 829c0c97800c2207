use napi::Result as NapiResult;
use napi_derive::napi;

use refi_pricing_core::{present, price_scenario, Audience, PricingRules, ScenarioInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Scenario pricing
// ---------------------------------------------------------------------------

/// Price a scenario. `rules_json` defaults to the built-in rate sheet and
/// `audience` ("loan_officer" / "officer" / "borrower") to the loan officer.
#[napi]
pub fn compute_scenario(
    input_json: String,
    rules_json: Option<String>,
    audience: Option<String>,
) -> NapiResult<String> {
    let input: ScenarioInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rules: PricingRules = match rules_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => PricingRules::default(),
    };
    let audience: Audience = match audience {
        Some(a) => serde_json::from_value(serde_json::Value::String(a)).map_err(to_napi_error)?,
        None => Audience::default(),
    };

    let output = price_scenario(&input, &rules).map_err(to_napi_error)?;
    serde_json::to_string(&present(output, audience)).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedule & rate sheet
// ---------------------------------------------------------------------------

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: refi_pricing_core::schedule::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = refi_pricing_core::schedule::build_amortization_schedule(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn rate_sheet(input_json: String) -> NapiResult<String> {
    let input: refi_pricing_core::rate_sheet::RateSheetInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        refi_pricing_core::rate_sheet::build_rate_sheet(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

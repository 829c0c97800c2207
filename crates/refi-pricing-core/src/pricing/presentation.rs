//! Audience-specific views of a priced scenario.

use serde::{Deserialize, Serialize};

use crate::pricing::engine::ScenarioResult;
use crate::types::ComputationOutput;

/// Who the result is shown to. Borrowers never see compensation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    #[default]
    #[serde(alias = "officer")]
    LoanOfficer,
    Borrower,
}

impl Audience {
    pub fn can_see_compensation(&self) -> bool {
        matches!(self, Audience::LoanOfficer)
    }
}

impl ScenarioResult {
    pub fn for_audience(mut self, audience: Audience) -> Self {
        if !audience.can_see_compensation() {
            self.compensation = None;
        }
        self
    }
}

/// Apply an audience filter to a full pricing envelope.
pub fn present(
    mut output: ComputationOutput<ScenarioResult>,
    audience: Audience,
) -> ComputationOutput<ScenarioResult> {
    output.result = output.result.for_audience(audience);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::engine::{compute_scenario, price_scenario};
    use crate::pricing::input::ScenarioInput;
    use crate::pricing::rules::PricingRules;
    use rust_decimal_macros::dec;

    fn input() -> ScenarioInput {
        ScenarioInput {
            appraised_value: dec!(500000),
            current_balance: dec!(350000),
            branch_gen_points_percent: dec!(2.5),
            interest_rate_percent: dec!(6.25),
            term_years: dec!(30),
            ..ScenarioInput::default()
        }
    }

    #[test]
    fn test_borrower_view_drops_compensation() {
        let full = compute_scenario(&input());
        let view = full.clone().for_audience(Audience::Borrower);
        assert!(full.compensation.is_some());
        assert!(view.compensation.is_none());
        assert_eq!(view.final_loan_amount, full.final_loan_amount);
        assert_eq!(view.payment, full.payment);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("compensation").is_none());
    }

    #[test]
    fn test_officer_view_keeps_compensation() {
        let view = compute_scenario(&input()).for_audience(Audience::LoanOfficer);
        assert!(view.compensation.is_some());
    }

    #[test]
    fn test_present_envelope() {
        let out = price_scenario(&input(), &PricingRules::default()).unwrap();
        let out = present(out, Audience::Borrower);
        assert!(out.result.compensation.is_none());
    }

    #[test]
    fn test_audience_parsing() {
        let a: Audience = serde_json::from_str("\"officer\"").unwrap();
        assert_eq!(a, Audience::LoanOfficer);
        let a: Audience = serde_json::from_str("\"borrower\"").unwrap();
        assert_eq!(a, Audience::Borrower);
    }
}

use serde::{Deserialize, Serialize};

use crate::pricing::engine::ScenarioResult;
use crate::pricing::payment::LtvAdvisories;
use crate::pricing::rules::PricingRules;

/// Warning flags for the caller to surface. None of them block pricing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisories {
    /// Total points above the alert threshold.
    pub points_too_high: bool,
    #[serde(flatten)]
    pub ltv: LtvAdvisories,
    /// Cash-out with no debts and no pure cash-out election.
    pub ambiguous_cash_out_intent: bool,
    /// Requested buydown dropped (non-Conventional program or cash-out).
    pub buydown_ignored: bool,
    /// Cash-out dropped (VA IRRRL).
    pub cash_out_ignored: bool,
}

impl Advisories {
    pub fn any(&self) -> bool {
        *self != Advisories::default()
    }
}

/// Human-readable warnings for the output envelope.
pub fn advisory_messages(result: &ScenarioResult, rules: &PricingRules) -> Vec<String> {
    let a = &result.advisories;
    let ltv = result.loan_to_value_ratio_percent.round_dp(2);
    let mut warnings = Vec::new();

    if a.points_too_high {
        warnings.push(format!(
            "Total points {}% exceed the {}% alert threshold",
            result.fees.total_points_percent, rules.points_alert_threshold_percent
        ));
    }
    if a.ltv.fha_ltv_exceeded {
        warnings.push(format!(
            "FHA LTV {ltv}% exceeds {}%: scenario is not possible under program rules",
            rules.fha_max_ltv_percent
        ));
    }
    if a.ltv.rate_term_ltv_exceeded {
        warnings.push(format!(
            "Conventional rate/term LTV {ltv}% exceeds {}%: refinance not allowed",
            rules.conventional_rate_term_max_ltv_percent
        ));
    }
    if a.ltv.cash_out_ltv_exceeded {
        warnings.push(format!(
            "Conventional cash-out LTV {ltv}% exceeds {}%: cash-out not allowed",
            rules.conventional_cash_out_max_ltv_percent
        ));
    }
    if a.ltv.mortgage_insurance_required {
        warnings.push(format!(
            "LTV {ltv}% is above {}%: mortgage insurance required",
            rules.conventional_mi_ltv_percent
        ));
    }
    if a.ambiguous_cash_out_intent {
        warnings.push(
            "Cash-out entered with no debts to pay off: confirm pure cash-out or enter debts".into(),
        );
    }
    if a.buydown_ignored {
        warnings.push(
            "Temporary buydown ignored: available on Conventional loans without cash-out only"
                .into(),
        );
    }
    if a.cash_out_ignored {
        warnings.push("Cash-out ignored: VA IRRRL does not allow cash-out".into());
    }

    warnings
}

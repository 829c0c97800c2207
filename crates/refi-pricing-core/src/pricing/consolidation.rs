use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::normalize::NormalizedScenario;
use crate::types::Money;

/// Cash-out split and monthly savings against the borrower's current outflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationSummary {
    pub is_consolidating_debt: bool,
    pub debt_paid_off_applied: Money,
    pub cash_to_borrower: Money,
    /// Previous PITI, plus consolidated debt payments when consolidating.
    pub total_previous_monthly_outflow: Money,
    /// Previous PITI less new PITI, floored at zero.
    pub savings_vs_previous: Money,
    /// Previous outflow less new PITI, floored at zero.
    pub total_monthly_savings: Money,
    /// Closing costs divided by monthly savings; absent when nothing is saved
    /// or there are no costs to recoup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months_to_recoup_costs: Option<Decimal>,
}

pub fn is_consolidating(s: &NormalizedScenario) -> bool {
    s.cash_out > Decimal::ZERO
        && !s.pure_cash_out
        && (s.debt_paid_off > Decimal::ZERO || s.debt_monthly_payments > Decimal::ZERO)
}

/// Cash-out with no debts entered and no pure cash-out election.
pub fn ambiguous_cash_out_intent(s: &NormalizedScenario) -> bool {
    s.cash_out > Decimal::ZERO
        && !s.pure_cash_out
        && s.debt_paid_off.is_zero()
        && s.debt_monthly_payments.is_zero()
}

pub fn summarize(
    s: &NormalizedScenario,
    total_monthly_piti: Money,
    total_costs: Money,
) -> ConsolidationSummary {
    let consolidating = is_consolidating(s);

    let debt_paid_off_applied = if consolidating {
        s.cash_out.min(s.debt_paid_off)
    } else {
        Decimal::ZERO
    };
    let cash_to_borrower = if consolidating {
        (s.cash_out - debt_paid_off_applied).max(Decimal::ZERO)
    } else {
        s.cash_out
    };

    let savings_vs_previous = (s.previous_monthly_piti - total_monthly_piti).max(Decimal::ZERO);

    let (total_previous_monthly_outflow, total_monthly_savings) = if consolidating {
        let outflow = s.previous_monthly_piti + s.debt_monthly_payments;
        (outflow, (outflow - total_monthly_piti).max(Decimal::ZERO))
    } else {
        (s.previous_monthly_piti, savings_vs_previous)
    };

    let months_to_recoup_costs =
        if total_monthly_savings > Decimal::ZERO && total_costs > Decimal::ZERO {
            total_costs.checked_div(total_monthly_savings)
        } else {
            None
        };

    ConsolidationSummary {
        is_consolidating_debt: consolidating,
        debt_paid_off_applied,
        cash_to_borrower,
        total_previous_monthly_outflow,
        savings_vs_previous,
        total_monthly_savings,
        months_to_recoup_costs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::input::{LoanProgram, ScenarioInput};
    use rust_decimal_macros::dec;

    fn scenario(input: ScenarioInput) -> NormalizedScenario {
        NormalizedScenario::from_input(&input)
    }

    fn cash_out_input() -> ScenarioInput {
        ScenarioInput {
            cash_out_amount: dec!(20000),
            debt_paid_off: dec!(15000),
            debt_monthly_payments: dec!(500),
            previous_monthly_piti: dec!(2200),
            ..ScenarioInput::default()
        }
    }

    #[test]
    fn test_consolidation_split() {
        let s = scenario(cash_out_input());
        let c = summarize(&s, dec!(2400), dec!(6000));
        assert!(c.is_consolidating_debt);
        assert_eq!(c.debt_paid_off_applied, dec!(15000));
        assert_eq!(c.cash_to_borrower, dec!(5000));
        assert_eq!(c.total_previous_monthly_outflow, dec!(2700));
        assert_eq!(c.total_monthly_savings, dec!(300));
        assert_eq!(c.savings_vs_previous, Decimal::ZERO);
        assert_eq!(c.months_to_recoup_costs, Some(dec!(20)));
    }

    #[test]
    fn test_payoff_capped_at_cash_out() {
        let mut input = cash_out_input();
        input.debt_paid_off = dec!(35000);
        let c = summarize(&scenario(input), dec!(2400), Decimal::ZERO);
        assert_eq!(c.debt_paid_off_applied, dec!(20000));
        assert_eq!(c.cash_to_borrower, Decimal::ZERO);
    }

    #[test]
    fn test_pure_cash_out_suppresses_consolidation() {
        let mut input = cash_out_input();
        input.pure_cash_out_no_consolidation = true;
        let c = summarize(&scenario(input), dec!(2000), Decimal::ZERO);
        assert!(!c.is_consolidating_debt);
        assert_eq!(c.debt_paid_off_applied, Decimal::ZERO);
        assert_eq!(c.cash_to_borrower, dec!(20000));
        assert_eq!(c.total_previous_monthly_outflow, dec!(2200));
        assert_eq!(c.total_monthly_savings, dec!(200));
    }

    #[test]
    fn test_savings_never_negative() {
        let c = summarize(&scenario(cash_out_input()), dec!(5000), dec!(6000));
        assert_eq!(c.savings_vs_previous, Decimal::ZERO);
        assert_eq!(c.total_monthly_savings, Decimal::ZERO);
        assert!(c.months_to_recoup_costs.is_none());
    }

    #[test]
    fn test_no_recoup_without_costs() {
        let mut input = cash_out_input();
        input.pure_cash_out_no_consolidation = true;
        let s = scenario(input);

        let c = summarize(&s, dec!(2000), dec!(-1500));
        assert_eq!(c.total_monthly_savings, dec!(200));
        assert!(c.months_to_recoup_costs.is_none());

        let c = summarize(&s, dec!(2000), Decimal::ZERO);
        assert!(c.months_to_recoup_costs.is_none());

        let c = summarize(&s, dec!(2000), dec!(1500));
        assert_eq!(c.months_to_recoup_costs, Some(dec!(7.5)));
    }

    #[test]
    fn test_irrrl_never_consolidates() {
        let mut input = cash_out_input();
        input.loan_program = LoanProgram::VaIrrrl;
        let c = summarize(&scenario(input), dec!(2000), Decimal::ZERO);
        assert!(!c.is_consolidating_debt);
        assert_eq!(c.cash_to_borrower, Decimal::ZERO);
    }

    #[test]
    fn test_ambiguous_intent() {
        let input = ScenarioInput {
            cash_out_amount: dec!(20000),
            ..ScenarioInput::default()
        };
        assert!(ambiguous_cash_out_intent(&scenario(input.clone())));

        let pure = ScenarioInput {
            pure_cash_out_no_consolidation: true,
            ..input
        };
        assert!(!ambiguous_cash_out_intent(&scenario(pure)));
        assert!(!ambiguous_cash_out_intent(&scenario(cash_out_input())));
    }
}

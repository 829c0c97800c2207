use pretty_assertions::assert_eq;
use refi_pricing_core::pricing::compensation::PricingTier;
use refi_pricing_core::pricing::fees::GovernmentFeeKind;
use refi_pricing_core::{
    compute_scenario, price_scenario, Audience, LoanProgram, PricingRules, ScenarioInput,
    TemporaryBuydown,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{}: expected ~{}, got {} (diff = {})",
        msg,
        expected,
        actual,
        diff
    );
}

// ===========================================================================
// Form input
// ===========================================================================

#[test]
fn test_form_json_with_formatted_strings() {
    let input: ScenarioInput = serde_json::from_str(
        r#"{
            "loan_program": "Conventional",
            "appraised_value": "$400,000",
            "current_balance": 300000,
            "bank_fee": "2,350.00",
            "title_fee": "",
            "monthly_escrow": null,
            "interest_rate_percent": "6.5%",
            "term_years": "30"
        }"#,
    )
    .unwrap();

    assert_eq!(input.appraised_value, dec!(400000));
    assert_eq!(input.bank_fee, dec!(2350.00));
    assert_eq!(input.title_fee, Decimal::ZERO);
    assert_eq!(input.monthly_escrow, Decimal::ZERO);
    assert_eq!(input.interest_rate_percent, dec!(6.5));

    let r = compute_scenario(&input);
    assert_eq!(r.final_loan_amount, dec!(302350));
}

#[test]
fn test_unparseable_values_become_zero() {
    let input: ScenarioInput = serde_json::from_str(
        r#"{ "current_balance": "n/a", "escrow_months": "three", "loan_program": "VA" }"#,
    )
    .unwrap();
    assert_eq!(input.current_balance, Decimal::ZERO);
    assert_eq!(input.escrow_months, Decimal::ZERO);
    assert_eq!(input.loan_program, LoanProgram::Va);
}

#[test]
fn test_oversized_form_values_reach_the_clamp() {
    let input: ScenarioInput = serde_json::from_str(
        r#"{ "current_balance": "1e30", "appraised_value": 1e30, "term_years": 30 }"#,
    )
    .unwrap();
    let r = compute_scenario(&input);

    assert_eq!(r.final_loan_amount, dec!(1_000_000_000_000));
    assert_eq!(r.loan_to_value_ratio_percent, dec!(100));
}

// ===========================================================================
// Program scenarios
// ===========================================================================

#[test]
fn test_conventional_rate_term_reference_quote() {
    let input = ScenarioInput {
        appraised_value: dec!(400000),
        current_balance: dec!(300000),
        bank_fee: dec!(2350),
        interest_rate_percent: dec!(6.5),
        term_years: dec!(30),
        ..ScenarioInput::default()
    };
    let r = compute_scenario(&input);

    assert_eq!(r.fees.base_loan_before_gov_fee, dec!(302350));
    assert_eq!(r.fees.government_fee, Decimal::ZERO);
    assert_eq!(r.fees.government_fee_kind, None);
    assert_eq!(r.loan_to_value_ratio_percent, dec!(75.5875));
    assert_close(r.payment.principal_and_interest, dec!(1911.06), dec!(0.01), "P&I");
    assert_eq!(r.payment.monthly_mi, Decimal::ZERO);
    assert_eq!(r.payment.total_monthly_piti, r.payment.principal_and_interest);
}

#[test]
fn test_va_funding_fee_and_exemption() {
    let base = ScenarioInput {
        loan_program: LoanProgram::Va,
        appraised_value: dec!(350000),
        current_balance: dec!(300000),
        title_fee: dec!(1000),
        interest_rate_percent: dec!(6),
        term_years: dec!(30),
        ..ScenarioInput::default()
    };
    let r = compute_scenario(&base);
    assert_eq!(r.fees.government_fee_kind, Some(GovernmentFeeKind::FundingFee));
    // 3.3% of 301000
    assert_eq!(r.fees.government_fee, dec!(9933));
    assert_eq!(r.final_loan_amount, dec!(310933));

    let exempt = compute_scenario(&ScenarioInput {
        is_funding_fee_exempt: true,
        ..base
    });
    assert_eq!(exempt.fees.government_fee, Decimal::ZERO);
    assert_eq!(exempt.final_loan_amount, dec!(301000));
}

#[test]
fn test_irrrl_ignores_cash_out() {
    let input = ScenarioInput {
        loan_program: LoanProgram::VaIrrrl,
        appraised_value: dec!(300000),
        current_balance: dec!(200000),
        cash_out_amount: dec!(25000),
        debt_paid_off: dec!(10000),
        interest_rate_percent: dec!(5.75),
        term_years: dec!(30),
        ..ScenarioInput::default()
    };
    let r = compute_scenario(&input);

    assert_eq!(r.effective_cash_out, Decimal::ZERO);
    assert_eq!(r.consolidation.cash_to_borrower, Decimal::ZERO);
    assert!(!r.consolidation.is_consolidating_debt);
    assert!(r.advisories.cash_out_ignored);
    // 0.5% of 200000
    assert_eq!(r.fees.government_fee, dec!(1000));
}

#[test]
fn test_fha_exemption_flag_has_no_effect() {
    let input = ScenarioInput {
        loan_program: LoanProgram::Fha,
        appraised_value: dec!(300000),
        current_balance: dec!(250000),
        is_funding_fee_exempt: true,
        interest_rate_percent: dec!(6.25),
        term_years: dec!(30),
        ..ScenarioInput::default()
    };
    let r = compute_scenario(&input);
    assert_eq!(r.fees.government_fee_kind, Some(GovernmentFeeKind::Ufmip));
    assert_eq!(r.fees.government_fee, dec!(4375));
    assert_eq!(r.final_loan_amount, dec!(254375));
    assert!(r.payment.monthly_mip > Decimal::ZERO);
    assert!(r.advisories.ltv.fha_ltv_exceeded);
}

#[test]
fn test_conventional_mi_above_threshold() {
    let input = ScenarioInput {
        appraised_value: dec!(300000),
        current_balance: dec!(270000),
        mortgage_insurance_annual_rate_percent: dec!(0.6),
        interest_rate_percent: dec!(6.5),
        term_years: dec!(30),
        ..ScenarioInput::default()
    };
    let r = compute_scenario(&input);
    assert_eq!(r.payment.monthly_mi, dec!(135));
    assert!(r.advisories.ltv.mortgage_insurance_required);
    assert!(!r.advisories.ltv.rate_term_ltv_exceeded);
}

// ===========================================================================
// Consolidation
// ===========================================================================

#[test]
fn test_debt_consolidation_savings() {
    let input = ScenarioInput {
        appraised_value: dec!(500000),
        current_balance: dec!(280000),
        cash_out_amount: dec!(40000),
        debt_paid_off: dec!(30000),
        debt_monthly_payments: dec!(900),
        previous_monthly_piti: dec!(2100),
        interest_rate_percent: dec!(6),
        term_years: dec!(30),
        temporary_buydown: TemporaryBuydown::TwoOne,
        ..ScenarioInput::default()
    };
    let r = compute_scenario(&input);

    assert!(r.consolidation.is_consolidating_debt);
    assert_eq!(r.consolidation.debt_paid_off_applied, dec!(30000));
    assert_eq!(r.consolidation.cash_to_borrower, dec!(10000));
    assert_eq!(r.consolidation.total_previous_monthly_outflow, dec!(3000));
    assert_eq!(
        r.consolidation.total_monthly_savings,
        dec!(3000) - r.payment.total_monthly_piti
    );
    // Cash-out disables the buydown
    assert_eq!(r.temporary_buydown, TemporaryBuydown::None);
    assert_eq!(r.buydown_subsidy_cost, Decimal::ZERO);
    assert!(r.advisories.buydown_ignored);
}

// ===========================================================================
// Properties
// ===========================================================================

fn sample_inputs() -> Vec<ScenarioInput> {
    let programs = [
        LoanProgram::Conventional,
        LoanProgram::Va,
        LoanProgram::Fha,
        LoanProgram::VaIrrrl,
    ];
    let buydowns = [
        TemporaryBuydown::None,
        TemporaryBuydown::TwoOne,
        TemporaryBuydown::OneZero,
    ];
    let mut inputs = Vec::new();
    for program in programs {
        for buydown in buydowns {
            for cash_out in [Decimal::ZERO, dec!(15000)] {
                inputs.push(ScenarioInput {
                    loan_program: program,
                    temporary_buydown: buydown,
                    appraised_value: dec!(420000),
                    current_balance: dec!(310000),
                    cash_out_amount: cash_out,
                    monthly_escrow: dec!(380),
                    escrow_months: dec!(2),
                    bank_fee: dec!(1200),
                    title_fee: dec!(850),
                    lender_points_percent: dec!(0.5),
                    branch_gen_points_percent: dec!(1),
                    interest_rate_percent: dec!(6.875),
                    term_years: dec!(30),
                    previous_monthly_piti: dec!(2500),
                    ..ScenarioInput::default()
                });
            }
        }
    }
    inputs
}

#[test]
fn test_invariants_hold_across_programs() {
    for input in sample_inputs() {
        let r = compute_scenario(&input);
        let ctx = format!("{:?}/{:?}/{}", input.loan_program, input.temporary_buydown, input.cash_out_amount);

        assert!(r.payment.total_monthly_piti >= r.payment.monthly_escrow, "{ctx}");
        assert!(r.final_loan_amount >= r.fees.final_loan_pre_buydown, "{ctx}");
        assert!(r.consolidation.savings_vs_previous >= Decimal::ZERO, "{ctx}");
        assert!(r.consolidation.total_monthly_savings >= Decimal::ZERO, "{ctx}");

        let buydown_allowed = input.loan_program == LoanProgram::Conventional
            && input.cash_out_amount.is_zero()
            && input.temporary_buydown != TemporaryBuydown::None;
        if buydown_allowed {
            assert!(r.buydown_subsidy_cost > Decimal::ZERO, "{ctx}");
        } else {
            assert_eq!(r.buydown_subsidy_cost, Decimal::ZERO, "{ctx}");
            assert!(r.buydown.is_none(), "{ctx}");
        }

        if input.loan_program == LoanProgram::VaIrrrl {
            assert_eq!(r.effective_cash_out, Decimal::ZERO, "{ctx}");
            assert_eq!(r.consolidation.cash_to_borrower, Decimal::ZERO, "{ctx}");
        }

        assert_eq!(r, compute_scenario(&input), "{ctx}");
    }
}

#[test]
fn test_tier_inference_through_engine() {
    let cases = [
        (dec!(2.25), PricingTier::Tier1),
        (dec!(1.50), PricingTier::Tier2),
        (dec!(0.75), PricingTier::Tier3),
        (dec!(0.74), PricingTier::Tier4),
        (Decimal::ZERO, PricingTier::None),
        (dec!(3.01), PricingTier::None),
    ];
    for (points, expected) in cases {
        let r = compute_scenario(&ScenarioInput {
            current_balance: dec!(200000),
            branch_gen_points_percent: points,
            ..ScenarioInput::default()
        });
        assert_eq!(
            r.compensation.unwrap().inferred_pricing_tier,
            expected,
            "points {points}"
        );
    }
}

// ===========================================================================
// Rules and envelope
// ===========================================================================

#[test]
fn test_custom_rules_from_json() {
    let rules: PricingRules =
        serde_json::from_str(r#"{ "va_funding_fee_percent": "2.15" }"#).unwrap();
    assert_eq!(rules.va_funding_fee_percent, dec!(2.15));
    assert_eq!(rules.fha_ufmip_percent, dec!(1.75));

    let input = ScenarioInput {
        loan_program: LoanProgram::Va,
        current_balance: dec!(200000),
        ..ScenarioInput::default()
    };
    let out = price_scenario(&input, &rules).unwrap();
    assert_eq!(out.result.fees.government_fee, dec!(4300));
}

#[test]
fn test_borrower_envelope_hides_compensation() {
    let input = ScenarioInput {
        current_balance: dec!(250000),
        branch_gen_points_percent: dec!(2),
        ..ScenarioInput::default()
    };
    let out = price_scenario(&input, &PricingRules::default()).unwrap();
    let out = refi_pricing_core::present(out, Audience::Borrower);
    let json = serde_json::to_value(&out).unwrap();
    assert!(json["result"].get("compensation").is_none());
    assert!(json["result"].get("final_loan_amount").is_some());
}

#[cfg(feature = "schedule")]
#[test]
fn test_schedule_from_priced_scenario() {
    use refi_pricing_core::schedule::{amortization_schedule, ScheduleInput};

    let input = ScenarioInput {
        appraised_value: dec!(400000),
        current_balance: dec!(300000),
        bank_fee: dec!(2350),
        interest_rate_percent: dec!(6.5),
        term_years: dec!(30),
        ..ScenarioInput::default()
    };
    let r = compute_scenario(&input);
    let schedule = amortization_schedule(&ScheduleInput::from_scenario(&r, dec!(6.5), dec!(30))).unwrap();

    assert_eq!(schedule.number_of_payments, 360);
    assert_eq!(schedule.monthly_payment, r.payment.principal_and_interest.round_dp(2));
    assert_eq!(schedule.rows.last().unwrap().remaining_balance, Decimal::ZERO);
}

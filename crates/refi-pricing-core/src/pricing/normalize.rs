use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::pricing::input::{LoanProgram, ScenarioInput, TemporaryBuydown};
use crate::types::{Money, Percent};

/// Largest currency amount accepted; keeps every product inside Decimal range.
pub(crate) const MAX_MONEY: Decimal = dec!(1_000_000_000_000);

/// Largest rate, point, month or year figure accepted.
pub(crate) const MAX_FACTOR: Decimal = dec!(10_000);

/// Program-specific terms. A buydown can only exist on a Conventional loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramTerms {
    Conventional {
        buydown: TemporaryBuydown,
        mi_annual_rate_percent: Percent,
    },
    Va {
        funding_fee_exempt: bool,
    },
    VaIrrrl {
        funding_fee_exempt: bool,
    },
    Fha,
}

/// Fields that normalization forced back to a valid default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationOverrides {
    /// A buydown was requested on a non-Conventional or cash-out loan.
    pub buydown_ignored: bool,
    /// Cash-out was entered on a VA IRRRL.
    pub cash_out_ignored: bool,
}

/// Internally consistent view of a `ScenarioInput`, built once per computation.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedScenario {
    pub terms: ProgramTerms,
    pub appraised_value: Money,
    pub current_balance: Money,
    /// Cash-out after program rules (always zero for VA IRRRL).
    pub cash_out: Money,
    pub monthly_escrow: Money,
    pub escrow_months: Decimal,
    pub bank_fee: Money,
    pub title_fee: Money,
    pub lender_points_percent: Percent,
    pub branch_gen_points_percent: Percent,
    pub interest_rate_percent: Percent,
    pub term_years: Decimal,
    pub debt_paid_off: Money,
    pub debt_monthly_payments: Money,
    pub previous_monthly_piti: Money,
    pub pure_cash_out: bool,
    pub overrides: NormalizationOverrides,
}

impl NormalizedScenario {
    pub fn from_input(input: &ScenarioInput) -> Self {
        let mut overrides = NormalizationOverrides::default();

        let raw_cash_out = money(input.cash_out_amount);
        let cash_out = if input.loan_program == LoanProgram::VaIrrrl {
            overrides.cash_out_ignored = !raw_cash_out.is_zero();
            Decimal::ZERO
        } else {
            raw_cash_out
        };

        let terms = match input.loan_program {
            LoanProgram::Conventional => {
                let buydown = if cash_out > Decimal::ZERO {
                    TemporaryBuydown::None
                } else {
                    input.temporary_buydown
                };
                ProgramTerms::Conventional {
                    buydown,
                    mi_annual_rate_percent: factor(input.mortgage_insurance_annual_rate_percent),
                }
            }
            LoanProgram::Va => ProgramTerms::Va {
                funding_fee_exempt: input.is_funding_fee_exempt,
            },
            LoanProgram::VaIrrrl => ProgramTerms::VaIrrrl {
                funding_fee_exempt: input.is_funding_fee_exempt,
            },
            LoanProgram::Fha => ProgramTerms::Fha,
        };

        let applied_buydown = match terms {
            ProgramTerms::Conventional { buydown, .. } => buydown,
            _ => TemporaryBuydown::None,
        };
        overrides.buydown_ignored = input.temporary_buydown != applied_buydown;

        NormalizedScenario {
            terms,
            appraised_value: money(input.appraised_value),
            current_balance: money(input.current_balance),
            cash_out,
            monthly_escrow: money(input.monthly_escrow),
            escrow_months: factor(input.escrow_months),
            bank_fee: money(input.bank_fee),
            title_fee: money(input.title_fee),
            lender_points_percent: factor(input.lender_points_percent),
            branch_gen_points_percent: factor(input.branch_gen_points_percent),
            interest_rate_percent: factor(input.interest_rate_percent),
            term_years: factor(input.term_years),
            debt_paid_off: money(input.debt_paid_off),
            debt_monthly_payments: money(input.debt_monthly_payments),
            previous_monthly_piti: money(input.previous_monthly_piti),
            pure_cash_out: input.pure_cash_out_no_consolidation,
            overrides,
        }
    }

    pub fn program(&self) -> LoanProgram {
        match self.terms {
            ProgramTerms::Conventional { .. } => LoanProgram::Conventional,
            ProgramTerms::Va { .. } => LoanProgram::Va,
            ProgramTerms::VaIrrrl { .. } => LoanProgram::VaIrrrl,
            ProgramTerms::Fha => LoanProgram::Fha,
        }
    }

    pub fn buydown(&self) -> TemporaryBuydown {
        match self.terms {
            ProgramTerms::Conventional { buydown, .. } => buydown,
            _ => TemporaryBuydown::None,
        }
    }

    pub fn total_points_percent(&self) -> Percent {
        self.lender_points_percent + self.branch_gen_points_percent
    }
}

fn money(value: Decimal) -> Decimal {
    value.clamp(-MAX_MONEY, MAX_MONEY)
}

fn factor(value: Decimal) -> Decimal {
    value.clamp(-MAX_FACTOR, MAX_FACTOR)
}

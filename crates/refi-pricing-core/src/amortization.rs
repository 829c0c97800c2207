use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Monthly periodic rate from an annual percentage. Negative rates floor at zero.
pub fn monthly_rate(annual_rate_percent: Percent) -> Decimal {
    annual_rate_percent.max(Decimal::ZERO) / dec!(100) / MONTHS_PER_YEAR
}

/// Number of monthly payments for a term in years, never less than one.
pub fn term_months(term_years: Decimal) -> u32 {
    let months = (term_years * MONTHS_PER_YEAR).round();
    if months <= Decimal::ONE {
        return 1;
    }
    months.to_u32().unwrap_or(u32::MAX)
}

/// Level payment for `nper` periods at periodic rate `rate`:
/// P * r / (1 - (1 + r)^-n), straight-line when the rate is zero.
pub fn level_payment(principal: Money, rate: Decimal, nper: u32) -> Money {
    let nper = nper.max(1);
    let straight_line = principal / Decimal::from(nper);
    if rate <= Decimal::ZERO {
        return straight_line;
    }

    // Discounting with v = 1/(1+r) shrinks toward zero, so long terms cannot overflow.
    let v = Decimal::ONE / (Decimal::ONE + rate);
    let discount = v.powu(u64::from(nper));
    let denominator = Decimal::ONE - discount;

    // Rates too small to register in 28 digits behave like zero.
    if denominator.is_zero() {
        return straight_line;
    }

    principal * rate / denominator
}

/// Standard fixed-rate monthly principal & interest.
pub fn monthly_payment(principal: Money, annual_rate_percent: Percent, term_years: Decimal) -> Money {
    level_payment(
        principal,
        monthly_rate(annual_rate_percent),
        term_months(term_years),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn test_thirty_year_payment() {
        // $300k at 6.5% over 30 years, ~$1,896.20/mo
        let payment = monthly_payment(dec!(300000), dec!(6.5), dec!(30));
        assert_close(payment, dec!(1896.20), dec!(0.01), "30y payment");
    }

    #[test]
    fn test_fifteen_year_payment() {
        // $200k at 5% over 15 years, ~$1,581.59/mo
        let payment = monthly_payment(dec!(200000), dec!(5), dec!(15));
        assert_close(payment, dec!(1581.59), dec!(0.01), "15y payment");
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let payment = monthly_payment(dec!(360000), Decimal::ZERO, dec!(30));
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_negative_rate_floors_at_zero() {
        let payment = monthly_payment(dec!(360000), dec!(-2), dec!(30));
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_zero_term_uses_single_payment() {
        assert_eq!(term_months(Decimal::ZERO), 1);
        assert_eq!(term_months(dec!(-5)), 1);
        let payment = monthly_payment(dec!(1200), Decimal::ZERO, Decimal::ZERO);
        assert_eq!(payment, dec!(1200));
    }

    #[test]
    fn test_fractional_term_rounds_to_whole_months() {
        assert_eq!(term_months(dec!(30)), 360);
        assert_eq!(term_months(dec!(15.5)), 186);
        assert_eq!(term_months(dec!(0.25)), 3);
    }

    #[test]
    fn test_very_long_term_does_not_overflow() {
        // Payment converges to interest-only: 100k * 1% = 1000
        let payment = level_payment(dec!(100000), dec!(0.01), 100_000);
        assert_close(payment, dec!(1000), dec!(0.0001), "perpetuity limit");
    }
}

//! Raw scenario input as it arrives from a quoting form.
//!
//! Every numeric field is deserialized leniently: numbers, numeric strings,
//! blanks, `null` and missing keys are all accepted, and anything that does
//! not parse becomes zero. Decimal arithmetic downstream therefore never sees
//! NaN or infinity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Loan program. Selects government fee rules and eligibility limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanProgram {
    #[default]
    #[serde(alias = "conventional", alias = "CONVENTIONAL")]
    Conventional,
    #[serde(rename = "VA", alias = "va", alias = "Va")]
    Va,
    #[serde(rename = "FHA", alias = "fha", alias = "Fha")]
    Fha,
    #[serde(
        rename = "VA_IRRRL",
        alias = "VA IRRRL",
        alias = "va_irrrl",
        alias = "VaIrrrl",
        alias = "IRRRL"
    )]
    VaIrrrl,
}

impl LoanProgram {
    pub fn label(&self) -> &'static str {
        match self {
            LoanProgram::Conventional => "Conventional",
            LoanProgram::Va => "VA",
            LoanProgram::Fha => "FHA",
            LoanProgram::VaIrrrl => "VA IRRRL",
        }
    }
}

/// Temporary rate buydown. Conventional rate/term refinances only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemporaryBuydown {
    #[default]
    #[serde(alias = "none", alias = "NONE")]
    None,
    /// Rate reduced 2% in year one and 1% in year two.
    #[serde(alias = "2-1", alias = "2/1", alias = "two_one")]
    TwoOne,
    /// Rate reduced 1% in year one.
    #[serde(alias = "1-0", alias = "1/0", alias = "one_zero")]
    OneZero,
}

impl TemporaryBuydown {
    pub fn label(&self) -> &'static str {
        match self {
            TemporaryBuydown::None => "None",
            TemporaryBuydown::TwoOne => "2-1",
            TemporaryBuydown::OneZero => "1-0",
        }
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Loan parameters for one refinance quote.
///
/// Monetary values are in currency units and rates in percent
/// (`6.625` means 6.625%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioInput {
    #[serde(deserialize_with = "lenient::variant")]
    pub loan_program: LoanProgram,
    #[serde(deserialize_with = "lenient::decimal")]
    pub appraised_value: Money,
    /// Payoff of the existing mortgage.
    #[serde(deserialize_with = "lenient::decimal")]
    pub current_balance: Money,
    /// Ignored for VA IRRRL.
    #[serde(deserialize_with = "lenient::decimal")]
    pub cash_out_amount: Money,
    #[serde(deserialize_with = "lenient::decimal")]
    pub monthly_escrow: Money,
    /// Months of escrow prepaid at closing.
    #[serde(deserialize_with = "lenient::decimal")]
    pub escrow_months: Decimal,
    #[serde(deserialize_with = "lenient::decimal")]
    pub bank_fee: Money,
    #[serde(deserialize_with = "lenient::decimal")]
    pub title_fee: Money,
    /// VA / VA IRRRL only; FHA always pays UFMIP.
    #[serde(deserialize_with = "lenient::flag")]
    pub is_funding_fee_exempt: bool,
    /// Conventional only, applied above 80% LTV.
    #[serde(deserialize_with = "lenient::decimal")]
    pub mortgage_insurance_annual_rate_percent: Percent,
    #[serde(deserialize_with = "lenient::decimal")]
    pub lender_points_percent: Percent,
    /// Branch-generated points; also drive the pricing tier.
    #[serde(deserialize_with = "lenient::decimal")]
    pub branch_gen_points_percent: Percent,
    #[serde(deserialize_with = "lenient::decimal")]
    pub interest_rate_percent: Percent,
    #[serde(deserialize_with = "lenient::decimal")]
    pub term_years: Decimal,
    #[serde(deserialize_with = "lenient::variant")]
    pub temporary_buydown: TemporaryBuydown,
    #[serde(deserialize_with = "lenient::decimal")]
    pub debt_paid_off: Money,
    #[serde(deserialize_with = "lenient::decimal")]
    pub debt_monthly_payments: Money,
    #[serde(deserialize_with = "lenient::decimal")]
    pub previous_monthly_piti: Money,
    /// Borrower takes all cash-out; debts are not consolidated.
    #[serde(deserialize_with = "lenient::flag")]
    pub pure_cash_out_no_consolidation: bool,
}

pub(crate) mod lenient {
    use rust_decimal::Decimal;
    use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
    use serde::Deserialize;
    use serde_json::Value;
    use std::fmt;
    use std::str::FromStr;

    pub fn decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        deserializer.deserialize_any(LenientDecimal)
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        deserializer.deserialize_any(LenientFlag)
    }

    /// Enum field where `null` or a blank string select the default variant.
    pub fn variant<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None => Ok(T::default()),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(T::default()),
            Some(value) => T::deserialize(value).map_err(de::Error::custom),
        }
    }

    /// Parse form text. Tolerates `$`, `%`, thousands separators and whitespace.
    /// Magnitudes beyond `Decimal` saturate to `±Decimal::MAX` so normalization
    /// can clamp them; text that is not a number becomes zero.
    pub fn parse_decimal(raw: &str) -> Decimal {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '$' | ',' | '%' | '_') && !c.is_whitespace())
            .collect();
        if cleaned.is_empty() {
            return Decimal::ZERO;
        }
        Decimal::from_str(&cleaned)
            .or_else(|_| Decimal::from_scientific(&cleaned))
            .unwrap_or_else(|_| saturate(&cleaned))
    }

    fn saturate(cleaned: &str) -> Decimal {
        match cleaned.parse::<f64>() {
            Ok(v) if v.is_finite() && v.abs() >= 1.0 => {
                if v.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                }
            }
            _ => Decimal::ZERO,
        }
    }

    struct LenientDecimal;

    impl<'de> Visitor<'de> for LenientDecimal {
        type Value = Decimal;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, a numeric string, a blank or null")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
            // NaN and infinities print as text that does not parse.
            Ok(parse_decimal(&v.to_string()))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
            Ok(parse_decimal(v))
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Decimal, E> {
            Ok(Decimal::ZERO)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Decimal, E> {
            Ok(Decimal::ZERO)
        }

        fn visit_none<E: de::Error>(self) -> Result<Decimal, E> {
            Ok(Decimal::ZERO)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Decimal, D::Error> {
            deserializer.deserialize_any(LenientDecimal)
        }
    }

    struct LenientFlag;

    impl<'de> Visitor<'de> for LenientFlag {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a boolean, 0/1, or a yes/no string")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            Ok(matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "y" | "1" | "on"
            ))
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_none<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<bool, D::Error> {
            deserializer.deserialize_any(LenientFlag)
        }
    }
}

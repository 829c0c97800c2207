use serde_json::Value;

use super::{format_scalar, lookup, result_of};

/// Headline figure for each kind of result, in priority order.
const PRIORITY_PATHS: [&str; 5] = [
    "payment.total_monthly_piti",
    "monthly_payment",
    "lowest_piti_index",
    "inferred_pricing_tier",
    "final_loan_amount",
];

/// Print just the headline value, falling back to the first field.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    for path in PRIORITY_PATHS {
        if let Some(val) = lookup(result, path).filter(|v| !v.is_null()) {
            println!("{}", format_scalar(val));
            return;
        }
    }

    if let Some((key, val)) = result.as_object().and_then(|m| m.iter().next()) {
        println!("{}: {}", key, format_scalar(val));
        return;
    }

    println!("{}", format_scalar(result));
}

pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` object of an envelope, or the value itself.
pub fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Scalar fields of a (possibly nested) object as `(dotted.key, value)`.
/// Arrays of objects are left out; they print as their own tables.
pub fn flatten_scalars(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    flatten_into("", map, &mut out);
    out
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_into(&path, inner, out),
            Value::Array(items) if items.iter().any(Value::is_object) => {}
            _ => out.push((path, val.clone())),
        }
    }
}

/// Arrays of objects inside a result object, by key.
pub fn record_arrays(map: &Map<String, Value>) -> Vec<(&str, &[Value])> {
    map.iter()
        .filter_map(|(key, val)| match val {
            Value::Array(items) if items.iter().any(Value::is_object) => {
                Some((key.as_str(), items.as_slice()))
            }
            _ => None,
        })
        .collect()
}

/// Lookup by dotted path.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |v, key| v.get(key))
}

pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_result() {
        let v = json!({
            "final_loan_amount": "302350",
            "payment": { "principal_and_interest": "1911.06", "monthly_mi": "0" },
            "rows": [{ "payment_number": 1 }],
            "warnings": ["a", "b"]
        });
        let flat = flatten_scalars(v.as_object().unwrap());
        let keys: Vec<&str> = flat.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "final_loan_amount",
                "payment.monthly_mi",
                "payment.principal_and_interest",
                "warnings"
            ]
        );
    }

    #[test]
    fn test_record_arrays() {
        let v = json!({ "rows": [{ "n": 1 }], "lowest_piti_index": 0 });
        let arrays = record_arrays(v.as_object().unwrap());
        assert_eq!(arrays.len(), 1);
        assert_eq!(arrays[0].0, "rows");
    }

    #[test]
    fn test_lookup_dotted() {
        let v = json!({ "payment": { "total_monthly_piti": "2100.5" } });
        assert_eq!(
            lookup(&v, "payment.total_monthly_piti"),
            Some(&json!("2100.5"))
        );
        assert_eq!(lookup(&v, "payment.missing"), None);
    }
}

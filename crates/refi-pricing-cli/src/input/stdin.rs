use serde_json::Value;
use std::io::{self, Read};

/// Scenario piped on stdin, or `None` when stdin is a terminal or blank.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

/// JSON first; anything else is read as YAML so `cat scenario.yaml | refi scenario` works.
fn parse_piped(text: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(Some(value));
    }
    let value: Value = serde_yaml::from_str(trimmed)
        .map_err(|e| format!("stdin is neither JSON nor YAML: {}", e))?;
    match value {
        Value::Object(_) => Ok(Some(value)),
        _ => Err("stdin must hold a JSON or YAML mapping".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_stdin_is_absent() {
        assert!(parse_piped("").unwrap().is_none());
        assert!(parse_piped(" \n\t").unwrap().is_none());
    }

    #[test]
    fn test_json_and_yaml_agree() {
        let from_json = parse_piped(r#"{"current_balance": 250000, "loan_program": "va"}"#)
            .unwrap()
            .unwrap();
        let from_yaml = parse_piped("current_balance: 250000\nloan_program: va\n")
            .unwrap()
            .unwrap();
        assert_eq!(from_json, json!({ "current_balance": 250000, "loan_program": "va" }));
        assert_eq!(from_yaml, from_json);
    }

    #[test]
    fn test_bare_scalar_rejected() {
        assert!(parse_piped("just some words").is_err());
    }
}

//! Coercions from loosely-typed payloads into canonical field values.
//!
//! Form submissions deliver every field as a string, JSON bodies deliver
//! typed values; both shapes go through the same functions here, so the
//! rules are testable without the HTTP layer.

use serde_json::Value;

/// parseInt-style integer coercion for form fields: numbers
/// truncate, strings parse their leading base-10 integer (`"12"` -> 12,
/// `"12 dona"` -> 12, `"abc"` -> 0), everything else is 0.
pub fn coerce_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => leading_int(s),
        _ => 0,
    }
}

fn leading_int(s: &str) -> i64 {
    let trimmed = s.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// The size field arrives in several shapes: a JSON-encoded array-as-string,
/// a comma-separated string, an actual array, or a bare scalar. Fallback
/// order for strings: JSON-array attempt, then comma-split. Every result is
/// a sequence of trimmed non-empty strings.
pub fn parse_size(value: &Value) -> Vec<String> {
    match value {
        Value::String(raw) => parse_size_string(raw),
        Value::Array(items) => items.iter().filter_map(element_text).collect(),
        Value::Null => Vec::new(),
        scalar => element_text(scalar).into_iter().collect(),
    }
}

fn parse_size_string(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items.iter().filter_map(element_text).collect(),
        // A successful parse that is not an array (a quoted string, a bare
        // number) is treated as the comma-separated form of its text.
        Ok(other) => split_csv(&scalar_text(&other)),
        Err(_) => split_csv(raw),
    }
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn element_text(value: &Value) -> Option<String> {
    let text = scalar_text(value);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Text form of a supplied scalar field; nulls, arrays and objects are not
/// text and read as absent.
pub fn opt_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A required field counts as supplied when present, non-null and, for
/// strings, non-blank.
pub fn is_supplied(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Non-empty trimmed string or nothing; used for the external `code`.
pub fn non_empty_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerce_int_parses_numbers_and_numeric_strings() {
        assert_eq!(coerce_int(&json!(42)), 42);
        assert_eq!(coerce_int(&json!(42.9)), 42);
        assert_eq!(coerce_int(&json!("42")), 42);
        assert_eq!(coerce_int(&json!(" -7 ")), -7);
        assert_eq!(coerce_int(&json!("12 dona")), 12);
    }

    #[test]
    fn coerce_int_defaults_to_zero() {
        assert_eq!(coerce_int(&json!("abc")), 0);
        assert_eq!(coerce_int(&json!("")), 0);
        assert_eq!(coerce_int(&json!(null)), 0);
        assert_eq!(coerce_int(&json!([1, 2])), 0);
    }

    #[test]
    fn size_comma_string_splits_and_trims() {
        assert_eq!(parse_size(&json!("S, M ,L")), vec!["S", "M", "L"]);
        assert_eq!(parse_size(&json!("S,,L, ")), vec!["S", "L"]);
    }

    #[test]
    fn size_json_array_string_parses_as_array() {
        assert_eq!(parse_size(&json!("[\"S\",\"M\"]")), vec!["S", "M"]);
        assert_eq!(parse_size(&json!("[\" S \", \"\"]")), vec!["S"]);
        // numeric elements keep their text form
        assert_eq!(parse_size(&json!("[36, 38]")), vec!["36", "38"]);
    }

    #[test]
    fn size_json_scalar_string_falls_back_to_comma_split() {
        // parses as a JSON string, not an array -> comma-split of its text
        assert_eq!(parse_size(&json!("\"S, M\"")), vec!["S", "M"]);
    }

    #[test]
    fn size_single_value_wraps() {
        assert_eq!(parse_size(&json!("L")), vec!["L"]);
        assert_eq!(parse_size(&json!(40)), vec!["40"]);
    }

    #[test]
    fn size_array_passes_through() {
        assert_eq!(parse_size(&json!(["S", "M"])), vec!["S", "M"]);
    }

    #[test]
    fn size_absent_is_empty() {
        assert_eq!(parse_size(&json!(null)), Vec::<String>::new());
    }

    #[test]
    fn is_supplied_rejects_blank_and_null() {
        assert!(!is_supplied(None));
        assert!(!is_supplied(Some(&json!(null))));
        assert!(!is_supplied(Some(&json!("  "))));
        assert!(is_supplied(Some(&json!("0"))));
        assert!(is_supplied(Some(&json!(0))));
    }
}

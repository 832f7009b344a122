//! Lenient numeric coercion for untrusted backend payloads.
//!
//! Downstream rendering does arithmetic and formatting on these values, so
//! every helper here returns a finite number. Malformed input coerces to 0.0,
//! never NaN and never an error.

use serde_json::Value;

/// Replace non-finite values with 0.0.
pub fn sanitize(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Parse a number out of display-formatted text ("12.5%", "+8.3", "$1,200").
/// Anything unparseable coerces to 0.0.
pub fn lenient_number(text: &str) -> f64 {
    strict_number(text).unwrap_or(0.0)
}

/// Like [`lenient_number`] but reports failure instead of coercing, for form
/// fields that must not be submitted partially typed.
pub fn strict_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('+')
        .chars()
        .filter(|c| !matches!(c, '$' | '%' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().map(sanitize)
}

/// Coerce any JSON value to a finite f64. Numbers pass through, numeric
/// strings are parsed, everything else becomes 0.0.
pub fn lenient_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => sanitize(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => lenient_number(s),
        _ => 0.0,
    }
}

/// Coerce an optional JSON field to a finite f64; absent fields are 0.0.
pub fn field_f64(value: Option<&Value>) -> f64 {
    value.map(lenient_f64).unwrap_or(0.0)
}

/// Coerce an optional JSON field to a non-empty string, substituting the
/// placeholder for absent, empty, or non-string values.
pub fn field_string(value: Option<&Value>, placeholder: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => placeholder.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_inputs_coerce_to_zero() {
        for text in ["", "abc", "--", "12.5.3", "%"] {
            assert_eq!(lenient_number(text), 0.0, "input {text:?}");
        }
        assert_eq!(field_f64(None), 0.0);
        assert_eq!(lenient_f64(&Value::Null), 0.0);
        assert_eq!(lenient_f64(&json!(true)), 0.0);
        assert_eq!(lenient_f64(&json!([1, 2])), 0.0);
    }

    #[test]
    fn formatted_numbers_parse() {
        assert_eq!(lenient_number("12.5"), 12.5);
        assert_eq!(lenient_number("+8.3%"), 8.3);
        assert_eq!(lenient_number("-0.45 %"), -0.45);
        assert_eq!(lenient_number("$1,200.50"), 1200.50);
        assert_eq!(lenient_f64(&json!("0.15")), 0.15);
        assert_eq!(lenient_f64(&json!(35.8)), 35.8);
    }

    #[test]
    fn strict_number_distinguishes_junk_from_empty() {
        assert_eq!(strict_number(""), None);
        assert_eq!(strict_number("   "), None);
        assert_eq!(strict_number("abc"), None);
        assert_eq!(strict_number("42"), Some(42.0));
    }

    #[test]
    fn field_string_placeholder() {
        assert_eq!(field_string(None, "N/A"), "N/A");
        assert_eq!(field_string(Some(&json!("")), "N/A"), "N/A");
        assert_eq!(field_string(Some(&json!(12)), "N/A"), "N/A");
        assert_eq!(field_string(Some(&json!("  VUG ")), "N/A"), "VUG");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn lenient_number_is_always_finite(s in ".{0,40}") {
            prop_assert!(lenient_number(&s).is_finite());
        }

        #[test]
        fn lenient_f64_is_always_finite(v in proptest::num::f64::ANY) {
            prop_assert!(lenient_f64(&serde_json::json!(v)).is_finite());
            prop_assert!(sanitize(v).is_finite());
        }
    }
}

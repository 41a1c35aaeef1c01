//! Display formatting for raw field values
//!
//! Converts a resolved value plus its field name into a human-legible string.
//! Numeric fields go through a keyword-based currency heuristic; numeric and
//! date-like strings are re-parsed and formatted the same way. The trigger
//! set and the exact string rules are load-bearing for existing documents and
//! must not be "improved".

use chrono::NaiveDate;
use regex_lite::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Rendered in place of a missing value.
pub const NOT_PROVIDED: &str = "Not provided";

/// Field-name substrings that mark a positive number as a currency amount.
const CURRENCY_KEYWORDS: [&str; 9] = [
    "income", "expense", "rent", "asset", "loan", "amount", "benefit", "salary", "saving",
];

/// Strings with zero or exactly two decimal digits are re-parsed as numbers.
/// One- and three-decimal strings deliberately fall through unchanged.
fn numeric_string_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+(\.\d{2})?$").unwrap())
}

fn iso_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap())
}

/// Whether a field name triggers the currency heuristic.
pub fn is_currency_field(field_name: &str) -> bool {
    let lower = field_name.to_lowercase();
    CURRENCY_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Whether a resolved value counts as absent: unresolvable, JSON null, or an
/// empty string.
pub fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None => true,
        Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Format a raw value for display.
///
/// # Example
///
/// ```
/// use doc_compose::format_value;
/// use serde_json::json;
///
/// assert_eq!(format_value(&json!(75000), "grossIncome"), "€75,000");
/// assert_eq!(format_value(&json!(75000), "pageCount"), "75,000");
/// assert_eq!(format_value(&json!(null), "anything"), "Not provided");
/// ```
pub fn format_value(value: &Value, field_name: &str) -> String {
    match value {
        Value::Null => NOT_PROVIDED.to_string(),
        Value::String(s) if s.is_empty() => NOT_PROVIDED.to_string(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Number(n) => format_number(n.as_f64().unwrap_or(0.0), field_name),
        Value::Array(items) => items
            .iter()
            .map(element_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
        Value::String(s) => format_string(s, field_name),
    }
}

/// Apply the currency heuristic to a number.
///
/// Currency-named fields with a positive value get a euro prefix and
/// thousands grouping; other values above 1000 are grouped plain; everything
/// else renders bare.
fn format_number(n: f64, field_name: &str) -> String {
    if is_currency_field(field_name) && n > 0.0 {
        format!("€{}", group_thousands(n))
    } else if n > 1000.0 {
        group_thousands(n)
    } else {
        plain_number(n)
    }
}

/// Bare numeric rendering: integers without a decimal point, fractions with
/// their natural precision.
fn plain_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Thousands-separated rendering. Fraction digits are kept as-is and never
/// zero-padded: `1200.5` renders as `1,200.5`, not `1,200.50`.
fn group_thousands(n: f64) -> String {
    let plain = plain_number(n);
    let (sign, rest) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rest, None),
    };
    let mut out = String::with_capacity(plain.len() + int_part.len() / 3);
    out.push_str(sign);
    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Plain text for an array element.
fn element_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// String formatting: numeric strings re-enter the currency heuristic,
/// leading ISO dates render as month/day/year, everything else passes
/// through unchanged.
fn format_string(s: &str, field_name: &str) -> String {
    if numeric_string_pattern().is_match(s) {
        if let Ok(n) = s.parse::<f64>() {
            return format_number(n, field_name);
        }
    }
    if iso_date_pattern().is_match(s) {
        return match NaiveDate::parse_from_str(&s[..10], "%Y-%m-%d") {
            Ok(date) => date.format("%-m/%-d/%Y").to_string(),
            Err(_) => s.to_string(),
        };
    }
    s.to_string()
}

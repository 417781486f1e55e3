use serde_json::Value;

/// Render a raw survey value the way the questionnaire runtime stringifies it.
///
/// Strings pass through unchanged, booleans become `true`/`false`, numbers use
/// their shortest decimal form (`5`, not `5.0`), `null` becomes `null` and
/// arrays are comma-joined. Objects collapse to a fixed placeholder so they
/// never accidentally match a scoring key.
pub fn string_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                // Nested nulls render empty inside a joined list
                Value::Null => String::new(),
                other => string_form(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(format_float).unwrap_or_default()
    }
}

/// Shortest round-trip form, switching to exponent notation outside
/// `[1e-6, 1e21)` (`1e+21`, `1.5e-7`). Negative zero renders as `0`.
fn format_float(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        // f64 Display already drops a trailing ".0"
        return f.to_string();
    }
    let exp = format!("{:e}", f);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

/// Parse the leading integer of a string.
///
/// Leading whitespace is skipped, then an optional sign. A `0x`/`0X` prefix
/// reads hexadecimal digits, otherwise decimal digits are read up to the first
/// non-digit. Returns `None` when no digit follows.
///
/// ```
/// use survey_score::survey::parse_int_prefix;
/// assert_eq!(parse_int_prefix("3.7"), Some(3.0));
/// assert_eq!(parse_int_prefix("  -4 stars"), Some(-4.0));
/// assert_eq!(parse_int_prefix("stars"), None);
/// ```
pub fn parse_int_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut parsed: Option<f64> = None;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => parsed = Some(parsed.unwrap_or(0.0) * radix as f64 + d as f64),
            None => break,
        }
    }

    parsed.map(|n| if negative { -n } else { n })
}

/// Numeric reading of a value that arrived as a string, if any.
pub fn numeric_string(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

/// Questionnaire truthiness: `null`, `false`, `0` and `""` are falsy, every
/// other value (arrays and objects included) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// True when `value` is a JSON number exactly equal to `target`.
pub fn is_number_equal(value: &Value, target: f64) -> bool {
    value.as_f64().is_some_and(|n| n == target)
}

use serde_json::Value;

/// Parse the longest leading decimal number in `raw`.
///
/// Leading whitespace is skipped; an optional sign, digits, an optional
/// fraction and an optional exponent are accepted, and anything after them is
/// ignored. No number, or a non-finite one, yields 0.
pub fn parse_number(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut mantissa_digits = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
            mantissa_digits += frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Loosely typed magnitude to a finite number; anything unusable becomes 0.
pub fn normalize(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_number(s),
        _ => 0.0,
    }
}

/// Whether a raw field counts as set: anything but null, `false`, numeric 0
/// or the empty string.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Normalized `primary` when it is set, otherwise normalized `fallback`.
///
/// The choice is made on the raw values, so a set but unusable primary such
/// as `"0"` or `"n/a"` wins and normalizes to 0.
pub fn first_truthy(primary: &Value, fallback: &Value) -> f64 {
    if is_truthy(primary) {
        normalize(primary)
    } else {
        normalize(fallback)
    }
}

/// Magnitude of a quantity expression such as `"150g"` or `" 12.5 ml"`.
///
/// Every character other than an ASCII digit or `.` is discarded first, so the
/// unit label (and any sign) is dropped.
pub fn parse_quantity(raw: &str) -> f64 {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    parse_number(&digits)
}

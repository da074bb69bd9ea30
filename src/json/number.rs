//! Canonical number rendering.
//!
//! Numbers are printed with the ECMAScript `Number::toString` algorithm
//! (RFC 8785 section 3.2.2.3): the shortest digit string that round-trips to
//! the same double, placed in plain notation when the decimal exponent is in
//! [-6, 21) and in `d.ddde±x` notation otherwise.

use super::types::Number;

/// Largest decimal exponent (exclusive) rendered without `e` notation.
const PLAIN_MAX_EXP: i32 = 21;

/// Smallest decimal exponent (exclusive) rendered without `e` notation.
const PLAIN_MIN_EXP: i32 = -6;

/// 2^63, the first double above `i64::MAX`.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// Convert an integer to a double only if no rounding occurs.
///
/// Two distinct integers that round to the same double would otherwise share
/// a key.
pub fn exact_f64(value: i64) -> Option<f64> {
    let f = value as f64;
    // `as i64` saturates, so 2^63 would falsely compare equal to i64::MAX
    if f < TWO_POW_63 && f as i64 == value {
        Some(f)
    } else {
        None
    }
}

/// Shortest round-trip digits and decimal point position of a positive,
/// finite double.
///
/// Returns `(digits, n)` such that the value equals `0.digits × 10^n`.
fn shortest_digits(value: f64) -> (String, i32) {
    // `{:e}` yields the shortest round-trip mantissa, e.g. "1.2345e-7"
    let sci = format!("{:e}", value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    (digits, exponent + 1)
}

/// Render a JSON number in canonical form.
pub fn format_number(number: Number) -> String {
    let value = number.as_f64();
    if value == 0.0 {
        return "0".to_string();
    }

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }

    let (digits, n) = shortest_digits(value.abs());
    let k = digits.len() as i32;

    if k <= n && n <= PLAIN_MAX_EXP {
        // Integer: digits followed by n - k zeros
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take((n - k) as usize));
    } else if 0 < n && n <= PLAIN_MAX_EXP {
        let (int_part, frac_part) = digits.split_at(n as usize);
        out.push_str(int_part);
        out.push('.');
        out.push_str(frac_part);
    } else if PLAIN_MIN_EXP < n && n <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-n) as usize));
        out.push_str(&digits);
    } else {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        let exp = n - 1;
        out.push('e');
        out.push(if exp < 0 { '-' } else { '+' });
        out.push_str(&exp.unsigned_abs().to_string());
    }

    out
}

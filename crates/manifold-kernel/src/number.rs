//! Real-number formatting at a configurable accuracy.
//!
//! Output that goes through these functions is what documentation examples
//! compare against, so a fixed number of significant digits keeps textual
//! output stable across platforms and compilers.

/// Round `value` to `digits` significant digits.
///
/// Zero digits, zero and non-finite values are returned unchanged.
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if digits == 0 || value == 0.0 || !value.is_finite() {
        return value;
    }
    let sci = format!("{:.*e}", (digits - 1) as usize, value);
    sci.parse().unwrap_or(value)
}

/// Format a real number.
///
/// `None` prints the shortest representation that round-trips (full natural
/// precision). `Some(n)` rounds to `n` significant digits and drops trailing
/// zeros, so `2.029883212819307` at 8 digits prints as `2.0298832`.
pub fn format_real(value: f64, accuracy: Option<u32>) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = match accuracy {
        Some(d) if d > 0 => d,
        _ => return value.to_string(),
    };

    let sci = format!("{:.*e}", (digits - 1) as usize, value);
    let exponent: i32 = sci
        .split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0);
    let rounded: f64 = sci.parse().unwrap_or(value);
    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    trim_fraction(format!("{:.*}", decimals, rounded))
}

/// Format a list of reals as a parenthesised tuple, e.g. `(0, 0, 0.5)`.
pub fn format_tuple(values: &[f64], accuracy: Option<u32>) -> String {
    let parts: Vec<String> = values.iter().map(|v| format_real(*v, accuracy)).collect();
    format!("({})", parts.join(", "))
}

fn trim_fraction(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

//! Number formatting for the display.

/// Format a number as its canonical decimal string.
///
/// Uses the shortest digit string that round-trips to the same `f64`.
/// Magnitudes in `[1e-7, 1e21)` are written positionally, everything else
/// in exponent form (`1e+21`, `1.5e-7`). `NaN` and the infinities keep
/// their names so the evaluator can read them back.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let name = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return name.to_string();
    }
    if value == 0.0 {
        // Covers -0 as well
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let (digits, exponent) = shortest_digits(value.abs());
    format!("{}{}", sign, layout(&digits, exponent))
}

/// Cut a display string down to at most `max_len` characters.
///
/// Truncates, never rounds.
pub fn truncate_display(text: &str, max_len: usize) -> String {
    text.chars().take(max_len).collect()
}

/// Split a positive finite number into its significant digits and the
/// decimal exponent of the first digit.
fn shortest_digits(value: f64) -> (String, i32) {
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    (digits, exponent.parse().unwrap_or(0))
}

fn layout(digits: &str, exponent: i32) -> String {
    let k = digits.len() as i32;
    let n = exponent + 1;

    if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let e_sign = if e >= 0 { '+' } else { '-' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, e_sign, e.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, e_sign, e.abs())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(1_000_000.0), "1000000");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_decimals() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333333333");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(-2.25), "-2.25");
    }

    #[test]
    fn test_small_numbers() {
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(0.0000001), "1e-7");
        assert_eq!(format_number(0.00000015), "1.5e-7");
    }

    #[test]
    fn test_large_numbers() {
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e21), "1.5e+21");
        assert_eq!(format_number(-2e30), "-2e+30");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_truncate_display() {
        assert_eq!(truncate_display("0.3333333333333333", 22), "0.3333333333333333");
        assert_eq!(
            truncate_display("123456789012345678901234", 22),
            "1234567890123456789012"
        );
        assert_eq!(truncate_display("0.6666666666666666", 5), "0.666");
    }
}

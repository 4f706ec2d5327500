//! Percentage rewriting.
//!
//! Turns keypad percentages into plain arithmetic before parsing:
//! - `X+Y%`, `X-Y%`, `X/Y%` become `X op (Y% of X)`
//! - any other `Y%` becomes a multiplication by `Y / 100`

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::format::format_number;

lazy_static! {
    /// `<integer> <op> <integer>%` where op is one of `+ - /`.
    static ref PERCENT_OF_LEFT: Regex = Regex::new(
        r"([0-9]+)\s*([+\-/])\s*([0-9]+)%"
    ).unwrap();

    /// A bare `<integer>%`.
    static ref PERCENT: Regex = Regex::new(r"([0-9]+)%").unwrap();
}

/// Run both rewrite passes.
pub fn rewrite_percentages(expression: &str) -> String {
    let first = rewrite_percent_of_left(expression);
    rewrite_bare_percent(&first).into_owned()
}

/// Pass 1: `X op Y%` becomes `X op Z` with `Z = Y / 100 * X`.
fn rewrite_percent_of_left(expression: &str) -> Cow<'_, str> {
    PERCENT_OF_LEFT.replace_all(expression, |caps: &Captures| {
        let left = &caps[1];
        let op = &caps[2];
        // Both captures are plain digit runs, so parsing cannot fail.
        let left_value: f64 = left.parse().unwrap_or(0.0);
        let percent: f64 = caps[3].parse().unwrap_or(0.0);
        let value = percent / 100.0 * left_value;
        format!("{} {} {}", left, op, format_number(value))
    })
}

/// Pass 2: `Y%` becomes `* (Y / 100)`.
///
/// The leading `*` is only emitted when an operand precedes the
/// percentage; at the start of the expression or after an operator the
/// factor stands alone.
fn rewrite_bare_percent(expression: &str) -> Cow<'_, str> {
    PERCENT.replace_all(expression, |caps: &Captures| {
        let start = caps.get(0).map_or(0, |m| m.start());
        let fraction = format!("({} / 100)", &caps[1]);
        if follows_operand(&expression[..start]) {
            format!("* {}", fraction)
        } else {
            fraction
        }
    })
}

fn follows_operand(prefix: &str) -> bool {
    prefix
        .chars()
        .rev()
        .find(|c| !c.is_whitespace())
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | ')' | '%'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of_left_operand() {
        assert_eq!(rewrite_percentages("100-10%"), "100 - 10");
        assert_eq!(rewrite_percentages("200+5%"), "200 + 10");
        assert_eq!(rewrite_percentages("50/50%"), "50 / 25");
    }

    #[test]
    fn test_percent_of_left_keeps_float_digits() {
        // 10 / 100 * 3 in double precision
        assert_eq!(rewrite_percentages("3+10%"), "3 + 0.30000000000000004");
    }

    #[test]
    fn test_bare_percent_standalone() {
        assert_eq!(rewrite_percentages("50%"), "(50 / 100)");
    }

    #[test]
    fn test_bare_percent_after_operator() {
        assert_eq!(rewrite_percentages("2*50%"), "2*(50 / 100)");
    }

    #[test]
    fn test_bare_percent_after_operand() {
        assert_eq!(rewrite_percentages("3.5%"), "3.* (5 / 100)");
        assert_eq!(rewrite_percentages("5%5%"), "(5 / 100)* (5 / 100)");
    }

    #[test]
    fn test_no_percent_untouched() {
        assert_eq!(rewrite_percentages("2+3*4"), "2+3*4");
        assert_eq!(rewrite_percentages(""), "");
    }
}

//! Sign toggle (`+/-`) policy.
//!
//! The toggle acts on the rightmost binary operator. Additive operators
//! are flipped in place (`5+3` <-> `5-3`); multiplicative operators keep
//! their place and the operand after them gets its own sign
//! (`5*3` <-> `5*-3`). Without an operator the whole expression is the
//! operand.

use super::key::BinaryOp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Replace the operator with another one.
    Flip(BinaryOp),
    /// Add or remove a leading `-` on the operand after the operator.
    SignOperand,
}

const RULES: [(BinaryOp, Strategy); 4] = [
    (BinaryOp::Add, Strategy::Flip(BinaryOp::Subtract)),
    (BinaryOp::Subtract, Strategy::Flip(BinaryOp::Add)),
    (BinaryOp::Multiply, Strategy::SignOperand),
    (BinaryOp::Divide, Strategy::SignOperand),
];

fn strategy_for(op: BinaryOp) -> Strategy {
    RULES
        .iter()
        .find(|(rule_op, _)| *rule_op == op)
        .map_or(Strategy::SignOperand, |(_, strategy)| *strategy)
}

/// Apply the sign toggle to `expression`.
pub fn toggle_sign(expression: &str) -> String {
    match last_binary_operator(expression) {
        Some((index, op)) => {
            let (head, tail) = expression.split_at(index);
            let segment = &tail[1..];
            match strategy_for(op) {
                Strategy::Flip(replacement) => {
                    format!("{}{}{}", head, replacement.symbol(), segment)
                }
                Strategy::SignOperand => toggle_operand(&expression[..=index], segment),
            }
        }
        None => toggle_operand("", expression),
    }
}

fn toggle_operand(prefix: &str, segment: &str) -> String {
    match segment.strip_prefix('-') {
        Some(unsigned) => format!("{}{}", prefix, unsigned),
        None => format!("{}-{}", prefix, segment),
    }
}

/// Find the rightmost binary operator and its byte index.
///
/// A `-` at the start of the expression or right after another operator
/// is the sign of the following operand, not an operator.
pub fn last_binary_operator(expression: &str) -> Option<(usize, BinaryOp)> {
    let mut previous: Option<char> = None;
    let mut found = None;

    for (index, c) in expression.char_indices() {
        if let Some(op) = BinaryOp::from_symbol(c) {
            let is_sign = c == '-' && previous.is_none_or(BinaryOp::is_symbol);
            if !is_sign {
                found = Some((index, op));
            }
        }
        previous = Some(c);
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_additive_operators_flip() {
        assert_eq!(toggle_sign("5+3"), "5-3");
        assert_eq!(toggle_sign("5-3"), "5+3");
        assert_eq!(toggle_sign("1+2-3"), "1+2+3");
    }

    #[test]
    fn test_multiplicative_operators_sign_operand() {
        assert_eq!(toggle_sign("5*3"), "5*-3");
        assert_eq!(toggle_sign("5*-3"), "5*3");
        assert_eq!(toggle_sign("8/2"), "8/-2");
        assert_eq!(toggle_sign("8/-2"), "8/2");
    }

    #[test]
    fn test_no_operator_signs_whole_expression() {
        assert_eq!(toggle_sign("42"), "-42");
        assert_eq!(toggle_sign("-42"), "42");
        assert_eq!(toggle_sign(""), "-");
        assert_eq!(toggle_sign("-"), "");
    }

    #[test]
    fn test_leading_sign_is_not_an_operator() {
        assert_eq!(toggle_sign("-5+3"), "-5-3");
        assert_eq!(toggle_sign("-5*3"), "-5*-3");
        assert_eq!(last_binary_operator("-5"), None);
        assert_eq!(last_binary_operator("5*-3"), Some((1, BinaryOp::Multiply)));
        assert_eq!(last_binary_operator("5-3"), Some((1, BinaryOp::Subtract)));
    }

    #[test]
    fn test_toggle_twice_restores() {
        for expression in ["7", "-7", "12+4", "12-4", "3*9", "3/9", "-2*-3", "1.5+2%"] {
            assert_eq!(toggle_sign(&toggle_sign(expression)), expression);
        }
    }

    #[test]
    fn test_every_operator_has_a_rule() {
        for op in BinaryOp::ALL {
            assert!(RULES.iter().any(|(rule_op, _)| *rule_op == op));
        }
    }
}

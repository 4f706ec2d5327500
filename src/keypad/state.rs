//! Expression entry state machine.
//!
//! [`InputState`] is a plain value; [`Keypad::apply`] consumes one state
//! and one key and returns the next state. Invalid keys leave the state
//! unchanged, so `apply` never fails.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::key::{BinaryOp, Key};
use super::sign::toggle_sign;
use crate::calculator::{Evaluator, MAX_RESULT_LENGTH};

pub const MAX_DIGITS_BEFORE_OPERATOR: usize = 10;
pub const MAX_DIGITS_AFTER_OPERATOR: usize = 11;

/// Input length limits of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Expression length allowed while building the left operand.
    pub max_digits_before_operator: usize,
    /// Digits allowed once an operator has been entered.
    pub max_digits_after_operator: usize,
    /// Results longer than this are truncated.
    pub max_result_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_digits_before_operator: MAX_DIGITS_BEFORE_OPERATOR,
            max_digits_after_operator: MAX_DIGITS_AFTER_OPERATOR,
            max_result_length: MAX_RESULT_LENGTH,
        }
    }
}

/// The display buffer and the two flags that drive key handling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    /// Text currently on the display.
    pub expression: String,
    /// The last accepted key was a binary operator.
    pub last_was_operator: bool,
    /// The display holds a computed result (or the error token).
    pub result_displayed: bool,
}

impl InputState {
    /// The empty start-up state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text for the display.
    pub fn display(&self) -> &str {
        &self.expression
    }
}

/// The keypad state machine with its limits and evaluator.
#[derive(Debug, Clone, Default)]
pub struct Keypad {
    limits: Limits,
    evaluator: Evaluator,
}

impl Keypad {
    /// Create a keypad with the given limits and error token.
    pub fn new(limits: Limits, error_token: impl Into<String>) -> Self {
        Self {
            evaluator: Evaluator::new(limits.max_result_length, error_token),
            limits,
        }
    }

    /// The limits this keypad enforces.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Compute the state that follows `state` when `key` is pressed.
    pub fn apply(&self, state: InputState, key: Key) -> InputState {
        let next = match key {
            Key::Clear => InputState::default(),
            Key::Equals => InputState {
                expression: self.evaluator.evaluate(&state.expression),
                last_was_operator: false,
                result_displayed: true,
            },
            Key::Operator(op) => Self::push_operator(state, op),
            Key::SignToggle => Self::toggle(state),
            Key::Digit(_) | Key::Decimal | Key::Percent => match key.as_char() {
                Some(c) => self.push_operand_char(state, c),
                None => state,
            },
        };

        trace!(
            %key,
            expression = %next.expression,
            last_was_operator = next.last_was_operator,
            result_displayed = next.result_displayed,
            "applied key"
        );
        next
    }

    /// Press every key in order, starting from `state`.
    pub fn apply_all(&self, state: InputState, keys: impl IntoIterator<Item = Key>) -> InputState {
        keys.into_iter().fold(state, |state, key| self.apply(state, key))
    }

    fn push_operator(mut state: InputState, op: BinaryOp) -> InputState {
        if state.expression.is_empty() || state.last_was_operator {
            debug!(operator = %op.symbol(), "operator rejected: no operand before it");
            return state;
        }

        state.expression.push(op.symbol());
        state.last_was_operator = true;
        state.result_displayed = false;
        state
    }

    fn toggle(mut state: InputState) -> InputState {
        if state.last_was_operator {
            debug!("sign toggle rejected: expression ends with an operator");
            return state;
        }

        state.expression = toggle_sign(&state.expression);
        state
    }

    /// Digits, the decimal point and `%`.
    fn push_operand_char(&self, mut state: InputState, c: char) -> InputState {
        if state.result_displayed {
            state.expression = c.to_string();
            state.result_displayed = false;
            return state;
        }

        let has_operator = state.expression.chars().any(BinaryOp::is_symbol);
        if has_operator {
            // Counts every digit on the display, not only the current operand
            let digits = state
                .expression
                .chars()
                .filter(char::is_ascii_digit)
                .count();
            if digits < self.limits.max_digits_after_operator {
                state.expression.push(c);
                state.last_was_operator = false;
            } else {
                debug!(digits, "input rejected: digit limit reached");
            }
            return state;
        }

        let len = state.expression.chars().count();
        let before = self.limits.max_digits_before_operator;
        let after = self.limits.max_digits_after_operator;
        if len < before || len < before + after {
            state.expression.push(c);
            state.last_was_operator = BinaryOp::is_symbol(c);
        } else {
            debug!(len, "input rejected: operand too long");
        }
        state
    }
}

/// Apply `key` to `state` with the default limits.
pub fn apply(state: InputState, key: Key) -> InputState {
    Keypad::default().apply(state, key)
}

//! Expression evaluation for the keypad.
//!
//! Rewrites percentages, evaluates the arithmetic and formats the result
//! for a fixed-width display. Parse failures never escape: they turn into
//! the error token.

use tracing::{debug, trace};

use super::format::{format_number, truncate_display};
use super::parser::{EvalError, eval_str};
use super::percentage::rewrite_percentages;

/// Text shown when an expression cannot be evaluated.
pub const ERROR_TOKEN: &str = "Error";

/// Longest result the display accepts before truncation.
pub const MAX_RESULT_LENGTH: usize = 22;

/// Result of evaluating a keypad expression.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// The expression evaluated to a number (possibly `Infinity` or `NaN`).
    Success {
        /// The original expression.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Formatted and truncated for the display.
        display_result: String,
    },
    /// The expression could not be parsed.
    Error {
        /// The original expression.
        expression: String,
        /// Why parsing failed.
        error: EvalError,
        /// Error token to display.
        message: String,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (result or error token).
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Error { message, .. } => message,
        }
    }

    /// Get the numeric value (only for successful results).
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value, .. } => Some(*value),
            Self::Error { .. } => None,
        }
    }
}

/// Evaluates expressions with a given display width and error token.
#[derive(Clone, Debug)]
pub struct Evaluator {
    max_result_length: usize,
    error_token: String,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(MAX_RESULT_LENGTH, ERROR_TOKEN)
    }
}

impl Evaluator {
    /// Create an evaluator that truncates results to `max_result_length`.
    pub fn new(max_result_length: usize, error_token: impl Into<String>) -> Self {
        Self {
            max_result_length,
            error_token: error_token.into(),
        }
    }

    /// Text shown for expressions that fail to parse.
    pub fn error_token(&self) -> &str {
        &self.error_token
    }

    /// Evaluate an expression into a structured result.
    pub fn evaluate_expression(&self, input: &str) -> CalcResult {
        let expression = input.to_string();
        let rewritten = rewrite_percentages(input);
        trace!(%expression, %rewritten, "rewrote percentages");

        let outcome = if rewritten.trim().is_empty() {
            Err(EvalError::Empty)
        } else {
            eval_str(&rewritten)
        };

        match outcome {
            Ok(value) => CalcResult::Success {
                expression,
                display_result: truncate_display(&format_number(value), self.max_result_length),
                value,
            },
            Err(error) => {
                debug!(%expression, %error, "evaluation failed");
                CalcResult::Error {
                    expression,
                    error,
                    message: self.error_token.clone(),
                }
            }
        }
    }

    /// Evaluate an expression straight to display text.
    pub fn evaluate(&self, input: &str) -> String {
        self.evaluate_expression(input).display().to_string()
    }
}

/// Evaluate an expression with the default display settings.
pub fn evaluate_expression(input: &str) -> CalcResult {
    Evaluator::default().evaluate_expression(input)
}

/// Evaluate an expression to display text with the default settings.
pub fn evaluate(input: &str) -> String {
    Evaluator::default().evaluate(input)
}

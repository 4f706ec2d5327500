//! Calculator module for evaluating keypad expressions.
//!
//! This module provides functionality to:
//! - Rewrite percentages into plain arithmetic
//! - Parse and evaluate arithmetic without executing the input as code
//! - Format results for a fixed-width display

mod evaluation;
mod format;
mod parser;
mod percentage;

pub use evaluation::{
    CalcResult, ERROR_TOKEN, Evaluator, MAX_RESULT_LENGTH, evaluate, evaluate_expression,
};
pub use format::{format_number, truncate_display};
pub use parser::{EvalError, Token, eval_str};
pub use percentage::rewrite_percentages;
